//! 2D line segments: the planar analogue of [`Triangle`](super::Triangle)
//! for sensors operating in a 2D scene.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Denominator guard for segment/line intersection.
const INTERSECT_EPSILON: f32 = 1e-8;

/// Line segment in 2D world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge2d {
    /// First endpoint
    pub a: Vec2,
    /// Second endpoint
    pub b: Vec2,
}

impl Edge2d {
    /// Create a new edge
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Edge2d { a, b }
    }

    /// Segment length
    pub fn length(&self) -> f32 {
        (self.b - self.a).length()
    }

    /// Length-uniform point, `u` in `[0, 1)`
    pub fn random_point(&self, u: f32) -> Vec2 {
        self.a + (self.b - self.a) * u
    }

    /// Project each endpoint onto the unit circle centered at `origin`.
    pub fn project_circle(&self, origin: Vec2) -> Edge2d {
        Edge2d {
            a: (self.a - origin).normalize_or_zero() + origin,
            b: (self.b - origin).normalize_or_zero() + origin,
        }
    }

    /// Clip against the half-plane on the normal side of a line.
    ///
    /// An endpoint with signed distance `>= 0` counts as inside. Unlike the
    /// triangle case there are only 0/1 outcomes: the kept part of a
    /// segment is always a segment.
    pub fn slice(&self, line_point: Vec2, line_normal: Vec2) -> Option<Edge2d> {
        let da = (self.a - line_point).dot(line_normal);
        let db = (self.b - line_point).dot(line_normal);

        match (da >= 0.0, db >= 0.0) {
            (true, true) => Some(*self),
            (false, false) => None,
            (a_inside, _) => {
                let denom = da - db;
                if denom.abs() < INTERSECT_EPSILON {
                    // Effectively on the line; keep as-is
                    return Some(*self);
                }
                let t = da / denom;
                let crossing = self.a + (self.b - self.a) * t;
                if a_inside {
                    Some(Edge2d::new(self.a, crossing))
                } else {
                    Some(Edge2d::new(crossing, self.b))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge() -> Edge2d {
        Edge2d::new(Vec2::new(-2.0, 1.0), Vec2::new(2.0, 1.0))
    }

    #[test]
    fn test_length() {
        assert!((edge().length() - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_slice_fully_inside() {
        let result = edge().slice(Vec2::new(0.0, 0.0), Vec2::Y);
        assert_eq!(result, Some(edge()));
    }

    #[test]
    fn test_slice_fully_outside() {
        let result = edge().slice(Vec2::new(0.0, 2.0), Vec2::Y);
        assert_eq!(result, None);
    }

    #[test]
    fn test_slice_crossing() {
        // Keep x >= 0: left endpoint clipped to the y axis
        let result = edge().slice(Vec2::ZERO, Vec2::X).unwrap();
        assert!((result.a - Vec2::new(0.0, 1.0)).length() < 1e-6);
        assert!((result.b - Vec2::new(2.0, 1.0)).length() < 1e-6);

        // Keep x <= 0: the other half
        let result = edge().slice(Vec2::ZERO, -Vec2::X).unwrap();
        assert!((result.a - Vec2::new(-2.0, 1.0)).length() < 1e-6);
        assert!((result.b - Vec2::new(0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_random_point_on_segment() {
        let e = edge();
        for u in [0.0, 0.25, 0.5, 0.99] {
            let p = e.random_point(u);
            assert!((p.y - 1.0).abs() < 1e-6);
            assert!(p.x >= e.a.x - 1e-6 && p.x <= e.b.x + 1e-6);
        }
    }

    #[test]
    fn test_project_circle() {
        let origin = Vec2::new(0.0, -3.0);
        let projected = edge().project_circle(origin);
        assert!(((projected.a - origin).length() - 1.0).abs() < 1e-6);
        assert!(((projected.b - origin).length() - 1.0).abs() < 1e-6);
    }
}
