//! Half-space cutting planes and whole-list clip passes.
//!
//! A clip pass is an explicit two-buffer sweep: the current geometry list
//! is drained, each element is sliced against the plane, and survivors are
//! written to a scratch buffer that is then swapped back. Each plane clips
//! the full current set exactly once; when a slice splits a triangle in
//! two, the second piece is first seen by the *next* plane's pass.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::edge::Edge2d;
use super::triangle::{Triangle, TriangleSlice};

/// Half-space in 3D: "inside" is the side the normal points toward
/// (non-negative signed distance).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuttingPlane {
    /// A point on the plane
    pub point: Vec3,
    /// Unit normal; inside is the half-space it points into
    pub normal: Vec3,
}

impl CuttingPlane {
    /// Create a new cutting plane
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        CuttingPlane { point, normal }
    }

    /// Signed distance from the plane (positive on the inside)
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        (p - self.point).dot(self.normal)
    }

    /// Whether a point is inside the half-space (on-plane counts as inside)
    pub fn contains(&self, p: Vec3) -> bool {
        self.signed_distance(p) >= 0.0
    }

    /// Clip every triangle in `current` against this plane.
    ///
    /// `scratch` is caller-supplied to keep allocations out of the per-test
    /// path; its contents are discarded.
    pub fn clip(&self, current: &mut Vec<Triangle>, scratch: &mut Vec<Triangle>) {
        scratch.clear();
        for triangle in current.drain(..) {
            match triangle.slice(self.point, self.normal) {
                TriangleSlice::Empty => {}
                TriangleSlice::One(t) => scratch.push(t),
                TriangleSlice::Two(t1, t2) => {
                    scratch.push(t1);
                    scratch.push(t2);
                }
            }
        }
        std::mem::swap(current, scratch);
    }
}

/// Half-plane in 2D
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuttingPlane2 {
    /// A point on the line
    pub point: Vec2,
    /// Unit normal; inside is the half-plane it points into
    pub normal: Vec2,
}

impl CuttingPlane2 {
    /// Create a new cutting line
    pub fn new(point: Vec2, normal: Vec2) -> Self {
        CuttingPlane2 { point, normal }
    }

    /// Signed distance from the line (positive on the inside)
    pub fn signed_distance(&self, p: Vec2) -> f32 {
        (p - self.point).dot(self.normal)
    }

    /// Whether a point is inside the half-plane (on-line counts as inside)
    pub fn contains(&self, p: Vec2) -> bool {
        self.signed_distance(p) >= 0.0
    }

    /// Clip every edge in `edges` against this line, in place.
    ///
    /// Edges never split, so no scratch buffer is needed.
    pub fn clip(&self, edges: &mut Vec<Edge2d>) {
        edges.retain_mut(|edge| match edge.slice(self.point, self.normal) {
            Some(kept) => {
                *edge = kept;
                true
            }
            None => false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_keeps_splits_and_discards() {
        // Three triangles against the x >= 0 half-space: one fully inside,
        // one straddling (splits into two), one fully outside.
        let inside = Triangle::new(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        );
        let straddling = Triangle::new(
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        );
        let outside = Triangle::new(
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        );

        let plane = CuttingPlane::new(Vec3::ZERO, Vec3::X);
        let mut current = vec![inside, straddling, outside];
        let mut scratch = Vec::new();
        plane.clip(&mut current, &mut scratch);

        // inside kept whole + straddling split into two
        assert_eq!(current.len(), 3);
        for t in &current {
            for v in [t.a, t.b, t.c] {
                assert!(v.x >= -1e-6, "vertex {v} survived outside the half-space");
            }
        }
    }

    #[test]
    fn test_sequential_planes_compose() {
        // A big square (two triangles) clipped to the first quadrant
        let square = [
            Triangle::new(
                Vec3::new(-2.0, -2.0, 0.0),
                Vec3::new(2.0, -2.0, 0.0),
                Vec3::new(2.0, 2.0, 0.0),
            ),
            Triangle::new(
                Vec3::new(-2.0, -2.0, 0.0),
                Vec3::new(2.0, 2.0, 0.0),
                Vec3::new(-2.0, 2.0, 0.0),
            ),
        ];
        let mut current = square.to_vec();
        let mut scratch = Vec::new();
        CuttingPlane::new(Vec3::ZERO, Vec3::X).clip(&mut current, &mut scratch);
        CuttingPlane::new(Vec3::ZERO, Vec3::Y).clip(&mut current, &mut scratch);

        let total: f32 = current.iter().map(|t| t.area()).sum();
        // Quarter of the 4x4 square remains
        assert!((total - 4.0).abs() < 1e-4, "clipped area {total}");
        for t in &current {
            for v in [t.a, t.b, t.c] {
                assert!(v.x >= -1e-5 && v.y >= -1e-5);
            }
        }
    }

    #[test]
    fn test_clip_edges_in_place() {
        let edges = vec![
            Edge2d::new(Vec2::new(-2.0, 0.0), Vec2::new(2.0, 0.0)),
            Edge2d::new(Vec2::new(-3.0, 1.0), Vec2::new(-1.0, 1.0)),
        ];
        let line = CuttingPlane2::new(Vec2::ZERO, Vec2::X);
        let mut list = edges;
        line.clip(&mut list);

        assert_eq!(list.len(), 1);
        assert!(list[0].a.x >= -1e-6 && list[0].b.x >= -1e-6);
    }

    #[test]
    fn test_signed_distance() {
        let plane = CuttingPlane::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!((plane.signed_distance(Vec3::new(0.0, 0.0, 8.0)) - 3.0).abs() < 1e-6);
        assert!(plane.contains(Vec3::new(1.0, 1.0, 5.0)));
        assert!(!plane.contains(Vec3::ZERO));
    }
}
