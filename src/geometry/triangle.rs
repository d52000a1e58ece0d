//! World-space triangles with half-space clipping, area-uniform sampling,
//! and unit-sphere projection.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Denominator guard for edge/plane intersection. Below this the edge is
/// effectively parallel to the plane and no crossing point is reported.
const INTERSECT_EPSILON: f32 = 1e-8;

/// Result of clipping a triangle against a half-space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriangleSlice {
    /// Triangle lies entirely outside the half-space
    Empty,
    /// Clip produced a single triangle
    One(Triangle),
    /// Clip produced a quad, re-triangulated as a fan of two
    Two(Triangle, Triangle),
}

/// Triangle in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    /// First vertex
    pub a: Vec3,
    /// Second vertex
    pub b: Vec3,
    /// Third vertex
    pub c: Vec3,
}

impl Triangle {
    /// Create a new triangle
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Triangle { a, b, c }
    }

    /// Face normal (zero for degenerate triangles)
    pub fn normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a).normalize_or_zero()
    }

    /// Surface area
    pub fn area(&self) -> f32 {
        (self.b - self.a).cross(self.c - self.a).length() * 0.5
    }

    /// Area-uniform point via barycentric coordinates.
    ///
    /// `u1`, `u2` in `[0, 1)`; when `u1 + u2 > 1` both are reflected to
    /// fold the unit square onto the unit triangle.
    pub fn random_point(&self, u1: f32, u2: f32) -> Vec3 {
        let (u1, u2) = if u1 + u2 > 1.0 {
            (1.0 - u1, 1.0 - u2)
        } else {
            (u1, u2)
        };
        self.a + (self.b - self.a) * u1 + (self.c - self.a) * u2
    }

    /// Project each vertex onto the unit sphere centered at `origin`.
    ///
    /// Sampling the projected triangle is uniform in angle rather than in
    /// surface area, so distant large faces don't dominate nearby ones.
    pub fn project_sphere(&self, origin: Vec3) -> Triangle {
        Triangle {
            a: (self.a - origin).normalize_or_zero() + origin,
            b: (self.b - origin).normalize_or_zero() + origin,
            c: (self.c - origin).normalize_or_zero() + origin,
        }
    }

    /// Clip against the half-space on the normal side of a plane.
    ///
    /// A vertex with signed distance `>= 0` counts as inside; exactly
    /// on-plane vertices are kept, which can yield zero-area slivers at
    /// exact boundary alignment.
    pub fn slice(&self, plane_point: Vec3, plane_normal: Vec3) -> TriangleSlice {
        let da = (self.a - plane_point).dot(plane_normal);
        let db = (self.b - plane_point).dot(plane_normal);
        let dc = (self.c - plane_point).dot(plane_normal);

        let inside = [da >= 0.0, db >= 0.0, dc >= 0.0];
        match inside.iter().filter(|&&i| i).count() {
            3 => TriangleSlice::One(*self),
            0 => TriangleSlice::Empty,
            1 => {
                // Rotate so the inside vertex is first
                let (v0, v1, v2, d0, d1, d2) = if inside[0] {
                    (self.a, self.b, self.c, da, db, dc)
                } else if inside[1] {
                    (self.b, self.c, self.a, db, dc, da)
                } else {
                    (self.c, self.a, self.b, dc, da, db)
                };
                match (
                    intersect_edge(v0, v1, d0, d1),
                    intersect_edge(v0, v2, d0, d2),
                ) {
                    (Some(i01), Some(i02)) => TriangleSlice::One(Triangle::new(v0, i01, i02)),
                    // Near-on-plane crossing; keep the triangle rather
                    // than propagate a NaN intersection
                    _ => TriangleSlice::One(*self),
                }
            }
            _ => {
                // Two inside: rotate so the outside vertex is last
                let (v0, v1, v2, d0, d1, d2) = if !inside[2] {
                    (self.a, self.b, self.c, da, db, dc)
                } else if !inside[0] {
                    (self.b, self.c, self.a, db, dc, da)
                } else {
                    (self.c, self.a, self.b, dc, da, db)
                };
                match (
                    intersect_edge(v1, v2, d1, d2),
                    intersect_edge(v0, v2, d0, d2),
                ) {
                    (Some(i12), Some(i02)) => TriangleSlice::Two(
                        Triangle::new(v0, v1, i12),
                        Triangle::new(v0, i12, i02),
                    ),
                    _ => TriangleSlice::One(*self),
                }
            }
        }
    }
}

/// Crossing point of the segment `p0`-`p1` with the plane, given signed
/// distances of the endpoints. `None` when the segment is effectively
/// parallel to the plane.
fn intersect_edge(p0: Vec3, p1: Vec3, d0: f32, d1: f32) -> Option<Vec3> {
    let denom = d0 - d1;
    if denom.abs() < INTERSECT_EPSILON {
        return None;
    }
    let t = d0 / denom;
    Some(p0 + (p1 - p0) * t)
}
