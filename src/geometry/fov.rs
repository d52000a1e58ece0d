//! Field-of-view clippers: compose cutting planes from view half-angles
//! and a sensor pose, then carve geometry lists down to the visible-angle
//! subset.
//!
//! Plane recomputation is memoized on the input tuple. A stationary sensor
//! re-running its test every tick pays for the trigonometry only once;
//! staleness is an explicit `recompute_if_stale` call, not a hidden
//! getter side effect.

use glam::{Quat, Vec2, Vec3};

use super::edge::Edge2d;
use super::plane::{CuttingPlane, CuttingPlane2};
use super::triangle::Triangle;

/// View frustum clipper for 3D sensors: four planes (right, left, top,
/// bottom) derived from horizontal/vertical view angles and a pose.
#[derive(Debug, Clone)]
pub struct FieldOfView {
    planes: [CuttingPlane; 4],
    key: Option<(f32, f32, Vec3, Quat)>,
}

impl FieldOfView {
    /// Create with no planes computed yet.
    pub fn new() -> Self {
        let degenerate = CuttingPlane::new(Vec3::ZERO, Vec3::Z);
        FieldOfView {
            planes: [degenerate; 4],
            key: None,
        }
    }

    /// Rebuild the planes if any input changed since the last call.
    ///
    /// Angles are full view angles in degrees, clamped to `[0, 180]`.
    /// Returns `true` if the planes were recomputed.
    pub fn recompute_if_stale(
        &mut self,
        horizontal_angle: f32,
        vertical_angle: f32,
        position: Vec3,
        rotation: Quat,
    ) -> bool {
        let horizontal_angle = horizontal_angle.clamp(0.0, 180.0);
        let vertical_angle = vertical_angle.clamp(0.0, 180.0);
        let key = (horizontal_angle, vertical_angle, position, rotation);
        if self.key == Some(key) {
            return false;
        }

        let h = (horizontal_angle * 0.5).to_radians();
        let v = (vertical_angle * 0.5).to_radians();
        let (sin_h, cos_h) = h.sin_cos();
        let (sin_v, cos_v) = v.sin_cos();

        // Inward normals in the sensor's local frame (+Z forward, +X right,
        // +Y up). At a half-angle of 90 degrees each normal degenerates to
        // +Z and the plane keeps the whole forward hemisphere.
        self.planes = [
            CuttingPlane::new(position, rotation * Vec3::new(-cos_h, 0.0, sin_h)),
            CuttingPlane::new(position, rotation * Vec3::new(cos_h, 0.0, sin_h)),
            CuttingPlane::new(position, rotation * Vec3::new(0.0, -cos_v, sin_v)),
            CuttingPlane::new(position, rotation * Vec3::new(0.0, cos_v, sin_v)),
        ];
        self.key = Some(key);
        true
    }

    /// The current planes, in clip order (right, left, top, bottom).
    pub fn planes(&self) -> &[CuttingPlane; 4] {
        &self.planes
    }

    /// Clip a triangle list against all four planes in order.
    pub fn clip(&self, triangles: &mut Vec<Triangle>, scratch: &mut Vec<Triangle>) {
        for plane in &self.planes {
            plane.clip(triangles, scratch);
        }
    }
}

impl Default for FieldOfView {
    fn default() -> Self {
        FieldOfView::new()
    }
}

/// View wedge clipper for 2D sensors: two lines (right, left).
#[derive(Debug, Clone)]
pub struct FieldOfView2d {
    planes: [CuttingPlane2; 2],
    key: Option<(f32, Vec2, f32)>,
}

impl FieldOfView2d {
    /// Create with no planes computed yet.
    pub fn new() -> Self {
        let degenerate = CuttingPlane2::new(Vec2::ZERO, Vec2::X);
        FieldOfView2d {
            planes: [degenerate; 2],
            key: None,
        }
    }

    /// Rebuild the lines if any input changed since the last call.
    ///
    /// `angle` is the full view angle in degrees, clamped to `[0, 180]`;
    /// `rotation` is the facing direction in radians.
    /// Returns `true` if the lines were recomputed.
    pub fn recompute_if_stale(&mut self, angle: f32, position: Vec2, rotation: f32) -> bool {
        let angle = angle.clamp(0.0, 180.0);
        let key = (angle, position, rotation);
        if self.key == Some(key) {
            return false;
        }

        let h = (angle * 0.5).to_radians();
        let (sin_h, cos_h) = h.sin_cos();
        let forward = Vec2::from_angle(rotation);
        let right = -forward.perp();

        self.planes = [
            CuttingPlane2::new(position, right * -cos_h + forward * sin_h),
            CuttingPlane2::new(position, right * cos_h + forward * sin_h),
        ];
        self.key = Some(key);
        true
    }

    /// The current lines, in clip order (right, left).
    pub fn planes(&self) -> &[CuttingPlane2; 2] {
        &self.planes
    }

    /// Clip an edge list against both lines in order.
    pub fn clip(&self, edges: &mut Vec<Edge2d>) {
        for plane in &self.planes {
            plane.clip(edges);
        }
    }
}

impl Default for FieldOfView2d {
    fn default() -> Self {
        FieldOfView2d::new()
    }
}
