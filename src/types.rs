//! Core types shared across the crate: opaque scene handles, bounding
//! volumes, and the `Signal` that flows in and out of a visibility test.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Opaque handle to an entity in the host scene.
///
/// The crate never dereferences this; it only compares handles to decide
/// whether a ray hit belongs to the target being tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Opaque handle to a collider in the host scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColliderId(pub u64);

/// Bitmask selecting which scene layers block occlusion rays.
///
/// Passed through to [`SceneQuery3::raycast`](crate::scene::SceneQuery3::raycast)
/// unchanged; the host decides what each bit means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Mask matching every layer.
    pub const ALL: LayerMask = LayerMask(u32::MAX);
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::ALL
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb { min, max }
    }

    /// Create from center and half-extents
    pub fn from_center_extents(center: Vec3, half_extents: Vec3) -> Self {
        Aabb {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get size
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if point is inside
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// The 8 corner points, min corner first.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }
}

/// Axis-aligned rectangle (2D analogue of [`Aabb`])
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum corner
    pub min: Vec2,
    /// Maximum corner
    pub max: Vec2,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Rect { min, max }
    }

    /// Create from center and half-extents
    pub fn from_center_extents(center: Vec2, half_extents: Vec2) -> Self {
        Rect {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get center point
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Get size
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Check if point is inside
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// The 4 corner points, min corner first.
    pub fn corners(&self) -> [Vec2; 4] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec2::new(lo.x, lo.y),
            Vec2::new(hi.x, lo.y),
            Vec2::new(lo.x, hi.y),
            Vec2::new(hi.x, hi.y),
        ]
    }
}

/// A detectable target and its base detectability.
///
/// A visibility test consumes a `Signal` describing the target and produces
/// a `Signal` whose `strength` has been scaled by the computed visibility
/// (zero when the target is judged not visible).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Signal<S> {
    /// Entity the signal belongs to
    pub entity: EntityId,
    /// World-space bounds of the target
    pub shape: S,
    /// Base detectability in `[0, 1]` (host-defined scale)
    pub strength: f32,
}

impl<S> Signal<S> {
    /// Create a new signal
    pub fn new(entity: EntityId, shape: S, strength: f32) -> Self {
        Signal {
            entity,
            shape,
            strength,
        }
    }
}

/// Signal over a 3D bounding box
pub type Signal3 = Signal<Aabb>;

/// Signal over a 2D bounding rectangle
pub type Signal2 = Signal<Rect>;
