//! Per-ray diagnostics produced by a visibility test.
//!
//! The ray list is retained on the test instance after `perform_test` so
//! hosts can render or log the probes that produced a score.

use glam::{Vec2, Vec3};

use crate::types::{ColliderId, EntityId};

/// What a single occlusion probe hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<P> {
    /// World-space hit point
    pub point: P,
    /// Surface normal at the hit
    pub normal: P,
    /// Distance from the ray origin
    pub distance: f32,
    /// `distance` as a fraction of the origin-to-target distance
    pub distance_fraction: f32,
    /// Collider that was hit
    pub collider: ColliderId,
    /// Whether this hit blocks sight of the target. Hits on the target
    /// itself or on the sensor's own colliders are recorded but do not
    /// obstruct.
    pub obstructing: bool,
}

/// One occlusion probe: origin, aim point, what it hit, and the
/// distance/angle multiplier that applies if the probe is clear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LosRay<P> {
    /// Sensor position the probe was cast from
    pub origin: P,
    /// Point on (or inside) the target the probe aimed at
    pub target: P,
    /// Host-declared aim point this probe tested, if any
    pub aim_point: Option<EntityId>,
    /// Nearest hit reported by the scene, if any
    pub hit: Option<RayHit<P>>,
    /// Distance/angle falloff multiplier for this probe, in `[0, 1]`
    pub visibility_multiplier: f32,
}

impl<P> LosRay<P> {
    /// Whether something blocks sight of the target along this probe.
    pub fn is_obstructed(&self) -> bool {
        self.hit.as_ref().is_some_and(|h| h.obstructing)
    }

    /// This probe's contribution to the aggregate: zero when obstructed,
    /// otherwise the falloff multiplier.
    pub fn visibility(&self) -> f32 {
        if self.is_obstructed() {
            0.0
        } else {
            self.visibility_multiplier
        }
    }
}

/// Probe in a 3D scene
pub type LosRay3 = LosRay<Vec3>;

/// Probe in a 2D scene
pub type LosRay2 = LosRay<Vec2>;
