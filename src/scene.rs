//! Host capability interfaces.
//!
//! This crate has no scene graph and no physics engine of its own; the
//! host supplies ray intersection, collider ownership resolution, and
//! optional per-target aim points through these traits. A test instance
//! holds its scene by value, so hosts typically implement the trait on a
//! shared reference (`&MyScene`) or a cheap handle.

use glam::{Vec2, Vec3};

use crate::config::TriggerPolicy;
use crate::types::{ColliderId, EntityId, LayerMask};

/// Result of a single 3D occlusion probe supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit3 {
    /// World-space hit point
    pub point: Vec3,
    /// Surface normal at the hit
    pub normal: Vec3,
    /// Distance from the ray origin
    pub distance: f32,
    /// Collider that was hit
    pub collider: ColliderId,
    /// Entity the collider belongs to
    pub owner: EntityId,
}

/// Result of a single 2D occlusion probe supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit2 {
    /// World-space hit point
    pub point: Vec2,
    /// Surface normal at the hit
    pub normal: Vec2,
    /// Distance from the ray origin
    pub distance: f32,
    /// Collider that was hit
    pub collider: ColliderId,
    /// Entity the collider belongs to
    pub owner: EntityId,
}

/// Ray intersection and target introspection against a 3D host scene.
pub trait SceneQuery3 {
    /// Cast a ray and report the nearest blocking hit within
    /// `max_distance`, honoring the layer mask and trigger policy.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
        triggers: TriggerPolicy,
    ) -> Option<RaycastHit3>;

    /// Whether the host declares `collider` part of `entity` beyond plain
    /// ownership (compound bodies, attached equipment). Used to avoid
    /// sub-part self-occlusion false positives.
    fn collider_belongs_to(&self, collider: ColliderId, entity: EntityId) -> bool {
        let _ = (collider, entity);
        false
    }

    /// Explicit aim points for a target, if the host declares any.
    ///
    /// When this appends anything, the sensor tests those points directly
    /// instead of sampling the target's bounds.
    fn los_targets(&self, entity: EntityId, out: &mut Vec<(EntityId, Vec3)>) {
        let _ = (entity, out);
    }
}

/// Ray intersection and target introspection against a 2D host scene.
pub trait SceneQuery2 {
    /// Cast a ray and report the nearest blocking hit within
    /// `max_distance`, honoring the layer mask and trigger policy.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: LayerMask,
        triggers: TriggerPolicy,
    ) -> Option<RaycastHit2>;

    /// See [`SceneQuery3::collider_belongs_to`].
    fn collider_belongs_to(&self, collider: ColliderId, entity: EntityId) -> bool {
        let _ = (collider, entity);
        false
    }

    /// See [`SceneQuery3::los_targets`].
    fn los_targets(&self, entity: EntityId, out: &mut Vec<(EntityId, Vec2)>) {
        let _ = (entity, out);
    }
}

impl<S: SceneQuery3 + ?Sized> SceneQuery3 for &S {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
        triggers: TriggerPolicy,
    ) -> Option<RaycastHit3> {
        (**self).raycast(origin, direction, max_distance, layers, triggers)
    }

    fn collider_belongs_to(&self, collider: ColliderId, entity: EntityId) -> bool {
        (**self).collider_belongs_to(collider, entity)
    }

    fn los_targets(&self, entity: EntityId, out: &mut Vec<(EntityId, Vec3)>) {
        (**self).los_targets(entity, out)
    }
}

impl<S: SceneQuery2 + ?Sized> SceneQuery2 for &S {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: LayerMask,
        triggers: TriggerPolicy,
    ) -> Option<RaycastHit2> {
        (**self).raycast(origin, direction, max_distance, layers, triggers)
    }

    fn collider_belongs_to(&self, collider: ColliderId, entity: EntityId) -> bool {
        (**self).collider_belongs_to(collider, entity)
    }

    fn los_targets(&self, entity: EntityId, out: &mut Vec<(EntityId, Vec2)>) {
        (**self).los_targets(entity, out)
    }
}
