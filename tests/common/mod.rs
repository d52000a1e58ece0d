//! Common test helpers for sightline integration tests

#![allow(dead_code)]

use sightline::prelude::*;
use sightline::sampling::Rng64;

// ============================================================================
// Mock scenes
// ============================================================================

/// One axis-aligned occluder in a mock scene.
#[derive(Debug, Clone, Copy)]
pub struct Occluder3 {
    pub collider: ColliderId,
    pub owner: EntityId,
    pub bounds: Aabb,
    pub layers: LayerMask,
    pub is_trigger: bool,
}

impl Occluder3 {
    pub fn solid(collider: u64, owner: u64, bounds: Aabb) -> Self {
        Occluder3 {
            collider: ColliderId(collider),
            owner: EntityId(owner),
            bounds,
            layers: LayerMask::ALL,
            is_trigger: false,
        }
    }
}

/// Box-occluder scene implementing [`SceneQuery3`] with a slab raycast.
#[derive(Debug, Clone, Default)]
pub struct MockScene3 {
    pub occluders: Vec<Occluder3>,
    /// (target entity, aim point entity, position) triples
    pub aim_points: Vec<(EntityId, EntityId, Vec3)>,
    /// Collider-to-entity attachments beyond direct ownership
    pub attachments: Vec<(ColliderId, EntityId)>,
}

impl MockScene3 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_occluders(occluders: Vec<Occluder3>) -> Self {
        MockScene3 {
            occluders,
            ..Self::default()
        }
    }
}

impl SceneQuery3 for MockScene3 {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
        triggers: TriggerPolicy,
    ) -> Option<RaycastHit3> {
        let mut best: Option<(f32, &Occluder3)> = None;
        for occ in &self.occluders {
            if occ.layers.0 & layers.0 == 0 {
                continue;
            }
            if occ.is_trigger && triggers == TriggerPolicy::Ignore {
                continue;
            }
            let Some(t) = slab_entry_3(origin, direction, &occ.bounds) else {
                continue;
            };
            // A ray starting inside a box does not count as hitting it
            if t <= 0.0 || t > max_distance {
                continue;
            }
            if best.map_or(true, |(bt, _)| t < bt) {
                best = Some((t, occ));
            }
        }
        best.map(|(t, occ)| {
            let point = origin + direction * t;
            RaycastHit3 {
                point,
                normal: face_normal_3(point, &occ.bounds),
                distance: t,
                collider: occ.collider,
                owner: occ.owner,
            }
        })
    }

    fn collider_belongs_to(&self, collider: ColliderId, entity: EntityId) -> bool {
        self.attachments.contains(&(collider, entity))
    }

    fn los_targets(&self, entity: EntityId, out: &mut Vec<(EntityId, Vec3)>) {
        for &(target, id, point) in &self.aim_points {
            if target == entity {
                out.push((id, point));
            }
        }
    }
}

/// 2D counterpart of [`Occluder3`].
#[derive(Debug, Clone, Copy)]
pub struct Occluder2 {
    pub collider: ColliderId,
    pub owner: EntityId,
    pub bounds: Rect,
    pub layers: LayerMask,
    pub is_trigger: bool,
}

impl Occluder2 {
    pub fn solid(collider: u64, owner: u64, bounds: Rect) -> Self {
        Occluder2 {
            collider: ColliderId(collider),
            owner: EntityId(owner),
            bounds,
            layers: LayerMask::ALL,
            is_trigger: false,
        }
    }
}

/// Rect-occluder scene implementing [`SceneQuery2`].
#[derive(Debug, Clone, Default)]
pub struct MockScene2 {
    pub occluders: Vec<Occluder2>,
    pub aim_points: Vec<(EntityId, EntityId, Vec2)>,
    pub attachments: Vec<(ColliderId, EntityId)>,
}

impl MockScene2 {
    pub fn with_occluders(occluders: Vec<Occluder2>) -> Self {
        MockScene2 {
            occluders,
            ..Self::default()
        }
    }
}

impl SceneQuery2 for MockScene2 {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: LayerMask,
        triggers: TriggerPolicy,
    ) -> Option<RaycastHit2> {
        let mut best: Option<(f32, &Occluder2)> = None;
        for occ in &self.occluders {
            if occ.layers.0 & layers.0 == 0 {
                continue;
            }
            if occ.is_trigger && triggers == TriggerPolicy::Ignore {
                continue;
            }
            let Some(t) = slab_entry_2(origin, direction, &occ.bounds) else {
                continue;
            };
            if t <= 0.0 || t > max_distance {
                continue;
            }
            if best.map_or(true, |(bt, _)| t < bt) {
                best = Some((t, occ));
            }
        }
        best.map(|(t, occ)| {
            let point = origin + direction * t;
            RaycastHit2 {
                point,
                normal: face_normal_2(point, &occ.bounds),
                distance: t,
                collider: occ.collider,
                owner: occ.owner,
            }
        })
    }

    fn collider_belongs_to(&self, collider: ColliderId, entity: EntityId) -> bool {
        self.attachments.contains(&(collider, entity))
    }

    fn los_targets(&self, entity: EntityId, out: &mut Vec<(EntityId, Vec2)>) {
        for &(target, id, point) in &self.aim_points {
            if target == entity {
                out.push((id, point));
            }
        }
    }
}

fn slab_entry_3(origin: Vec3, dir: Vec3, bounds: &Aabb) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        if dir[axis] == 0.0 {
            if origin[axis] < bounds.min[axis] || origin[axis] > bounds.max[axis] {
                return None;
            }
        } else {
            let inv = 1.0 / dir[axis];
            let t0 = (bounds.min[axis] - origin[axis]) * inv;
            let t1 = (bounds.max[axis] - origin[axis]) * inv;
            let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_min = t_min.max(near);
            t_max = t_max.min(far);
        }
    }
    if t_min > t_max || t_max < 0.0 {
        None
    } else {
        Some(t_min)
    }
}

fn slab_entry_2(origin: Vec2, dir: Vec2, bounds: &Rect) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..2 {
        if dir[axis] == 0.0 {
            if origin[axis] < bounds.min[axis] || origin[axis] > bounds.max[axis] {
                return None;
            }
        } else {
            let inv = 1.0 / dir[axis];
            let t0 = (bounds.min[axis] - origin[axis]) * inv;
            let t1 = (bounds.max[axis] - origin[axis]) * inv;
            let (near, far) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
            t_min = t_min.max(near);
            t_max = t_max.min(far);
        }
    }
    if t_min > t_max || t_max < 0.0 {
        None
    } else {
        Some(t_min)
    }
}

fn face_normal_3(point: Vec3, bounds: &Aabb) -> Vec3 {
    let mut normal = Vec3::ZERO;
    let mut best = f32::INFINITY;
    for axis in 0..3 {
        let to_min = (point[axis] - bounds.min[axis]).abs();
        if to_min < best {
            best = to_min;
            normal = Vec3::ZERO;
            normal[axis] = -1.0;
        }
        let to_max = (point[axis] - bounds.max[axis]).abs();
        if to_max < best {
            best = to_max;
            normal = Vec3::ZERO;
            normal[axis] = 1.0;
        }
    }
    normal
}

fn face_normal_2(point: Vec2, bounds: &Rect) -> Vec2 {
    let mut normal = Vec2::ZERO;
    let mut best = f32::INFINITY;
    for axis in 0..2 {
        let to_min = (point[axis] - bounds.min[axis]).abs();
        if to_min < best {
            best = to_min;
            normal = Vec2::ZERO;
            normal[axis] = -1.0;
        }
        let to_max = (point[axis] - bounds.max[axis]).abs();
        if to_max < best {
            best = to_max;
            normal = Vec2::ZERO;
            normal[axis] = 1.0;
        }
    }
    normal
}

// ============================================================================
// Standard fixtures
// ============================================================================

/// Target entity id used across scenarios
pub const TARGET: EntityId = EntityId(100);

/// Unit-cube target 10 units down +Z from the origin
pub fn target_ahead() -> Signal3 {
    Signal3::new(
        TARGET,
        Aabb::from_center_extents(Vec3::new(0.0, 0.0, 10.0), Vec3::splat(0.5)),
        1.0,
    )
}

/// 2D unit-square target 10 units down +X from the origin
pub fn target_ahead_2d() -> Signal2 {
    Signal2::new(
        TARGET,
        Rect::from_center_extents(Vec2::new(10.0, 0.0), Vec2::splat(0.5)),
        1.0,
    )
}

/// A wall between the origin and [`target_ahead`], covering the full
/// cross-section of the target
pub fn wall_between() -> Occluder3 {
    Occluder3::solid(
        1,
        1,
        Aabb::from_center_extents(Vec3::new(0.0, 0.0, 5.0), Vec3::new(5.0, 5.0, 0.25)),
    )
}

/// A wall covering only the -X half of the sight line to [`target_ahead`]
pub fn half_wall_between() -> Occluder3 {
    Occluder3::solid(
        2,
        2,
        Aabb::from_center_extents(Vec3::new(-2.5, 0.0, 5.0), Vec3::new(2.5, 5.0, 0.25)),
    )
}

/// Deterministic clutter field: `count` small boxes scattered in the slab
/// between the origin and a far +Z target. Same seed, same field.
pub fn scattered_occluders(seed: u64, count: usize) -> Vec<Occluder3> {
    let mut rng = Rng64::new(seed);
    (0..count)
        .map(|i| {
            let center = Vec3::new(
                rng.next_range(-8.0, 8.0),
                rng.next_range(-8.0, 8.0),
                rng.next_range(5.0, 30.0),
            );
            let half = Vec3::splat(rng.next_range(0.2, 0.6));
            Occluder3::solid(
                1000 + i as u64,
                1000 + i as u64,
                Aabb::from_center_extents(center, half),
            )
        })
        .collect()
}
