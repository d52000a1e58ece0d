//! 3D line-of-sight test.

use glam::{Quat, Vec3};

use super::{run_test, Hooks, LosRay, LosRay3, RayHit, SensorCore};
use crate::config::{FovConstraint, LosConfig, SamplingMethod};
use crate::geometry::{
    angle_to_point, map_bounds_to_triangles, min_angle_to_bounds, ray_box_entry, ray_box_exit,
    FieldOfView, Triangle,
};
use crate::sampling::{build_area_cdf, point_in_triangles, SobolSequence};
use crate::scene::SceneQuery3;
use crate::types::{Aabb, EntityId, Signal3};

/// Line-of-sight sensor over a 3D scene.
///
/// Owns all mutable state for one sensor: pose, configuration, the
/// field-of-view clipper, the sample sequence, geometry scratch, and the
/// diagnostics of the last test. One instance per sensor; `perform_test`
/// is synchronous and non-reentrant.
#[derive(Debug, Clone)]
pub struct LosTest3d<W> {
    core: SensorCore<Vec3, Aabb>,
    probe: Probe3<W>,
}

#[derive(Debug, Clone)]
struct Probe3<W> {
    world: W,
    config: LosConfig,
    position: Vec3,
    rotation: Quat,
    fov: FieldOfView,
    sobol: SobolSequence,
    triangles: Vec<Triangle>,
    clip_scratch: Vec<Triangle>,
    cdf: Vec<f32>,
}

impl<W> LosTest3d<W> {
    /// Create a sensor over `world` with the given configuration.
    ///
    /// The pose defaults to the origin looking down +Z; set it with
    /// [`set_frame`](Self::set_frame).
    pub fn new(world: W, config: LosConfig) -> Self {
        let window = config.moving_average_window;
        LosTest3d {
            core: SensorCore::new(window),
            probe: Probe3 {
                world,
                config,
                position: Vec3::ZERO,
                rotation: Quat::IDENTITY,
                fov: FieldOfView::new(),
                sobol: SobolSequence::new(),
                triangles: Vec::new(),
                clip_scratch: Vec::new(),
                cdf: Vec::new(),
            },
        }
    }

    /// Move the sensor. Call once per tick before `perform_test`.
    pub fn set_frame(&mut self, position: Vec3, rotation: Quat) {
        self.probe.position = position;
        self.probe.rotation = rotation;
    }

    /// Sensor position
    pub fn position(&self) -> Vec3 {
        self.probe.position
    }

    /// Sensor orientation (+Z forward, +X right, +Y up)
    pub fn rotation(&self) -> Quat {
        self.probe.rotation
    }

    /// Current configuration
    pub fn config(&self) -> &LosConfig {
        &self.probe.config
    }

    /// Mutate the configuration between tests.
    pub fn config_mut(&mut self) -> &mut LosConfig {
        &mut self.probe.config
    }

    /// The host scene handle
    pub fn world(&self) -> &W {
        &self.probe.world
    }

    /// Mutable access to the host scene handle
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.probe.world
    }

    /// Aggregate visibility of the last test, in `[0, 1]`.
    pub fn visibility(&self) -> f32 {
        self.core.visibility
    }

    /// Per-ray diagnostics of the last test.
    pub fn rays(&self) -> &[LosRay3] {
        &self.core.rays
    }

    /// Output signal of the last test (`None` before the first test).
    pub fn output_signal(&self) -> Option<&Signal3> {
        self.core.output.as_ref()
    }

    /// Clear all retained state: diagnostics, smoothing history, and the
    /// previous-target memo. Re-arms a pooled sensor.
    pub fn reset(&mut self) {
        self.core.reset();
        self.probe.triangles.clear();
        self.probe.clip_scratch.clear();
        self.probe.cdf.clear();
    }
}

impl<W: SceneQuery3> LosTest3d<W> {
    /// Run one visibility test against `signal`.
    ///
    /// Returns whether the aggregate visibility reached the configured
    /// minimum. [`visibility`](Self::visibility), [`rays`](Self::rays) and
    /// [`output_signal`](Self::output_signal) describe the result in
    /// detail.
    pub fn perform_test(&mut self, signal: &Signal3) -> bool {
        run_test(&mut self.core, &mut self.probe, signal)
    }
}

impl<W> Probe3<W> {
    /// Normalize an angle against a half-angle limit for falloff input.
    fn normalized_angle(angle: f32, half: f32) -> f32 {
        if half <= f32::EPSILON {
            if angle <= 0.0 {
                0.0
            } else {
                1.0
            }
        } else {
            angle / half
        }
    }

    fn ray_scale(&self, point: Vec3, distance: f32) -> f32 {
        let c = &self.config;
        let mut scale = 1.0;
        if c.limit_distance {
            let t = if c.max_distance > 0.0 {
                distance / c.max_distance
            } else {
                1.0
            };
            scale *= c.visibility_by_distance.evaluate(t);
        }
        if c.limit_angle && scale > 0.0 {
            let forward = self.rotation * Vec3::Z;
            let right = self.rotation * Vec3::X;
            let up = self.rotation * Vec3::Y;
            let half_h = c.horizontal_angle.clamp(0.0, 180.0) * 0.5;
            let half_v = c.vertical_angle.clamp(0.0, 180.0) * 0.5;
            let h = angle_to_point(self.position, forward, right, point);
            scale *= c
                .visibility_by_horizontal_angle
                .evaluate(Self::normalized_angle(h, half_h));
            let v = angle_to_point(self.position, forward, up, point);
            scale *= c
                .visibility_by_vertical_angle
                .evaluate(Self::normalized_angle(v, half_v));
        }
        scale
    }
}

impl<W: SceneQuery3> Hooks for Probe3<W> {
    type Point = Vec3;
    type Shape = Aabb;

    fn config(&self) -> &LosConfig {
        &self.config
    }

    fn clear(&mut self) {
        self.triangles.clear();
        self.clip_scratch.clear();
        self.cdf.clear();
    }

    fn visibility_scale(&self, signal: &Signal3) -> f32 {
        let c = &self.config;
        let mut scale = 1.0;
        if c.limit_distance {
            let distance = (signal.shape.center() - self.position).length();
            let t = if c.max_distance > 0.0 {
                distance / c.max_distance
            } else {
                1.0
            };
            scale *= c.visibility_by_distance.evaluate(t);
        }
        if c.limit_angle && scale > 0.0 {
            let forward = self.rotation * Vec3::Z;
            let right = self.rotation * Vec3::X;
            let up = self.rotation * Vec3::Y;
            let half_h = c.horizontal_angle.clamp(0.0, 180.0) * 0.5;
            let half_v = c.vertical_angle.clamp(0.0, 180.0) * 0.5;
            let h = min_angle_to_bounds(self.position, forward, right, &signal.shape);
            scale *= c
                .visibility_by_horizontal_angle
                .evaluate(Self::normalized_angle(h, half_h));
            let v = min_angle_to_bounds(self.position, forward, up, &signal.shape);
            scale *= c
                .visibility_by_vertical_angle
                .evaluate(Self::normalized_angle(v, half_v));
        }
        scale
    }

    fn is_inside_shape(&self, shape: &Aabb) -> bool {
        shape.contains(self.position)
    }

    fn collect_aim_points(&self, entity: EntityId, out: &mut Vec<(EntityId, Vec3)>) {
        self.world.los_targets(entity, out);
    }

    fn generate_points(&mut self, signal: &Signal3, out: &mut Vec<Vec3>) {
        let bounds = signal.shape;
        let position = self.position;
        let rotation = self.rotation;
        let ray_count = self.config.ray_count;
        let limit_angle = self.config.limit_angle;
        let horizontal_angle = self.config.horizontal_angle;
        let vertical_angle = self.config.vertical_angle;
        let interior_cap = if self.config.limit_distance {
            self.config.max_distance / 100.0
        } else {
            f32::INFINITY
        };

        match self.config.sampling {
            SamplingMethod::Fast => {
                // Low-discrepancy points uniformly inside the volume; no
                // FOV clipping, no surface awareness.
                let min = bounds.min;
                let size = bounds.size();
                for _ in 0..ray_count {
                    let [u1, u2, u3] = self.sobol.next3();
                    out.push(min + Vec3::new(size.x * u1, size.y * u2, size.z * u3));
                }
            }
            SamplingMethod::Quality => {
                map_bounds_to_triangles(position, &bounds, &mut self.triangles);
                if limit_angle {
                    self.fov
                        .recompute_if_stale(horizontal_angle, vertical_angle, position, rotation);
                    self.fov.clip(&mut self.triangles, &mut self.clip_scratch);
                }
                // Angle-uniform sampling: project the visible surface onto
                // the unit sphere before area weighting
                for t in &mut self.triangles {
                    *t = t.project_sphere(position);
                }
                let total = build_area_cdf(&self.triangles, &mut self.cdf);
                if total <= 0.0 {
                    return;
                }
                for _ in 0..ray_count {
                    let u = self.sobol.next3();
                    let Some(sample) = point_in_triangles(&self.triangles, &self.cdf, u) else {
                        continue;
                    };
                    let dir = (sample - position).normalize_or_zero();
                    if dir == Vec3::ZERO {
                        continue;
                    }
                    // Back onto the real surface, then partway into the
                    // interior so the probe doesn't graze the visible shell
                    let Some(entry) = ray_box_entry(position, dir, &bounds) else {
                        continue;
                    };
                    let entry_point = position + dir * entry;
                    let exit = ray_box_exit(entry_point, dir, &bounds);
                    let depth = (exit * 0.5).min(interior_cap);
                    out.push(entry_point + dir * depth);
                }
            }
        }
    }

    fn test_point(
        &mut self,
        point: Vec3,
        aim: Option<EntityId>,
        signal: &Signal3,
        whole_scale: f32,
    ) -> LosRay3 {
        let delta = point - self.position;
        let distance = delta.length();
        let multiplier = match self.config.fov_constraint {
            FovConstraint::BoundingBox => whole_scale,
            FovConstraint::PerRay => self.ray_scale(point, distance),
        };

        if distance <= f32::EPSILON {
            return LosRay {
                origin: self.position,
                target: point,
                aim_point: aim,
                hit: None,
                visibility_multiplier: multiplier,
            };
        }

        let direction = delta / distance;
        let hit = self
            .world
            .raycast(
                self.position,
                direction,
                distance,
                self.config.blocking_layers,
                self.config.trigger_policy,
            )
            .map(|h| {
                let exempt = h.owner == signal.entity
                    || self.config.owned_colliders.contains(&h.collider)
                    || self.world.collider_belongs_to(h.collider, signal.entity);
                RayHit {
                    point: h.point,
                    normal: h.normal,
                    distance: h.distance,
                    distance_fraction: h.distance / distance,
                    collider: h.collider,
                    obstructing: !exempt,
                }
            });

        LosRay {
            origin: self.position,
            target: point,
            aim_point: aim,
            hit,
            visibility_multiplier: multiplier,
        }
    }
}
