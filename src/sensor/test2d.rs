//! 2D line-of-sight test.
//!
//! Planar analogue of [`LosTest3d`](super::LosTest3d): edges instead of
//! triangles, a two-line view wedge instead of a four-plane frustum, and a
//! single horizontal view angle.

use glam::Vec2;

use super::{run_test, Hooks, LosRay, LosRay2, RayHit, SensorCore};
use crate::config::{FovConstraint, LosConfig, SamplingMethod};
use crate::geometry::{
    angle_to_point_2d, map_bounds_to_edges, min_angle_to_rect, ray_rect_entry, ray_rect_exit,
    Edge2d, FieldOfView2d,
};
use crate::sampling::{build_length_cdf, point_on_edges, SobolSequence};
use crate::scene::SceneQuery2;
use crate::types::{EntityId, Rect, Signal2};

/// Line-of-sight sensor over a 2D scene.
#[derive(Debug, Clone)]
pub struct LosTest2d<W> {
    core: SensorCore<Vec2, Rect>,
    probe: Probe2<W>,
}

#[derive(Debug, Clone)]
struct Probe2<W> {
    world: W,
    config: LosConfig,
    position: Vec2,
    /// Facing direction in radians
    rotation: f32,
    fov: FieldOfView2d,
    sobol: SobolSequence,
    edges: Vec<Edge2d>,
    cdf: Vec<f32>,
}

impl<W> LosTest2d<W> {
    /// Create a sensor over `world` with the given configuration.
    ///
    /// The pose defaults to the origin facing along +X (rotation 0); set
    /// it with [`set_frame`](Self::set_frame).
    pub fn new(world: W, config: LosConfig) -> Self {
        let window = config.moving_average_window;
        LosTest2d {
            core: SensorCore::new(window),
            probe: Probe2 {
                world,
                config,
                position: Vec2::ZERO,
                rotation: 0.0,
                fov: FieldOfView2d::new(),
                sobol: SobolSequence::new(),
                edges: Vec::new(),
                cdf: Vec::new(),
            },
        }
    }

    /// Move the sensor; `rotation` is the facing direction in radians.
    pub fn set_frame(&mut self, position: Vec2, rotation: f32) {
        self.probe.position = position;
        self.probe.rotation = rotation;
    }

    /// Sensor position
    pub fn position(&self) -> Vec2 {
        self.probe.position
    }

    /// Facing direction in radians
    pub fn rotation(&self) -> f32 {
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
    pub fn rays(&self) -> &[LosRay2] {
        &self.core.rays
    }

    /// Output signal of the last test (`None` before the first test).
    pub fn output_signal(&self) -> Option<&Signal2> {
        self.core.output.as_ref()
    }

    /// Clear all retained state. Re-arms a pooled sensor.
    pub fn reset(&mut self) {
        self.core.reset();
        self.probe.edges.clear();
        self.probe.cdf.clear();
    }
}

impl<W: SceneQuery2> LosTest2d<W> {
    /// Run one visibility test against `signal`.
    pub fn perform_test(&mut self, signal: &Signal2) -> bool {
        run_test(&mut self.core, &mut self.probe, signal)
    }
}

impl<W> Probe2<W> {
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

    fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.rotation)
    }

    fn right(&self) -> Vec2 {
        -self.forward().perp()
    }

    fn ray_scale(&self, point: Vec2, distance: f32) -> f32 {
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
            let half = c.horizontal_angle.clamp(0.0, 180.0) * 0.5;
            let angle = angle_to_point_2d(self.position, self.forward(), self.right(), point);
            scale *= c
                .visibility_by_horizontal_angle
                .evaluate(Self::normalized_angle(angle, half));
        }
        scale
    }
}

impl<W: SceneQuery2> Hooks for Probe2<W> {
    type Point = Vec2;
    type Shape = Rect;

    fn config(&self) -> &LosConfig {
        &self.config
    }

    fn clear(&mut self) {
        self.edges.clear();
        self.cdf.clear();
    }

    fn visibility_scale(&self, signal: &Signal2) -> f32 {
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
            let half = c.horizontal_angle.clamp(0.0, 180.0) * 0.5;
            let angle = min_angle_to_rect(self.position, self.forward(), self.right(), &signal.shape);
            scale *= c
                .visibility_by_horizontal_angle
                .evaluate(Self::normalized_angle(angle, half));
        }
        scale
    }

    fn is_inside_shape(&self, shape: &Rect) -> bool {
        shape.contains(self.position)
    }

    fn collect_aim_points(&self, entity: EntityId, out: &mut Vec<(EntityId, Vec2)>) {
        self.world.los_targets(entity, out);
    }

    fn generate_points(&mut self, signal: &Signal2, out: &mut Vec<Vec2>) {
        let rect = signal.shape;
        let position = self.position;
        let rotation = self.rotation;
        let ray_count = self.config.ray_count;
        let limit_angle = self.config.limit_angle;
        let horizontal_angle = self.config.horizontal_angle;
        let interior_cap = if self.config.limit_distance {
            self.config.max_distance / 100.0
        } else {
            f32::INFINITY
        };

        match self.config.sampling {
            SamplingMethod::Fast => {
                let min = rect.min;
                let size = rect.size();
                for _ in 0..ray_count {
                    let [u1, u2] = self.sobol.next2();
                    out.push(min + Vec2::new(size.x * u1, size.y * u2));
                }
            }
            SamplingMethod::Quality => {
                map_bounds_to_edges(position, &rect, &mut self.edges);
                if limit_angle {
                    self.fov
                        .recompute_if_stale(horizontal_angle, position, rotation);
                    self.fov.clip(&mut self.edges);
                }
                for e in &mut self.edges {
                    *e = e.project_circle(position);
                }
                let total = build_length_cdf(&self.edges, &mut self.cdf);
                if total <= 0.0 {
                    return;
                }
                for _ in 0..ray_count {
                    let u = self.sobol.next2();
                    let Some(sample) = point_on_edges(&self.edges, &self.cdf, u) else {
                        continue;
                    };
                    let dir = (sample - position).normalize_or_zero();
                    if dir == Vec2::ZERO {
                        continue;
                    }
                    let Some(entry) = ray_rect_entry(position, dir, &rect) else {
                        continue;
                    };
                    let entry_point = position + dir * entry;
                    let exit = ray_rect_exit(entry_point, dir, &rect);
                    let depth = (exit * 0.5).min(interior_cap);
                    out.push(entry_point + dir * depth);
                }
            }
        }
    }

    fn test_point(
        &mut self,
        point: Vec2,
        aim: Option<EntityId>,
        signal: &Signal2,
        whole_scale: f32,
    ) -> LosRay2 {
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
