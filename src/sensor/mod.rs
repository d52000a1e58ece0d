//! The visibility test orchestrator and its 3D/2D implementations.
//!
//! The per-test control flow lives in one place (`run_test`) and is
//! parametrized over a small hook set; [`LosTest3d`] and [`LosTest2d`] own
//! the dimension-specific geometry state and implement the hooks. Shared
//! mutable state (ray diagnostics, the smoothing filter, the
//! previous-target memo) sits in a `SensorCore` composed into each test,
//! so the orchestrator and the hooks never fight over borrows.

mod ray;
mod test2d;
mod test3d;

pub use ray::{LosRay, LosRay2, LosRay3, RayHit};
pub use test2d::LosTest2d;
pub use test3d::LosTest3d;

use rayon::prelude::*;

use crate::config::{FovConstraint, LosConfig};
use crate::filter::MovingAverageFilter;
use crate::scene::{SceneQuery2, SceneQuery3};
use crate::types::{EntityId, Signal, Signal2, Signal3};

/// The dimension-specific half of a visibility test.
///
/// `run_test` drives these hooks; the concrete types hold the sensor pose,
/// the scene handle, and the geometry scratch buffers.
pub(crate) trait Hooks {
    /// Sample/aim point type (`Vec3` or `Vec2`)
    type Point: Copy;
    /// Target bounds type (`Aabb` or `Rect`)
    type Shape: Copy;

    fn config(&self) -> &LosConfig;

    /// Reset per-call geometry scratch.
    fn clear(&mut self);

    /// Whole-target distance/angle multiplier (BoundingBox constraint).
    fn visibility_scale(&self, signal: &Signal<Self::Shape>) -> f32;

    /// Whether the sensor origin lies inside the target's bounds.
    fn is_inside_shape(&self, shape: &Self::Shape) -> bool;

    /// Ask the scene for host-declared aim points on the target.
    fn collect_aim_points(&self, entity: EntityId, out: &mut Vec<(EntityId, Self::Point)>);

    /// Place sample points on (or in) the target per the configured
    /// sampling method. Appends nothing when no visible geometry remains.
    fn generate_points(&mut self, signal: &Signal<Self::Shape>, out: &mut Vec<Self::Point>);

    /// Cast one occlusion probe at a point and score it.
    fn test_point(
        &mut self,
        point: Self::Point,
        aim: Option<EntityId>,
        signal: &Signal<Self::Shape>,
        whole_scale: f32,
    ) -> LosRay<Self::Point>;
}

/// State shared between the orchestrator and the host-facing accessors.
#[derive(Debug, Clone)]
pub(crate) struct SensorCore<P, S> {
    pub rays: Vec<LosRay<P>>,
    pub points: Vec<P>,
    pub aim_points: Vec<(EntityId, P)>,
    pub filter: MovingAverageFilter,
    pub prev_entity: Option<EntityId>,
    pub visibility: f32,
    pub output: Option<Signal<S>>,
}

impl<P, S> SensorCore<P, S> {
    pub fn new(window: usize) -> Self {
        SensorCore {
            rays: Vec::new(),
            points: Vec::new(),
            aim_points: Vec::new(),
            filter: MovingAverageFilter::new(window),
            prev_entity: None,
            visibility: 0.0,
            output: None,
        }
    }

    pub fn reset(&mut self) {
        self.rays.clear();
        self.points.clear();
        self.aim_points.clear();
        self.filter.clear();
        self.prev_entity = None;
        self.visibility = 0.0;
        self.output = None;
    }
}

/// One synchronous evaluation tick. See the crate docs for the contract;
/// in short: reset buffers, early-out on the whole-target scale, pick aim
/// points or generate sample points, cast one probe per point, aggregate,
/// smooth, threshold.
pub(crate) fn run_test<H: Hooks>(
    core: &mut SensorCore<H::Point, H::Shape>,
    hooks: &mut H,
    signal: &Signal<H::Shape>,
) -> bool {
    core.rays.clear();
    core.points.clear();
    core.aim_points.clear();
    hooks.clear();

    // Default outcome: the input signal, silenced
    let mut output = *signal;
    output.strength = 0.0;

    // Visibility history is only valid per continuous target
    if core.prev_entity != Some(signal.entity) {
        core.filter.clear();
        core.prev_entity = Some(signal.entity);
    }

    let (fov_constraint, los_targets_only, moving_average, window, minimum_visibility) = {
        let c = hooks.config();
        (
            c.fov_constraint,
            c.los_targets_only,
            c.moving_average,
            c.moving_average_window,
            c.minimum_visibility,
        )
    };

    let whole_scale = match fov_constraint {
        FovConstraint::BoundingBox => {
            let scale = hooks.visibility_scale(signal);
            if scale <= 0.0 {
                // Well outside the configured limits: skip sampling entirely
                core.visibility = 0.0;
                core.output = Some(output);
                return false;
            }
            scale
        }
        FovConstraint::PerRay => 1.0,
    };

    hooks.collect_aim_points(signal.entity, &mut core.aim_points);

    if !core.aim_points.is_empty() {
        for i in 0..core.aim_points.len() {
            let (id, point) = core.aim_points[i];
            let ray = hooks.test_point(point, Some(id), signal, whole_scale);
            core.rays.push(ray);
        }
    } else if los_targets_only {
        core.visibility = 0.0;
        core.output = Some(output);
        return false;
    } else if hooks.is_inside_shape(&signal.shape) {
        // Origin inside the target: trivially fully visible
        core.visibility = 1.0;
        output.strength = signal.strength;
        core.output = Some(output);
        return true;
    } else {
        hooks.generate_points(signal, &mut core.points);
        if core.points.is_empty() {
            core.visibility = 0.0;
            core.output = Some(output);
            return false;
        }
        for i in 0..core.points.len() {
            let point = core.points[i];
            let ray = hooks.test_point(point, None, signal, whole_scale);
            core.rays.push(ray);
        }
    }

    debug_assert!(!core.rays.is_empty());
    let mut visibility =
        core.rays.iter().map(LosRay::visibility).sum::<f32>() / core.rays.len() as f32;

    if moving_average {
        if core.filter.capacity() != window.max(1) {
            core.filter = MovingAverageFilter::new(window);
        }
        core.filter.push(visibility);
        visibility = core.filter.value();
    }

    core.visibility = visibility;
    let visible = visibility >= minimum_visibility;
    output.strength = if visible { signal.strength * visibility } else { 0.0 };
    core.output = Some(output);
    visible
}

/// Evaluate many independent 3D sensors in parallel, one signal each.
///
/// Each sensor still runs its own test synchronously; parallelism is
/// across sensors only. `tests` and `signals` are paired by index.
pub fn perform_tests_parallel<W>(tests: &mut [LosTest3d<W>], signals: &[Signal3]) -> Vec<bool>
where
    W: SceneQuery3 + Send,
{
    assert_eq!(tests.len(), signals.len());
    tests
        .par_iter_mut()
        .zip(signals.par_iter())
        .map(|(test, signal)| test.perform_test(signal))
        .collect()
}

/// 2D counterpart of [`perform_tests_parallel`].
pub fn perform_tests_parallel_2d<W>(tests: &mut [LosTest2d<W>], signals: &[Signal2]) -> Vec<bool>
where
    W: SceneQuery2 + Send,
{
    assert_eq!(tests.len(), signals.len());
    tests
        .par_iter_mut()
        .zip(signals.par_iter())
        .map(|(test, signal)| test.perform_test(signal))
        .collect()
}
