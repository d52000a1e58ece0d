//! Sensor configuration: the per-sensor parameter bag, visibility scaling
//! functions, and the piecewise-linear curve standing in for host-engine
//! animation curves.
//!
//! All fields are host-writable between tests; a single
//! [`perform_test`](crate::sensor::LosTest3d::perform_test) call sees one
//! consistent snapshot.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ColliderId, LayerMask};

/// Configuration errors reported by [`LosConfig::validate`] and
/// [`Curve::from_keys`]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Ray budget is zero; no test points would ever be cast
    #[error("ray count must be at least 1")]
    ZeroRayCount,

    /// Distance limiting is enabled but the maximum distance is not positive
    #[error("max distance must be positive when distance limiting is on, got {0}")]
    NonPositiveMaxDistance(f32),

    /// Minimum visibility threshold outside `[0, 1]`
    #[error("minimum visibility must be in [0, 1], got {0}")]
    ThresholdOutOfRange(f32),

    /// Moving average enabled with a zero-size window
    #[error("moving average window must be at least 1")]
    ZeroWindow,

    /// Curve has fewer than two keyframes
    #[error("curve needs at least 2 keys, got {0}")]
    CurveTooShort(usize),

    /// Curve contains a NaN or infinite keyframe
    #[error("curve key {0} is not finite")]
    CurveNotFinite(usize),

    /// Curve keyframes are not sorted by time
    #[error("curve keys must be sorted by time (key {0} goes backwards)")]
    CurveUnsorted(usize),
}

/// How sample points are placed on the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SamplingMethod {
    /// Low-discrepancy points uniformly inside the target's bounds.
    /// Cheap, ignores field-of-view clipping and surface orientation.
    #[default]
    Fast,
    /// Points on the visible, FOV-clipped surface of the bounds, chosen
    /// area-uniformly in angle space and pushed slightly into the interior.
    Quality,
}

/// Where distance/angle falloff is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FovConstraint {
    /// One visibility scale for the whole target, computed from its bounds.
    /// Allows an early out before any rays are cast.
    #[default]
    BoundingBox,
    /// Each ray gets its own scale from its sample point's distance/angle.
    PerRay,
}

/// Whether occlusion rays collide with trigger colliders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriggerPolicy {
    /// Trigger colliders never block rays
    #[default]
    Ignore,
    /// Trigger colliders block rays like solid geometry
    Collide,
}

/// Piecewise-linear curve over `t in [0, 1]`.
///
/// Stands in for a host engine's animation curve: keys are `(t, value)`
/// pairs sorted by `t`, evaluated by linear interpolation and clamped to
/// the first/last key outside the keyed range.
///
/// Serializes as the bare key list; deserialization goes through
/// [`from_keys`](Self::from_keys), so a persisted config with a malformed
/// curve is rejected at load time instead of surfacing mid-test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f32, f32)>", into = "Vec<(f32, f32)>")]
pub struct Curve {
    keys: Vec<(f32, f32)>,
}

impl TryFrom<Vec<(f32, f32)>> for Curve {
    type Error = ConfigError;

    fn try_from(keys: Vec<(f32, f32)>) -> Result<Self, ConfigError> {
        Curve::from_keys(keys)
    }
}

impl From<Curve> for Vec<(f32, f32)> {
    fn from(curve: Curve) -> Self {
        curve.keys
    }
}

impl Curve {
    /// Build a curve from `(t, value)` keyframes.
    ///
    /// Requires at least 2 keys, all finite, sorted by `t` (ties allowed).
    pub fn from_keys(keys: Vec<(f32, f32)>) -> Result<Self, ConfigError> {
        if keys.len() < 2 {
            return Err(ConfigError::CurveTooShort(keys.len()));
        }
        for (i, &(t, v)) in keys.iter().enumerate() {
            if !t.is_finite() || !v.is_finite() {
                return Err(ConfigError::CurveNotFinite(i));
            }
        }
        for i in 1..keys.len() {
            if keys[i].0 < keys[i - 1].0 {
                return Err(ConfigError::CurveUnsorted(i));
            }
        }
        Ok(Curve { keys })
    }

    /// Evaluate at `t`, clamping outside the keyed range.
    pub fn evaluate(&self, t: f32) -> f32 {
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        for window in self.keys.windows(2) {
            let (t0, v0) = window[0];
            let (t1, v1) = window[1];
            if t <= t1 {
                let span = t1 - t0;
                if span <= f32::EPSILON {
                    return v1;
                }
                let f = (t - t0) / span;
                return v0 + (v1 - v0) * f;
            }
        }
        last.1
    }
}

/// Maps a normalized input `t in [0, 1]` to a visibility multiplier in
/// `[0, 1]`.
///
/// Used for both distance falloff (`t = distance / max_distance`) and
/// angular falloff (`t = angle / half_fov_angle`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalingFunction {
    /// Full visibility below the threshold, zero at or above it
    Step {
        /// Cutoff in normalized input space
        threshold: f32,
    },
    /// `1 - clamp01(t)`
    LinearDecay,
    /// Host-supplied falloff curve
    Curve(Curve),
}

impl ScalingFunction {
    /// Hard cutoff at the configured limit (`t >= 1` scores zero).
    pub fn hard_limit() -> Self {
        ScalingFunction::Step { threshold: 1.0 }
    }

    /// Evaluate the multiplier for a normalized input.
    ///
    /// Input is clamped to `[0, 1]` before evaluation, so values past the
    /// configured limit saturate rather than extrapolate.
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            ScalingFunction::Step { threshold } => {
                if t < *threshold {
                    1.0
                } else {
                    0.0
                }
            }
            ScalingFunction::LinearDecay => 1.0 - t,
            ScalingFunction::Curve(curve) => curve.evaluate(t),
        }
    }
}

impl Default for ScalingFunction {
    fn default() -> Self {
        ScalingFunction::hard_limit()
    }
}

/// Per-sensor configuration for a line-of-sight test.
///
/// The sensor's own position/orientation is set separately on the test
/// instance (it is dimension-specific); everything here is shared between
/// the 3D and 2D pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LosConfig {
    /// Number of occlusion rays per test (cost/accuracy knob)
    pub ray_count: usize,
    /// Sample point placement strategy
    pub sampling: SamplingMethod,
    /// Whole-target vs per-ray falloff
    pub fov_constraint: FovConstraint,

    /// Enable distance falloff
    pub limit_distance: bool,
    /// Distance at which falloff input reaches 1
    pub max_distance: f32,
    /// Falloff applied to `distance / max_distance`
    pub visibility_by_distance: ScalingFunction,

    /// Enable angular falloff and FOV clipping of sample geometry
    pub limit_angle: bool,
    /// Full horizontal view angle in degrees, clamped to `[0, 180]`
    pub horizontal_angle: f32,
    /// Full vertical view angle in degrees, clamped to `[0, 180]` (3D only)
    pub vertical_angle: f32,
    /// Falloff applied to `horizontal_angle_to_target / (horizontal_angle / 2)`
    pub visibility_by_horizontal_angle: ScalingFunction,
    /// Falloff applied to `vertical_angle_to_target / (vertical_angle / 2)`
    pub visibility_by_vertical_angle: ScalingFunction,

    /// Layers occlusion rays collide with
    pub blocking_layers: LayerMask,
    /// Trigger collider handling for occlusion rays
    pub trigger_policy: TriggerPolicy,
    /// Colliders belonging to the sensor itself, never treated as occluders
    pub owned_colliders: Vec<ColliderId>,

    /// Only test host-declared aim points; never fall back to bounds sampling
    pub los_targets_only: bool,

    /// Smooth visibility over recent tests
    pub moving_average: bool,
    /// Moving average window size (number of past tests)
    pub moving_average_window: usize,

    /// Aggregate visibility at or above this value counts as visible
    pub minimum_visibility: f32,
}

impl Default for LosConfig {
    fn default() -> Self {
        LosConfig {
            ray_count: 1,
            sampling: SamplingMethod::default(),
            fov_constraint: FovConstraint::default(),
            limit_distance: false,
            max_distance: 50.0,
            visibility_by_distance: ScalingFunction::hard_limit(),
            limit_angle: false,
            horizontal_angle: 90.0,
            vertical_angle: 90.0,
            visibility_by_horizontal_angle: ScalingFunction::hard_limit(),
            visibility_by_vertical_angle: ScalingFunction::hard_limit(),
            blocking_layers: LayerMask::ALL,
            trigger_policy: TriggerPolicy::default(),
            owned_colliders: Vec::new(),
            los_targets_only: false,
            moving_average: false,
            moving_average_window: 10,
            minimum_visibility: 0.5,
        }
    }
}

impl LosConfig {
    /// Check for host mistakes the pipeline cannot degrade around.
    ///
    /// Validation is advisory: the test itself clamps angles and guards
    /// divisions, so an unvalidated config degrades to a conservative
    /// "not visible" rather than failing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ray_count == 0 {
            return Err(ConfigError::ZeroRayCount);
        }
        if self.limit_distance && self.max_distance <= 0.0 {
            return Err(ConfigError::NonPositiveMaxDistance(self.max_distance));
        }
        if !(0.0..=1.0).contains(&self.minimum_visibility) {
            return Err(ConfigError::ThresholdOutOfRange(self.minimum_visibility));
        }
        if self.moving_average && self.moving_average_window == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        Ok(())
    }
}
