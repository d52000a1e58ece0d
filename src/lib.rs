//! # Sightline
//!
//! Line-of-sight visibility testing for 3D and 2D scenes.
//!
//! A sensor casts occlusion probes at a target's bounding volume and
//! reports how visible the target is, as a score in `[0, 1]` and as a
//! pass/fail against a configurable threshold. The scene itself stays on
//! the host side behind a raycast trait.
//!
//! ## Features
//!
//! - **Sampling**: fast in-volume Sobol points, or quality surface points
//!   on the view-facing faces, angle-clipped and area-weighted
//! - **Field of view**: frustum clipping from horizontal/vertical view
//!   angles, with memoized plane recomputation
//! - **Scoring**: distance and angle falloff via step, linear-decay, or
//!   custom piecewise-linear curves, per target or per ray
//! - **Smoothing**: optional moving average over the last N tests
//! - **Aim points**: host-declared target points override bounds sampling
//! - **2D**: a full planar analogue over rectangles and edges
//! - **Batching**: parallel evaluation of many sensors via rayon
//!
//! ## Example
//!
//! ```rust
//! use sightline::prelude::*;
//!
//! // The host exposes its scene through a raycast trait. An empty scene
//! // never reports a hit.
//! struct OpenField;
//!
//! impl SceneQuery3 for OpenField {
//!     fn raycast(
//!         &self,
//!         _origin: Vec3,
//!         _direction: Vec3,
//!         _max_distance: f32,
//!         _layers: LayerMask,
//!         _triggers: TriggerPolicy,
//!     ) -> Option<RaycastHit3> {
//!         None
//!     }
//! }
//!
//! let mut config = LosConfig::default();
//! config.ray_count = 4;
//!
//! let mut sensor = LosTest3d::new(OpenField, config);
//! sensor.set_frame(Vec3::ZERO, Quat::IDENTITY);
//!
//! let target = Signal3::new(
//!     EntityId(1),
//!     Aabb::from_center_extents(Vec3::new(0.0, 0.0, 10.0), Vec3::splat(0.5)),
//!     1.0,
//! );
//!
//! assert!(sensor.perform_test(&target));
//! assert_eq!(sensor.visibility(), 1.0);
//! ```

#![warn(missing_docs)]

pub mod types;
pub mod config;
pub mod filter;
pub mod geometry;
pub mod sampling;
pub mod scene;
pub mod sensor;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::config::{
        ConfigError, Curve, FovConstraint, LosConfig, SamplingMethod, ScalingFunction,
        TriggerPolicy,
    };
    pub use crate::filter::MovingAverageFilter;
    pub use crate::scene::{RaycastHit2, RaycastHit3, SceneQuery2, SceneQuery3};
    pub use crate::sensor::{
        perform_tests_parallel, perform_tests_parallel_2d, LosRay2, LosRay3, LosTest2d, LosTest3d,
    };
    pub use crate::types::{
        Aabb, ColliderId, EntityId, LayerMask, Rect, Signal, Signal2, Signal3,
    };
    pub use glam::{Quat, Vec2, Vec3};
}

// Re-exports for convenience
pub use config::LosConfig;
pub use sensor::{LosTest2d, LosTest3d};
pub use types::{Signal2, Signal3};
