//! # Camrig Core
//!
//! Value types and math for 2D camera control.
//!
//! This crate provides:
//! - **CameraState**: a partial camera pose where every field may be unset
//! - **CameraStateTransform**: additive deltas for shakes and offsets
//! - **CameraStateClamp**: center and bounds clamping against a region
//! - **Spline factories** for sampling transform curves
//! - **CameraHandle**: the trait controllers use to talk to a rendering camera
//!
//! Nothing here knows about controllers; see the `camrig` crate for those.
//!
//! ## Quick Start
//!
//! ```rust
//! use camrig_core::{CameraState, CameraStateClamp, ClampRange, Vec2};
//!
//! let clamp = CameraStateClamp::default();
//! let state = CameraState::new(Vec2::new(40.0, 0.0), 3.0, 0.0);
//!
//! let clamped = clamp.clamp_state(state, 16.0 / 9.0);
//! assert_eq!(clamped.position(), Some(Vec2::new(10.0, 0.0)));
//! ```

// Camera access
pub mod camera;

// Region constraints
pub mod clamp;

// Errors
pub mod error;

// Math utilities
pub mod math;

// Curve sampling
pub mod spline;

// Camera pose algebra
pub mod state;

// Additive deltas
pub mod transform;

pub use camera::{CameraHandle, OrthoCamera, ParentFrame, Space};
pub use clamp::{CameraStateClamp, ClampMode, ClampRange};
pub use error::{CoreError, Result};
pub use math::{Bounds2, Vec2, Vec4};
pub use spline::{
    BezierSplineFactory, CatmullRomSplineFactory, HermiteSplineFactory, SplineFactory, Vec4Spline,
};
pub use state::{CameraState, MIN_ZOOM};
pub use transform::{CameraStateTransform, TransformCurve};
