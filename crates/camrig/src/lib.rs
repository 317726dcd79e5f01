//! # Camrig
//!
//! Composable 2D camera controllers.
//!
//! This crate provides:
//! - **ControllerRig**: an arena of controllers that drives their lifecycle
//!   and applies the result to a camera
//! - **Controllers**: pan/zoom, entity tracking, smoothing, shake, switching
//! - **Config**: TOML rig files describing a controller tree by name
//!
//! Controllers reference their children by [`ControllerId`], so a tree such
//! as `Shaker => Switcher[Pan, Smoother => Tracker]` is built bottom-up.
//!
//! ## Quick Start
//!
//! ```rust
//! use camrig::{
//!     CameraState, ControllerRig, FixedState, InputSnapshot, OrthoCamera, Shaker, Vec2,
//! };
//!
//! let mut rig = ControllerRig::new();
//! let base = rig.insert(FixedState::new(CameraState::new(Vec2::new(1.0, 2.0), 4.0, 0.0)));
//! let shaker = rig.insert(Shaker::new(base));
//! rig.activate(shaker).unwrap();
//!
//! let mut camera = OrthoCamera::default();
//! rig.frame(&mut camera, &InputSnapshot::new(), &(), 1.0 / 60.0);
//!
//! assert_eq!(camera.position, Vec2::new(1.0, 2.0));
//! assert_eq!(camera.half_height, 4.0);
//! ```

// Rig files
pub mod config;

// Controller trait and contexts
pub mod controller;

// Built-in controllers
pub mod controllers;

// Errors
pub mod error;

// Per-frame input
pub mod input;

// Prelude for common imports
pub mod prelude;

// Controller arena and frame driver
pub mod rig;

// Scene queries for tracking
pub mod scene;

pub use camrig_core;

pub use config::{ControllerConfig, ControllerKind, LoadedRig, RigConfig, TrackedTarget};
pub use controller::{CameraController, ChildIds, ComputeContext, Host, TickContext};
pub use controllers::{
    FixedState, PanController, PanSettings, PredictionSettings, Shaker, Smoother,
    SmootherSettings, SmoothingClock, Switcher, TrackedObject, Tracker, TrackerSettings,
    TrackingStatus,
};
pub use error::{ConfigError, Result, RigError};
pub use input::{ButtonStates, InputSnapshot, PointerButton};
pub use rig::{ControllerId, ControllerRig};
pub use scene::{BoundsSource, EntityRef, SceneEntity, SpatialQuery, StaticScene};

pub use camrig_core::{
    BezierSplineFactory, Bounds2, CameraHandle, CameraState, CameraStateClamp,
    CameraStateTransform, CatmullRomSplineFactory, ClampMode, ClampRange, HermiteSplineFactory,
    OrthoCamera, ParentFrame, Space, SplineFactory, TransformCurve, Vec2, Vec4, MIN_ZOOM,
};

#[cfg(test)]
pub(crate) mod testing {
    use camrig_core::OrthoCamera;
    use glam::Vec2;
    use tracing_subscriber::EnvFilter;

    use crate::controller::Host;
    use crate::input::InputSnapshot;
    use crate::rig::ControllerRig;
    use crate::scene::StaticScene;

    /// Route `tracing` output through the test harness, honoring `RUST_LOG`
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// Camera, input and scene for driving a rig in tests
    ///
    /// The camera sits at the origin with half-height 5 in a square
    /// 100x100 px viewport, so one pixel is 0.1 world units.
    pub struct Fixture {
        pub camera: OrthoCamera,
        pub input: InputSnapshot,
        pub scene: StaticScene,
        pub dt: f32,
        pub fixed_dt: f32,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self {
                camera: OrthoCamera::new(Vec2::ZERO, 5.0, Vec2::new(100.0, 100.0)),
                input: InputSnapshot::new(),
                scene: StaticScene::new(),
                dt: 1.0 / 60.0,
                fixed_dt: 1.0 / 50.0,
            }
        }

        pub fn host(&self) -> Host<'_> {
            Host::new(&self.camera, &self.input, &self.scene, self.dt)
        }

        /// One render frame
        pub fn frame(&mut self, rig: &mut ControllerRig) {
            rig.frame(&mut self.camera, &self.input, &self.scene, self.dt);
        }

        /// One fixed tick
        pub fn fixed(&mut self, rig: &mut ControllerRig) {
            rig.fixed_update(&self.camera, &self.input, &self.scene, self.fixed_dt);
        }
    }
}
