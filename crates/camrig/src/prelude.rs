//! Prelude module for common imports
//!
//! ```rust
//! use camrig::prelude::*;
//! ```

// Rig
pub use crate::controller::{CameraController, ComputeContext, Host, TickContext};
pub use crate::rig::{ControllerId, ControllerRig};

// Controllers
pub use crate::controllers::{
    FixedState, PanController, PanSettings, PredictionSettings, Shaker, Smoother,
    SmootherSettings, SmoothingClock, Switcher, TrackedObject, Tracker, TrackerSettings,
};

// Host-side data
pub use crate::input::{InputSnapshot, PointerButton};
pub use crate::scene::{BoundsSource, EntityRef, SpatialQuery, StaticScene};

// Config
pub use crate::config::{LoadedRig, RigConfig};

// Math
pub use camrig_core::{
    CameraHandle, CameraState, CameraStateClamp, CameraStateTransform, ClampMode, ClampRange,
    OrthoCamera, Space, Vec2,
};
