//! Camera controllers
//!
//! - [`Switcher`] - Passes through one selected child
//! - [`PanController`] - Drag to pan, scroll to zoom
//! - [`Smoother`] - Exponential smoothing of a child
//! - [`Tracker`] - Keeps a set of entities in view
//! - [`Shaker`] - Curve-driven shake on top of a child
//! - [`FixedState`] - Emits a stored state

mod fixed;
mod pan;
mod shaker;
mod smoother;
mod switcher;
mod tracker;

pub use fixed::FixedState;
pub use pan::{PanController, PanSettings};
pub use shaker::Shaker;
pub use smoother::{Smoother, SmootherSettings, SmoothingClock};
pub use switcher::Switcher;
pub use tracker::{PredictionSettings, TrackedObject, Tracker, TrackerSettings, TrackingStatus};
