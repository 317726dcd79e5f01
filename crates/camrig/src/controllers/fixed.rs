//! Scripted camera state

use std::any::Any;

use camrig_core::CameraState;

use crate::controller::{CameraController, ComputeContext};

/// Emits a stored state, for cutscenes, manual cameras and fixtures
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedState {
    state: CameraState,
}

impl FixedState {
    pub fn new(state: CameraState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn set_state(&mut self, state: CameraState) {
        self.state = state;
    }
}

impl CameraController for FixedState {
    fn label(&self) -> &'static str {
        "Fixed"
    }

    fn compute_state(&self, _ctx: &ComputeContext<'_>) -> CameraState {
        self.state
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
