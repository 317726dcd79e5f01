//! Drag-to-pan and scroll-to-zoom controller

use std::any::Any;

use camrig_core::{CameraState, CameraStateClamp, Space};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::controller::{CameraController, ComputeContext, TickContext};
use crate::input::PointerButton;

/// Settings for [`PanController`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanSettings {
    /// Log-zoom change per scroll unit
    pub zoom_factor: f32,
    /// Button that drags the view
    pub drag_button: PointerButton,
    /// Space the target is kept in
    pub space: Space,
    /// Region the target is kept inside
    pub clamp: CameraStateClamp,
}

impl Default for PanSettings {
    fn default() -> Self {
        Self {
            zoom_factor: 0.5,
            drag_button: PointerButton::Secondary,
            space: Space::World,
            clamp: CameraStateClamp::default(),
        }
    }
}

/// Pan and zoom driven by the pointer
///
/// Scrolling zooms about the cursor, so the world point under the cursor
/// stays put. Dragging keeps the world point grabbed at press time under the
/// cursor. The target never carries a rotation, leaving the camera's own.
#[derive(Clone, Debug)]
pub struct PanController {
    settings: PanSettings,
    target: CameraState,
    drag_start: Vec2,
}

impl Default for PanController {
    fn default() -> Self {
        Self::new(PanSettings::default())
    }
}

impl PanController {
    pub fn new(settings: PanSettings) -> Self {
        Self {
            settings,
            target: CameraState::empty(),
            drag_start: Vec2::ZERO,
        }
    }

    pub fn settings(&self) -> &PanSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut PanSettings {
        &mut self.settings
    }

    /// State the controller currently steers towards
    pub fn target(&self) -> CameraState {
        self.target
    }

    /// Jump to a new target, e.g. when handing over from another controller
    pub fn set_target(&mut self, target: CameraState) {
        self.target = target.without_rotation();
    }
}

impl CameraController for PanController {
    fn label(&self) -> &'static str {
        "Pan"
    }

    fn initialize(&mut self, ctx: &TickContext<'_>) {
        let current = CameraState::from_camera(ctx.camera(), self.settings.space);
        self.target = current.without_rotation();
    }

    fn update(&mut self, ctx: &TickContext<'_>) {
        let camera = ctx.camera();
        let input = ctx.input();
        let space = self.settings.space;
        let aspect = camera.aspect();

        if ctx.user_input() {
            let pointer = camera.screen_to_world(input.pointer_position);
            let cursor = camera.world_to_space(pointer, space);

            if input.scroll_delta != 0.0 {
                let zoomed = self
                    .target
                    .exponential_zoom(-input.scroll_delta * self.settings.zoom_factor);
                let zoomed = self.settings.clamp.clamp_state(zoomed, aspect);
                self.target = self.target.zoom_towards_state(&zoomed, cursor);
            }

            let button = self.settings.drag_button;
            if input.is_pressed(button) {
                self.drag_start = cursor;
            } else if input.is_held(button) {
                let cursor_offset = cursor - camera.position(space);
                self.target = self.target.with_position(self.drag_start - cursor_offset);
            }
        }

        self.target = self.settings.clamp.clamp_state(self.target, aspect);
    }

    fn compute_state(&self, _ctx: &ComputeContext<'_>) -> CameraState {
        self.target
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
