//! Pointer input for camera controllers

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pointer buttons a controller can bind to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Left click
    #[default]
    Primary,
    /// Right click
    Secondary,
    /// Middle click
    Middle,
}

/// One flag per pointer button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonStates {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

impl ButtonStates {
    pub fn get(&self, button: PointerButton) -> bool {
        match button {
            PointerButton::Primary => self.primary,
            PointerButton::Secondary => self.secondary,
            PointerButton::Middle => self.middle,
        }
    }

    pub fn set(&mut self, button: PointerButton, value: bool) {
        match button {
            PointerButton::Primary => self.primary = value,
            PointerButton::Secondary => self.secondary = value,
            PointerButton::Middle => self.middle = value,
        }
    }

    pub fn any(&self) -> bool {
        self.primary || self.secondary || self.middle
    }
}

/// Input state for one frame, captured by the host
///
/// # Example
///
/// ```
/// use camrig::{InputSnapshot, PointerButton};
/// use camrig::Vec2;
///
/// let input = InputSnapshot::new()
///     .with_pointer(Vec2::new(640.0, 360.0))
///     .with_press(PointerButton::Secondary);
///
/// assert!(input.is_pressed(PointerButton::Secondary));
/// assert!(input.is_held(PointerButton::Secondary));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Vertical scroll wheel delta this frame (positive = scroll up)
    pub scroll_delta: f32,
    /// Pointer position in screen pixels, origin at the bottom-left
    pub pointer_position: Vec2,
    /// Buttons that went down this frame
    pub pressed: ButtonStates,
    /// Buttons currently down
    pub held: ButtonStates,
}

impl InputSnapshot {
    /// Create empty input state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pointer(mut self, position: Vec2) -> Self {
        self.pointer_position = position;
        self
    }

    pub fn with_scroll(mut self, delta: f32) -> Self {
        self.scroll_delta = delta;
        self
    }

    /// Mark `button` as pressed this frame (and therefore held)
    pub fn with_press(mut self, button: PointerButton) -> Self {
        self.pressed.set(button, true);
        self.held.set(button, true);
        self
    }

    /// Mark `button` as held from an earlier frame
    pub fn with_hold(mut self, button: PointerButton) -> Self {
        self.held.set(button, true);
        self
    }

    pub fn is_pressed(&self, button: PointerButton) -> bool {
        self.pressed.get(button)
    }

    pub fn is_held(&self, button: PointerButton) -> bool {
        self.held.get(button)
    }

    /// Start the next frame: clears scroll and press edges, keeps held buttons and pointer
    pub fn next_frame(&mut self) {
        self.scroll_delta = 0.0;
        self.pressed = ButtonStates::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_implies_hold() {
        let input = InputSnapshot::new().with_press(PointerButton::Middle);
        assert!(input.is_pressed(PointerButton::Middle));
        assert!(input.is_held(PointerButton::Middle));
        assert!(!input.is_held(PointerButton::Primary));
    }

    #[test]
    fn test_next_frame_keeps_held() {
        let mut input = InputSnapshot::new()
            .with_scroll(2.0)
            .with_press(PointerButton::Secondary);
        input.next_frame();

        assert_eq!(input.scroll_delta, 0.0);
        assert!(!input.pressed.any());
        assert!(input.is_held(PointerButton::Secondary));
    }
}
