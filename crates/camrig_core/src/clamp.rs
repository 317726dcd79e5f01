//! Constraining camera states to a region
//!
//! [`CameraStateClamp`] keeps a state inside configured X, Y and zoom ranges.
//! In [`ClampMode::Center`] only the position point is clamped. In
//! [`ClampMode::Bounds`] the whole visible rectangle is pushed back inside
//! the region, shrinking the view if it is larger than the region.
//!
//! Rotation is not clamped.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::Bounds2;
use crate::state::CameraState;

/// Closed interval used for clamping
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClampRange {
    pub min: f32,
    pub max: f32,
}

impl ClampRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into the range; an inverted range pins to `min`
    pub fn clamp(&self, value: f32) -> f32 {
        value.min(self.max).max(self.min)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Signed shift that pushes `[min, max]` back inside the range
    ///
    /// Positive when the low edge is violated, negative when the high edge
    /// is. If both are violated the larger push wins; a tie goes to the
    /// high edge.
    pub fn correction(&self, min: f32, max: f32) -> f32 {
        let min_correction = (self.min - min).max(0.0);
        let max_correction = (self.max - max).min(0.0);
        if min_correction > -max_correction {
            min_correction
        } else {
            max_correction
        }
    }
}

/// How the position is constrained
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampMode {
    /// Clamp the view center
    #[default]
    Center,
    /// Keep the visible rectangle inside the region
    Bounds,
}

/// Region constraint for camera states
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraStateClamp {
    pub mode: ClampMode,
    /// Horizontal range, `None` leaves x free
    pub x: Option<ClampRange>,
    /// Vertical range, `None` leaves y free
    pub y: Option<ClampRange>,
    /// Zoom range, `None` leaves zoom free
    pub zoom: Option<ClampRange>,
}

impl Default for CameraStateClamp {
    fn default() -> Self {
        Self {
            mode: ClampMode::Center,
            x: Some(ClampRange::new(-10.0, 10.0)),
            y: Some(ClampRange::new(-10.0, 10.0)),
            zoom: Some(ClampRange::new(0.1, 15.0)),
        }
    }
}

impl CameraStateClamp {
    /// A clamp that lets everything through
    pub fn disabled() -> Self {
        Self {
            mode: ClampMode::Center,
            x: None,
            y: None,
            zoom: None,
        }
    }

    /// Bounds-mode clamp over a rectangle, zoom left free
    pub fn bounds(region: Bounds2) -> Self {
        Self {
            mode: ClampMode::Bounds,
            x: Some(ClampRange::new(region.min.x, region.max.x)),
            y: Some(ClampRange::new(region.min.y, region.max.y)),
            zoom: None,
        }
    }

    /// Center-mode clamp over a rectangle, zoom left free
    pub fn center(region: Bounds2) -> Self {
        Self {
            mode: ClampMode::Center,
            ..Self::bounds(region)
        }
    }

    pub fn with_mode(mut self, mode: ClampMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_zoom_range(mut self, range: Option<ClampRange>) -> Self {
        self.zoom = range;
        self
    }

    /// Constrain `state` for a camera of the given aspect ratio
    pub fn clamp_state(&self, state: CameraState, aspect: f32) -> CameraState {
        let mut state = state;
        if let Some(range) = self.zoom {
            state = state.clamped_zoom(range);
        }

        match self.mode {
            ClampMode::Center => self.clamp_center(state),
            ClampMode::Bounds => self.clamp_bounds(state, aspect),
        }
    }

    fn clamp_center(&self, state: CameraState) -> CameraState {
        let mut state = state;
        if let Some(range) = self.x {
            state = state.clamped_position_x(range);
        }
        if let Some(range) = self.y {
            state = state.clamped_position_y(range);
        }
        state
    }

    fn clamp_bounds(&self, state: CameraState, aspect: f32) -> CameraState {
        if self.x.is_none() && self.y.is_none() {
            return state;
        }
        if !state.represents_position() || !state.represents_zoom() {
            tracing::debug!("bounds clamp needs position and zoom, clamping the center instead");
            return self.clamp_center(state);
        }

        let view = state.bounds(aspect);
        let correction = Vec2::new(
            self.x.map_or(0.0, |range| range.correction(view.min.x, view.max.x)),
            self.y.map_or(0.0, |range| range.correction(view.min.y, view.max.y)),
        );

        let mut corrected = view.translated(correction);
        if let Some(range) = self.x {
            corrected.min.x = corrected.min.x.max(range.min);
            corrected.max.x = corrected.max.x.min(range.max);
        }
        if let Some(range) = self.y {
            corrected.min.y = corrected.min.y.max(range.min);
            corrected.max.y = corrected.max.y.min(range.max);
        }

        // hug the edge the view was pushed away from
        let pivot = Vec2::splat(0.5) - correction_sign(correction) * 0.5;

        let clamped = CameraState::contained_in_bounds(corrected, aspect, pivot);
        match state.rotation() {
            Some(rotation) => clamped.with_rotation(rotation),
            None => clamped,
        }
    }
}

fn correction_sign(correction: Vec2) -> Vec2 {
    let sign = |value: f32| if value == 0.0 { 0.0 } else { value.signum() };
    Vec2::new(sign(correction.x), sign(correction.y))
}
