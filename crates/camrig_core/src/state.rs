//! Partial camera pose
//!
//! A [`CameraState`] carries any subset of position, zoom and rotation. Unset
//! fields mean "no opinion": combining states never invents a value for
//! them, and applying a state leaves the camera's own value in place.
//!
//! Every operation returns a new value, which keeps controller computation
//! free of side effects.
//!
//! # Example
//!
//! ```
//! use camrig_core::{CameraState, Vec2};
//!
//! let state = CameraState::empty()
//!     .with_position(Vec2::new(2.0, 0.0))
//!     .with_zoom(1.0)
//!     .exponential_zoom(0.5);
//!
//! assert!((state.zoom().unwrap() - 0.5f32.exp()).abs() < 1e-5);
//! assert!(state.rotation().is_none());
//! ```

use std::ops::{Add, Sub};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraHandle, Space};
use crate::clamp::ClampRange;
use crate::math::{decay_angle, decay_vec2, decay_zoom, Bounds2};
use crate::transform::CameraStateTransform;

/// Smallest zoom a state will hold
pub const MIN_ZOOM: f32 = 1e-4;

/// Partial snapshot of a 2D camera pose
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraState {
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<Vec2>,
    /// Orthographic half-height
    #[serde(skip_serializing_if = "Option::is_none")]
    zoom: Option<f32>,
    /// Degrees about the view axis
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation: Option<f32>,
}

impl CameraState {
    /// A state with every field set
    pub fn new(position: Vec2, zoom: f32, rotation: f32) -> Self {
        Self::empty()
            .with_position(position)
            .with_zoom(zoom)
            .with_rotation(rotation)
    }

    /// A state that represents nothing
    pub const fn empty() -> Self {
        Self {
            position: None,
            zoom: None,
            rotation: None,
        }
    }

    /// Snapshot the full pose of a camera
    pub fn from_camera(camera: &dyn CameraHandle, space: Space) -> Self {
        Self::new(
            camera.position(space),
            camera.half_height(),
            camera.rotation(space),
        )
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn zoom(&self) -> Option<f32> {
        self.zoom
    }

    pub fn rotation(&self) -> Option<f32> {
        self.rotation
    }

    pub fn represents_position(&self) -> bool {
        self.position.is_some()
    }

    pub fn represents_zoom(&self) -> bool {
        self.zoom.is_some()
    }

    pub fn represents_rotation(&self) -> bool {
        self.rotation.is_some()
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.zoom.is_none() && self.rotation.is_none()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Field replacement
    // ─────────────────────────────────────────────────────────────────────

    pub fn with_position(self, position: Vec2) -> Self {
        Self {
            position: Some(position),
            ..self
        }
    }

    /// Set the zoom; non-positive or non-finite values are reported and
    /// replaced by [`MIN_ZOOM`]
    pub fn with_zoom(self, zoom: f32) -> Self {
        let zoom = if zoom.is_finite() && zoom > 0.0 {
            zoom
        } else {
            tracing::warn!(zoom, "camera zoom must be positive, clamping to {}", MIN_ZOOM);
            MIN_ZOOM
        };
        Self {
            zoom: Some(zoom),
            ..self
        }
    }

    pub fn with_rotation(self, rotation: f32) -> Self {
        Self {
            rotation: Some(rotation),
            ..self
        }
    }

    /// Adopt `other`'s position if it has one
    pub fn with_position_from(self, other: &CameraState) -> Self {
        Self {
            position: other.position.or(self.position),
            ..self
        }
    }

    /// Adopt `other`'s zoom if it has one
    pub fn with_zoom_from(self, other: &CameraState) -> Self {
        Self {
            zoom: other.zoom.or(self.zoom),
            ..self
        }
    }

    /// Adopt `other`'s rotation if it has one
    pub fn with_rotation_from(self, other: &CameraState) -> Self {
        Self {
            rotation: other.rotation.or(self.rotation),
            ..self
        }
    }

    pub fn without_position(self) -> Self {
        Self {
            position: None,
            ..self
        }
    }

    pub fn without_zoom(self) -> Self {
        Self { zoom: None, ..self }
    }

    pub fn without_rotation(self) -> Self {
        Self {
            rotation: None,
            ..self
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Decay
    // ─────────────────────────────────────────────────────────────────────

    /// Exponentially approach `target`'s position; no-op if either side is unset
    pub fn decay_position_to(self, target: &CameraState, rate: f32, dt: f32) -> Self {
        match (self.position, target.position) {
            (Some(from), Some(to)) => Self {
                position: Some(decay_vec2(from, to, rate, dt)),
                ..self
            },
            _ => self,
        }
    }

    /// Exponentially approach `target`'s zoom in log space
    pub fn decay_zoom_to(self, target: &CameraState, rate: f32, dt: f32) -> Self {
        match (self.zoom, target.zoom) {
            (Some(from), Some(to)) => Self {
                zoom: Some(decay_zoom(from, to, rate, dt)),
                ..self
            },
            _ => self,
        }
    }

    /// Exponentially approach `target`'s rotation along the shortest arc
    pub fn decay_rotation_to(self, target: &CameraState, rate: f32, dt: f32) -> Self {
        match (self.rotation, target.rotation) {
            (Some(from), Some(to)) => Self {
                rotation: Some(decay_angle(from, to, rate, dt)),
                ..self
            },
            _ => self,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Zoom
    // ─────────────────────────────────────────────────────────────────────

    /// Multiply the zoom by `e^delta`
    ///
    /// A constant per-frame `delta` feels like a constant zoom speed at any
    /// scale.
    pub fn exponential_zoom(self, delta: f32) -> Self {
        match self.zoom {
            Some(zoom) => Self {
                zoom: Some((zoom.ln() + delta).exp().max(MIN_ZOOM)),
                ..self
            },
            None => self,
        }
    }

    /// Exponential zoom that keeps `world_point` at the same spot on screen
    pub fn exponential_zoom_at(self, delta: f32, world_point: Vec2) -> Self {
        match self.zoom {
            Some(zoom) => {
                let target = (zoom.ln() + delta).exp().max(MIN_ZOOM);
                self.zoom_towards(target, world_point)
            }
            None => self,
        }
    }

    /// Set the zoom to `new_zoom` while keeping `world_point` fixed on screen
    pub fn zoom_towards(self, new_zoom: f32, world_point: Vec2) -> Self {
        let Some(old_zoom) = self.zoom else {
            return self;
        };
        let new_zoom = new_zoom.max(MIN_ZOOM);
        let position = self
            .position
            .map(|position| position + (world_point - position) * (1.0 - new_zoom / old_zoom));
        Self {
            position,
            zoom: Some(new_zoom),
            ..self
        }
    }

    /// [`zoom_towards`](Self::zoom_towards) using `other`'s zoom, if it has one
    pub fn zoom_towards_state(self, other: &CameraState, world_point: Vec2) -> Self {
        match other.zoom {
            Some(zoom) => self.zoom_towards(zoom, world_point),
            None => self,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Clamping
    // ─────────────────────────────────────────────────────────────────────

    pub fn clamped_zoom(self, range: ClampRange) -> Self {
        Self {
            zoom: self.zoom.map(|zoom| range.clamp(zoom).max(MIN_ZOOM)),
            ..self
        }
    }

    pub fn clamped_position(self, x: ClampRange, y: ClampRange) -> Self {
        self.clamped_position_x(x).clamped_position_y(y)
    }

    pub fn clamped_position_x(self, range: ClampRange) -> Self {
        Self {
            position: self
                .position
                .map(|position| Vec2::new(range.clamp(position.x), position.y)),
            ..self
        }
    }

    pub fn clamped_position_y(self, range: ClampRange) -> Self {
        Self {
            position: self
                .position
                .map(|position| Vec2::new(position.x, range.clamp(position.y))),
            ..self
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transforms
    // ─────────────────────────────────────────────────────────────────────

    /// Apply an additive transform
    ///
    /// Position and rotation add the transform's delta when it carries one,
    /// treating an unset field on `self` as zero. Zoom goes through
    /// [`exponential_zoom`](Self::exponential_zoom); a zoom delta on a state
    /// without zoom is reported and dropped.
    pub fn with_transform(self, transform: &CameraStateTransform) -> Self {
        let mut state = self;

        if transform.represents_translation() {
            state.position = Some(self.position.unwrap_or(Vec2::ZERO) + transform.translation());
        }
        if transform.represents_rotation_delta() {
            state.rotation = Some(self.rotation.unwrap_or(0.0) + transform.rotation_delta());
        }

        let zoom_delta = transform.zoom_delta();
        if zoom_delta != 0.0 {
            if state.zoom.is_none() {
                tracing::warn!(
                    zoom_delta,
                    "zoom delta applied to a camera state without zoom, dropping it"
                );
            }
            state = state.exponential_zoom(zoom_delta);
        }

        state
    }

    // ─────────────────────────────────────────────────────────────────────
    // Bounds
    // ─────────────────────────────────────────────────────────────────────

    /// Rectangle seen by a camera in this state
    ///
    /// Rotation is ignored; the result is the axis-aligned view rectangle.
    pub fn bounds(&self, aspect: f32) -> Bounds2 {
        let center = self.position.unwrap_or(Vec2::ZERO);
        let zoom = self.zoom.unwrap_or(0.0);
        Bounds2::from_center_half_extents(center, Vec2::new(zoom * aspect, zoom))
    }

    /// Smallest view of the given aspect that contains `bounds`
    ///
    /// `pivot` places the slack on the non-binding axis: 0.5 centers the
    /// content, 0 aligns the view's min edge with the content's min edge, 1
    /// aligns the max edges.
    pub fn covering_bounds(bounds: Bounds2, aspect: f32, pivot: Vec2) -> Self {
        let size = bounds.size();
        let zoom = ((size.x / aspect).max(size.y) * 0.5).max(MIN_ZOOM);
        let view_size = Vec2::new(zoom * aspect, zoom) * 2.0;
        let slack = view_size - size;
        let min = bounds.min - slack * pivot;
        Self {
            position: Some(min + view_size * 0.5),
            zoom: Some(zoom),
            rotation: None,
        }
    }

    /// Largest view of the given aspect that fits inside `bounds`
    ///
    /// `pivot` places the view inside the leftover space: 0.5 centers it, 0
    /// hugs the min edge, 1 hugs the max edge.
    pub fn contained_in_bounds(bounds: Bounds2, aspect: f32, pivot: Vec2) -> Self {
        let size = bounds.size();
        let zoom = ((size.x / aspect).min(size.y) * 0.5).max(MIN_ZOOM);
        let view_size = Vec2::new(zoom * aspect, zoom) * 2.0;
        let slack = size - view_size;
        let min = bounds.min + slack * pivot;
        Self {
            position: Some(min + view_size * 0.5),
            zoom: Some(zoom),
            rotation: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Camera output
    // ─────────────────────────────────────────────────────────────────────

    /// Write every represented field to the camera
    pub fn apply_to(&self, camera: &mut dyn CameraHandle, space: Space) {
        if let Some(position) = self.position {
            camera.set_position(space, position);
        }
        if let Some(rotation) = self.rotation {
            camera.set_rotation(space, rotation);
        }
        if let Some(zoom) = self.zoom {
            camera.set_half_height(zoom);
        }
    }
}

impl Add<CameraStateTransform> for CameraState {
    type Output = CameraState;

    fn add(self, rhs: CameraStateTransform) -> CameraState {
        self.with_transform(&rhs)
    }
}

impl Sub<CameraStateTransform> for CameraState {
    type Output = CameraState;

    fn sub(self, rhs: CameraStateTransform) -> CameraState {
        self.with_transform(&-rhs)
    }
}

impl Sub for CameraState {
    type Output = CameraStateTransform;

    /// Difference `self - rhs` as a transform that takes `rhs` to `self`
    fn sub(self, rhs: CameraState) -> CameraStateTransform {
        let translation = match (self.position, rhs.position) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(Vec2::ZERO) - b.unwrap_or(Vec2::ZERO)),
        };
        let rotation_delta = match (self.rotation, rhs.rotation) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0.0) - b.unwrap_or(0.0)),
        };
        let zoom_delta = match (self.zoom, rhs.zoom) {
            (Some(a), Some(b)) => Some((a / b).ln()),
            _ => None,
        };
        CameraStateTransform::new(translation, rotation_delta, zoom_delta)
    }
}
