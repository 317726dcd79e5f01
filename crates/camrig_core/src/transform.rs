//! Additive camera deltas
//!
//! A [`CameraStateTransform`] is what an effect adds on top of a state:
//! a translation, a rotation delta in degrees and a zoom delta in log-zoom
//! units. Unset fields read as zero, so once read through the accessors the
//! transform behaves like a vector and supports the usual arithmetic.

use std::ops::{Add, Div, Mul, Neg, Sub};

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::spline::SplineFactory;

/// A sampled curve of transforms over `t` in `[0, 1]`
pub type TransformCurve = Box<dyn Fn(f32) -> CameraStateTransform + Send + Sync>;

/// Number of channels in a transform: x, y, rotation, zoom
pub const CHANNELS: usize = 4;

/// Additive delta over a camera state's channels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraStateTransform {
    #[serde(skip_serializing_if = "Option::is_none")]
    translation: Option<Vec2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rotation_delta: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zoom_delta: Option<f32>,
}

impl CameraStateTransform {
    /// The zero transform
    pub const fn empty() -> Self {
        Self {
            translation: None,
            rotation_delta: None,
            zoom_delta: None,
        }
    }

    pub fn new(translation: Option<Vec2>, rotation_delta: Option<f32>, zoom_delta: Option<f32>) -> Self {
        Self {
            translation,
            rotation_delta,
            zoom_delta,
        }
    }

    pub fn translation(&self) -> Vec2 {
        self.translation.unwrap_or(Vec2::ZERO)
    }

    pub fn rotation_delta(&self) -> f32 {
        self.rotation_delta.unwrap_or(0.0)
    }

    /// Zoom change in log-zoom units
    pub fn zoom_delta(&self) -> f32 {
        self.zoom_delta.unwrap_or(0.0)
    }

    pub fn represents_translation(&self) -> bool {
        self.translation.is_some()
    }

    pub fn represents_rotation_delta(&self) -> bool {
        self.rotation_delta.is_some()
    }

    pub fn represents_zoom_delta(&self) -> bool {
        self.zoom_delta.is_some()
    }

    pub fn with_translation(self, translation: Vec2) -> Self {
        Self {
            translation: Some(translation),
            ..self
        }
    }

    pub fn with_rotation_delta(self, degrees: f32) -> Self {
        Self {
            rotation_delta: Some(degrees),
            ..self
        }
    }

    pub fn with_zoom_delta(self, zoom_delta: f32) -> Self {
        Self {
            zoom_delta: Some(zoom_delta),
            ..self
        }
    }

    pub fn without_translation(self) -> Self {
        Self {
            translation: None,
            ..self
        }
    }

    pub fn without_rotation_delta(self) -> Self {
        Self {
            rotation_delta: None,
            ..self
        }
    }

    pub fn without_zoom_delta(self) -> Self {
        Self {
            zoom_delta: None,
            ..self
        }
    }

    /// Channels as `[x, y, rotation, zoom]`, unset reading as zero
    pub fn to_array(&self) -> [f32; CHANNELS] {
        let translation = self.translation();
        [
            translation.x,
            translation.y,
            self.rotation_delta(),
            self.zoom_delta(),
        ]
    }

    /// Build a fully represented transform from `[x, y, rotation, zoom]`
    pub fn from_array(channels: [f32; CHANNELS]) -> Self {
        Self::new(
            Some(Vec2::new(channels[0], channels[1])),
            Some(channels[2]),
            Some(channels[3]),
        )
    }

    /// Like [`from_array`](Self::from_array) for slices of unchecked length
    pub fn from_slice(channels: &[f32]) -> Result<Self> {
        let array: [f32; CHANNELS] = channels.try_into().map_err(|_| CoreError::ChannelCount {
            expected: CHANNELS,
            actual: channels.len(),
        })?;
        Ok(Self::from_array(array))
    }

    pub fn to_vec4(&self) -> Vec4 {
        Vec4::from_array(self.to_array())
    }

    pub fn from_vec4(channels: Vec4) -> Self {
        Self::from_array(channels.to_array())
    }

    /// Build a curve through four control transforms using `factory`
    ///
    /// The factory decides how the controls are interpreted (Bézier points,
    /// Hermite endpoints and tangents, ...).
    pub fn spline(
        control1: CameraStateTransform,
        control2: CameraStateTransform,
        control3: CameraStateTransform,
        control4: CameraStateTransform,
        factory: &dyn SplineFactory,
    ) -> TransformCurve {
        let spline = factory.create([
            control1.to_vec4(),
            control2.to_vec4(),
            control3.to_vec4(),
            control4.to_vec4(),
        ]);
        Box::new(move |t| CameraStateTransform::from_vec4(spline(t)))
    }
}

impl Add for CameraStateTransform {
    type Output = CameraStateTransform;

    fn add(self, rhs: CameraStateTransform) -> CameraStateTransform {
        Self::from_vec4(self.to_vec4() + rhs.to_vec4())
    }
}

impl Sub for CameraStateTransform {
    type Output = CameraStateTransform;

    fn sub(self, rhs: CameraStateTransform) -> CameraStateTransform {
        Self::from_vec4(self.to_vec4() - rhs.to_vec4())
    }
}

impl Mul<f32> for CameraStateTransform {
    type Output = CameraStateTransform;

    fn mul(self, rhs: f32) -> CameraStateTransform {
        Self::from_vec4(self.to_vec4() * rhs)
    }
}

impl Mul<CameraStateTransform> for f32 {
    type Output = CameraStateTransform;

    fn mul(self, rhs: CameraStateTransform) -> CameraStateTransform {
        rhs * self
    }
}

impl Div<f32> for CameraStateTransform {
    type Output = CameraStateTransform;

    fn div(self, rhs: f32) -> CameraStateTransform {
        Self::from_vec4(self.to_vec4() / rhs)
    }
}

impl Neg for CameraStateTransform {
    type Output = CameraStateTransform;

    fn neg(self) -> CameraStateTransform {
        self * -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_reads_as_zero() {
        let transform = CameraStateTransform::empty();
        assert_eq!(transform.translation(), Vec2::ZERO);
        assert_eq!(transform.rotation_delta(), 0.0);
        assert_eq!(transform.zoom_delta(), 0.0);
        assert_eq!(transform.to_array(), [0.0; 4]);
    }

    #[test]
    fn test_arithmetic_treats_unset_as_zero() {
        let a = CameraStateTransform::empty().with_translation(Vec2::new(1.0, 2.0));
        let b = CameraStateTransform::empty().with_zoom_delta(0.5);

        let sum = a + b;
        assert_eq!(sum.to_array(), [1.0, 2.0, 0.0, 0.5]);

        let difference = b - a;
        assert_eq!(difference.to_array(), [-1.0, -2.0, 0.0, 0.5]);

        let scaled = 2.0 * a;
        assert_eq!(scaled.to_array(), [2.0, 4.0, 0.0, 0.0]);

        let halved = b / 2.0;
        assert_eq!(halved.zoom_delta(), 0.25);

        assert_eq!((-a).translation(), Vec2::new(-1.0, -2.0));
    }

    #[test]
    fn test_from_slice_checks_length() {
        let parsed = CameraStateTransform::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(parsed.rotation_delta(), 3.0);

        let error = CameraStateTransform::from_slice(&[1.0, 2.0]).unwrap_err();
        assert_eq!(
            error,
            CoreError::ChannelCount {
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn test_without_clears_field() {
        let transform = CameraStateTransform::from_array([1.0, 1.0, 1.0, 1.0])
            .without_translation()
            .without_zoom_delta();
        assert!(!transform.represents_translation());
        assert!(transform.represents_rotation_delta());
        assert!(!transform.represents_zoom_delta());
    }
}
