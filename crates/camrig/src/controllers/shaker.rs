//! Curve-driven camera shake
//!
//! A shake is a [`TransformCurve`] played over a duration. Every render
//! frame the shaker samples the curve at the elapsed fraction and adds the
//! result to its child's state. When the duration is used up the offset
//! returns to zero.
//!
//! Starting a shake while another one runs replaces it. To avoid a jump when
//! doing so, build the new curve with [`Shaker::continuous_shake`], which
//! starts from the current offset.

use std::any::Any;
use std::fmt;

use camrig_core::{CameraState, CameraStateTransform, SplineFactory, TransformCurve};

use crate::controller::{CameraController, ChildIds, ComputeContext, TickContext};
use crate::rig::ControllerId;

/// A running shake
struct ShakeSequence {
    curve: TransformCurve,
    duration: f32,
    elapsed: f32,
}

impl fmt::Debug for ShakeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShakeSequence")
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}

/// Adds a shake offset on top of its child
#[derive(Debug, Default)]
pub struct Shaker {
    child: Option<ControllerId>,
    offset: CameraStateTransform,
    sequence: Option<ShakeSequence>,
}

impl Shaker {
    pub fn new(child: ControllerId) -> Self {
        Self {
            child: Some(child),
            ..Self::default()
        }
    }

    /// A shaker without a child yet, see [`set_child`](Self::set_child)
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn child(&self) -> Option<ControllerId> {
        self.child
    }

    pub fn set_child(&mut self, child: ControllerId) {
        self.child = Some(child);
    }

    /// Play `curve` over `duration` seconds, replacing any running shake
    pub fn start_shake(&mut self, curve: TransformCurve, duration: f32) {
        if duration.is_nan() || duration <= 0.0 {
            tracing::warn!(duration, "shake duration must be positive, ignoring shake");
            self.stop_shake();
            return;
        }
        self.offset = curve(0.0);
        self.sequence = Some(ShakeSequence {
            curve,
            duration,
            elapsed: 0.0,
        });
    }

    /// Cancel the running shake and drop the offset
    pub fn stop_shake(&mut self) {
        self.sequence = None;
        self.offset = CameraStateTransform::empty();
    }

    pub fn is_shaking(&self) -> bool {
        self.sequence.is_some()
    }

    /// Offset currently added to the child state
    pub fn current_transform(&self) -> CameraStateTransform {
        self.offset
    }

    /// Curve from the current offset back to rest, shaped by two tangents
    ///
    /// Pair with [`HermiteSplineFactory`](camrig_core::HermiteSplineFactory)
    /// to read the middle controls as tangents.
    pub fn continuous_shake(
        &self,
        factory: &dyn SplineFactory,
        tangent1: CameraStateTransform,
        tangent2: CameraStateTransform,
    ) -> TransformCurve {
        CameraStateTransform::spline(
            self.offset,
            tangent1,
            tangent2,
            CameraStateTransform::empty(),
            factory,
        )
    }
}

impl CameraController for Shaker {
    fn label(&self) -> &'static str {
        "Shaker"
    }

    fn children(&self) -> ChildIds {
        self.child.into_iter().collect()
    }

    fn update(&mut self, ctx: &TickContext<'_>) {
        let Some(sequence) = self.sequence.as_mut() else {
            return;
        };

        if sequence.elapsed >= sequence.duration {
            self.stop_shake();
            return;
        }
        // sample first so the opening frame shows curve(0)
        self.offset = (sequence.curve)(sequence.elapsed / sequence.duration);
        sequence.elapsed += ctx.dt();
    }

    fn compute_state(&self, ctx: &ComputeContext<'_>) -> CameraState {
        let Some(child) = self.child else {
            tracing::error!("shaker has no child controller");
            return CameraState::empty();
        };
        ctx.child_state(child) + self.offset
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::FixedState;
    use crate::rig::ControllerRig;
    use crate::testing::{init_tracing, Fixture};
    use camrig_core::{BezierSplineFactory, HermiteSplineFactory};
    use glam::Vec2;

    const EPS: f32 = 1e-4;

    /// Linear ramp of the x offset from 0 to `amount`
    fn ramp(amount: f32) -> TransformCurve {
        Box::new(move |t| {
            CameraStateTransform::empty().with_translation(Vec2::new(amount * t, 0.0))
        })
    }

    fn setup() -> (ControllerRig, ControllerId, Fixture) {
        let mut rig = ControllerRig::new();
        let base = rig.insert(FixedState::new(CameraState::new(Vec2::ZERO, 5.0, 0.0)));
        let shaker = rig.insert(Shaker::new(base));
        rig.activate(shaker).unwrap();
        (rig, shaker, Fixture::new())
    }

    #[test]
    fn test_shake_samples_elapsed_fraction() {
        let (mut rig, shaker, mut fixture) = setup();
        fixture.dt = 0.1;
        rig.get_mut::<Shaker>(shaker).unwrap().start_shake(ramp(1.0), 1.0);

        fixture.frame(&mut rig);
        assert!(fixture.camera.position.x.abs() < EPS);
        fixture.frame(&mut rig);
        assert!((fixture.camera.position.x - 0.1).abs() < EPS);
        fixture.frame(&mut rig);
        assert!((fixture.camera.position.x - 0.2).abs() < EPS);
    }

    #[test]
    fn test_shake_opens_on_first_sample_and_lasts_full_duration() {
        let (mut rig, shaker, mut fixture) = setup();
        fixture.dt = 0.25;
        let decay: TransformCurve = Box::new(|t| {
            CameraStateTransform::empty().with_translation(Vec2::new(1.0 - t, 0.0))
        });
        rig.get_mut::<Shaker>(shaker).unwrap().start_shake(decay, 0.5);

        let mut xs = Vec::new();
        for _ in 0..3 {
            fixture.frame(&mut rig);
            xs.push(fixture.camera.position.x);
        }

        let expected = [1.0, 0.5, 0.0];
        for (x, want) in xs.iter().zip(expected) {
            assert!((x - want).abs() < EPS, "got {xs:?}, expected {expected:?}");
        }
    }

    #[test]
    fn test_shake_ends_at_rest() {
        let (mut rig, shaker, mut fixture) = setup();
        fixture.dt = 0.25;
        rig.get_mut::<Shaker>(shaker).unwrap().start_shake(ramp(4.0), 0.5);

        fixture.frame(&mut rig);
        fixture.frame(&mut rig);
        assert!(rig.get::<Shaker>(shaker).unwrap().is_shaking());
        assert!((fixture.camera.position.x - 2.0).abs() < EPS);
        fixture.frame(&mut rig);

        let controller = rig.get::<Shaker>(shaker).unwrap();
        assert!(!controller.is_shaking());
        assert_eq!(controller.current_transform(), CameraStateTransform::empty());
        assert_eq!(fixture.camera.position, Vec2::ZERO);
    }

    #[test]
    fn test_new_shake_cancels_previous() {
        let (mut rig, shaker, mut fixture) = setup();
        fixture.dt = 0.1;
        rig.get_mut::<Shaker>(shaker).unwrap().start_shake(ramp(10.0), 1.0);
        fixture.frame(&mut rig);
        fixture.frame(&mut rig);
        assert!((fixture.camera.position.x - 1.0).abs() < EPS);

        rig.get_mut::<Shaker>(shaker).unwrap().start_shake(ramp(-1.0), 1.0);
        fixture.frame(&mut rig);
        fixture.frame(&mut rig);

        // only the second curve contributes
        assert!((fixture.camera.position.x + 0.1).abs() < EPS);
    }

    #[test]
    fn test_rotation_and_zoom_offsets() {
        let (mut rig, shaker, mut fixture) = setup();
        fixture.dt = 0.5;
        let curve: TransformCurve = Box::new(|_| {
            CameraStateTransform::empty()
                .with_rotation_delta(3.0)
                .with_zoom_delta(2.0f32.ln())
        });
        rig.get_mut::<Shaker>(shaker).unwrap().start_shake(curve, 1.0);
        fixture.frame(&mut rig);

        assert!((fixture.camera.rotation - 3.0).abs() < EPS);
        assert!((fixture.camera.half_height - 10.0).abs() < EPS);
    }

    #[test]
    fn test_continuous_shake_starts_at_current_offset() {
        let (mut rig, shaker, mut fixture) = setup();
        fixture.dt = 0.5;
        rig.get_mut::<Shaker>(shaker).unwrap().start_shake(ramp(2.0), 1.0);
        fixture.frame(&mut rig);
        fixture.frame(&mut rig);

        let controller = rig.get::<Shaker>(shaker).unwrap();
        let current = controller.current_transform();
        let curve = controller.continuous_shake(
            &HermiteSplineFactory,
            CameraStateTransform::from_array([3.0, 0.0, 0.0, 0.0]),
            CameraStateTransform::empty(),
        );
        assert!((curve(0.0).translation() - current.translation()).length() < EPS);
        assert!(curve(1.0).translation().length() < EPS);

        let bezier = controller.continuous_shake(
            &BezierSplineFactory,
            CameraStateTransform::empty(),
            CameraStateTransform::empty(),
        );
        assert!((bezier(0.0).translation() - Vec2::new(1.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_non_positive_duration_is_ignored() {
        init_tracing();
        let mut shaker = Shaker::detached();
        shaker.start_shake(ramp(1.0), 0.0);
        assert!(!shaker.is_shaking());
        assert_eq!(shaker.current_transform(), CameraStateTransform::empty());

        shaker.start_shake(ramp(1.0), 1.0);
        shaker.start_shake(ramp(1.0), f32::NAN);
        assert!(!shaker.is_shaking());
        shaker.start_shake(ramp(1.0), -2.0);
        assert!(!shaker.is_shaking());
    }

    #[test]
    fn test_missing_child_is_empty() {
        init_tracing();
        let mut rig = ControllerRig::new();
        let shaker = rig.insert(Shaker::detached());
        let fixture = Fixture::new();
        assert!(rig.current_state(shaker, fixture.host()).is_empty());
    }
}
