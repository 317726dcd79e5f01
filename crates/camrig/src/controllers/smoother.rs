//! Exponential smoothing of a child controller

use std::any::Any;

use camrig_core::{CameraState, Space};
use serde::{Deserialize, Serialize};

use crate::controller::{CameraController, ChildIds, ComputeContext, TickContext};
use crate::rig::ControllerId;

/// Which clock drives the smoothing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingClock {
    /// Decay a persisted state on the fixed tick
    #[default]
    FixedTick,
    /// Decay from the camera's current pose with the render dt
    Frame,
}

/// Settings for [`Smoother`]
///
/// Each channel has an optional decay rate in 1/s; `None` passes the child's
/// value straight through.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmootherSettings {
    pub position: Option<f32>,
    pub zoom: Option<f32>,
    pub rotation: Option<f32>,
    pub clock: SmoothingClock,
    /// Space the camera pose is read in for [`SmoothingClock::Frame`]
    pub space: Space,
}

impl SmootherSettings {
    /// Smooth every channel at the same rate
    pub fn uniform(rate: f32) -> Self {
        Self {
            position: Some(rate),
            zoom: Some(rate),
            rotation: Some(rate),
            ..Self::default()
        }
    }

    pub fn with_clock(mut self, clock: SmoothingClock) -> Self {
        self.clock = clock;
        self
    }
}

/// Eases towards the state of its child
#[derive(Clone, Debug, Default)]
pub struct Smoother {
    child: Option<ControllerId>,
    settings: SmootherSettings,
    interpolated: CameraState,
}

impl Smoother {
    pub fn new(child: ControllerId, settings: SmootherSettings) -> Self {
        Self {
            child: Some(child),
            settings,
            interpolated: CameraState::empty(),
        }
    }

    /// A smoother without a child yet, see [`set_child`](Self::set_child)
    pub fn detached(settings: SmootherSettings) -> Self {
        Self {
            child: None,
            settings,
            interpolated: CameraState::empty(),
        }
    }

    pub fn child(&self) -> Option<ControllerId> {
        self.child
    }

    pub fn set_child(&mut self, child: ControllerId) {
        self.child = Some(child);
    }

    pub fn settings(&self) -> &SmootherSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SmootherSettings {
        &mut self.settings
    }

    /// The persisted state of the fixed-tick clock
    pub fn interpolated(&self) -> CameraState {
        self.interpolated
    }

    /// Decay `from` towards `to` on the enabled channels
    ///
    /// Disabled channels, and channels `from` has no value for yet, take the
    /// target's value.
    fn step(&self, from: CameraState, to: &CameraState, dt: f32) -> CameraState {
        let mut state = from;

        state = match self.settings.position {
            Some(rate) if state.represents_position() => state.decay_position_to(to, rate, dt),
            _ => state.with_position_from(to),
        };
        state = match self.settings.zoom {
            Some(rate) if state.represents_zoom() => state.decay_zoom_to(to, rate, dt),
            _ => state.with_zoom_from(to),
        };
        state = match self.settings.rotation {
            Some(rate) if state.represents_rotation() => state.decay_rotation_to(to, rate, dt),
            _ => state.with_rotation_from(to),
        };

        state
    }

    /// Take the smoothed channels from `smoothed`, the rest from `state`
    fn blend(&self, state: CameraState, smoothed: &CameraState) -> CameraState {
        let mut state = state;
        if self.settings.position.is_some() {
            state = state.with_position_from(smoothed);
        }
        if self.settings.zoom.is_some() {
            state = state.with_zoom_from(smoothed);
        }
        if self.settings.rotation.is_some() {
            state = state.with_rotation_from(smoothed);
        }
        state
    }
}

impl CameraController for Smoother {
    fn label(&self) -> &'static str {
        "Smoother"
    }

    fn children(&self) -> ChildIds {
        self.child.into_iter().collect()
    }

    fn initialize(&mut self, ctx: &TickContext<'_>) {
        if let Some(child) = self.child {
            self.interpolated = ctx.child_state(child);
        }
    }

    fn fixed_update(&mut self, ctx: &TickContext<'_>) {
        if self.settings.clock != SmoothingClock::FixedTick {
            return;
        }
        let Some(child) = self.child else {
            return;
        };
        let target = ctx.child_state(child);
        self.interpolated = self.step(self.interpolated, &target, ctx.dt());
    }

    fn compute_state(&self, ctx: &ComputeContext<'_>) -> CameraState {
        let Some(child) = self.child else {
            tracing::error!("smoother has no child controller");
            return CameraState::empty();
        };
        let state = ctx.child_state(child);

        match self.settings.clock {
            SmoothingClock::FixedTick => self.blend(state, &self.interpolated),
            SmoothingClock::Frame => {
                let current = CameraState::from_camera(ctx.camera(), self.settings.space);
                let smoothed = self.step(current, &state, ctx.dt());
                self.blend(state, &smoothed)
            }
        }
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
    use glam::Vec2;

    const EPS: f32 = 1e-4;

    fn setup(settings: SmootherSettings) -> (ControllerRig, ControllerId, ControllerId, Fixture) {
        let mut rig = ControllerRig::new();
        let target = rig.insert(FixedState::new(CameraState::new(Vec2::ZERO, 5.0, 0.0)));
        let smoother = rig.insert(Smoother::new(target, settings));
        rig.activate(smoother).unwrap();

        let mut fixture = Fixture::new();
        fixture.frame(&mut rig);
        (rig, smoother, target, fixture)
    }

    fn move_target(rig: &mut ControllerRig, target: ControllerId, state: CameraState) {
        rig.get_mut::<FixedState>(target).unwrap().set_state(state);
    }

    #[test]
    fn test_fixed_tick_decays_enabled_channels() {
        let settings = SmootherSettings {
            position: Some(5.0),
            ..SmootherSettings::default()
        };
        let (mut rig, _, target, mut fixture) = setup(settings);
        move_target(&mut rig, target, CameraState::new(Vec2::new(10.0, 0.0), 2.0, 0.0));

        fixture.fixed(&mut rig);
        fixture.frame(&mut rig);

        // position lags, zoom passes straight through
        let expected_x = 10.0 - 10.0 * (-5.0f32 * fixture.fixed_dt).exp();
        assert!((fixture.camera.position.x - expected_x).abs() < EPS);
        assert_eq!(fixture.camera.half_height, 2.0);
    }

    #[test]
    fn test_fixed_tick_converges() {
        let (mut rig, smoother, target, mut fixture) = setup(SmootherSettings::uniform(8.0));
        let goal = CameraState::new(Vec2::new(-6.0, 3.0), 1.0, 90.0);
        move_target(&mut rig, target, goal);

        for _ in 0..400 {
            fixture.fixed(&mut rig);
        }
        fixture.frame(&mut rig);

        let interpolated = rig.get::<Smoother>(smoother).unwrap().interpolated();
        assert!((interpolated.position().unwrap() - Vec2::new(-6.0, 3.0)).length() < 1e-3);
        assert!((fixture.camera.half_height - 1.0).abs() < 1e-3);
        assert!((fixture.camera.rotation - 90.0).abs() < 1e-2);
    }

    #[test]
    fn test_render_frames_alone_do_not_move_fixed_tick_state() {
        let (mut rig, _, target, mut fixture) = setup(SmootherSettings::uniform(8.0));
        move_target(&mut rig, target, CameraState::new(Vec2::new(4.0, 4.0), 5.0, 0.0));

        for _ in 0..10 {
            fixture.frame(&mut rig);
        }
        assert_eq!(fixture.camera.position, Vec2::ZERO);
    }

    #[test]
    fn test_adopts_channels_the_child_starts_providing() {
        let mut rig = ControllerRig::new();
        let target = rig.insert(FixedState::new(CameraState::empty().with_zoom(3.0)));
        let smoother = rig.insert(Smoother::new(target, SmootherSettings::uniform(4.0)));
        rig.activate(smoother).unwrap();
        let mut fixture = Fixture::new();
        fixture.frame(&mut rig);

        move_target(&mut rig, target, CameraState::new(Vec2::new(2.0, 0.0), 3.0, 0.0));
        fixture.fixed(&mut rig);

        let interpolated = rig.get::<Smoother>(smoother).unwrap().interpolated();
        assert_eq!(interpolated.position(), Some(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_frame_clock_decays_from_camera() {
        let settings = SmootherSettings {
            position: Some(5.0),
            ..SmootherSettings::default()
        }
        .with_clock(SmoothingClock::Frame);
        let (mut rig, _, target, mut fixture) = setup(settings);
        move_target(&mut rig, target, CameraState::new(Vec2::new(10.0, 0.0), 5.0, 0.0));

        fixture.frame(&mut rig);
        let first = fixture.camera.position.x;
        assert!((first - (10.0 - 10.0 * (-5.0f32 * fixture.dt).exp())).abs() < EPS);

        fixture.frame(&mut rig);
        assert!(fixture.camera.position.x > first);
        assert!(fixture.camera.position.x < 10.0);
    }

    #[test]
    fn test_missing_child_is_empty() {
        init_tracing();
        let mut rig = ControllerRig::new();
        let smoother = rig.insert(Smoother::detached(SmootherSettings::uniform(1.0)));
        let fixture = Fixture::new();
        assert!(rig.current_state(smoother, fixture.host()).is_empty());
    }
}
