//! Controller trait and the contexts controllers run in
//!
//! A controller produces a [`CameraState`] from whatever it knows: user
//! input, tracked entities, the states of its children. Controllers live in
//! a [`ControllerRig`] and refer to their children by [`ControllerId`]; the
//! rig owns the lifecycle flags and drives the ticks.
//!
//! Mutation only happens in [`initialize`](CameraController::initialize),
//! [`update`](CameraController::update),
//! [`fixed_update`](CameraController::fixed_update) and the controller's own
//! action methods. [`compute_state`](CameraController::compute_state) must be
//! free of side effects since the rig may call it any number of times per
//! frame.

use std::any::Any;

use camrig_core::{CameraHandle, CameraState};
use smallvec::SmallVec;

use crate::input::InputSnapshot;
use crate::rig::{ControllerId, ControllerRig};
use crate::scene::SpatialQuery;

/// Child list returned by [`CameraController::children`]
pub type ChildIds = SmallVec<[ControllerId; 4]>;

/// Trait for camera controllers
pub trait CameraController: Any + Send + Sync {
    /// Short name used in chain descriptions and log messages
    fn label(&self) -> &'static str;

    /// Every controller this one reads from
    fn children(&self) -> ChildIds {
        ChildIds::new()
    }

    /// Children that currently contribute to this controller's state
    ///
    /// Only these are ticked along with their parent.
    fn live_children(&self) -> ChildIds {
        self.children()
    }

    /// Called once before the first update or compute
    fn initialize(&mut self, _ctx: &TickContext<'_>) {}

    /// Render-frame tick
    fn update(&mut self, _ctx: &TickContext<'_>) {}

    /// Fixed-step tick
    fn fixed_update(&mut self, _ctx: &TickContext<'_>) {}

    /// Compute the desired camera state. Must not have side effects.
    fn compute_state(&self, ctx: &ComputeContext<'_>) -> CameraState;

    /// Get as Any for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Get as mutable Any for downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Host data shared by every controller during a tick or query
#[derive(Clone, Copy)]
pub struct Host<'a> {
    /// The rendering camera, read-only until the apply step
    pub camera: &'a dyn CameraHandle,
    /// Input captured for this frame
    pub input: &'a InputSnapshot,
    /// Scene queries for tracking
    pub scene: &'a dyn SpatialQuery,
    /// Delta time in seconds
    pub dt: f32,
}

impl<'a> Host<'a> {
    pub fn new(
        camera: &'a dyn CameraHandle,
        input: &'a InputSnapshot,
        scene: &'a dyn SpatialQuery,
        dt: f32,
    ) -> Self {
        Self {
            camera,
            input,
            scene,
            dt,
        }
    }
}

/// Controllers currently being computed, innermost first
///
/// Lives on the stack of the recursive compute; a controller showing up
/// twice means the configuration has a cycle.
#[derive(Clone, Copy)]
pub(crate) struct CallChain<'a> {
    pub(crate) id: ControllerId,
    pub(crate) parent: Option<&'a CallChain<'a>>,
}

impl<'a> CallChain<'a> {
    pub(crate) fn contains(&self, id: ControllerId) -> bool {
        let mut link = Some(self);
        while let Some(current) = link {
            if current.id == id {
                return true;
            }
            link = current.parent;
        }
        false
    }
}

/// Context passed to a controller while it computes its state
pub struct ComputeContext<'a> {
    pub(crate) rig: &'a ControllerRig,
    pub(crate) host: Host<'a>,
    pub(crate) chain: &'a CallChain<'a>,
}

impl<'a> ComputeContext<'a> {
    pub fn camera(&self) -> &'a dyn CameraHandle {
        self.host.camera
    }

    pub fn input(&self) -> &'a InputSnapshot {
        self.host.input
    }

    pub fn scene(&self) -> &'a dyn SpatialQuery {
        self.host.scene
    }

    pub fn dt(&self) -> f32 {
        self.host.dt
    }

    /// Id of the controller being computed
    pub fn id(&self) -> ControllerId {
        self.chain.id
    }

    /// State of a child controller
    ///
    /// Recursive references and unknown ids are logged and yield the empty
    /// state.
    pub fn child_state(&self, child: ControllerId) -> CameraState {
        self.rig.compute_within(child, self.host, Some(self.chain))
    }
}

/// Context passed to a controller during initialize and the ticks
pub struct TickContext<'a> {
    pub(crate) rig: &'a ControllerRig,
    pub(crate) host: Host<'a>,
    pub(crate) chain: &'a CallChain<'a>,
    pub(crate) user_input: bool,
}

impl<'a> TickContext<'a> {
    pub fn camera(&self) -> &'a dyn CameraHandle {
        self.host.camera
    }

    pub fn input(&self) -> &'a InputSnapshot {
        self.host.input
    }

    pub fn scene(&self) -> &'a dyn SpatialQuery {
        self.host.scene
    }

    pub fn dt(&self) -> f32 {
        self.host.dt
    }

    pub fn id(&self) -> ControllerId {
        self.chain.id
    }

    /// Whether this controller should react to user input
    pub fn user_input(&self) -> bool {
        self.user_input
    }

    /// Current state of a child controller, computed on demand
    pub fn child_state(&self, child: ControllerId) -> CameraState {
        self.rig.compute_within(child, self.host, Some(self.chain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn test_call_chain_contains() {
        let mut keys: SlotMap<ControllerId, ()> = SlotMap::with_key();
        let a = keys.insert(());
        let b = keys.insert(());
        let c = keys.insert(());

        let root = CallChain { id: a, parent: None };
        let inner = CallChain {
            id: b,
            parent: Some(&root),
        };

        assert!(inner.contains(a));
        assert!(inner.contains(b));
        assert!(!inner.contains(c));
        assert!(!root.contains(b));
    }
}
