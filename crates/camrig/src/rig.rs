//! Controller arena and frame driver
//!
//! [`ControllerRig`] owns every controller of a camera setup. Composite
//! controllers point at their children by [`ControllerId`], so the same
//! child can be shared and a bad configuration can form a cycle; cycles are
//! caught while computing and reported instead of recursing forever.
//!
//! Per render frame the host calls [`ControllerRig::frame`]:
//!
//! 1. uninitialized controllers reachable from an active one are initialized,
//!    children first;
//! 2. `update` runs on the live set, children before parents;
//! 3. every active controller computes its state;
//! 4. the states are applied to the camera.
//!
//! [`ControllerRig::fixed_update`] runs the fixed-step tick on the same set.

use std::any::type_name;

use camrig_core::{CameraHandle, CameraState, Space};
use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::controller::{CallChain, CameraController, ComputeContext, Host, TickContext};
use crate::error::{Result, RigError};
use crate::input::InputSnapshot;
use crate::scene::SpatialQuery;

new_key_type! {
    /// Unique identifier for a controller in a rig
    pub struct ControllerId;
}

/// Which controller hook a tick runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Initialize,
    Update,
    FixedUpdate,
}

/// A controller plus the flags the rig keeps for it
struct ControllerNode {
    /// Taken out while the controller is being ticked
    controller: Option<Box<dyn CameraController>>,
    active: bool,
    use_user_input: bool,
    initialized: bool,
    space: Space,
}

/// Arena of camera controllers
#[derive(Default)]
pub struct ControllerRig {
    nodes: SlotMap<ControllerId, ControllerNode>,
}

impl ControllerRig {
    /// Create an empty rig
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a controller; it starts inactive with user input enabled
    pub fn insert<C: CameraController>(&mut self, controller: C) -> ControllerId {
        self.insert_boxed(Box::new(controller))
    }

    /// Add an already boxed controller
    pub fn insert_boxed(&mut self, controller: Box<dyn CameraController>) -> ControllerId {
        self.nodes.insert(ControllerNode {
            controller: Some(controller),
            active: false,
            use_user_input: true,
            initialized: false,
            space: Space::World,
        })
    }

    /// Remove a controller
    ///
    /// Parents that still refer to it log an error and see the empty state.
    pub fn remove(&mut self, id: ControllerId) -> Option<Box<dyn CameraController>> {
        self.nodes.remove(id).and_then(|node| node.controller)
    }

    pub fn contains(&self, id: ControllerId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over controller ids
    pub fn ids(&self) -> impl Iterator<Item = ControllerId> + '_ {
        self.nodes.keys()
    }

    /// Typed access to a controller
    pub fn get<T: CameraController>(&self, id: ControllerId) -> Result<&T> {
        let controller = self
            .nodes
            .get(id)
            .and_then(|node| node.controller.as_deref())
            .ok_or(RigError::UnknownController(id))?;
        let actual = controller.label();
        controller
            .as_any()
            .downcast_ref::<T>()
            .ok_or(RigError::TypeMismatch {
                id,
                expected: type_name::<T>(),
                actual,
            })
    }

    /// Typed mutable access to a controller
    pub fn get_mut<T: CameraController>(&mut self, id: ControllerId) -> Result<&mut T> {
        let controller = self
            .nodes
            .get_mut(id)
            .and_then(|node| node.controller.as_deref_mut())
            .ok_or(RigError::UnknownController(id))?;
        let actual = controller.label();
        controller
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(RigError::TypeMismatch {
                id,
                expected: type_name::<T>(),
                actual,
            })
    }

    /// Untyped access, e.g. for labels and child lists
    pub fn controller(&self, id: ControllerId) -> Option<&dyn CameraController> {
        self.nodes.get(id).and_then(|node| node.controller.as_deref())
    }

    fn node_mut(&mut self, id: ControllerId) -> Result<&mut ControllerNode> {
        self.nodes
            .get_mut(id)
            .ok_or(RigError::UnknownController(id))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Flags
    // ─────────────────────────────────────────────────────────────────────

    /// Let the controller drive the camera every frame
    pub fn activate(&mut self, id: ControllerId) -> Result<()> {
        self.node_mut(id)?.active = true;
        Ok(())
    }

    /// Stop applying the controller; the camera keeps its last state
    pub fn deactivate(&mut self, id: ControllerId) -> Result<()> {
        self.node_mut(id)?.active = false;
        Ok(())
    }

    pub fn is_active(&self, id: ControllerId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.active)
    }

    pub fn is_initialized(&self, id: ControllerId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.initialized)
    }

    /// Space the controller's state is applied in
    pub fn set_apply_space(&mut self, id: ControllerId, space: Space) -> Result<()> {
        self.node_mut(id)?.space = space;
        Ok(())
    }

    pub fn apply_space(&self, id: ControllerId) -> Option<Space> {
        self.nodes.get(id).map(|node| node.space)
    }

    pub fn uses_user_input(&self, id: ControllerId) -> bool {
        self.nodes.get(id).is_some_and(|node| node.use_user_input)
    }

    pub fn enable_user_input(&mut self, id: ControllerId) -> Result<()> {
        self.set_user_input(id, true)
    }

    pub fn disable_user_input(&mut self, id: ControllerId) -> Result<()> {
        self.set_user_input(id, false)
    }

    /// Set the user input flag on a controller and everything below it
    pub fn set_user_input(&mut self, id: ControllerId, enabled: bool) -> Result<()> {
        if !self.nodes.contains_key(id) {
            return Err(RigError::UnknownController(id));
        }

        let mut visited = FxHashSet::default();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if !visited.insert(next) {
                continue;
            }
            let Some(node) = self.nodes.get_mut(next) else {
                continue;
            };
            node.use_user_input = enabled;
            if let Some(controller) = node.controller.as_deref() {
                stack.extend(controller.children());
            }
        }
        Ok(())
    }

    /// Set a node's flags in one go without propagating
    pub(crate) fn configure(
        &mut self,
        id: ControllerId,
        active: bool,
        use_user_input: bool,
        space: Space,
    ) -> Result<()> {
        let node = self.node_mut(id)?;
        node.active = active;
        node.use_user_input = use_user_input;
        node.space = space;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Frame driver
    // ─────────────────────────────────────────────────────────────────────

    fn active_roots(&self) -> SmallVec<[ControllerId; 2]> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.active)
            .map(|(id, _)| id)
            .collect()
    }

    /// Run one render frame and apply the active controllers to `camera`
    pub fn frame(
        &mut self,
        camera: &mut dyn CameraHandle,
        input: &InputSnapshot,
        scene: &dyn SpatialQuery,
        dt: f32,
    ) {
        let roots = self.active_roots();
        if roots.is_empty() {
            tracing::trace!("no active camera controller");
            return;
        }
        if roots.len() > 1 {
            tracing::warn!(
                count = roots.len(),
                "more than one camera controller is active, the last one applied wins"
            );
        }

        let states: SmallVec<[(CameraState, Space); 2]> = {
            let host = Host::new(&*camera, input, scene, dt);
            self.initialize_all(&roots, host);
            for id in self.live_post_order(&roots) {
                self.tick(id, host, Phase::Update);
            }
            roots
                .iter()
                .map(|&id| {
                    let space = self.apply_space(id).unwrap_or_default();
                    (self.compute_within(id, host, None), space)
                })
                .collect()
        };

        for (state, space) in states {
            tracing::trace!(?state, "applying camera state");
            state.apply_to(camera, space);
        }
    }

    /// Run one fixed-step tick on the live set
    pub fn fixed_update(
        &mut self,
        camera: &dyn CameraHandle,
        input: &InputSnapshot,
        scene: &dyn SpatialQuery,
        dt: f32,
    ) {
        let roots = self.active_roots();
        if roots.is_empty() {
            return;
        }

        let host = Host::new(camera, input, scene, dt);
        self.initialize_all(&roots, host);
        for id in self.live_post_order(&roots) {
            self.tick(id, host, Phase::FixedUpdate);
        }
    }

    /// Compute a controller's state outside the frame loop
    ///
    /// Initializes the controller and its children if needed. Querying an
    /// active controller is allowed but usually means two parties drive the
    /// same camera, so it is reported.
    pub fn current_state(&mut self, id: ControllerId, host: Host<'_>) -> CameraState {
        if !self.nodes.contains_key(id) {
            tracing::error!(?id, "state requested for an unknown camera controller");
            return CameraState::empty();
        }
        if self.is_active(id) {
            tracing::warn!(
                controller = self.label(id),
                "camera controller is still active when getting its state, this may cause unexpected behaviour"
            );
        }

        self.initialize_all(&[id], host);
        self.compute_within(id, host, None)
    }

    fn label(&self, id: ControllerId) -> &'static str {
        self.controller(id).map_or("<missing>", |controller| controller.label())
    }

    /// Initialize everything reachable from `roots`, children before parents
    fn initialize_all(&mut self, roots: &[ControllerId], host: Host<'_>) {
        let mut order = Vec::new();
        let mut done = FxHashSet::default();
        let mut on_stack = FxHashSet::default();
        for &root in roots {
            self.collect_post_order(root, false, &mut order, &mut done, &mut on_stack);
        }

        for id in order {
            if !self.is_initialized(id) {
                tracing::debug!(controller = self.label(id), "initializing camera controller");
                self.tick(id, host, Phase::Initialize);
            }
        }
    }

    /// Controllers that take part in this frame, children before parents
    fn live_post_order(&self, roots: &[ControllerId]) -> Vec<ControllerId> {
        let mut order = Vec::new();
        let mut done = FxHashSet::default();
        let mut on_stack = FxHashSet::default();
        for &root in roots {
            self.collect_post_order(root, true, &mut order, &mut done, &mut on_stack);
        }
        order
    }

    fn collect_post_order(
        &self,
        id: ControllerId,
        live_only: bool,
        order: &mut Vec<ControllerId>,
        done: &mut FxHashSet<ControllerId>,
        on_stack: &mut FxHashSet<ControllerId>,
    ) {
        if done.contains(&id) {
            return;
        }
        if !on_stack.insert(id) {
            // cycle, reported when computing
            return;
        }

        if let Some(controller) = self.controller(id) {
            let children = if live_only {
                controller.live_children()
            } else {
                controller.children()
            };
            for child in children {
                if self.nodes.contains_key(child) {
                    self.collect_post_order(child, live_only, order, done, on_stack);
                }
            }
        }

        on_stack.remove(&id);
        done.insert(id);
        order.push(id);
    }

    /// Run one hook on one controller
    ///
    /// The controller is moved out of its node for the duration so that it
    /// can be mutated while its children are computed through the rig.
    fn tick(&mut self, id: ControllerId, host: Host<'_>, phase: Phase) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let Some(mut controller) = node.controller.take() else {
            return;
        };
        let user_input = node.use_user_input;

        {
            let chain = CallChain { id, parent: None };
            let ctx = TickContext {
                rig: self,
                host,
                chain: &chain,
                user_input,
            };
            match phase {
                Phase::Initialize => controller.initialize(&ctx),
                Phase::Update => controller.update(&ctx),
                Phase::FixedUpdate => controller.fixed_update(&ctx),
            }
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.controller = Some(controller);
            if phase == Phase::Initialize {
                node.initialized = true;
            }
        }
    }

    /// Compute a controller's state below `parent` in the call chain
    pub(crate) fn compute_within(
        &self,
        id: ControllerId,
        host: Host<'_>,
        parent: Option<&CallChain<'_>>,
    ) -> CameraState {
        if parent.is_some_and(|chain| chain.contains(id)) {
            tracing::error!(
                controller = self.label(id),
                "recursive camera controller reference"
            );
            return CameraState::empty();
        }
        let Some(node) = self.nodes.get(id) else {
            tracing::error!(?id, "camera controller references a missing controller");
            return CameraState::empty();
        };
        let Some(controller) = node.controller.as_deref() else {
            // only happens while this controller is being ticked
            tracing::error!(?id, "recursive camera controller reference");
            return CameraState::empty();
        };

        let chain = CallChain { id, parent };
        let ctx = ComputeContext {
            rig: self,
            host,
            chain: &chain,
        };
        controller.compute_state(&ctx)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Introspection
    // ─────────────────────────────────────────────────────────────────────

    /// Describe the controller chain below `id`
    ///
    /// Single children are chained with `=>`, several are listed in
    /// brackets: `Shaker => Switcher[Pan, Tracker]`.
    pub fn describe(&self, id: ControllerId) -> String {
        self.describe_within(id, None)
    }

    fn describe_within(&self, id: ControllerId, parent: Option<&CallChain<'_>>) -> String {
        if parent.is_some_and(|chain| chain.contains(id)) {
            return "ERROR: Recursive Reference".to_string();
        }
        let Some(controller) = self.controller(id) else {
            return "ERROR: Missing Controller".to_string();
        };

        let chain = CallChain { id, parent };
        let children = controller.children();
        match children.as_slice() {
            [] => controller.label().to_string(),
            [child] => format!(
                "{} => {}",
                controller.label(),
                self.describe_within(*child, Some(&chain))
            ),
            many => {
                let inner: Vec<String> = many
                    .iter()
                    .map(|child| self.describe_within(*child, Some(&chain)))
                    .collect();
                format!("{}[{}]", controller.label(), inner.join(", "))
            }
        }
    }
}
