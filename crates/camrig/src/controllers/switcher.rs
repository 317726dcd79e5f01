//! Switching between controllers

use std::any::Any;

use camrig_core::CameraState;

use crate::controller::{CameraController, ChildIds, ComputeContext};
use crate::rig::ControllerId;

/// Passes through the state of one selected child
///
/// Unselected children are neither ticked nor computed, so a pan controller
/// parked behind a switcher keeps its target until it is selected again.
///
/// # Example
///
/// ```ignore
/// let switcher = rig.insert(Switcher::new([pan, tracker]));
/// rig.get_mut::<Switcher>(switcher)?.switch_to(1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Switcher {
    children: ChildIds,
    active_index: usize,
}

impl Switcher {
    /// Create a switcher selecting the first child
    pub fn new(children: impl IntoIterator<Item = ControllerId>) -> Self {
        Self {
            children: children.into_iter().collect(),
            active_index: 0,
        }
    }

    /// Select the child at `index`
    ///
    /// An index past the end is kept; computing with it logs an error and
    /// yields the empty state until a valid index is selected.
    pub fn switch_to(&mut self, index: usize) {
        self.active_index = index;
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Currently selected child, if the index is valid
    pub fn selected(&self) -> Option<ControllerId> {
        self.children.get(self.active_index).copied()
    }

    pub fn controllers(&self) -> &[ControllerId] {
        &self.children
    }

    /// Append a child, returning its index
    pub fn push(&mut self, child: ControllerId) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }
}

impl CameraController for Switcher {
    fn label(&self) -> &'static str {
        "Switcher"
    }

    fn children(&self) -> ChildIds {
        self.children.clone()
    }

    fn live_children(&self) -> ChildIds {
        self.selected().into_iter().collect()
    }

    fn compute_state(&self, ctx: &ComputeContext<'_>) -> CameraState {
        match self.selected() {
            Some(child) => ctx.child_state(child),
            None => {
                tracing::error!(
                    index = self.active_index,
                    count = self.children.len(),
                    "switcher index out of range"
                );
                CameraState::empty()
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

    fn rig_with_children() -> (ControllerRig, ControllerId, [ControllerId; 2]) {
        let mut rig = ControllerRig::new();
        let first = rig.insert(FixedState::new(CameraState::new(Vec2::new(1.0, 0.0), 2.0, 0.0)));
        let second = rig.insert(FixedState::new(CameraState::new(Vec2::new(-4.0, 3.0), 6.0, 0.0)));
        let switcher = rig.insert(Switcher::new([first, second]));
        (rig, switcher, [first, second])
    }

    #[test]
    fn test_passes_through_selected_child() {
        let (mut rig, switcher, [_, second]) = rig_with_children();
        let fixture = Fixture::new();

        rig.get_mut::<Switcher>(switcher).unwrap().switch_to(1);
        let state = rig.current_state(switcher, fixture.host());
        let expected = rig.current_state(second, fixture.host());
        assert_eq!(state, expected);
        assert_eq!(state.position(), Some(Vec2::new(-4.0, 3.0)));
    }

    #[test]
    fn test_out_of_range_index_is_empty() {
        init_tracing();
        let (mut rig, switcher, _) = rig_with_children();
        let fixture = Fixture::new();

        rig.get_mut::<Switcher>(switcher).unwrap().switch_to(5);
        assert_eq!(rig.get::<Switcher>(switcher).unwrap().active_index(), 5);
        assert!(rig.current_state(switcher, fixture.host()).is_empty());

        rig.get_mut::<Switcher>(switcher).unwrap().switch_to(0);
        assert!(!rig.current_state(switcher, fixture.host()).is_empty());
    }

    #[test]
    fn test_live_children_is_selection() {
        let (rig, switcher, [first, second]) = rig_with_children();
        let controller = rig.get::<Switcher>(switcher).unwrap();
        assert_eq!(controller.children().as_slice(), &[first, second]);
        assert_eq!(controller.live_children().as_slice(), &[first]);
    }
}
