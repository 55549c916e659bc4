//! Visibility observer controller
//!
//! Binds one observation resource to one node for as long as the node is
//! mounted and folds intersection batches into a [`VisibilityState`].
//!
//! State machine: `hidden <-> visible`, driven only by `is_intersecting`.
//! The machine starts at the config's initial state on every mount and is
//! discarded on unmount.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use fos_dom::NodeId;

use crate::{
    IntersectionRecord, ObservationBinding, ObservationPlatform, RenderQueue, StyleMap,
    TransitionConfig, VisibilityState,
};

/// What [`VisibilityObserverController::mount`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// A new binding was created
    Bound,
    /// Already bound to this node; nothing changed
    AlreadyBound,
    /// The binding to another node was released and replaced
    Rebound { previous: NodeId },
    /// No node was supplied; nothing is observed
    MissingNode,
}

/// Per-element reveal controller
pub struct VisibilityObserverController {
    config: TransitionConfig,
    platform: Rc<dyn ObservationPlatform>,
    state: Rc<Cell<VisibilityState>>,
    render_queue: Option<RenderQueue>,
    binding: Option<ObservationBinding>,
}

impl VisibilityObserverController {
    pub fn new(config: TransitionConfig, platform: Rc<dyn ObservationPlatform>) -> Self {
        let state = Rc::new(Cell::new(config.initial_state()));
        Self {
            config,
            platform,
            state,
            render_queue: None,
            binding: None,
        }
    }

    /// Schedule re-renders on `queue` whenever a batch is applied
    pub fn with_render_queue(mut self, queue: RenderQueue) -> Self {
        self.render_queue = Some(queue);
        self
    }

    /// Start observing `node`.
    ///
    /// `None` (or the sentinel id) leaves the controller unbound in its
    /// initial state. Mounting the bound node again is a no-op; mounting a
    /// different node releases the old binding first, so there is never more
    /// than one live resource per controller.
    pub fn mount(&mut self, node: Option<NodeId>) -> MountOutcome {
        let Some(node) = node.filter(|n| n.is_valid()) else {
            tracing::debug!("mount without a node; staying {}", self.state.get());
            return MountOutcome::MissingNode;
        };

        let previous = match &self.binding {
            Some(binding) if binding.node() == node => {
                tracing::trace!(%node, "already bound");
                return MountOutcome::AlreadyBound;
            }
            Some(binding) => Some(binding.node()),
            None => None,
        };

        // Release before acquiring so two resources never coexist
        self.binding = None;
        self.reset_state();

        let state = Rc::downgrade(&self.state);
        let queue = self.render_queue.clone();
        self.binding = Some(ObservationBinding::acquire(
            Rc::clone(&self.platform),
            node,
            move |records| apply_batch(&state, queue.as_ref(), node, records),
        ));

        match previous {
            Some(previous) => {
                tracing::debug!(%previous, %node, "controller rebound");
                MountOutcome::Rebound { previous }
            }
            None => MountOutcome::Bound,
        }
    }

    /// Release the observation resource. Returns false if nothing was bound.
    pub fn unmount(&mut self) -> bool {
        let Some(binding) = self.binding.take() else {
            return false;
        };
        drop(binding);
        self.reset_state();
        true
    }

    /// Fresh state cell, so callbacks tied to an old binding cannot reach it
    fn reset_state(&mut self) {
        self.state = Rc::new(Cell::new(self.config.initial_state()));
    }

    /// Current visibility; the config's initial state until a batch lands
    pub fn state(&self) -> VisibilityState {
        self.state.get()
    }

    /// Shorthand for `state().is_visible()`
    pub fn is_visible(&self) -> bool {
        self.state().is_visible()
    }

    /// Whether an observation resource is currently held
    pub fn is_mounted(&self) -> bool {
        self.binding.is_some()
    }

    /// Node the live binding observes, if mounted
    pub fn bound_node(&self) -> Option<NodeId> {
        self.binding.as_ref().map(ObservationBinding::node)
    }

    /// Configuration supplied at construction
    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Render step: the style snapshot for the current state
    pub fn style(&self) -> StyleMap {
        self.config.style_for(self.state())
    }
}

/// Last record for `node` in the batch wins
fn apply_batch(
    state: &Weak<Cell<VisibilityState>>,
    queue: Option<&RenderQueue>,
    node: NodeId,
    records: &[IntersectionRecord],
) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let Some(last) = records.iter().rev().find(|r| r.target == node) else {
        return;
    };

    let next = VisibilityState::from(last.is_intersecting);
    let prev = state.replace(next);
    if prev != next {
        tracing::debug!(%node, from = %prev, to = %next, "visibility changed");
    }
    if let Some(queue) = queue {
        queue.schedule(node);
    }
}

impl std::fmt::Debug for VisibilityObserverController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityObserverController")
            .field("state", &self.state.get())
            .field("binding", &self.binding)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Compositor;

    fn setup(config: TransitionConfig) -> (Rc<Compositor>, VisibilityObserverController) {
        let compositor = Rc::new(Compositor::new());
        let controller = VisibilityObserverController::new(config, compositor.clone());
        (compositor, controller)
    }

    #[test]
    fn test_missing_node_is_noop() {
        let (compositor, mut controller) = setup(TransitionConfig::fade());

        assert_eq!(controller.mount(None), MountOutcome::MissingNode);
        assert_eq!(controller.mount(Some(NodeId::NONE)), MountOutcome::MissingNode);
        assert!(!controller.is_mounted());
        assert_eq!(controller.state(), VisibilityState::Hidden);
        assert_eq!(compositor.active_count(), 0);
    }

    #[test]
    fn test_mount_same_node_twice() {
        let (compositor, mut controller) = setup(TransitionConfig::fade());
        let node = NodeId::from_raw(1);

        assert_eq!(controller.mount(Some(node)), MountOutcome::Bound);
        assert_eq!(controller.mount(Some(node)), MountOutcome::AlreadyBound);
        assert_eq!(compositor.active_count(), 1);
        assert_eq!(controller.bound_node(), Some(node));
    }

    #[test]
    fn test_mount_keeps_state_when_already_bound() {
        let (compositor, mut controller) = setup(TransitionConfig::fade());
        let node = NodeId::from_raw(1);
        controller.mount(Some(node));

        let id = compositor.observer_for(node).unwrap();
        compositor.deliver(id, vec![IntersectionRecord::new(node, true)]);
        compositor.flush();

        controller.mount(Some(node));
        assert!(controller.is_visible());
    }

    #[test]
    fn test_rebind_releases_previous() {
        let (compositor, mut controller) = setup(TransitionConfig::fade());
        let first = NodeId::from_raw(1);
        let second = NodeId::from_raw(2);

        controller.mount(Some(first));
        let stale = compositor.observer_for(first).unwrap();

        assert_eq!(
            controller.mount(Some(second)),
            MountOutcome::Rebound { previous: first }
        );
        assert_eq!(compositor.active_count(), 1);
        assert_eq!(compositor.observer_for(first), None);

        // The old observer is gone, its batches go nowhere
        compositor.deliver(stale, vec![IntersectionRecord::new(first, true)]);
        compositor.flush();
        assert!(!controller.is_visible());
    }

    #[test]
    fn test_records_for_other_nodes_ignored() {
        let (compositor, mut controller) = setup(TransitionConfig::fade());
        let node = NodeId::from_raw(1);
        controller.mount(Some(node));

        let id = compositor.observer_for(node).unwrap();
        compositor.deliver(
            id,
            vec![
                IntersectionRecord::new(node, true),
                IntersectionRecord::new(NodeId::from_raw(9), false),
            ],
        );
        compositor.flush();
        assert!(controller.is_visible());
    }

    #[test]
    fn test_unmount_resets_and_releases() {
        let (compositor, mut controller) = setup(TransitionConfig::fade());
        let node = NodeId::from_raw(1);
        controller.mount(Some(node));
        let id = compositor.observer_for(node).unwrap();
        compositor.deliver(id, vec![IntersectionRecord::new(node, true)]);
        compositor.flush();

        assert!(controller.unmount());
        assert!(!controller.unmount());
        assert_eq!(controller.state(), VisibilityState::Hidden);
        assert_eq!(compositor.active_count(), 0);
    }

    #[test]
    fn test_render_queue_scheduled() {
        let compositor = Rc::new(Compositor::new());
        let queue = RenderQueue::new();
        let mut controller = VisibilityObserverController::new(TransitionConfig::fade(), compositor.clone())
            .with_render_queue(queue.clone());
        let node = NodeId::from_raw(5);
        controller.mount(Some(node));

        assert!(queue.is_empty());
        let id = compositor.observer_for(node).unwrap();
        compositor.deliver(id, vec![IntersectionRecord::new(node, true)]);
        compositor.flush();
        assert_eq!(queue.drain(), vec![node]);
    }

    #[test]
    fn test_drop_releases() {
        let (compositor, mut controller) = setup(TransitionConfig::fade());
        controller.mount(Some(NodeId::from_raw(1)));
        drop(controller);
        assert_eq!(compositor.active_count(), 0);
    }
}
