//! Animated wrapper around opaque content

use fos_dom::{DomResult, DomTree, NodeId};

use crate::{MountOutcome, StyleMap, VisibilityObserverController};

/// Content that fades in when its wrapper scrolls into view.
///
/// The payload is carried untouched; only the wrapper node is observed and
/// styled.
#[derive(Debug)]
pub struct FadeIn<T> {
    content: T,
    controller: VisibilityObserverController,
}

impl<T> FadeIn<T> {
    pub fn new(content: T, controller: VisibilityObserverController) -> Self {
        Self { content, controller }
    }

    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut T {
        &mut self.content
    }

    pub fn controller(&self) -> &VisibilityObserverController {
        &self.controller
    }

    /// Observe `wrapper`, painting the initial style first so nothing flashes
    /// before the first intersection report
    pub fn mount(&mut self, tree: &mut DomTree, wrapper: NodeId) -> DomResult<MountOutcome> {
        self.paint(tree, wrapper)?;
        Ok(self.controller.mount(Some(wrapper)))
    }

    pub fn unmount(&mut self) -> bool {
        self.controller.unmount()
    }

    pub fn style(&self) -> StyleMap {
        self.controller.style()
    }

    /// Write the current style into the node's `style` attribute
    pub fn paint(&self, tree: &mut DomTree, node: NodeId) -> DomResult<()> {
        tree.set_attribute(node, "style", self.style().to_css_text())
    }

    /// Tear down and hand the payload back
    pub fn into_content(self) -> T {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Compositor, IntersectionRecord, TransitionConfig};
    use std::rc::Rc;
    use crate::platform::ObservationPlatform;

    #[test]
    fn test_mount_paints_initial_style() {
        let compositor = Rc::new(Compositor::new());
        let mut tree = DomTree::new();
        let wrapper = tree.append_element(tree.root(), "div").unwrap();

        let controller = VisibilityObserverController::new(TransitionConfig::fade(), compositor.clone());
        let mut section = FadeIn::new("payload", controller);

        assert_eq!(section.mount(&mut tree, wrapper).unwrap(), MountOutcome::Bound);
        assert_eq!(tree.attribute(wrapper, "style"), Some("opacity: 0; transition: all 1s;"));

        let id = compositor.observer_for(wrapper).unwrap();
        compositor.deliver(id, vec![IntersectionRecord::new(wrapper, true)]);
        compositor.flush();
        section.paint(&mut tree, wrapper).unwrap();
        assert_eq!(tree.attribute(wrapper, "style"), Some("opacity: 1; transition: all 1s;"));
        assert_eq!(*section.content(), "payload");
    }

    #[test]
    fn test_into_content_releases() {
        let compositor = Rc::new(Compositor::new());
        let mut tree = DomTree::new();
        let wrapper = tree.append_element(tree.root(), "section").unwrap();
        let controller = VisibilityObserverController::new(TransitionConfig::fade(), compositor.clone());
        let mut section = FadeIn::new(vec![1, 2, 3], controller);
        section.mount(&mut tree, wrapper).unwrap();

        assert_eq!(section.into_content(), vec![1, 2, 3]);
        assert_eq!(compositor.active_count(), 0);
    }
}
