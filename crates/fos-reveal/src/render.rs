//! Re-render scheduling

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use fos_dom::NodeId;

/// FIFO of nodes whose style must be re-emitted. Cloning shares the queue.
#[derive(Debug, Clone, Default)]
pub struct RenderQueue {
    inner: Rc<RefCell<VecDeque<NodeId>>>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a render; a node already waiting keeps its place
    pub fn schedule(&self, node: NodeId) {
        let mut queue = self.inner.borrow_mut();
        if !queue.contains(&node) {
            queue.push_back(node);
        }
    }

    /// Take every pending request in scheduling order
    pub fn drain(&self) -> Vec<NodeId> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}
