//! Scoped observation binding

use std::cell::Cell;
use std::rc::Rc;

use fos_dom::NodeId;

use crate::{IntersectionRecord, ObservationPlatform, ObserverId};

/// Exclusive link between one node and one observation resource.
///
/// The resource is released when the binding is dropped, so every exit
/// path (explicit unmount, rebinding, unwinding) tears it down. Once
/// dropped, callbacks the platform still holds become no-ops.
pub struct ObservationBinding {
    node: NodeId,
    observer: ObserverId,
    platform: Rc<dyn ObservationPlatform>,
    live: Rc<Cell<bool>>,
}

impl ObservationBinding {
    /// Subscribe `on_records` to intersection batches for `node`
    pub fn acquire<F>(platform: Rc<dyn ObservationPlatform>, node: NodeId, mut on_records: F) -> Self
    where
        F: FnMut(&[IntersectionRecord]) + 'static,
    {
        let live = Rc::new(Cell::new(true));
        let guard = Rc::clone(&live);

        let observer = platform.observe(
            node,
            Box::new(move |records: &[IntersectionRecord]| {
                if !guard.get() {
                    tracing::trace!(%node, "late intersection callback ignored");
                    return;
                }
                on_records(records);
            }),
        );
        tracing::debug!(%node, %observer, "binding acquired");

        Self {
            node,
            observer,
            platform,
            live,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn observer(&self) -> ObserverId {
        self.observer
    }
}

impl Drop for ObservationBinding {
    fn drop(&mut self) {
        self.live.set(false);
        if !self.platform.release(self.observer) {
            tracing::warn!(node = %self.node, observer = %self.observer, "observer already released");
        }
        tracing::debug!(node = %self.node, observer = %self.observer, "binding released");
    }
}

impl std::fmt::Debug for ObservationBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservationBinding")
            .field("node", &self.node)
            .field("observer", &self.observer)
            .finish()
    }
}
