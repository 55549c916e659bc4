//! Compositor-side intersection observer
//!
//! In-process [`ObservationPlatform`]: the host hands it the viewport and the
//! element rects once per frame, it queues a record whenever an observed
//! node's intersecting flag flips, and [`Compositor::flush`] delivers the
//! queued batches to their callbacks.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, VecDeque};

use fos_dom::{DOMRect, NodeId};

use crate::{IntersectionCallback, IntersectionRecord, ObservationPlatform, ObserverId};

struct Observer {
    target: NodeId,
    /// Taken out while the callback runs
    callback: Option<IntersectionCallback>,
    /// Last reported flag; None until the first update
    last_intersecting: Option<bool>,
}

/// Intersection observer manager
#[derive(Default)]
pub struct Compositor {
    next_id: Cell<u64>,
    observers: RefCell<BTreeMap<ObserverId, Observer>>,
    pending: RefCell<VecDeque<(ObserverId, Vec<IntersectionRecord>)>>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observer currently bound to `target`, if any
    pub fn observer_for(&self, target: NodeId) -> Option<ObserverId> {
        self.observers
            .borrow()
            .iter()
            .find(|(_, o)| o.target == target)
            .map(|(id, _)| *id)
    }

    /// Number of live observers watching `target`
    pub fn observers_of(&self, target: NodeId) -> usize {
        self.observers
            .borrow()
            .values()
            .filter(|o| o.target == target)
            .count()
    }

    /// Compare every observed rect against the viewport and queue one batch
    /// per observer whose intersecting flag changed. Nodes missing from
    /// `rects` are not laid out and are skipped.
    pub fn update(&self, viewport: DOMRect, rects: &HashMap<NodeId, DOMRect>, time: f64) {
        let mut observers = self.observers.borrow_mut();
        let mut pending = self.pending.borrow_mut();

        for (id, observer) in observers.iter_mut() {
            let Some(rect) = rects.get(&observer.target) else {
                continue;
            };
            let intersecting = viewport.intersects(rect);
            if observer.last_intersecting == Some(intersecting) {
                continue;
            }
            observer.last_intersecting = Some(intersecting);
            tracing::trace!(%id, target = %observer.target, intersecting, "intersection changed");

            let record = IntersectionRecord::new(observer.target, intersecting).at(time);
            pending.push_back((*id, vec![record]));
        }
    }

    /// Queue a raw batch for one observer, as the platform would after
    /// coalescing several crossings into one frame
    pub fn deliver(&self, observer: ObserverId, records: Vec<IntersectionRecord>) {
        self.pending.borrow_mut().push_back((observer, records));
    }

    /// Batches waiting for [`flush`](Self::flush)
    pub fn pending_batches(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Deliver queued batches in order. Batches for released observers are
    /// dropped. Callbacks may observe or release re-entrantly. Returns the
    /// number of batches handed to a callback.
    pub fn flush(&self) -> usize {
        let mut delivered = 0;
        loop {
            let Some((id, records)) = self.pending.borrow_mut().pop_front() else {
                break;
            };

            let callback = self
                .observers
                .borrow_mut()
                .get_mut(&id)
                .and_then(|o| o.callback.take());
            let Some(mut callback) = callback else {
                tracing::trace!(%id, "dropping batch for released observer");
                continue;
            };

            callback(&records);
            delivered += 1;

            // Put it back unless the callback released its own observer
            if let Some(observer) = self.observers.borrow_mut().get_mut(&id) {
                observer.callback = Some(callback);
            }
        }
        delivered
    }
}

impl ObservationPlatform for Compositor {
    fn observe(&self, target: NodeId, callback: IntersectionCallback) -> ObserverId {
        let id = ObserverId(self.next_id.get() + 1);
        self.next_id.set(id.0);

        self.observers.borrow_mut().insert(
            id,
            Observer {
                target,
                callback: Some(callback),
                last_intersecting: None,
            },
        );
        tracing::debug!(%id, %target, "observer created");
        id
    }

    fn release(&self, observer: ObserverId) -> bool {
        let removed = self.observers.borrow_mut().remove(&observer).is_some();
        if removed {
            self.pending.borrow_mut().retain(|(id, _)| *id != observer);
            tracing::debug!(id = %observer, "observer released");
        }
        removed
    }

    fn active_count(&self) -> usize {
        self.observers.borrow().len()
    }
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("observers", &self.observers.borrow().len())
            .field("pending", &self.pending.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<Vec<bool>>>>, IntersectionCallback) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let callback: IntersectionCallback = Box::new(move |records: &[IntersectionRecord]| {
            sink.borrow_mut().push(records.iter().map(|r| r.is_intersecting).collect());
        });
        (seen, callback)
    }

    #[test]
    fn test_update_reports_only_changes() {
        let compositor = Compositor::new();
        let node = NodeId::from_raw(1);
        let (seen, callback) = recorder();
        compositor.observe(node, callback);

        let mut rects = HashMap::new();
        rects.insert(node, DOMRect::from_xywh(0.0, 900.0, 800.0, 300.0));

        // First frame always reports, even when not intersecting
        compositor.update(DOMRect::from_xywh(0.0, 0.0, 800.0, 600.0), &rects, 0.0);
        compositor.update(DOMRect::from_xywh(0.0, 100.0, 800.0, 600.0), &rects, 16.0);
        compositor.flush();
        assert_eq!(*seen.borrow(), vec![vec![false]]);

        compositor.update(DOMRect::from_xywh(0.0, 500.0, 800.0, 600.0), &rects, 32.0);
        compositor.flush();
        assert_eq!(*seen.borrow(), vec![vec![false], vec![true]]);
    }

    #[test]
    fn test_unlaid_out_nodes_are_skipped() {
        let compositor = Compositor::new();
        let (seen, callback) = recorder();
        compositor.observe(NodeId::from_raw(7), callback);

        compositor.update(DOMRect::from_xywh(0.0, 0.0, 800.0, 600.0), &HashMap::new(), 0.0);
        assert_eq!(compositor.pending_batches(), 0);
        assert_eq!(compositor.flush(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_release_drops_pending_batches() {
        let compositor = Compositor::new();
        let node = NodeId::from_raw(3);
        let (seen, callback) = recorder();
        let id = compositor.observe(node, callback);

        compositor.deliver(id, vec![IntersectionRecord::new(node, true)]);
        assert!(compositor.release(id));
        assert!(!compositor.release(id));

        assert_eq!(compositor.flush(), 0);
        assert!(seen.borrow().is_empty());
        assert_eq!(compositor.active_count(), 0);
    }

    #[test]
    fn test_callback_may_release_itself() {
        let compositor = Rc::new(Compositor::new());
        let node = NodeId::from_raw(4);
        let own_id = Rc::new(Cell::new(None::<ObserverId>));

        let handle = Rc::clone(&compositor);
        let slot = Rc::clone(&own_id);
        let id = compositor.observe(
            node,
            Box::new(move |_: &[IntersectionRecord]| {
                if let Some(id) = slot.get() {
                    handle.release(id);
                }
            }),
        );
        own_id.set(Some(id));

        compositor.deliver(id, vec![IntersectionRecord::new(node, true)]);
        compositor.deliver(id, vec![IntersectionRecord::new(node, false)]);

        assert_eq!(compositor.flush(), 1);
        assert_eq!(compositor.active_count(), 0);
    }

    #[test]
    fn test_ids_are_unique() {
        let compositor = Compositor::new();
        let a = compositor.observe(NodeId::from_raw(1), Box::new(|_: &[IntersectionRecord]| {}));
        let b = compositor.observe(NodeId::from_raw(1), Box::new(|_: &[IntersectionRecord]| {}));
        assert_ne!(a, b);
        assert_eq!(compositor.observers_of(NodeId::from_raw(1)), 2);
        assert_eq!(compositor.observer_for(NodeId::from_raw(2)), None);
    }
}
