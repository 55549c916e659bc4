//! Intersection observation platform
//!
//! The seam between the reveal engine and whatever reports viewport
//! intersections. Records arrive in batches, asynchronously with respect to
//! the code that registered the callback.

use fos_dom::NodeId;

/// Handle to one live observation resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub(crate) u64);

impl ObserverId {
    /// For platforms that allocate their own handles
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "observer-{}", self.0)
    }
}

/// One intersection change for one node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionRecord {
    pub target: NodeId,
    pub is_intersecting: bool,
    /// Frame timestamp in milliseconds
    pub time: f64,
}

impl IntersectionRecord {
    pub fn new(target: NodeId, is_intersecting: bool) -> Self {
        Self {
            target,
            is_intersecting,
            time: 0.0,
        }
    }

    pub fn at(mut self, time: f64) -> Self {
        self.time = time;
        self
    }
}

/// Callback invoked with each delivered batch
pub type IntersectionCallback = Box<dyn FnMut(&[IntersectionRecord])>;

/// Source of intersection reports
///
/// Implementations run on the UI thread; callbacks are never invoked from
/// inside `observe` or `release`.
pub trait ObservationPlatform {
    /// Start observing `target`, returning the handle that owns the subscription
    fn observe(&self, target: NodeId, callback: IntersectionCallback) -> ObserverId;

    /// Tear a subscription down. Returns false if it was already gone.
    fn release(&self, observer: ObserverId) -> bool;

    /// Number of live subscriptions
    fn active_count(&self) -> usize;
}
