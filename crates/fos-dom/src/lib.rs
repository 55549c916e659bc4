//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM tree used by the reveal engine and the portfolio host.
//! Nodes are addressed by [`NodeId`]; a node is *connected* while it can be
//! reached from the document root.

mod node;
mod tree;
mod document;
mod geometry;
mod operations;

pub use node::{Node, NodeData, ElementData, Attribute};
pub use tree::{DomTree, Children};
pub use document::Document;
pub use geometry::DOMRect;
pub use operations::{DomError, DomResult};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Build an id from a raw arena index.
    ///
    /// Ids built this way are only meaningful for the tree that issued the
    /// index; they are mostly useful to hosts that track nodes outside a tree.
    pub const fn from_raw(index: u32) -> Self {
        NodeId(index)
    }

    /// Raw arena index
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Check that this is not the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#none")
        }
    }
}
