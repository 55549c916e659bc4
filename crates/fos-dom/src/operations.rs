//! DOM operation errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("node {0} not found")]
    NotFound(NodeId),
    /// Hierarchy error (e.g., inserting an ancestor under its descendant)
    #[error("cannot insert {child} under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    /// Node cannot hold children or attributes
    #[error("node {0} has the wrong type for this operation")]
    InvalidNodeType(NodeId),
}
