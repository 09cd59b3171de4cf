//! Error types for the graph model.

use thiserror::Error;

use crate::NodeId;

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised while linking nodes or rebuilding a graph from data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A node cannot be linked to itself.
    #[error("cannot link node {0} to itself")]
    SelfLink(NodeId),

    /// The two nodes already share a link.
    #[error("nodes {0} and {1} are already linked")]
    AlreadyLinked(NodeId, NodeId),

    /// The id does not name a node of this graph.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// A link in serialized data points past the node list.
    #[error("link from node {from} references missing node {to} (graph has {len} nodes)")]
    DanglingLink { from: usize, to: usize, len: usize },

    /// A serialized number is NaN or infinite.
    #[error("non-finite {field} on node {index}")]
    NonFinite { index: usize, field: &'static str },

    /// A serialized token count is too large to play with.
    #[error("token value {value} on node {index} is out of range")]
    ValueOutOfRange { index: usize, value: f64 },

    /// Firing would push a token count past the integer range.
    #[error("firing node {0} would overflow a token count")]
    Overflow(NodeId),
}
