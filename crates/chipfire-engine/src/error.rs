//! Error types for puzzle generation and play.

use chipfire_graph::{GraphError, Vec2};
use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or restoring a puzzle.
#[derive(Debug, Error)]
pub enum Error {
    /// The rejection sampler ran out of attempts for one node.
    #[error("no room for node {placed} of {requested} after {attempts} attempts")]
    Starvation {
        placed: usize,
        requested: usize,
        attempts: usize,
    },

    /// Fewer than one node was requested, or the count is not finite.
    #[error("invalid node count: {0}")]
    InvalidNodeCount(f64),

    /// The sampling rectangle has no area.
    #[error("invalid sampling half-extent: {0}")]
    InvalidBounds(Vec2),

    /// Graph model error (bad link, corrupt data).
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// Save data could not be encoded or decoded.
    #[error("save data error: {0}")]
    Save(#[from] serde_json::Error),
}
