//! Chipfire Graph Model
//!
//! The board of a chip-firing puzzle: nodes holding integer token counts,
//! joined by undirected links.
//!
//! # Structure
//!
//! The graph is a single owned aggregate. Nodes and links live in two arenas
//! and reference each other by integer id:
//! - `Node` holds its position, token value, pinned flag and incident links
//! - `Link` holds the two endpoint ids; `other()` resolves the far end
//!
//! Topology is fixed once a graph is built. Firing mutates `value`, layout
//! mutates `position`; neither adds or removes links.
//!
//! # Interchange
//!
//! Two formats reference nodes by insertion index so links survive without
//! object identity:
//! - [`GraphData`]: `{nodes: [{position, value}], links: [[i, j]]}`
//! - [`LevelNode`]: `{position, links: [..], value}` per node, the
//!   hand-authored level format

mod error;
mod graph;
mod level;

pub use error::{GraphError, Result};
pub use graph::{Graph, Link, LinkId, Node, NodeId};
pub use level::{GraphData, LevelNode, NodeData, MAX_VALUE};

/// Positions and displacements in the plane.
pub use glam::DVec2 as Vec2;

/// Round a token amount the way the puzzle always has: halves go up.
///
/// `round_value(2.5) == 3`, `round_value(-2.5) == -2`.
pub fn round_value(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
