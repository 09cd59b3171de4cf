//! The firing rule.
//!
//! Firing a node removes one token per incident link and hands one to each
//! neighbor, so the total over the graph never changes. Any node may fire,
//! in debt or not.

use chipfire_graph::{Graph, GraphError, NodeId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One token moving along a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: NodeId,
    pub to: NodeId,
}

/// What a single fire did, for the presentation layer to animate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireOutcome {
    /// The node that fired.
    pub node: NodeId,
    /// One entry per token handed out, in link order.
    pub transfers: Vec<Transfer>,
    /// Whether the board is won after this fire.
    pub won: bool,
}

fn value_of(graph: &Graph, id: NodeId) -> Result<i64, GraphError> {
    graph
        .node(id)
        .map(|node| node.value)
        .ok_or(GraphError::UnknownNode(id))
}

/// Fire `node`: `value -= degree`, each neighbor `+= 1`.
pub fn fire(graph: &mut Graph, node: NodeId) -> Result<FireOutcome, GraphError> {
    let degree = graph.degree(node)?;
    let neighbors: Vec<NodeId> = graph.neighbors(node).collect();

    // Work out every new count before touching the board so an overflow
    // leaves it unchanged.
    let mut updates = Vec::with_capacity(neighbors.len() + 1);
    let source = value_of(graph, node)?;
    updates.push((node, source.checked_sub(degree as i64)));
    for &neighbor in &neighbors {
        updates.push((neighbor, value_of(graph, neighbor)?.checked_add(1)));
    }
    let updates = updates
        .into_iter()
        .map(|(id, value)| value.map(|value| (id, value)))
        .collect::<Option<Vec<_>>>()
        .ok_or(GraphError::Overflow(node))?;

    for (id, value) in updates {
        if let Some(target) = graph.node_mut(id) {
            target.value = value;
        }
    }

    let won = graph.is_won();
    debug!(%node, degree, won, "Fired node");
    if won {
        info!(nodes = graph.len(), "Board won");
    }

    Ok(FireOutcome {
        node,
        transfers: neighbors
            .into_iter()
            .map(|to| Transfer { from: node, to })
            .collect(),
        won,
    })
}
