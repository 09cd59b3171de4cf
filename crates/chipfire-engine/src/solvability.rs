//! Token assignment that makes a generated graph winnable.
//!
//! A connected graph whose token total is at least its cycle rank
//! (`links - nodes + 1`) can always be brought to an all-nonnegative state by
//! some firing sequence. Every node but the first gets a random value in
//! `[-span, span)` with `span = ceil(sqrt(n))`; node 0 absorbs the difference
//! so the total lands on `genus + bonus`.

use chipfire_graph::{round_value, NodeId};
use rand::Rng;

use crate::generator::Generated;

/// The token total a generated graph was built around.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TokenBudget {
    /// Cycle rank of the graph.
    pub genus: i64,
    /// Surplus above the solvability bound: `n / 2 × boost`.
    pub bonus: f64,
}

impl TokenBudget {
    /// Sum of all node values right after assignment.
    pub fn token_total(&self) -> i64 {
        self.genus + round_value(self.bonus)
    }
}

/// Write token values onto a freshly generated graph.
pub fn assign_values<R: Rng + ?Sized>(
    generated: &mut Generated,
    boost: f64,
    rng: &mut R,
) -> TokenBudget {
    let n = generated.node_count;
    let graph = &mut generated.graph;
    if graph.is_empty() {
        return TokenBudget::default();
    }

    let span = (n as f64).sqrt().ceil();
    let mut total = 0i64;
    for id in 1..graph.len() {
        let value = round_value(rng.gen_range(-span..span));
        if let Some(node) = graph.node_mut(NodeId(id)) {
            node.value = value;
        }
        total += value;
    }

    let genus = generated.total_links as i64 - n as i64 + 1;
    let bonus = n as f64 / 2.0 * boost;
    if let Some(first) = graph.node_mut(NodeId(0)) {
        first.value = round_value((genus - total) as f64 + bonus);
    }

    TokenBudget { genus, bonus }
}
