//! Pairwise repulsion layout.
//!
//! Every tick, each free node is pushed away from every other node closer
//! than `optimal = 3 × radius`, with a quadratic falloff:
//!
//! ```text
//! force(node) = Σ (node − other) · (optimal − distance)²   for distance < optimal
//! position   += force · damping
//! ```
//!
//! There is no attraction along links; links never limit distance.
//! All forces of a tick are computed from the positions at the start of the
//! tick, then applied together.

use chipfire_graph::{Graph, NodeId, Vec2};

/// Repulsion range, in node radii.
pub const OPTIMAL_DISTANCE: f64 = 3.0;

/// Scale applied to the summed force each tick.
pub const DAMPING: f64 = 1.0 / 300_000.0;

/// Nudges unpinned nodes apart once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSimulator {
    optimal: f64,
    damping: f64,
}

impl LayoutSimulator {
    /// Simulator for nodes of the given radius.
    pub fn new(radius: f64) -> Self {
        Self {
            optimal: radius * OPTIMAL_DISTANCE,
            damping: DAMPING,
        }
    }

    /// Simulator matching a graph's node radius.
    pub fn for_graph(graph: &Graph) -> Self {
        Self::new(graph.radius())
    }

    /// Distance beyond which nodes do not repel.
    pub fn optimal(&self) -> f64 {
        self.optimal
    }

    /// Net undamped repulsion acting on `node`.
    pub fn repulsion(&self, graph: &Graph, node: NodeId) -> Vec2 {
        let Some(this) = graph.node(node) else {
            return Vec2::ZERO;
        };

        graph
            .nodes()
            .iter()
            .filter(|other| other.id() != node)
            .fold(Vec2::ZERO, |acc, other| {
                let distance = this.position.distance(other.position);
                if distance < self.optimal {
                    acc + (this.position - other.position) * (self.optimal - distance).powi(2)
                } else {
                    acc
                }
            })
    }

    /// Advance one tick. Pinned nodes neither move nor stop pushing others.
    pub fn step(&self, graph: &mut Graph) {
        let moves: Vec<(NodeId, Vec2)> = graph
            .nodes()
            .iter()
            .filter(|node| !node.pinned)
            .map(|node| (node.id(), self.repulsion(graph, node.id()) * self.damping))
            .collect();

        for (id, delta) in moves {
            if let Some(node) = graph.node_mut(id) {
                node.position += delta;
            }
        }
    }
}
