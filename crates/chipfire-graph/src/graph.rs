//! Node/link arenas and adjacency.

use std::collections::VecDeque;

use crate::{GraphError, Result, Vec2};

/// Index of a node in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

impl NodeId {
    /// The insertion index.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a link in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkId(pub usize);

/// An undirected link between two distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Link {
    pub a: NodeId,
    pub b: NodeId,
}

impl Link {
    /// The endpoint that is not `node`, or `None` if `node` is not an endpoint.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// Whether `node` is one of the two endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.other(node).is_some()
    }
}

/// A vertex of the puzzle board.
///
/// Position, value and the pinned flag are free to change; the incident
/// link list is owned by the [`Graph`] and never changes after linking.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    /// Current location in scene coordinates.
    pub position: Vec2,
    /// Token count. Negative means in debt.
    pub value: i64,
    /// Set while the node is held by the pointer; layout leaves it alone.
    pub pinned: bool,
    links: Vec<LinkId>,
}

impl Node {
    /// This node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Ids of incident links.
    pub fn links(&self) -> &[LinkId] {
        &self.links
    }

    /// Number of incident links.
    pub fn degree(&self) -> usize {
        self.links.len()
    }
}

/// The puzzle board: an arena of nodes and an arena of links.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    links: Vec<Link>,
    radius: f64,
}

impl Graph {
    /// Create an empty graph whose nodes are drawn with the given radius.
    pub fn new(radius: f64) -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            radius,
        }
    }

    /// Visual radius shared by every node.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Append a node. Ids are never reused.
    pub fn add_node(&mut self, position: Vec2, value: i64) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            id,
            position,
            value,
            pinned: false,
            links: Vec::new(),
        });
        id
    }

    /// Link two distinct, not yet linked nodes.
    pub fn link(&mut self, a: NodeId, b: NodeId) -> Result<LinkId> {
        self.check(a)?;
        self.check(b)?;
        if a == b {
            return Err(GraphError::SelfLink(a));
        }
        if self.are_linked(a, b) {
            return Err(GraphError::AlreadyLinked(a, b));
        }

        let id = LinkId(self.links.len());
        self.links.push(Link { a, b });
        self.nodes[a.0].links.push(id);
        self.nodes[b.0].links.push(id);
        Ok(id)
    }

    /// Whether a link joins `a` and `b`.
    pub fn are_linked(&self, a: NodeId, b: NodeId) -> bool {
        self.node(a)
            .map(|node| {
                node.links
                    .iter()
                    .any(|&link| self.links[link.0].other(a) == Some(b))
            })
            .unwrap_or(false)
    }

    /// Number of links incident to `id`.
    pub fn degree(&self, id: NodeId) -> Result<usize> {
        self.node(id)
            .map(Node::degree)
            .ok_or(GraphError::UnknownNode(id))
    }

    /// Nodes on the far side of each incident link, in link order.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id)
            .into_iter()
            .flat_map(move |node| node.links.iter())
            .filter_map(move |&link| self.links[link.0].other(id))
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Look up a node for mutation of its position, value or pinned flag.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Look up a link.
    pub fn get_link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id.0)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All links in creation order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of links.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Cycle rank: `links - nodes + 1`. Only meaningful for a connected graph.
    pub fn genus(&self) -> i64 {
        self.links.len() as i64 - self.nodes.len() as i64 + 1
    }

    /// Sum of every node's token count, saturating at the integer range.
    pub fn total_value(&self) -> i64 {
        self.nodes
            .iter()
            .fold(0i64, |total, node| total.saturating_add(node.value))
    }

    /// The puzzle is won when no node is in debt.
    pub fn is_won(&self) -> bool {
        self.nodes.iter().all(|node| node.value >= 0)
    }

    /// Whether every node is reachable from node 0.
    pub fn is_connected(&self) -> bool {
        if self.nodes.is_empty() {
            return true;
        }

        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::from([NodeId(0)]);
        seen[0] = true;
        let mut reached = 1;

        while let Some(current) = queue.pop_front() {
            for next in self.neighbors(current) {
                if !seen[next.0] {
                    seen[next.0] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }

        reached == self.nodes.len()
    }

    fn check(&self, id: NodeId) -> Result<()> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownNode(id))
        }
    }
}
