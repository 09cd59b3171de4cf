//! Index-based interchange formats.
//!
//! Both formats use a node's insertion index as its reference, so a graph
//! can be written out and rebuilt without object identity.

use crate::{round_value, Graph, GraphError, NodeId, Result, Vec2};

/// One node of a [`GraphData`] snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeData {
    pub position: Vec2,
    /// Stored as a plain number; rounded back to an integer when loaded.
    pub value: f64,
}

/// A whole graph as `{nodes, links}` with links as index pairs.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphData {
    pub nodes: Vec<NodeData>,
    pub links: Vec<[usize; 2]>,
}

/// One entry of the hand-authored level format.
///
/// `links` may list any other node, but only lower indices are used when
/// building: a link to a higher index is the mirror of one that node
/// declares itself.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelNode {
    pub position: Vec2,
    pub links: Vec<usize>,
    pub value: f64,
}

impl LevelNode {
    /// Shorthand for authoring levels in code.
    pub fn new(position: impl Into<Vec2>, links: &[usize], value: i64) -> Self {
        Self {
            position: position.into(),
            links: links.to_vec(),
            value: value as f64,
        }
    }
}

/// Largest token count accepted from data (2^53, exact as `f64`).
pub const MAX_VALUE: f64 = 9_007_199_254_740_992.0;

fn checked_value(index: usize, position: Vec2, value: f64) -> Result<i64> {
    if !position.is_finite() {
        return Err(GraphError::NonFinite { index, field: "position" });
    }
    if !value.is_finite() {
        return Err(GraphError::NonFinite { index, field: "value" });
    }
    if value.abs() > MAX_VALUE {
        return Err(GraphError::ValueOutOfRange { index, value });
    }
    Ok(round_value(value))
}

impl Graph {
    /// Capture positions, values and links by index.
    pub fn snapshot(&self) -> GraphData {
        GraphData {
            nodes: self
                .nodes()
                .iter()
                .map(|node| NodeData {
                    position: node.position,
                    value: node.value as f64,
                })
                .collect(),
            links: self
                .links()
                .iter()
                .map(|link| [link.a.index(), link.b.index()])
                .collect(),
        }
    }

    /// Rebuild a graph from a snapshot.
    ///
    /// Any dangling index, non-finite number, self link or duplicate link
    /// marks the data as corrupt.
    pub fn from_data(data: &GraphData, radius: f64) -> Result<Self> {
        let mut graph = Graph::new(radius);
        for (index, node) in data.nodes.iter().enumerate() {
            let value = checked_value(index, node.position, node.value)?;
            graph.add_node(node.position, value);
        }

        let len = data.nodes.len();
        for &[a, b] in &data.links {
            for (from, to) in [(a, b), (b, a)] {
                if to >= len {
                    return Err(GraphError::DanglingLink { from, to, len });
                }
            }
            graph.link(NodeId(a), NodeId(b))?;
        }
        Ok(graph)
    }

    /// Build a fixed graph from level entries.
    ///
    /// Links to lower indices are created; repeats are ignored. An index past
    /// the end of the list is an error.
    pub fn from_level(level: &[LevelNode], radius: f64) -> Result<Self> {
        let mut graph = Graph::new(radius);
        let len = level.len();

        for (index, entry) in level.iter().enumerate() {
            let value = checked_value(index, entry.position, entry.value)?;
            let id = graph.add_node(entry.position, value);

            for &target in &entry.links {
                if target >= len {
                    return Err(GraphError::DanglingLink { from: index, to: target, len });
                }
                if target < index && !graph.are_linked(id, NodeId(target)) {
                    graph.link(id, NodeId(target))?;
                }
            }
        }
        Ok(graph)
    }

    /// Export in the level format, listing every neighbor on both ends.
    pub fn to_level(&self) -> Vec<LevelNode> {
        self.nodes()
            .iter()
            .map(|node| LevelNode {
                position: node.position,
                links: self.neighbors(node.id()).map(NodeId::index).collect(),
                value: node.value as f64,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<LevelNode> {
        vec![
            LevelNode::new((0.0, -200.0), &[1, 2], 3),
            LevelNode::new((173.0, 100.0), &[0, 2], -2),
            LevelNode::new((-173.0, 100.0), &[0, 1], 1),
        ]
    }

    #[test]
    fn level_keeps_lower_links_only_once() {
        let graph = Graph::from_level(&triangle(), 20.0).unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.link_count(), 3);
        for id in graph.node_ids() {
            assert_eq!(graph.degree(id), Ok(2));
        }
        assert_eq!(graph.total_value(), 2);
        assert_eq!(graph.radius(), 20.0);
    }

    #[test]
    fn level_ignores_duplicate_entries() {
        let level = vec![
            LevelNode::new((0.0, 0.0), &[], 0),
            LevelNode::new((1.0, 0.0), &[0, 0], 0),
        ];
        let graph = Graph::from_level(&level, 1.0).unwrap();
        assert_eq!(graph.link_count(), 1);
    }

    #[test]
    fn level_with_dangling_index_fails() {
        let level = vec![
            LevelNode::new((0.0, 0.0), &[4], 0),
            LevelNode::new((1.0, 0.0), &[0], 0),
        ];
        assert_eq!(
            Graph::from_level(&level, 1.0),
            Err(GraphError::DanglingLink { from: 0, to: 4, len: 2 })
        );
    }

    #[test]
    fn level_export_mirrors_links() {
        let graph = Graph::from_level(&triangle(), 20.0).unwrap();
        let exported = graph.to_level();
        assert_eq!(exported[0].links, vec![1, 2]);
        assert_eq!(exported[1].links, vec![0, 2]);

        let rebuilt = Graph::from_level(&exported, 20.0).unwrap();
        assert_eq!(rebuilt.link_count(), 3);
        assert_eq!(rebuilt.total_value(), graph.total_value());
    }

    #[test]
    fn snapshot_restores_topology_and_values() {
        let graph = Graph::from_level(&triangle(), 20.0).unwrap();
        let data = graph.snapshot();
        assert_eq!(data.links, vec![[1, 0], [2, 0], [2, 1]]);

        let restored = Graph::from_data(&data, 20.0).unwrap();
        assert_eq!(restored, graph);
    }

    #[test]
    fn fractional_values_are_rounded_on_load() {
        let data = GraphData {
            nodes: vec![
                NodeData { position: Vec2::ZERO, value: 1.5 },
                NodeData { position: Vec2::new(1.0, 0.0), value: -1.5 },
            ],
            links: vec![[0, 1]],
        };
        let graph = Graph::from_data(&data, 1.0).unwrap();
        assert_eq!(graph.node(NodeId(0)).unwrap().value, 2);
        assert_eq!(graph.node(NodeId(1)).unwrap().value, -1);
    }

    #[test]
    fn corrupt_snapshots_are_rejected() {
        let dangling = GraphData {
            nodes: vec![NodeData { position: Vec2::ZERO, value: 0.0 }],
            links: vec![[0, 3]],
        };
        assert_eq!(
            Graph::from_data(&dangling, 1.0),
            Err(GraphError::DanglingLink { from: 0, to: 3, len: 1 })
        );

        let nan = GraphData {
            nodes: vec![NodeData { position: Vec2::ZERO, value: f64::NAN }],
            links: vec![],
        };
        assert_eq!(
            Graph::from_data(&nan, 1.0),
            Err(GraphError::NonFinite { index: 0, field: "value" })
        );

        let huge = GraphData {
            nodes: vec![
                NodeData { position: Vec2::ZERO, value: 1.0 },
                NodeData { position: Vec2::new(1.0, 0.0), value: -1e300 },
            ],
            links: vec![[0, 1]],
        };
        assert_eq!(
            Graph::from_data(&huge, 1.0),
            Err(GraphError::ValueOutOfRange { index: 1, value: -1e300 })
        );

        let doubled = GraphData {
            nodes: vec![
                NodeData { position: Vec2::ZERO, value: 0.0 },
                NodeData { position: Vec2::new(1.0, 0.0), value: 0.0 },
            ],
            links: vec![[0, 1], [1, 0]],
        };
        assert_eq!(
            Graph::from_data(&doubled, 1.0),
            Err(GraphError::AlreadyLinked(NodeId(1), NodeId(0)))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn snapshot_json_shape() {
        let graph = Graph::from_level(&triangle(), 20.0).unwrap();
        let json = serde_json::to_string(&graph.snapshot()).unwrap();
        assert!(json.contains("\"nodes\""));
        assert!(json.contains("\"links\":[[1,0],[2,0],[2,1]]"));

        let parsed: GraphData = serde_json::from_str(&json).unwrap();
        assert_eq!(Graph::from_data(&parsed, 20.0).unwrap(), graph);
    }
}
