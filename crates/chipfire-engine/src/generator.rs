//! Random graph generation.
//!
//! Nodes are placed one at a time by rejection sampling inside the
//! rectangle `[-w, w] × [-h, h]`, keeping every pair at least
//! `MIN_SEPARATION × radius` apart. Each new node links to the one or two
//! closest earlier nodes that still have fewer than `MAX_DEGREE` links, so
//! the result is a spanning tree plus extra edges and always connected.

use chipfire_graph::{Graph, LevelNode, NodeId, Vec2};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::solvability::{assign_values, TokenBudget};
use crate::{Error, Result};

/// Minimum distance between node centers, in node radii.
pub const MIN_SEPARATION: f64 = 2.0;

/// Nodes with this many links are no longer link targets.
pub const MAX_DEGREE: usize = 3;

/// Samples tried per node before giving up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

/// Largest graph the generator will build.
pub const MAX_NODE_COUNT: usize = 1024;

/// Parameters for one random graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Half width and half height of the sampling rectangle.
    pub half_extent: Vec2,
    /// Requested node count; fractional parts are dropped.
    pub node_count: f64,
    /// Difficulty knob: the token surplus is `node_count / 2 × boost`.
    pub boost: f64,
    /// Fixed node radius. Derived from the rectangle and count when `None`.
    pub radius: Option<f64>,
    /// Samples tried per node before reporting starvation.
    pub max_attempts: usize,
}

impl GeneratorConfig {
    /// Config with a derived radius and the default attempt cap.
    pub fn new(half_extent: Vec2, node_count: f64, boost: f64) -> Self {
        Self {
            half_extent,
            node_count,
            boost,
            radius: None,
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }

    fn validate(&self) -> Result<usize> {
        let Vec2 { x, y } = self.half_extent;
        if !(x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0) {
            return Err(Error::InvalidBounds(self.half_extent));
        }
        if !self.node_count.is_finite()
            || self.node_count < 1.0
            || self.node_count.floor() > MAX_NODE_COUNT as f64
        {
            return Err(Error::InvalidNodeCount(self.node_count));
        }
        Ok(self.node_count.floor() as usize)
    }
}

/// Node radius that keeps visual density roughly constant as `n` grows:
/// `min(w, h) / (2·sqrt(n))`.
pub fn node_radius(node_count: usize, half_extent: Vec2) -> f64 {
    half_extent.x.min(half_extent.y) / ((node_count.max(1) as f64).sqrt() * 2.0)
}

/// A linked graph whose values are still placeholders.
#[derive(Debug, Clone)]
pub struct Generated {
    pub graph: Graph,
    /// Links created while placing nodes.
    pub total_links: usize,
    /// Floored node count.
    pub node_count: usize,
}

/// A generated graph with solvable token values assigned.
#[derive(Debug, Clone)]
pub struct RandomGraph {
    pub graph: Graph,
    pub budget: TokenBudget,
}

fn sample_position<R: Rng + ?Sized>(
    graph: &Graph,
    half_extent: Vec2,
    separation: f64,
    max_attempts: usize,
    rng: &mut R,
) -> Option<Vec2> {
    (0..max_attempts)
        .map(|_| {
            Vec2::new(
                rng.gen_range(-half_extent.x..half_extent.x),
                rng.gen_range(-half_extent.y..half_extent.y),
            )
        })
        .find(|candidate| {
            graph
                .nodes()
                .iter()
                .all(|node| node.position.distance(*candidate) >= separation)
        })
}

/// Place and link nodes. Values are left at zero.
pub fn generate<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Result<Generated> {
    let node_count = config.validate()?;
    let radius = config
        .radius
        .unwrap_or_else(|| node_radius(node_count, config.half_extent));
    let separation = radius * MIN_SEPARATION;

    let mut graph = Graph::new(radius);
    let mut total_links = 0;

    for placed in 0..node_count {
        let Some(position) =
            sample_position(&graph, config.half_extent, separation, config.max_attempts, rng)
        else {
            warn!(
                placed,
                requested = node_count,
                radius,
                "Rejection sampler starved"
            );
            return Err(Error::Starvation {
                placed,
                requested: node_count,
                attempts: config.max_attempts,
            });
        };

        // Closest earlier nodes with spare capacity, nearest first.
        let mut candidates: Vec<(f64, NodeId)> = graph
            .nodes()
            .iter()
            .filter(|node| node.degree() < MAX_DEGREE)
            .map(|node| (node.position.distance(position), node.id()))
            .collect();
        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));

        let id = graph.add_node(position, 0);
        let wanted = rng.gen_range(1..=2);
        for (_, target) in candidates.into_iter().take(wanted) {
            if graph.link(id, target).is_ok() {
                total_links += 1;
            }
        }
    }

    debug!(nodes = node_count, links = total_links, radius, "Placed graph");
    Ok(Generated {
        graph,
        total_links,
        node_count,
    })
}

/// Generate a graph and assign values that guarantee it can be won.
pub fn random_graph<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Result<RandomGraph> {
    let mut generated = generate(config, rng)?;
    let budget = assign_values(&mut generated, config.boost, rng);

    info!(
        nodes = generated.node_count,
        links = generated.total_links,
        genus = budget.genus,
        bonus = budget.bonus,
        "Generated winnable graph"
    );
    Ok(RandomGraph {
        graph: generated.graph,
        budget,
    })
}

/// Build a fixed graph from level data, sized for the given rectangle.
pub fn build_fixed(level: &[LevelNode], half_extent: Vec2) -> Result<Graph> {
    let radius = node_radius(level.len(), half_extent);
    Ok(Graph::from_level(level, radius)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(n: f64) -> GeneratorConfig {
        GeneratorConfig::new(Vec2::new(500.0, 300.0), n, 1.0)
    }

    #[test]
    fn radius_shrinks_with_count() {
        let half = Vec2::new(400.0, 300.0);
        assert_eq!(node_radius(1, half), 150.0);
        assert_eq!(node_radius(4, half), 75.0);
        assert_eq!(node_radius(9, half), 50.0);
    }

    #[test]
    fn node_count_is_floored() {
        let mut rng = StdRng::seed_from_u64(1);
        let generated = generate(&config(7.9), &mut rng).unwrap();
        assert_eq!(generated.node_count, 7);
        assert_eq!(generated.graph.len(), 7);
    }

    #[test]
    fn single_node_has_no_links() {
        let mut rng = StdRng::seed_from_u64(2);
        let generated = generate(&config(1.0), &mut rng).unwrap();
        assert_eq!(generated.total_links, 0);
        assert_eq!(generated.graph.genus(), 0);
    }

    #[test]
    fn links_are_counted() {
        let mut rng = StdRng::seed_from_u64(3);
        let generated = generate(&config(20.0), &mut rng).unwrap();
        assert_eq!(generated.total_links, generated.graph.link_count());
        // Every node after the first adds one or two links.
        assert!(generated.total_links >= 19);
        assert!(generated.total_links <= 38);
    }

    #[test]
    fn nodes_are_separated_and_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(4);
        let cfg = config(30.0);
        let generated = generate(&cfg, &mut rng).unwrap();
        let graph = &generated.graph;
        let separation = graph.radius() * MIN_SEPARATION;

        for (i, a) in graph.nodes().iter().enumerate() {
            assert!(a.position.x.abs() <= cfg.half_extent.x);
            assert!(a.position.y.abs() <= cfg.half_extent.y);
            for b in &graph.nodes()[i + 1..] {
                assert!(a.position.distance(b.position) >= separation);
            }
        }
    }

    #[test]
    fn invalid_requests_are_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            generate(&config(0.5), &mut rng),
            Err(Error::InvalidNodeCount(_))
        ));
        assert!(matches!(
            generate(&config(f64::NAN), &mut rng),
            Err(Error::InvalidNodeCount(_))
        ));

        assert!(matches!(
            generate(&config(MAX_NODE_COUNT as f64 + 1.0), &mut rng),
            Err(Error::InvalidNodeCount(_))
        ));

        let flat = GeneratorConfig::new(Vec2::new(100.0, 0.0), 3.0, 1.0);
        assert!(matches!(
            generate(&flat, &mut rng),
            Err(Error::InvalidBounds(_))
        ));
    }

    #[test]
    fn overcrowded_rectangle_starves() {
        let mut rng = StdRng::seed_from_u64(6);
        let cfg = GeneratorConfig {
            radius: Some(50.0),
            max_attempts: 500,
            ..GeneratorConfig::new(Vec2::new(100.0, 100.0), 50.0, 1.0)
        };

        match generate(&cfg, &mut rng) {
            Err(Error::Starvation { placed, requested, attempts }) => {
                assert!(placed < requested);
                assert_eq!(requested, 50);
                assert_eq!(attempts, 500);
            }
            other => panic!("expected starvation, got {:?}", other.map(|g| g.node_count)),
        }
    }

    #[test]
    fn fixed_graph_uses_level_data() {
        let level = vec![
            LevelNode::new((-100.0, 0.0), &[1], 1),
            LevelNode::new((100.0, 0.0), &[0], -1),
        ];
        let graph = build_fixed(&level, Vec2::new(400.0, 300.0)).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.link_count(), 1);
        assert_eq!(graph.radius(), node_radius(2, Vec2::new(400.0, 300.0)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn generated_graphs_are_connected(seed in any::<u64>(), n in 1.0f64..60.0) {
            let mut rng = StdRng::seed_from_u64(seed);
            let generated = generate(&config(n), &mut rng).unwrap();
            prop_assert!(generated.graph.is_connected());
        }

        #[test]
        fn degree_is_capped_after_node_zero(seed in any::<u64>(), n in 1.0f64..60.0) {
            let mut rng = StdRng::seed_from_u64(seed);
            let generated = generate(&config(n), &mut rng).unwrap();
            for node in generated.graph.nodes().iter().skip(1) {
                prop_assert!(node.degree() <= MAX_DEGREE);
            }
        }

        #[test]
        fn token_total_matches_budget(
            seed in any::<u64>(),
            n in 1.0f64..60.0,
            boost in 0.0f64..2.0,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let cfg = GeneratorConfig { boost, ..config(n) };
            let puzzle = random_graph(&cfg, &mut rng).unwrap();
            let graph = &puzzle.graph;

            prop_assert_eq!(puzzle.budget.genus, graph.genus());
            prop_assert_eq!(graph.total_value(), puzzle.budget.token_total());
        }
    }
}
