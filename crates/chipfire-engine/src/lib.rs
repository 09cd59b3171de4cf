//! Chipfire Puzzle Engine
//!
//! Builds chip-firing puzzles that are guaranteed to be winnable, applies the
//! firing rule, and keeps nodes visually apart.
//!
//! # Pipeline
//!
//! 1. **Generation**: rejection-sample node positions in a rectangle and link
//!    each new node to its one or two nearest neighbors with spare capacity
//! 2. **Solvability**: assign token values so the total equals
//!    `genus + bonus`, where genus is the cycle rank of the graph
//! 3. **Firing**: a node gives one token to each neighbor; the total is
//!    conserved and the board is won once nobody is in debt
//! 4. **Layout**: each frame, free nodes repel each other within
//!    three radii
//!
//! # Usage
//!
//! ```
//! use chipfire_engine::{random_graph, fire, GeneratorConfig, LayoutSimulator};
//! use chipfire_graph::{NodeId, Vec2};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let config = GeneratorConfig::new(Vec2::new(500.0, 300.0), 12.0, 1.0);
//! let mut puzzle = random_graph(&config, &mut rng).unwrap();
//! assert_eq!(puzzle.graph.total_value(), puzzle.budget.token_total());
//!
//! let outcome = fire(&mut puzzle.graph, NodeId(0)).unwrap();
//! assert_eq!(puzzle.graph.total_value(), puzzle.budget.token_total());
//! println!("won: {}", outcome.won);
//!
//! LayoutSimulator::for_graph(&puzzle.graph).step(&mut puzzle.graph);
//! ```

mod error;
mod firing;
mod generator;
mod layout;
mod levels;
mod save;
mod session;
mod solvability;

pub use error::{Error, Result};
pub use firing::{fire, FireOutcome, Transfer};
pub use generator::{
    build_fixed, generate, node_radius, random_graph, Generated, GeneratorConfig, RandomGraph,
    MAX_DEGREE, MAX_NODE_COUNT, MAX_PLACEMENT_ATTEMPTS, MIN_SEPARATION,
};
pub use layout::{LayoutSimulator, DAMPING, OPTIMAL_DISTANCE};
pub use levels::{is_tutorial, tutorial, TUTORIAL_COUNT};
pub use save::SaveState;
pub use session::{Session, SessionConfig, DIFFICULTY_STEP};
pub use solvability::{assign_values, TokenBudget};
