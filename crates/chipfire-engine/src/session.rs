//! The live puzzle and its progression.
//!
//! A [`Session`] is the one owner of the board. Input calls
//! [`Session::click_node`] and [`Session::click_background`], the frame loop
//! calls [`Session::tick`], and the renderer reads [`Session::graph`].
//! Once a board is won, node clicks are ignored until a background click
//! moves on to the next puzzle.

use chipfire_graph::{Graph, NodeId, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::firing::{fire, FireOutcome};
use crate::generator::{build_fixed, node_radius, random_graph, GeneratorConfig, MAX_NODE_COUNT};
use crate::layout::LayoutSimulator;
use crate::levels::{is_tutorial, tutorial, TUTORIAL_COUNT};
use crate::save::SaveState;
use crate::Result;

/// Difficulty gained by winning a random puzzle.
pub const DIFFICULTY_STEP: f64 = 0.6;

/// Scene area per random node at difficulty zero.
const AREA_PER_NODE: f64 = 120_000.0;

/// Scene size and randomness for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub scene_width: f64,
    pub scene_height: f64,
    /// Seed for reproducible puzzles; drawn from entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            scene_width: 1280.0,
            scene_height: 720.0,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Empty border kept around generated graphs.
    pub fn margin(&self) -> f64 {
        self.scene_width.min(self.scene_height) * 0.1
    }

    /// Half-extent of the rectangle nodes are sampled in.
    pub fn half_extent(&self) -> Vec2 {
        let margin = self.margin();
        Vec2::new(
            self.scene_width / 2.0 - margin,
            self.scene_height / 2.0 - margin,
        )
    }

    /// Random node count before any difficulty is earned.
    pub fn initial_node_count(&self) -> f64 {
        (self.scene_width * self.scene_height / AREA_PER_NODE).floor()
    }
}

/// Puzzle progression and the board being played.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    rng: StdRng,
    graph: Graph,
    layout: LayoutSimulator,
    moves: u32,
    won: bool,
    current_level: usize,
    difficulty: f64,
}

impl Session {
    /// Start from the first tutorial.
    pub fn new(config: SessionConfig) -> Self {
        Self::at_level(config, 0, 0.0)
    }

    fn at_level(config: SessionConfig, current_level: usize, difficulty: f64) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut session = Self {
            config,
            rng,
            graph: Graph::default(),
            layout: LayoutSimulator::new(0.0),
            moves: 0,
            won: false,
            current_level,
            difficulty,
        };
        session.load_level();
        session
    }

    /// Resume from save data, replacing a corrupt board with a fresh one.
    ///
    /// A difficulty that would ask for more than [`MAX_NODE_COUNT`] nodes is
    /// treated as corrupt. A saved board that is already won counts as
    /// completed, so the next background click moves on.
    pub fn restore(config: SessionConfig, save: SaveState) -> Self {
        let playable = config.initial_node_count() + save.difficulty <= MAX_NODE_COUNT as f64;
        let difficulty = if save.difficulty.is_finite() && save.difficulty >= 0.0 && playable {
            save.difficulty
        } else {
            warn!(difficulty = save.difficulty, "Discarding invalid saved difficulty");
            0.0
        };
        let mut session = Self::at_level(config, save.current_level, difficulty);

        let Some(data) = save.graph else {
            return session;
        };
        let radius = node_radius(data.nodes.len(), session.config.half_extent());
        match Graph::from_data(&data, radius) {
            Ok(graph) if !graph.is_empty() => {
                info!(nodes = graph.len(), level = session.current_level, "Restored saved board");
                session.install(graph);
                session.moves = save.moves;
                if session.graph.is_won() {
                    session.complete_level();
                }
            }
            Ok(_) => warn!("Saved board is empty, starting a fresh puzzle"),
            Err(e) => warn!(error = %e, "Saved board is corrupt, starting a fresh puzzle"),
        }
        session
    }

    /// Resume from encoded save data; unreadable data starts over.
    pub fn restore_json(config: SessionConfig, json: &str) -> Self {
        match SaveState::from_json(json) {
            Ok(save) => Self::restore(config, save),
            Err(e) => {
                warn!(error = %e, "Unreadable save data, starting over");
                Self::new(config)
            }
        }
    }

    /// Snapshot progression and, unless already won, the board.
    pub fn save_state(&self) -> SaveState {
        SaveState {
            current_level: self.current_level,
            difficulty: self.difficulty,
            moves: self.moves,
            graph: (!self.won).then(|| self.graph.snapshot()),
        }
    }

    /// The board being played.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Fires made on this board.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Whether this board is won and waiting for the next puzzle.
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Level counter; past the tutorials every level is random.
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// Accumulated difficulty.
    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    /// Node count and boost used for the next random puzzle.
    pub fn random_parameters(&self) -> (f64, f64) {
        let count = (self.config.initial_node_count() + self.difficulty).floor();
        let boost = 1.0 - self.difficulty % 1.0;
        (count, boost)
    }

    /// Fire a node. Returns `None` while the board is won.
    pub fn click_node(&mut self, node: NodeId) -> Result<Option<FireOutcome>> {
        if self.won {
            return Ok(None);
        }

        let outcome = fire(&mut self.graph, node)?;
        self.moves = self.moves.saturating_add(1);
        if outcome.won {
            self.complete_level();
        }
        Ok(Some(outcome))
    }

    /// Move on to the next puzzle if the board is won. Returns whether it did.
    pub fn click_background(&mut self) -> bool {
        if !self.won {
            return false;
        }
        self.load_level();
        true
    }

    /// Advance the layout by one frame.
    pub fn tick(&mut self) {
        self.layout.step(&mut self.graph);
    }

    /// Hold a node at a pointer position.
    pub fn drag(&mut self, node: NodeId, position: Vec2) -> bool {
        match self.graph.node_mut(node) {
            Some(held) => {
                held.pinned = true;
                held.position = position;
                true
            }
            None => false,
        }
    }

    /// Let go of a held node.
    pub fn release(&mut self, node: NodeId) -> bool {
        match self.graph.node_mut(node) {
            Some(held) => {
                held.pinned = false;
                true
            }
            None => false,
        }
    }

    fn complete_level(&mut self) {
        if !is_tutorial(self.current_level) {
            self.difficulty += DIFFICULTY_STEP;
        }
        info!(
            level = self.current_level,
            moves = self.moves,
            difficulty = self.difficulty,
            "Level complete"
        );
        self.current_level = self.current_level.saturating_add(1);
        self.won = true;
    }

    fn load_level(&mut self) {
        let half_extent = self.config.half_extent();
        let graph = match tutorial(self.current_level) {
            Some(level) => build_fixed(&level, half_extent),
            None => {
                let (count, boost) = self.random_parameters();
                let config = GeneratorConfig::new(half_extent, count, boost);
                random_graph(&config, &mut self.rng).map(|puzzle| puzzle.graph)
            }
        };

        let graph = graph.or_else(|e| {
            warn!(error = %e, level = self.current_level, "Puzzle generation failed, using last tutorial");
            let fallback = tutorial(TUTORIAL_COUNT - 1).unwrap_or_default();
            build_fixed(&fallback, half_extent)
        });

        match graph {
            Ok(graph) => self.install(graph),
            Err(e) => warn!(error = %e, "Fallback puzzle failed to build"),
        }
        self.moves = 0;
        self.won = false;
    }

    fn install(&mut self, graph: Graph) {
        self.layout = LayoutSimulator::for_graph(&graph);
        self.graph = graph;
    }
}
