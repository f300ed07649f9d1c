//! Engine abstraction layer used by the game session and the CLI.
//!
//! Defines the common output payload so different move-selection strategies
//! can be selected at runtime behind a single trait interface.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessResult;
use crate::engines::engine_negamax::NegamaxEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_semi_random::SemiRandomEngine;
use crate::game_state::{chess_types::Move, game_state::GameState};
use crate::search::negamax::SearchConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// `None` when the side to move has no legal move.
    pub best_move: Option<Move>,
    pub score: Option<i32>,
    pub nodes: u64,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Pick a move for the side to move. The position must be left exactly
    /// as it was passed in.
    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput>;
}

/// Seeded generator, or one seeded from the OS when `seed` is `None`.
pub fn engine_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EngineKind {
    Random,
    SemiRandom,
    Negamax,
}

impl EngineKind {
    /// Build the engine; `config` only matters for search-based engines.
    pub fn build(self, config: SearchConfig, seed: Option<u64>) -> Box<dyn Engine> {
        let rng = engine_rng(seed);
        match self {
            Self::Random => Box::new(RandomEngine::with_rng(rng)),
            Self::SemiRandom => Box::new(SemiRandomEngine::with_rng(rng)),
            Self::Negamax => Box::new(NegamaxEngine::with_rng(config, rng)),
        }
    }
}
