//! Random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! integration testing, and low-strength gameplay.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use tracing::debug;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{engine_rng, Engine, EngineOutput};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::generate_legal_moves;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::with_rng(engine_rng(None))
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(engine_rng(Some(seed)))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self { rng }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "OlegChess Random"
    }

    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput> {
        let legal_moves = generate_legal_moves(game_state);
        debug!(legal_moves = legal_moves.len(), "random engine");

        Ok(EngineOutput {
            best_move: legal_moves.choose(&mut self.rng).copied(),
            score: None,
            nodes: legal_moves.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_a_legal_move() {
        let mut engine = RandomEngine::with_seed(11);
        let mut game = GameState::new_game();
        let legal = generate_legal_moves(&mut game);
        for _ in 0..10 {
            let output = engine.choose_move(&mut game).expect("engine should run");
            let mv = output.best_move.expect("start position has moves");
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn returns_none_without_moves() {
        let mut engine = RandomEngine::with_seed(0);
        let mut game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1")
            .expect("FEN should parse");
        let output = engine.choose_move(&mut game).expect("engine should run");
        assert_eq!(output.best_move, None);
    }
}
