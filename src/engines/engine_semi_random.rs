//! Semi-random engine.
//!
//! Plays a mate when one is on the board, otherwise a capture worth taking,
//! otherwise a quiet move to a square the opponent does not attack. Within a
//! class the choice is uniform.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use tracing::debug;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{engine_rng, Engine, EngineOutput};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::{make_move, revert_move};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::move_to;

/// Coarse trade value; minor pieces count as equals.
fn trade_value(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => u8::MAX,
    }
}

#[derive(Debug, Default)]
struct MoveClasses {
    mates: Vec<Move>,
    captures: Vec<Move>,
    safe_moves: Vec<Move>,
}

pub struct SemiRandomEngine {
    rng: StdRng,
}

impl SemiRandomEngine {
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

impl Default for SemiRandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_moves(game_state: &mut GameState, legal_moves: &[Move]) -> ChessResult<MoveClasses> {
    let mut classes = MoveClasses::default();

    for &mv in legal_moves {
        make_move(game_state, mv);
        let destination_safe =
            !is_square_attacked(game_state, move_to(mv), game_state.side_to_move);

        if game_state.is_checkmate() {
            classes.mates.push(mv);
        } else if let (Some(captured), Some(moved)) =
            (game_state.captured_piece, game_state.moved_piece)
        {
            if trade_value(captured.kind()) >= trade_value(moved.kind()) || destination_safe {
                classes.captures.push(mv);
            }
        } else if destination_safe {
            classes.safe_moves.push(mv);
        }

        revert_move(game_state)?;
    }

    Ok(classes)
}

impl Engine for SemiRandomEngine {
    fn name(&self) -> &str {
        "OlegChess SemiRandom"
    }

    fn choose_move(&mut self, game_state: &mut GameState) -> ChessResult<EngineOutput> {
        let legal_moves = generate_legal_moves(game_state);
        let classes = classify_moves(game_state, &legal_moves)?;
        debug!(
            legal_moves = legal_moves.len(),
            mates = classes.mates.len(),
            captures = classes.captures.len(),
            safe_moves = classes.safe_moves.len(),
            "semi-random engine"
        );

        let pool = [&classes.mates, &classes.captures, &classes.safe_moves]
            .into_iter()
            .find(|class| !class.is_empty())
            .unwrap_or(&legal_moves);

        Ok(EngineOutput {
            best_move: pool.choose(&mut self.rng).copied(),
            score: None,
            nodes: legal_moves.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::move_to_long_algebraic;

    fn pick(fen: &str, seed: u64) -> String {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let before = game.clone();
        let output = SemiRandomEngine::with_seed(seed)
            .choose_move(&mut game)
            .expect("engine should run");
        assert_eq!(game, before);
        move_to_long_algebraic(output.best_move.expect("a move should exist"))
    }

    #[test]
    fn always_plays_mate_in_one() {
        for seed in 0..8 {
            assert_eq!(pick("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", seed), "a1a8");
        }
    }

    #[test]
    fn takes_a_free_piece() {
        // Only capture on the board is the undefended knight on c6.
        for seed in 0..8 {
            assert_eq!(pick("4k3/8/2n5/8/8/8/8/2R1K3 w - - 0 1", seed), "c1c6");
        }
    }

    #[test]
    fn skips_a_losing_capture() {
        // Qxd5 drops the queen to the e6 pawn; no other capture exists.
        for seed in 0..8 {
            assert_ne!(pick("4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 1", seed), "d1d5");
        }
    }

    #[test]
    fn classifies_moves_by_priority() {
        let mut game = GameState::from_fen("4k3/8/2n5/8/8/8/8/2R1K3 w - - 0 1")
            .expect("FEN should parse");
        let legal = generate_legal_moves(&mut game);
        let classes = classify_moves(&mut game, &legal).expect("classification should run");
        assert!(classes.mates.is_empty());
        assert_eq!(classes.captures.len(), 1);
        assert_eq!(classes.safe_moves.len(), legal.len() - 1);
    }
}
