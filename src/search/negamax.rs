//! Fixed-depth fail-soft negamax with alpha-beta pruning.
//!
//! Leaf evaluations are cached by Zobrist key for the lifetime of one
//! `search` call. Root moves that tie on the best score are picked between
//! at random so repeated games do not replay the same line.

use std::collections::HashMap;

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::chess_errors::ChessResult;
use crate::game_state::{chess_types::Move, game_state::GameState};
use crate::move_generation::legal_move_apply::{make_move, revert_move};
use crate::move_generation::legal_move_generator::{generate_legal_moves, has_legal_moves};
use crate::search::board_scoring::{BoardScorer, CHECKMATE_SCORE};
use crate::search::move_ordering::order_moves;

/// Bound wider than any reachable score.
pub const SCORE_INFINITY: i32 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: 3 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub nodes: u64,
    /// Score of every root move in search order. Moves that fail low report
    /// an upper bound rather than an exact score.
    pub root_scores: Vec<(Move, i32)>,
}

#[derive(Debug, Clone, Default)]
pub struct NegamaxSearch<S: BoardScorer> {
    scorer: S,
    leaf_cache: HashMap<u64, i32>,
    nodes: u64,
}

impl<S: BoardScorer> NegamaxSearch<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            leaf_cache: HashMap::new(),
            nodes: 0,
        }
    }

    /// Search the position to `config.depth` plies and pick a move.
    ///
    /// `best_move` is `None` only when the side to move has no legal move.
    /// The position is restored before this returns.
    pub fn search<R: Rng + ?Sized>(
        &mut self,
        game_state: &mut GameState,
        config: &SearchConfig,
        rng: &mut R,
    ) -> ChessResult<SearchResult> {
        self.leaf_cache.clear();
        self.nodes = 0;

        let depth = config.depth.max(1);
        let mut moves = generate_legal_moves(game_state);
        if moves.is_empty() {
            debug!(fen = %game_state.get_fen(), "no legal root move");
            return Ok(SearchResult {
                best_score: self.leaf_score(game_state),
                nodes: 1,
                ..SearchResult::default()
            });
        }
        order_moves(game_state, &mut moves);

        let mut best_score = -SCORE_INFINITY;
        let mut best_moves: Vec<Move> = Vec::new();
        let mut root_scores = Vec::with_capacity(moves.len());

        for mv in moves {
            // One below the best so far: moves that tie it still get an exact score.
            let alpha = best_score - 1;
            make_move(game_state, mv);
            let score = -self.negamax(game_state, depth - 1, -SCORE_INFINITY, -alpha)?;
            revert_move(game_state)?;

            root_scores.push((mv, score));
            if score > best_score {
                best_score = score;
                best_moves.clear();
                best_moves.push(mv);
            } else if score == best_score {
                best_moves.push(mv);
            }
        }

        let best_move = best_moves.choose(rng).copied();
        debug!(
            depth,
            nodes = self.nodes,
            best_score,
            tied = best_moves.len(),
            cached_leaves = self.leaf_cache.len(),
            "search finished"
        );

        Ok(SearchResult {
            best_move,
            best_score,
            nodes: self.nodes,
            root_scores,
        })
    }

    fn negamax(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        mut alpha: i32,
        beta: i32,
    ) -> ChessResult<i32> {
        self.nodes += 1;
        if depth == 0 {
            return Ok(self.leaf_score(game_state));
        }

        let mut moves = generate_legal_moves(game_state);
        if moves.is_empty() {
            return Ok(if game_state.in_check {
                -CHECKMATE_SCORE - i32::from(depth)
            } else {
                0
            });
        }
        if game_state.is_draw() {
            return Ok(0);
        }
        order_moves(game_state, &mut moves);

        let mut best = -SCORE_INFINITY;
        for mv in moves {
            make_move(game_state, mv);
            let score = -self.negamax(game_state, depth - 1, -beta, -alpha)?;
            revert_move(game_state)?;

            if score > best {
                best = score;
                alpha = alpha.max(score);
            }
            if alpha >= beta {
                break;
            }
        }
        Ok(best)
    }

    fn leaf_score(&mut self, game_state: &mut GameState) -> i32 {
        if let Some(&score) = self.leaf_cache.get(&game_state.zobrist_key) {
            return score;
        }

        let score = if !has_legal_moves(game_state) {
            if game_state.in_check {
                -CHECKMATE_SCORE
            } else {
                0
            }
        } else if game_state.is_draw() {
            0
        } else {
            self.scorer.score(game_state)
        };

        self.leaf_cache.insert(game_state.zobrist_key, score);
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::{MaterialScorer, StandardScorer};
    use crate::utils::long_algebraic::move_to_long_algebraic;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run<S: BoardScorer>(scorer: S, fen: &str, depth: u8, seed: u64) -> SearchResult {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let before = game.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        let result = NegamaxSearch::new(scorer)
            .search(&mut game, &SearchConfig { depth }, &mut rng)
            .expect("search should run");
        assert_eq!(game, before);
        result
    }

    #[test]
    fn finds_back_rank_mate_in_one() {
        for depth in 1..=3 {
            let result = run(StandardScorer, "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", depth, 7);
            let best = result.best_move.expect("a move should be found");
            assert_eq!(move_to_long_algebraic(best), "a1a8");
            assert!(result.best_score >= CHECKMATE_SCORE);
        }
    }

    #[test]
    fn prefers_winning_the_queen() {
        let result = run(MaterialScorer, "4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1", 2, 1);
        let best = result.best_move.expect("a move should be found");
        assert_eq!(move_to_long_algebraic(best), "d2d5");
        assert!(result.best_score >= 400);
    }

    #[test]
    fn avoids_hanging_the_queen() {
        // Qxd5?? loses the queen to the pawn on e6.
        let result = run(MaterialScorer, "4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 1", 2, 3);
        let best = result.best_move.expect("a move should be found");
        assert_ne!(move_to_long_algebraic(best), "d1d5");
    }

    #[test]
    fn reports_no_move_when_stalemated() {
        let result = run(StandardScorer, "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 3, 0);
        assert_eq!(result.best_move, None);
        assert_eq!(result.best_score, 0);
        assert!(result.root_scores.is_empty());
    }

    #[test]
    fn reports_no_move_when_mated() {
        let result = run(StandardScorer, "R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", 2, 0);
        assert_eq!(result.best_move, None);
        assert_eq!(result.best_score, -CHECKMATE_SCORE);
    }

    #[test]
    fn same_seed_gives_same_choice() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let first = run(MaterialScorer, fen, 2, 42);
        let second = run(MaterialScorer, fen, 2, 42);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.root_scores.len(), 20);
        assert!(first.nodes > 20);
    }
}
