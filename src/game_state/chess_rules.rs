//! Canonical chess-rule constants and terminal-position detection.
//!
//! This module stores the standard starting position FEN and the game-end
//! predicates (mate, stalemate and the automatic draws) on `GameState`.

use crate::game_state::board_geometry::square_shade;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::has_legal_moves;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move rule applies.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Why a game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    ThreefoldRepetition,
    FiftyMoveRule,
}

impl GameState {
    /// Whether the side to move is in check, from the cached check state.
    #[inline]
    pub fn is_check(&self) -> bool {
        self.in_check
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.in_check && !has_legal_moves(self)
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.in_check && !has_legal_moves(self)
    }

    /// Bare kings, a single minor piece, or only bishops that all stand on
    /// squares of one shade.
    pub fn is_insufficient_material(&self) -> bool {
        let all = self.all_piece_count();
        if all == 2 {
            return true;
        }

        let minors = |kind| {
            self.piece_count(Piece::new(Color::White, kind))
                + self.piece_count(Piece::new(Color::Black, kind))
        };
        if all == 3 && (minors(PieceKind::Bishop) == 1 || minors(PieceKind::Knight) == 1) {
            return true;
        }

        if minors(PieceKind::Bishop) + 2 == all {
            let mut shades = Color::BOTH
                .iter()
                .flat_map(|&color| self.squares_of(Piece::new(color, PieceKind::Bishop)))
                .map(|&square| square_shade(square));
            if let Some(first) = shades.next() {
                return shades.all(|shade| shade == first);
            }
        }

        false
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_table
            .get(&self.zobrist_key)
            .is_some_and(|&count| count >= 3)
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }

    pub fn is_draw(&self) -> bool {
        self.is_fifty_move_draw() || self.is_insufficient_material() || self.is_threefold_repetition()
    }

    /// Classify the position, `None` while the game goes on.
    pub fn game_outcome(&mut self) -> Option<GameOutcome> {
        if !has_legal_moves(self) {
            return Some(if self.in_check {
                GameOutcome::Checkmate {
                    winner: self.side_to_move.opposite(),
                }
            } else {
                GameOutcome::Stalemate
            });
        }

        if self.is_insufficient_material() {
            Some(GameOutcome::InsufficientMaterial)
        } else if self.is_threefold_repetition() {
            Some(GameOutcome::ThreefoldRepetition)
        } else if self.is_fifty_move_draw() {
            Some(GameOutcome::FiftyMoveRule)
        } else {
            None
        }
    }
}
