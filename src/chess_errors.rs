//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by parsing, move-application
//! and session code. Malformed external input (FEN, move text) is reported
//! before any state is touched, so callers can reject the input and carry on
//! with the position they already had.
//!
//! Internal invariant violations (a move made from an empty square, a
//! piece-list overflow) are programmer errors and panic instead; the one
//! exception is an unmatched revert, which is surfaced as `EmptyUndoStack`.

use thiserror::Error;

/// Unified error type for the chess engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// The FEN string could not be parsed or describes an impossible position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A square or move in long algebraic notation could not be parsed.
    #[error("invalid algebraic notation: {0}")]
    InvalidAlgebraic(String),

    /// A well-formed move that is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// `revert_move` was called with no applied move left to undo.
    #[error("no move left to revert")]
    EmptyUndoStack,
}

pub type ChessResult<T> = Result<T, ChessError>;
