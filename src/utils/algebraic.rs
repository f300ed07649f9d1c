//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and padded
//! mailbox squares reused by FEN and long-algebraic move components.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board_geometry::{file_of, is_playing_square, rank_of, square_from_file_rank};
use crate::game_state::chess_types::Square;

/// Convert algebraic notation (for example: "e4") to a padded square.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidAlgebraic(format!(
            "invalid square: {square}"
        )));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::InvalidAlgebraic(format!(
            "invalid file: {}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidAlgebraic(format!(
            "invalid rank: {}",
            rank as char
        )));
    }

    Ok(square_from_file_rank(file - b'a', rank - b'1'))
}

/// Convert a padded playing square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> ChessResult<String> {
    if !is_playing_square(square) {
        return Err(ChessError::InvalidAlgebraic(format!(
            "square {square} is off the board"
        )));
    }

    let file_char = char::from(b'a' + file_of(square));
    let rank_char = char::from(b'1' + rank_of(square));
    Ok(format!("{file_char}{rank_char}"))
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};
    use crate::game_state::board_geometry::{A1, A8, H1, H8};

    #[test]
    fn corner_square_conversions() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), A1);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), H8);
        assert_eq!(algebraic_to_square("a8").expect("a8 should parse"), A8);
        assert_eq!(square_to_algebraic(H1).expect("h1 should convert"), "h1");
        assert_eq!(square_to_algebraic(65).expect("65 should convert"), "e4");
    }

    #[test]
    fn rejects_malformed_squares() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("e").is_err());
        assert!(square_to_algebraic(20).is_err());
    }
}
