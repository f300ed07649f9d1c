//! Padded-board step offsets for every piece kind.
//!
//! One row step is `10`, one file step is `1`; the sentinel border absorbs any
//! step that leaves the playing area.

use crate::game_state::chess_types::{Color, PieceKind};

pub const KNIGHT_OFFSETS: [i8; 8] = [-21, -19, -12, -8, 8, 12, 19, 21];
pub const BISHOP_OFFSETS: [i8; 4] = [-11, -9, 9, 11];
pub const ROOK_OFFSETS: [i8; 4] = [-10, -1, 1, 10];
pub const KING_OFFSETS: [i8; 8] = [-11, -10, -9, -1, 1, 9, 10, 11];
pub const QUEEN_OFFSETS: [i8; 8] = KING_OFFSETS;

/// Diagonal steps on which a pawn of `color` captures.
#[inline]
pub const fn pawn_capture_offsets(color: Color) -> [i8; 2] {
    match color {
        Color::White => [-9, -11],
        Color::Black => [9, 11],
    }
}

/// Ray directions for a sliding piece kind, empty for the others.
#[inline]
pub fn slider_offsets(kind: PieceKind) -> &'static [i8] {
    match kind {
        PieceKind::Bishop => &BISHOP_OFFSETS,
        PieceKind::Rook => &ROOK_OFFSETS,
        PieceKind::Queen => &QUEEN_OFFSETS,
        _ => &[],
    }
}

#[inline]
pub const fn is_diagonal(direction: i8) -> bool {
    matches!(direction, -11 | -9 | 9 | 11)
}

#[inline]
pub const fn is_orthogonal(direction: i8) -> bool {
    matches!(direction, -10 | -1 | 1 | 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_directions_split_into_diagonals_and_lines() {
        assert!(BISHOP_OFFSETS.iter().all(|&d| is_diagonal(d)));
        assert!(ROOK_OFFSETS.iter().all(|&d| is_orthogonal(d)));
        assert_eq!(slider_offsets(PieceKind::Queen).len(), 8);
        assert!(slider_offsets(PieceKind::Knight).is_empty());
    }
}
