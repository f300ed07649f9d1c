//! Padded 10x12 mailbox geometry.
//!
//! The playing area occupies rows 2..=9 and columns 1..=8 of a 120-cell board;
//! every other cell is an off-board sentinel, so a knight jump or a ray step
//! from any playing square always lands inside the array. Rows run from the
//! eighth rank (row 0 of the playing area) down to the first rank, matching
//! the order in which FEN lists them. The dense `0..64` index uses the same
//! order (`a8 == 0`, `h1 == 63`).

use crate::game_state::chess_types::Square;

pub const BOARD_SIZE: usize = 120;

pub const A8: Square = 21;
pub const B8: Square = 22;
pub const C8: Square = 23;
pub const D8: Square = 24;
pub const E8: Square = 25;
pub const F8: Square = 26;
pub const G8: Square = 27;
pub const H8: Square = 28;
pub const A1: Square = 91;
pub const B1: Square = 92;
pub const C1: Square = 93;
pub const D1: Square = 94;
pub const E1: Square = 95;
pub const F1: Square = 96;
pub const G1: Square = 97;
pub const H1: Square = 98;

const NOT_ON_BOARD: u8 = u8::MAX;

const fn build_dense_to_padded() -> [Square; 64] {
    let mut table = [0u8; 64];
    let mut dense = 0;
    while dense < 64 {
        table[dense] = (21 + (dense / 8) * 10 + dense % 8) as Square;
        dense += 1;
    }
    table
}

const fn build_padded_to_dense() -> [u8; BOARD_SIZE] {
    let mut table = [NOT_ON_BOARD; BOARD_SIZE];
    let mut dense = 0;
    while dense < 64 {
        table[21 + (dense / 8) * 10 + dense % 8] = dense as u8;
        dense += 1;
    }
    table
}

static DENSE_TO_PADDED: [Square; 64] = build_dense_to_padded();
static PADDED_TO_DENSE: [u8; BOARD_SIZE] = build_padded_to_dense();

/// Padded square for a dense `0..64` index.
#[inline]
pub fn square_from_dense(dense: u8) -> Square {
    DENSE_TO_PADDED[(dense & 63) as usize]
}

/// Dense `0..64` index of a playing square.
#[inline]
pub fn dense_index(square: Square) -> u8 {
    let dense = PADDED_TO_DENSE[square as usize];
    debug_assert!(dense != NOT_ON_BOARD, "square {square} is off the board");
    dense
}

#[inline]
pub fn is_playing_square(square: Square) -> bool {
    (square as usize) < BOARD_SIZE && PADDED_TO_DENSE[square as usize] != NOT_ON_BOARD
}

/// File index, `0 == a`.
#[inline]
pub fn file_of(square: Square) -> u8 {
    dense_index(square) & 7
}

/// Row index counted from the top, `0 == eighth rank`.
#[inline]
pub fn row_of(square: Square) -> u8 {
    dense_index(square) >> 3
}

/// Rank index counted from White's side, `0 == first rank`.
#[inline]
pub fn rank_of(square: Square) -> u8 {
    7 - row_of(square)
}

/// Square for a file and rank counted from White's side (`0, 0 == a1`).
#[inline]
pub fn square_from_file_rank(file: u8, rank: u8) -> Square {
    square_from_dense((7 - rank) * 8 + file)
}

/// `0` for light squares, `1` for dark squares.
#[inline]
pub fn square_shade(square: Square) -> u8 {
    (file_of(square) + row_of(square)) & 1
}

/// Step one offset along the padded board.
#[inline]
pub fn offset_square(square: Square, offset: i8) -> Square {
    square.wrapping_add_signed(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_and_padded_indexes_are_inverse() {
        for dense in 0..64u8 {
            assert_eq!(dense_index(square_from_dense(dense)), dense);
        }
        assert_eq!(square_from_dense(0), A8);
        assert_eq!(square_from_dense(63), H1);
    }

    #[test]
    fn border_cells_are_not_playing_squares() {
        assert!(!is_playing_square(0));
        assert!(!is_playing_square(20));
        assert!(!is_playing_square(29));
        assert!(!is_playing_square(99));
        assert!(is_playing_square(E1));
    }

    #[test]
    fn files_ranks_and_shades() {
        assert_eq!(file_of(E1), 4);
        assert_eq!(rank_of(E1), 0);
        assert_eq!(rank_of(E8), 7);
        assert_eq!(square_from_file_rank(4, 0), E1);
        // a1 and h8 are dark, h1 and a8 are light.
        assert_eq!(square_shade(A1), 1);
        assert_eq!(square_shade(H8), 1);
        assert_eq!(square_shade(H1), 0);
        assert_eq!(square_shade(A8), 0);
    }
}
