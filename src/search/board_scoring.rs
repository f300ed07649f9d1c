//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search delegates static position scoring to `BoardScorer`, so alternate
//! heuristics can be swapped without altering search code.

use crate::game_state::board_geometry::{file_of, offset_square};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::piece_offsets::{slider_offsets, KNIGHT_OFFSETS};
use crate::tables::piece_square_tables::{piece_square_value, ENDGAME_MATERIAL_THRESHOLD};

/// Score of a mated position, before the distance-to-mate adjustment.
pub const CHECKMATE_SCORE: i32 = 100_000;

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, game_state: &GameState) -> i32;
}

#[inline]
fn from_side_to_move(game_state: &GameState, white_minus_black: i32) -> i32 {
    match game_state.side_to_move {
        Color::White => white_minus_black,
        Color::Black => -white_minus_black,
    }
}

/// Material balance only, read from the position's running totals.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    fn material_balance_white_minus_black(game_state: &GameState) -> i32 {
        game_state.material_score[Color::White.index()]
            - game_state.material_score[Color::Black.index()]
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        from_side_to_move(
            game_state,
            Self::material_balance_white_minus_black(game_state),
        )
    }
}

/// Material, piece placement, mobility and pawn structure.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

impl StandardScorer {
    const KNIGHT_MOBILITY_WEIGHT: i32 = 1;
    const SLIDER_MOBILITY_WEIGHT: i32 = 2;
    const BISHOP_PAIR_BONUS: i32 = 30;
    const ROOK_OPEN_FILE_BONUS: i32 = 20;
    const ROOK_SEMI_OPEN_FILE_BONUS: i32 = 10;
    const DOUBLED_PAWN_PENALTY: i32 = 15;
    const PAWN_ISLAND_PENALTY: i32 = 12;

    fn positional_term(game_state: &GameState) -> i32 {
        let endgame = is_endgame(game_state);
        let mut score = 0i32;
        for piece in Piece::all() {
            let sign = color_sign(piece.color());
            for &square in game_state.squares_of(piece) {
                score += sign * piece_square_value(piece, square, endgame);
            }
        }
        score
    }

    fn mobility_term(game_state: &GameState) -> i32 {
        Color::BOTH
            .iter()
            .map(|&color| color_sign(color) * mobility_for_color(game_state, color))
            .sum()
    }

    fn structure_term(game_state: &GameState) -> i32 {
        let pawn_files = [
            pawn_file_counts(game_state, Color::White),
            pawn_file_counts(game_state, Color::Black),
        ];

        let mut score = 0i32;
        for color in Color::BOTH {
            let own = &pawn_files[color.index()];
            let enemy = &pawn_files[color.opposite().index()];
            let mut term = 0i32;

            if game_state.piece_count(Piece::new(color, PieceKind::Bishop)) >= 2 {
                term += Self::BISHOP_PAIR_BONUS;
            }

            for &square in game_state.squares_of(Piece::new(color, PieceKind::Rook)) {
                let file = file_of(square) as usize;
                if own[file] == 0 {
                    term += if enemy[file] == 0 {
                        Self::ROOK_OPEN_FILE_BONUS
                    } else {
                        Self::ROOK_SEMI_OPEN_FILE_BONUS
                    };
                }
            }

            term -= own
                .iter()
                .map(|&count| i32::from(count.saturating_sub(1)))
                .sum::<i32>()
                * Self::DOUBLED_PAWN_PENALTY;
            term -= (pawn_islands(own) - 1).max(0) * Self::PAWN_ISLAND_PENALTY;

            score += color_sign(color) * term;
        }
        score
    }
}

impl BoardScorer for StandardScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let material = MaterialScorer::material_balance_white_minus_black(game_state);
        let positional = Self::positional_term(game_state);
        let mobility = Self::mobility_term(game_state);
        let structure = Self::structure_term(game_state);
        from_side_to_move(game_state, material + positional + mobility + structure)
    }
}

#[inline]
fn color_sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Material of `color` excluding pawns and the king.
pub fn non_pawn_material(game_state: &GameState, color: Color) -> i32 {
    let pawns = i32::from(game_state.piece_count(Piece::new(color, PieceKind::Pawn)));
    game_state.material_score[color.index()] - pawns * PieceKind::Pawn.value()
}

/// Both sides are down to light enough material for the king to centralise.
pub fn is_endgame(game_state: &GameState) -> bool {
    Color::BOTH
        .iter()
        .all(|&color| non_pawn_material(game_state, color) <= ENDGAME_MATERIAL_THRESHOLD)
}

fn mobility_for_color(game_state: &GameState, color: Color) -> i32 {
    let reachable = |square: Square| game_state.cell(square).is_empty_or_color(color.opposite());
    let mut mobility = 0i32;

    for &from in game_state.squares_of(Piece::new(color, PieceKind::Knight)) {
        let count = KNIGHT_OFFSETS
            .iter()
            .filter(|&&offset| reachable(offset_square(from, offset)))
            .count() as i32;
        mobility += count * StandardScorer::KNIGHT_MOBILITY_WEIGHT;
    }

    for kind in [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
        for &from in game_state.squares_of(Piece::new(color, kind)) {
            let mut count = 0i32;
            for &offset in slider_offsets(kind) {
                let mut square = offset_square(from, offset);
                while reachable(square) {
                    count += 1;
                    if !game_state.cell(square).is_empty() {
                        break;
                    }
                    square = offset_square(square, offset);
                }
            }
            mobility += count * StandardScorer::SLIDER_MOBILITY_WEIGHT;
        }
    }

    mobility
}

fn pawn_file_counts(game_state: &GameState, color: Color) -> [u8; 8] {
    let mut files = [0u8; 8];
    for &square in game_state.squares_of(Piece::new(color, PieceKind::Pawn)) {
        files[file_of(square) as usize] += 1;
    }
    files
}

/// Groups of adjacent files that hold at least one pawn.
fn pawn_islands(files: &[u8; 8]) -> i32 {
    let mut islands = 0i32;
    let mut previous_occupied = false;
    for &count in files {
        let occupied = count > 0;
        if occupied && !previous_occupied {
            islands += 1;
        }
        previous_occupied = occupied;
    }
    islands
}
