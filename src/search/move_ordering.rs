//! Static move ordering: captures by MVV-LVA first, then quiet moves by
//! piece-square gain.

use std::cmp::Reverse;

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::{decode_move, MoveKind};
use crate::search::board_scoring::is_endgame;
use crate::tables::piece_square_tables::piece_square_value;

/// Added to every capture so it sorts ahead of all quiet moves.
const CAPTURE_BASE: i32 = 10_000;

/// Ordering key for `mv`; higher sorts first.
pub fn score_move(game_state: &GameState, mv: Move, endgame: bool) -> i32 {
    let decoded = decode_move(mv);
    let Some(attacker) = game_state.piece_on(decoded.from) else {
        return i32::MIN;
    };

    let victim = match decoded.kind {
        MoveKind::EnPassant => Some((
            Piece::new(attacker.color().opposite(), PieceKind::Pawn),
            decoded.to,
        )),
        MoveKind::Castle => None,
        _ => game_state.piece_on(decoded.to).map(|piece| (piece, decoded.to)),
    };

    let mut score = match victim {
        Some((victim, square)) => {
            CAPTURE_BASE
                + victim.kind().value()
                + piece_square_value(victim, square, endgame)
                - attacker.kind().value()
                - piece_square_value(attacker, decoded.from, endgame)
        }
        None => {
            piece_square_value(attacker, decoded.to, endgame)
                - piece_square_value(attacker, decoded.from, endgame)
        }
    };

    if let Some(promotion) = decoded.promotion {
        score += promotion.value();
    }
    score
}

/// Sort `moves` best-first for search.
pub fn order_moves(game_state: &GameState, moves: &mut [Move]) {
    let endgame = is_endgame(game_state);
    moves.sort_by_cached_key(|&mv| Reverse(score_move(game_state, mv, endgame)));
}
