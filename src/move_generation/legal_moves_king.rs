use crate::game_state::board_geometry::{
    offset_square, B1, B8, C1, C8, D1, D8, E1, E8, F1, F8, G1, G8,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::GenerationContext;
use crate::moves::move_descriptions::{encode_move, MoveKind};
use crate::moves::piece_offsets::KING_OFFSETS;

struct CastlingPath {
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    // Squares that must be empty, the first one being the square the king crosses.
    empty: &'static [Square],
}

const WHITE_CASTLING: [CastlingPath; 2] = [
    CastlingPath {
        right: CASTLE_WHITE_KINGSIDE,
        king_from: E1,
        king_to: G1,
        empty: &[F1, G1],
    },
    CastlingPath {
        right: CASTLE_WHITE_QUEENSIDE,
        king_from: E1,
        king_to: C1,
        empty: &[D1, C1, B1],
    },
];

const BLACK_CASTLING: [CastlingPath; 2] = [
    CastlingPath {
        right: CASTLE_BLACK_KINGSIDE,
        king_from: E8,
        king_to: G8,
        empty: &[F8, G8],
    },
    CastlingPath {
        right: CASTLE_BLACK_QUEENSIDE,
        king_from: E8,
        king_to: C8,
        empty: &[D8, C8, B8],
    },
];

/// King steps and castling. Destinations attacked by the opponent are left to
/// the residual check.
pub fn generate_king_moves(game_state: &GameState, ctx: &GenerationContext, out: &mut Vec<Move>) {
    let from = ctx.king_square;

    for offset in KING_OFFSETS {
        let to = offset_square(from, offset);
        if game_state.cell(to).is_empty_or_color(ctx.enemy) {
            out.push(encode_move(from, to, MoveKind::Normal, None));
        }
    }

    if ctx.in_check {
        return;
    }

    let paths = match ctx.side {
        Color::White => &WHITE_CASTLING,
        Color::Black => &BLACK_CASTLING,
    };
    for path in paths {
        if game_state.castling_rights & path.right == 0 || from != path.king_from {
            continue;
        }
        if !path.empty.iter().all(|&sq| game_state.cell(sq).is_empty()) {
            continue;
        }
        if is_square_attacked(game_state, path.empty[0], ctx.enemy) {
            continue;
        }
        out.push(encode_move(from, path.king_to, MoveKind::Castle, None));
    }
}
