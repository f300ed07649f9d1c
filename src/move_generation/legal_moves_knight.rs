use crate::game_state::board_geometry::offset_square;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::pin_direction;
use crate::move_generation::legal_move_shared::GenerationContext;
use crate::moves::move_descriptions::{encode_move, MoveKind};
use crate::moves::piece_offsets::KNIGHT_OFFSETS;

pub fn generate_knight_moves(game_state: &GameState, ctx: &GenerationContext, out: &mut Vec<Move>) {
    for &from in game_state.squares_of(Piece::new(ctx.side, PieceKind::Knight)) {
        // A pinned knight always leaves its line.
        if pin_direction(game_state, ctx.king_square, from, ctx.enemy).is_some() {
            continue;
        }

        for offset in KNIGHT_OFFSETS {
            let to = offset_square(from, offset);
            if game_state.cell(to).is_empty_or_color(ctx.enemy) && ctx.resolves_check(to) {
                out.push(encode_move(from, to, MoveKind::Normal, None));
            }
        }
    }
}
