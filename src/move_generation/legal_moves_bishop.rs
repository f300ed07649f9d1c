use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{generate_slider_moves, GenerationContext};

pub fn generate_bishop_moves(game_state: &GameState, ctx: &GenerationContext, out: &mut Vec<Move>) {
    generate_slider_moves(game_state, ctx, PieceKind::Bishop, out);
}
