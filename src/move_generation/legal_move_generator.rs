//! Full legal move generation pipeline.
//!
//! Piece generators already honour pins and single-check evasion, so only
//! king moves and en-passant captures still go through a residual
//! play-and-test step before they are reported.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{
    needs_residual_check, passes_residual_check, GenerationContext,
};
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::move_descriptions::{move_from, move_kind};

type PieceGenerator = fn(&GameState, &GenerationContext, &mut Vec<Move>);

/// Generators in the order moves are emitted.
const PIECE_GENERATORS: [PieceGenerator; 6] = [
    generate_pawn_moves,
    generate_knight_moves,
    generate_bishop_moves,
    generate_rook_moves,
    generate_queen_moves,
    generate_king_moves,
];

fn drop_illegal(game_state: &mut GameState, ctx: &GenerationContext, moves: &mut Vec<Move>) {
    moves.retain(|&mv| {
        !needs_residual_check(ctx, move_kind(mv), move_from(mv))
            || passes_residual_check(game_state, mv)
    });
}

fn active_generators(ctx: &GenerationContext) -> &'static [PieceGenerator] {
    if ctx.in_double_check {
        &PIECE_GENERATORS[5..]
    } else {
        &PIECE_GENERATORS
    }
}

/// Every legal move for the side to move.
///
/// The position is borrowed mutably for the residual checks only; it is
/// identical to its previous value when this returns.
pub fn generate_legal_moves(game_state: &mut GameState) -> Vec<Move> {
    let ctx = GenerationContext::new(game_state);
    let mut moves = Vec::with_capacity(64);

    for generate in active_generators(&ctx) {
        generate(game_state, &ctx, &mut moves);
    }
    drop_illegal(game_state, &ctx, &mut moves);

    moves
}

/// Whether the side to move has at least one legal move.
pub fn has_legal_moves(game_state: &mut GameState) -> bool {
    let ctx = GenerationContext::new(game_state);
    let mut scratch = Vec::with_capacity(32);

    // King first: it is the only piece that can move in double check and the
    // most likely to have a move when the others are blocked.
    for generate in active_generators(&ctx).iter().rev() {
        scratch.clear();
        generate(game_state, &ctx, &mut scratch);
        drop_illegal(game_state, &ctx, &mut scratch);
        if !scratch.is_empty() {
            return true;
        }
    }

    false
}
