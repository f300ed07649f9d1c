use crate::game_state::board_geometry::{offset_square, rank_of};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{stays_on_pin_line, GenerationContext};
use crate::moves::move_descriptions::{encode_move, MoveKind};
use crate::moves::piece_offsets::pawn_capture_offsets;

/// Promotion fan-out order.
const PROMOTION_ORDER: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Knight,
    PieceKind::Rook,
    PieceKind::Bishop,
];

pub fn generate_pawn_moves(game_state: &GameState, ctx: &GenerationContext, out: &mut Vec<Move>) {
    let side = ctx.side;
    let push = side.pawn_push();
    let (start_rank, promotion_rank) = match side {
        Color::White => (1, 7),
        Color::Black => (6, 0),
    };

    for &from in game_state.squares_of(Piece::new(side, PieceKind::Pawn)) {
        let Some(pin) = ctx.pin_of(game_state, from) else {
            continue;
        };

        let one_step = offset_square(from, push);
        if game_state.cell(one_step).is_empty() && stays_on_pin_line(pin, push) {
            if ctx.resolves_check(one_step) {
                push_pawn_move(from, one_step, rank_of(one_step) == promotion_rank, out);
            }

            let two_step = offset_square(one_step, push);
            if rank_of(from) == start_rank
                && game_state.cell(two_step).is_empty()
                && ctx.resolves_check(two_step)
            {
                out.push(encode_move(from, two_step, MoveKind::Normal, None));
            }
        }

        // captures and en-passant
        for offset in pawn_capture_offsets(side) {
            if !stays_on_pin_line(pin, offset) {
                continue;
            }

            let to = offset_square(from, offset);
            match game_state.cell(to) {
                Cell::Occupied(target) if target.color() == ctx.enemy => {
                    if ctx.resolves_check(to) {
                        push_pawn_move(from, to, rank_of(to) == promotion_rank, out);
                    }
                }
                Cell::Empty if game_state.en_passant_square == Some(to) => {
                    let captured_square = offset_square(to, -push);
                    if game_state.cell(captured_square)
                        == Cell::Occupied(Piece::new(ctx.enemy, PieceKind::Pawn))
                    {
                        // Check evasion is settled by the residual check.
                        out.push(encode_move(from, to, MoveKind::EnPassant, None));
                    }
                }
                _ => {}
            }
        }
    }
}

fn push_pawn_move(from: Square, to: Square, promotes: bool, out: &mut Vec<Move>) {
    if promotes {
        for piece_kind in PROMOTION_ORDER {
            out.push(encode_move(from, to, MoveKind::Promotion, Some(piece_kind)));
        }
    } else {
        out.push(encode_move(from, to, MoveKind::Normal, None));
    }
}
