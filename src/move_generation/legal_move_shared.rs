//! Helpers shared by the per-piece generators.

use crate::game_state::board_geometry::offset_square;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{is_check, is_square_between, pin_direction};
use crate::moves::move_descriptions::{decode_move, encode_move, MoveKind};
use crate::moves::piece_offsets::slider_offsets;

/// Per-position facts every piece generator filters against.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext {
    pub side: Color,
    pub enemy: Color,
    pub king_square: Square,
    pub in_check: bool,
    pub in_double_check: bool,
    pub check_square: Option<Square>,
}

impl GenerationContext {
    pub fn new(game_state: &GameState) -> Self {
        let side = game_state.side_to_move;
        Self {
            side,
            enemy: side.opposite(),
            king_square: game_state.king_square(side),
            in_check: game_state.in_check,
            in_double_check: game_state.in_double_check,
            check_square: game_state.checking_square.filter(|_| game_state.in_check),
        }
    }

    /// Whether a non-king piece landing on `to` answers a single check.
    #[inline]
    pub fn resolves_check(&self, to: Square) -> bool {
        match self.check_square {
            None => true,
            Some(checker) => to == checker || is_square_between(self.king_square, checker, to),
        }
    }

    /// Pin direction of the piece on `from`, or `None` when the piece may not
    /// move at all (pinned while the king is in check).
    #[inline]
    pub fn pin_of(&self, game_state: &GameState, from: Square) -> Option<Option<i8>> {
        let pin = pin_direction(game_state, self.king_square, from, self.enemy);
        if pin.is_some() && self.in_check {
            None
        } else {
            Some(pin)
        }
    }
}

/// Whether a step along `direction` keeps a piece pinned along `pin` on its line.
#[inline]
pub fn stays_on_pin_line(pin: Option<i8>, direction: i8) -> bool {
    pin.map_or(true, |pin| pin.abs() == direction.abs())
}

/// Ray-walk moves for every bishop, rook or queen of the side to move.
pub fn generate_slider_moves(
    game_state: &GameState,
    ctx: &GenerationContext,
    kind: PieceKind,
    out: &mut Vec<Move>,
) {
    let piece = Piece::new(ctx.side, kind);
    for &from in game_state.squares_of(piece) {
        let Some(pin) = ctx.pin_of(game_state, from) else {
            continue;
        };

        for &direction in slider_offsets(kind) {
            if !stays_on_pin_line(pin, direction) {
                continue;
            }

            let mut to = offset_square(from, direction);
            loop {
                match game_state.cell(to) {
                    Cell::Empty => {
                        if ctx.resolves_check(to) {
                            out.push(encode_move(from, to, MoveKind::Normal, None));
                        }
                    }
                    Cell::Occupied(target) => {
                        if target.color() == ctx.enemy && ctx.resolves_check(to) {
                            out.push(encode_move(from, to, MoveKind::Normal, None));
                        }
                        break;
                    }
                    Cell::OffBoard => break,
                }
                to = offset_square(to, direction);
            }
        }
    }
}

/// Moves that can still expose the own king after the filters above: king
/// moves (castling included) and en-passant captures.
#[inline]
pub fn needs_residual_check(ctx: &GenerationContext, kind: MoveKind, from: Square) -> bool {
    from == ctx.king_square || kind == MoveKind::EnPassant
}

/// Play `mv` on the board only, test the mover's king, then put every piece
/// back into the exact piece-list slot it came from.
pub fn passes_residual_check(game_state: &mut GameState, mv: Move) -> bool {
    let decoded = decode_move(mv);
    let side = game_state.side_to_move;

    let captured_square = match decoded.kind {
        MoveKind::EnPassant => offset_square(decoded.to, -side.pawn_push()),
        _ => decoded.to,
    };
    let captured = match game_state.cell(captured_square) {
        Cell::Occupied(_) => Some(game_state.remove_piece(captured_square)),
        _ => None,
    };

    game_state.move_piece(decoded.from, decoded.to);
    let legal = !is_check(game_state, side);
    game_state.move_piece(decoded.to, decoded.from);

    if let Some((piece, slot)) = captured {
        game_state.reinsert_piece(piece, captured_square, slot);
    }

    legal
}
