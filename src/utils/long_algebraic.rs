//! Long algebraic (`e2e4`, `e7e8q`) conversion for packed moves.

use tracing::warn;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board_geometry::{file_of, rank_of};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::*;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

fn promotion_to_char(piece_kind: PieceKind) -> char {
    match piece_kind {
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        _ => 'q',
    }
}

fn char_to_promotion(ch: char) -> ChessResult<PieceKind> {
    match ch {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(ChessError::InvalidAlgebraic(format!(
            "invalid promotion piece: {ch}"
        ))),
    }
}

/// Render a move as 4 or 5 characters of long algebraic text.
pub fn move_to_long_algebraic(mv: Move) -> String {
    let decoded = decode_move(mv);
    let mut out = String::with_capacity(5);
    // Decoded squares always come from the dense table, so they are on the board.
    out.push_str(&square_to_algebraic(decoded.from).unwrap_or_default());
    out.push_str(&square_to_algebraic(decoded.to).unwrap_or_default());
    if let Some(piece_kind) = decoded.promotion {
        out.push(promotion_to_char(piece_kind));
    }
    out
}

/// Decode long algebraic text against `game_state`, inferring the move kind
/// from the board. The result is not checked for legality.
pub fn long_algebraic_to_move(game_state: &GameState, long_algebraic: &str) -> ChessResult<Move> {
    let invalid = |reason: &str| {
        ChessError::InvalidAlgebraic(format!("{long_algebraic}: {reason}"))
    };

    if !long_algebraic.is_ascii() || !(4..=5).contains(&long_algebraic.len()) {
        return Err(invalid("expected 4 or 5 characters"));
    }

    let from = algebraic_to_square(&long_algebraic[0..2])?;
    let to = algebraic_to_square(&long_algebraic[2..4])?;

    let moved_piece = game_state
        .piece_on(from)
        .filter(|piece| piece.color() == game_state.side_to_move)
        .ok_or_else(|| invalid("no piece of the side to move on the from-square"))?;

    if let Some(&promotion_char) = long_algebraic.as_bytes().get(4) {
        let piece_kind = char_to_promotion(promotion_char as char)?;
        if moved_piece.kind() != PieceKind::Pawn {
            return Err(invalid("only pawns may promote"));
        }
        return Ok(encode_move(from, to, MoveKind::Promotion, Some(piece_kind)));
    }

    let kind = match moved_piece.kind() {
        PieceKind::King if rank_of(from) == rank_of(to) && file_of(from).abs_diff(file_of(to)) == 2 => {
            MoveKind::Castle
        }
        PieceKind::Pawn if rank_of(to) == 0 || rank_of(to) == 7 => {
            return Err(invalid("missing promotion piece"));
        }
        PieceKind::Pawn
            if game_state.en_passant_square == Some(to) && file_of(from) != file_of(to) =>
        {
            MoveKind::EnPassant
        }
        _ => MoveKind::Normal,
    };

    Ok(encode_move(from, to, kind, None))
}

/// Decode `long_algebraic`, require it to be legal, then apply it.
pub fn play_long_algebraic(game_state: &mut GameState, long_algebraic: &str) -> ChessResult<Move> {
    let mv = long_algebraic_to_move(game_state, long_algebraic)?;
    if !generate_legal_moves(game_state).contains(&mv) {
        warn!(mv = long_algebraic, fen = %game_state.get_fen(), "rejected illegal move");
        return Err(ChessError::IllegalMove(long_algebraic.to_owned()));
    }
    make_move(game_state, mv);
    Ok(mv)
}
