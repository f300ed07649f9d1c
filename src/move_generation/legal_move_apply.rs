//! Make/revert of packed moves on the live position.
//!
//! `make_move` mutates the position in place and pushes an `UndoState`;
//! `revert_move` pops it and restores the previous position exactly,
//! including piece-list slot order.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board_geometry::{
    offset_square, BOARD_SIZE, A1, A8, C1, C8, D1, D8, E1, E8, F1, F8, G1, G8, H1, H8,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{
    attacks_square, direction_between, slider_on_direction,
};
use crate::moves::move_descriptions::{decode_move, DecodedMove, MoveKind};
use crate::search::zobrist::{castling_key, en_passant_key, piece_square_key, side_to_move_key};

const fn build_castling_rights_kept() -> [CastlingRights; BOARD_SIZE] {
    let mut kept = [CASTLE_ALL; BOARD_SIZE];
    kept[E1 as usize] = CASTLE_ALL & !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE);
    kept[H1 as usize] = CASTLE_ALL & !CASTLE_WHITE_KINGSIDE;
    kept[A1 as usize] = CASTLE_ALL & !CASTLE_WHITE_QUEENSIDE;
    kept[E8 as usize] = CASTLE_ALL & !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
    kept[H8 as usize] = CASTLE_ALL & !CASTLE_BLACK_KINGSIDE;
    kept[A8 as usize] = CASTLE_ALL & !CASTLE_BLACK_QUEENSIDE;
    kept
}

/// Rights that survive a move touching each square (as origin or target).
static CASTLING_RIGHTS_KEPT: [CastlingRights; BOARD_SIZE] = build_castling_rights_kept();

/// Rook origin and destination for a castling king destination.
fn castle_rook_squares(king_to: Square) -> (Square, Square) {
    match king_to {
        G1 => (H1, F1),
        C1 => (A1, D1),
        G8 => (H8, F8),
        C8 => (A8, D8),
        _ => panic!("square {king_to} is not a castling destination"),
    }
}

#[inline]
fn captured_square_of(kind: MoveKind, to: Square, mover: Color) -> Square {
    match kind {
        MoveKind::EnPassant => offset_square(to, -mover.pawn_push()),
        _ => to,
    }
}

/// Apply `mv` for the side to move.
///
/// # Panics
///
/// Panics when the origin square holds no piece.
pub fn make_move(game_state: &mut GameState, mv: Move) {
    let DecodedMove {
        from,
        to,
        kind,
        promotion,
    } = decode_move(mv);
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let Some(moving) = game_state.piece_on(from) else {
        panic!("make_move: no piece on square {from}");
    };
    debug_assert_eq!(moving.color(), side);

    let mut undo = UndoState {
        mv,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
        prev_fullmove_number: game_state.fullmove_number,
        prev_zobrist_key: game_state.zobrist_key,
        prev_moved_piece: game_state.moved_piece,
        prev_captured_piece: game_state.captured_piece,
        captured: None,
        promoted_pawn_slot: None,
        prev_in_check: game_state.in_check,
        prev_in_double_check: game_state.in_double_check,
        prev_checking_square: game_state.checking_square,
    };

    let mut key = game_state.zobrist_key;

    if let Some(ep_square) = game_state.en_passant_square.take() {
        key ^= en_passant_key(ep_square);
    }
    game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);

    let captured_square = captured_square_of(kind, to, side);
    if !game_state.cell(captured_square).is_empty() && kind != MoveKind::Castle {
        let (captured, slot) = game_state.remove_piece(captured_square);
        key ^= piece_square_key(captured, captured_square);
        game_state.halfmove_clock = 0;
        undo.captured = Some((captured, slot));
    }

    let mut vacated_rook_square = None;
    let mut arrival_square = to;
    match kind {
        MoveKind::Promotion => {
            let (pawn, slot) = game_state.remove_piece(from);
            let promoted = Piece::new(side, promotion.unwrap_or(PieceKind::Queen));
            game_state.put_piece(promoted, to);
            key ^= piece_square_key(pawn, from) ^ piece_square_key(promoted, to);
            undo.promoted_pawn_slot = Some(slot);
        }
        MoveKind::Castle => {
            let (rook_from, rook_to) = castle_rook_squares(to);
            let rook = Piece::new(side, PieceKind::Rook);
            game_state.move_piece(from, to);
            game_state.move_piece(rook_from, rook_to);
            key ^= piece_square_key(moving, from) ^ piece_square_key(moving, to);
            key ^= piece_square_key(rook, rook_from) ^ piece_square_key(rook, rook_to);
            vacated_rook_square = Some(rook_from);
            arrival_square = rook_to;
        }
        MoveKind::EnPassant | MoveKind::Normal => {
            game_state.move_piece(from, to);
            key ^= piece_square_key(moving, from) ^ piece_square_key(moving, to);
        }
    }

    if moving.kind() == PieceKind::Pawn {
        game_state.halfmove_clock = 0;

        let push = side.pawn_push();
        if to == offset_square(from, 2 * push) {
            let enemy_pawn = Cell::Occupied(Piece::new(enemy, PieceKind::Pawn));
            if game_state.cell(offset_square(to, -1)) == enemy_pawn
                || game_state.cell(offset_square(to, 1)) == enemy_pawn
            {
                let ep_square = offset_square(from, push);
                game_state.en_passant_square = Some(ep_square);
                key ^= en_passant_key(ep_square);
            }
        }
    }

    let rights = game_state.castling_rights
        & CASTLING_RIGHTS_KEPT[from as usize]
        & CASTLING_RIGHTS_KEPT[to as usize];
    if rights != game_state.castling_rights {
        key ^= castling_key(game_state.castling_rights) ^ castling_key(rights);
        game_state.castling_rights = rights;
    }

    if side == Color::Black {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }
    game_state.side_to_move = enemy;
    key ^= side_to_move_key();

    game_state.zobrist_key = key;
    *game_state.repetition_table.entry(key).or_insert(0) += 1;

    game_state.moved_piece = Some(moving);
    game_state.captured_piece = undo.captured.map(|(piece, _)| piece);
    game_state.undo_stack.push(undo);

    let vacated = [
        Some(from),
        (kind == MoveKind::EnPassant).then_some(captured_square),
        vacated_rook_square,
    ];
    update_check_state(game_state, side, arrival_square, &vacated);
}

/// Recompute the check cache of the new side to move from the squares the
/// last move touched: a direct check by the piece that arrived, plus
/// discovered checks along lines through each vacated square.
fn update_check_state(
    game_state: &mut GameState,
    mover: Color,
    arrival_square: Square,
    vacated: &[Option<Square>],
) {
    let king = game_state.king_square(mover.opposite());
    let mut checkers = [None::<Square>; 2];
    let mut count = 0;
    let mut add = |square: Square| {
        if count < 2 && !checkers[..count].contains(&Some(square)) {
            checkers[count] = Some(square);
            count += 1;
        }
    };

    if attacks_square(game_state, arrival_square, king) {
        add(arrival_square);
    }

    for &square in vacated.iter().flatten() {
        let direction = direction_between(king, square);
        if direction == 0 {
            continue;
        }
        if let Some(slider) = slider_on_direction(game_state, direction, king, mover) {
            add(slider);
        }
    }

    game_state.in_check = count > 0;
    game_state.in_double_check = count > 1;
    game_state.checking_square = checkers[0];
}

/// Undo the most recent `make_move`, returning the move it applied.
pub fn revert_move(game_state: &mut GameState) -> ChessResult<Move> {
    let Some(undo) = game_state.undo_stack.pop() else {
        return Err(ChessError::EmptyUndoStack);
    };

    if let Some(count) = game_state.repetition_table.get_mut(&game_state.zobrist_key) {
        *count -= 1;
        if *count == 0 {
            game_state.repetition_table.remove(&game_state.zobrist_key);
        }
    }

    let DecodedMove { from, to, kind, .. } = decode_move(undo.mv);
    let mover = game_state.side_to_move.opposite();

    match kind {
        MoveKind::Promotion => {
            let Some(slot) = undo.promoted_pawn_slot else {
                panic!("promotion undo record without a pawn slot");
            };
            game_state.remove_piece(to);
            game_state.reinsert_piece(Piece::new(mover, PieceKind::Pawn), from, slot);
        }
        MoveKind::Castle => {
            let (rook_from, rook_to) = castle_rook_squares(to);
            game_state.move_piece(rook_to, rook_from);
            game_state.move_piece(to, from);
        }
        MoveKind::EnPassant | MoveKind::Normal => game_state.move_piece(to, from),
    }

    if let Some((piece, slot)) = undo.captured {
        game_state.reinsert_piece(piece, captured_square_of(kind, to, mover), slot);
    }

    game_state.side_to_move = mover;
    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    game_state.fullmove_number = undo.prev_fullmove_number;
    game_state.zobrist_key = undo.prev_zobrist_key;
    game_state.moved_piece = undo.prev_moved_piece;
    game_state.captured_piece = undo.prev_captured_piece;
    game_state.in_check = undo.prev_in_check;
    game_state.in_double_check = undo.prev_in_double_check;
    game_state.checking_square = undo.prev_checking_square;

    Ok(undo.mv)
}

#[cfg(test)]
mod tests {
    use super::{make_move, revert_move};
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_checks::attackers_of_square;
    use crate::move_generation::legal_move_generator::generate_legal_moves;
    use crate::search::zobrist::compute_zobrist_key;
    use crate::utils::long_algebraic::{long_algebraic_to_move, play_long_algebraic};

    fn assert_caches_consistent(game: &GameState) {
        assert_eq!(game.zobrist_key, compute_zobrist_key(game), "{}", game.get_fen());

        let side = game.side_to_move;
        let checkers = attackers_of_square(game, game.king_square(side), side.opposite());
        assert_eq!(game.in_check, !checkers.is_empty(), "{}", game.get_fen());
        assert_eq!(game.in_double_check, checkers.len() > 1, "{}", game.get_fen());
        if checkers.len() == 1 {
            assert_eq!(game.checking_square, Some(checkers[0]), "{}", game.get_fen());
        }
    }

    fn walk(game: &mut GameState, depth: u8) {
        if depth == 0 {
            return;
        }
        for mv in generate_legal_moves(game) {
            let before = game.clone();
            make_move(game, mv);
            assert_caches_consistent(game);
            walk(game, depth - 1);
            revert_move(game).expect("revert should pop the move just made");
            assert_eq!(*game, before);
        }
    }

    #[test]
    fn make_revert_round_trips_from_start() {
        let mut game = GameState::new_game();
        walk(&mut game, 3);
    }

    #[test]
    fn make_revert_round_trips_tactical_positions() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ] {
            let mut game = GameState::from_fen(fen).expect("FEN should parse");
            walk(&mut game, 2);
        }
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        play_long_algebraic(&mut game, "e1g1").expect("castling should be legal");
        assert_eq!(game.get_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");

        play_long_algebraic(&mut game, "a8a1").expect("rook capture should be legal");
        assert_eq!(game.get_fen(), "4k2r/8/8/8/8/8/8/r4RK1 w k - 0 2");
    }

    #[test]
    fn en_passant_square_only_set_when_capturable() {
        let mut game = GameState::new_game();
        play_long_algebraic(&mut game, "e2e4").expect("e2e4 should be legal");
        assert_eq!(game.en_passant_square, None);

        let mut game = GameState::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1")
            .expect("FEN should parse");
        play_long_algebraic(&mut game, "d7d5").expect("d7d5 should be legal");
        assert!(game.en_passant_square.is_some());
        play_long_algebraic(&mut game, "e5d6").expect("en passant should be legal");
        assert_eq!(game.get_fen(), "4k3/8/3P4/8/8/8/8/4K3 b - - 0 2");
        assert_eq!(game.material_score, [100, 0]);
    }

    #[test]
    fn promotion_replaces_pawn_and_reverts_exactly() {
        let mut game = GameState::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1")
            .expect("FEN should parse");
        let before = game.clone();
        let mv = long_algebraic_to_move(&game, "a7b8q").expect("a7b8q should parse");
        make_move(&mut game, mv);
        assert_eq!(
            game.piece_on(game.king_square(Color::Black) - 3),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert!(game.in_check);
        assert_eq!(game.material_score, [900, 0]);
        assert_eq!(game.captured_piece, Some(Piece::new(Color::Black, PieceKind::Rook)));

        assert_eq!(revert_move(&mut game), Ok(mv));
        assert_eq!(game, before);
    }

    #[test]
    fn discovered_and_double_checks_are_detected() {
        // Knight leaves the e-file uncovering the rook and checks from f6.
        let mut game = GameState::from_fen("4k3/8/8/8/4N3/8/8/K3R3 w - - 0 1")
            .expect("FEN should parse");
        play_long_algebraic(&mut game, "e4f6").expect("e4f6 should be legal");
        assert!(game.in_check);
        assert!(game.in_double_check);
        assert_caches_consistent(&game);

        let mut game = GameState::from_fen("4k3/8/8/8/4N3/8/8/K3R3 w - - 0 1")
            .expect("FEN should parse");
        play_long_algebraic(&mut game, "e4c3").expect("e4c3 should be legal");
        assert!(game.in_check);
        assert!(!game.in_double_check);
        assert_eq!(
            game.checking_square,
            Some(crate::game_state::board_geometry::E1)
        );
    }

    #[test]
    fn revert_with_empty_history_is_an_error() {
        let mut game = GameState::new_game();
        assert_eq!(revert_move(&mut game), Err(ChessError::EmptyUndoStack));
    }
}
