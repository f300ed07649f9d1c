//! Attack, check and pin queries over the mailbox board.
//!
//! All scans walk offsets from the target square outwards and stop at the
//! first occupied or off-board cell, so none of them needs bounds checks.

use crate::game_state::board_geometry::{file_of, offset_square, row_of};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::piece_offsets::{
    is_diagonal, is_orthogonal, pawn_capture_offsets, BISHOP_OFFSETS, KING_OFFSETS,
    KNIGHT_OFFSETS, ROOK_OFFSETS,
};

/// Offset of one step from `from` towards `to` when both share a rank, file
/// or diagonal, `0` otherwise.
pub fn direction_between(from: Square, to: Square) -> i8 {
    if from == to {
        return 0;
    }
    let df = file_of(to) as i8 - file_of(from) as i8;
    let dr = row_of(to) as i8 - row_of(from) as i8;

    if dr == 0 {
        df.signum()
    } else if df == 0 {
        10 * dr.signum()
    } else if df.abs() == dr.abs() {
        10 * dr.signum() + df.signum()
    } else {
        0
    }
}

/// True when `mid` lies strictly between `a` and `b` on one line.
#[inline]
pub fn is_square_between(a: Square, b: Square, mid: Square) -> bool {
    let from_a = direction_between(a, mid);
    from_a != 0 && from_a == -direction_between(b, mid)
}

#[inline]
fn slides_along(piece: Piece, direction: i8) -> bool {
    match piece.kind() {
        PieceKind::Queen => true,
        PieceKind::Bishop => is_diagonal(direction),
        PieceKind::Rook => is_orthogonal(direction),
        _ => false,
    }
}

/// First piece met walking from `start` (exclusive) along `direction`, if it
/// is a slider of `color` able to attack back along that line.
pub fn slider_on_direction(
    game_state: &GameState,
    direction: i8,
    start: Square,
    color: Color,
) -> Option<Square> {
    let mut square = offset_square(start, direction);
    loop {
        match game_state.cell(square) {
            Cell::Empty => square = offset_square(square, direction),
            Cell::Occupied(piece) if piece.color() == color && slides_along(piece, direction) => {
                return Some(square);
            }
            _ => return None,
        }
    }
}

fn has_any(game_state: &GameState, color: Color, kinds: &[PieceKind]) -> bool {
    game_state.count_of_kinds(color, kinds) > 0
}

/// Calls `visit` with every square holding a piece of `by_color` that
/// attacks `square`; stops early when `visit` returns `true`.
fn scan_attackers(
    game_state: &GameState,
    square: Square,
    by_color: Color,
    mut visit: impl FnMut(Square) -> bool,
) -> bool {
    let holds = |sq: Square, kind: PieceKind| {
        game_state.cell(sq) == Cell::Occupied(Piece::new(by_color, kind))
    };

    if has_any(game_state, by_color, &[PieceKind::Pawn]) {
        for offset in pawn_capture_offsets(by_color) {
            let from = offset_square(square, -offset);
            if holds(from, PieceKind::Pawn) && visit(from) {
                return true;
            }
        }
    }

    if has_any(game_state, by_color, &[PieceKind::Knight]) {
        for offset in KNIGHT_OFFSETS {
            let from = offset_square(square, offset);
            if holds(from, PieceKind::Knight) && visit(from) {
                return true;
            }
        }
    }

    for offset in KING_OFFSETS {
        let from = offset_square(square, offset);
        if holds(from, PieceKind::King) && visit(from) {
            return true;
        }
    }

    if has_any(game_state, by_color, &[PieceKind::Bishop, PieceKind::Queen]) {
        for offset in BISHOP_OFFSETS {
            if let Some(from) = slider_on_direction(game_state, offset, square, by_color) {
                if visit(from) {
                    return true;
                }
            }
        }
    }

    if has_any(game_state, by_color, &[PieceKind::Rook, PieceKind::Queen]) {
        for offset in ROOK_OFFSETS {
            if let Some(from) = slider_on_direction(game_state, offset, square, by_color) {
                if visit(from) {
                    return true;
                }
            }
        }
    }

    false
}

/// Square of the first piece of `by_color` found attacking `square`.
pub fn attacker_of_square(game_state: &GameState, square: Square, by_color: Color) -> Option<Square> {
    let mut found = None;
    scan_attackers(game_state, square, by_color, |from| {
        found = Some(from);
        true
    });
    found
}

#[inline]
pub fn is_square_attacked(game_state: &GameState, square: Square, by_color: Color) -> bool {
    scan_attackers(game_state, square, by_color, |_| true)
}

/// Every square holding a piece of `by_color` that attacks `square`.
pub fn attackers_of_square(game_state: &GameState, square: Square, by_color: Color) -> Vec<Square> {
    let mut attackers = Vec::new();
    scan_attackers(game_state, square, by_color, |from| {
        attackers.push(from);
        false
    });
    attackers
}

/// Whether the king of `color` is attacked. A side without a king is never in check.
pub fn is_check(game_state: &GameState, color: Color) -> bool {
    if game_state.piece_count(Piece::new(color, PieceKind::King)) == 0 {
        return false;
    }
    is_square_attacked(game_state, game_state.king_square(color), color.opposite())
}

/// Whether the piece standing on `from` attacks `target`.
pub fn attacks_square(game_state: &GameState, from: Square, target: Square) -> bool {
    let Some(piece) = game_state.piece_on(from) else {
        return false;
    };
    let delta = target as i16 - from as i16;

    match piece.kind() {
        PieceKind::Pawn => pawn_capture_offsets(piece.color())
            .iter()
            .any(|&offset| offset as i16 == delta),
        PieceKind::Knight => KNIGHT_OFFSETS.iter().any(|&offset| offset as i16 == delta),
        PieceKind::King => KING_OFFSETS.iter().any(|&offset| offset as i16 == delta),
        _ => {
            let direction = direction_between(target, from);
            direction != 0
                && slider_on_direction(game_state, direction, target, piece.color()) == Some(from)
        }
    }
}

/// Direction from the king towards `piece_square` along which that piece is
/// pinned by a slider of `opponent`, or `None` when it may leave the line.
pub fn pin_direction(
    game_state: &GameState,
    king_square: Square,
    piece_square: Square,
    opponent: Color,
) -> Option<i8> {
    let direction = direction_between(king_square, piece_square);
    if direction == 0 {
        return None;
    }

    let mut square = offset_square(king_square, direction);
    while square != piece_square {
        if !game_state.cell(square).is_empty() {
            return None;
        }
        square = offset_square(square, direction);
    }

    slider_on_direction(game_state, direction, piece_square, opponent).map(|_| direction)
}

/// Recompute the side to move's check cache from a full attacker scan.
pub fn refresh_check_state(game_state: &mut GameState) {
    let side = game_state.side_to_move;
    let checkers = if game_state.piece_count(Piece::new(side, PieceKind::King)) == 0 {
        Vec::new()
    } else {
        attackers_of_square(game_state, game_state.king_square(side), side.opposite())
    };

    game_state.in_check = !checkers.is_empty();
    game_state.in_double_check = checkers.len() > 1;
    game_state.checking_square = checkers.first().copied();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn directions_between_aligned_squares() {
        assert_eq!(direction_between(sq("a1"), sq("h8")), -9);
        assert_eq!(direction_between(sq("e1"), sq("e8")), -10);
        assert_eq!(direction_between(sq("h4"), sq("a4")), -1);
        assert_eq!(direction_between(sq("e1"), sq("f3")), 0);
        assert!(is_square_between(sq("e1"), sq("e8"), sq("e4")));
        assert!(!is_square_between(sq("e1"), sq("e4"), sq("e8")));
        assert!(!is_square_between(sq("e1"), sq("e8"), sq("d4")));
    }

    #[test]
    fn finds_every_attacker() {
        let game = GameState::from_fen("k7/8/8/3n4/8/4R3/8/4K2b w - - 0 1")
            .expect("FEN should parse");
        let e3 = sq("e3");
        let mut attackers = attackers_of_square(&game, e3, Color::Black);
        attackers.sort_unstable();
        let mut expected = vec![sq("d5")];
        expected.sort_unstable();
        assert_eq!(attackers, expected);
        assert!(is_square_attacked(&game, sq("f2"), Color::White));
        assert_eq!(attacker_of_square(&game, sq("g2"), Color::Black), Some(sq("h1")));
    }

    #[test]
    fn reports_pin_direction_towards_pinned_piece() {
        let game = GameState::from_fen("4k3/8/8/8/b7/8/2B5/3K4 w - - 0 1")
            .expect("FEN should parse");
        let king = game.king_square(Color::White);
        assert_eq!(pin_direction(&game, king, sq("c2"), Color::Black), Some(-11));
        assert_eq!(pin_direction(&game, king, sq("d2"), Color::Black), None);
    }

    #[test]
    fn check_cache_matches_full_scan_after_load() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1")
            .expect("FEN should parse");
        assert!(game.in_check);
        assert!(!game.in_double_check);
        assert_eq!(game.checking_square, Some(sq("e2")));
        assert!(is_check(&game, Color::White));
        assert!(!is_check(&game, Color::Black));
    }
}
