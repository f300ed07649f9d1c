//! FEN-to-GameState parser.
//!
//! Builds fully-populated incremental state from a Forsyth-Edwards Notation
//! string, including piece lists, material, rights, clocks, the Zobrist key
//! and the check cache. Parsing is strict: anything that could not describe
//! a reachable-looking position is rejected before a state is returned.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::board_geometry::{
    rank_of, square_from_file_rank, A1, A8, E1, E8, H1, H8,
};
use crate::game_state::game_state::PIECE_LIST_CAPACITY;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{is_check, refresh_check_state};
use crate::search::zobrist::compute_zobrist_key;
use crate::utils::algebraic::algebraic_to_square;

const MAX_PAWNS_PER_SIDE: u8 = 8;

/// Officers each side starts with; anything above these came from a promotion.
const STARTING_OFFICERS: [(PieceKind, u8); 4] = [
    (PieceKind::Knight, 2),
    (PieceKind::Bishop, 2),
    (PieceKind::Rook, 2),
    (PieceKind::Queen, 1),
];

fn invalid(message: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(message.into())
}

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(invalid(format!(
            "expected at least 4 fields, found {}",
            fields.len()
        )));
    }
    if fields.len() > 6 {
        return Err(invalid("FEN has extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(fields[0], &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(fields[1])?;
    game_state.castling_rights = parse_castling_rights(fields[2], &game_state)?;
    game_state.en_passant_square =
        parse_en_passant_square(fields[3], game_state.side_to_move)?;

    if let Some(halfmove_part) = fields.get(4) {
        game_state.halfmove_clock = halfmove_part
            .parse::<u16>()
            .map_err(|_| invalid(format!("invalid halfmove clock: {halfmove_part}")))?;
    }
    if let Some(fullmove_part) = fields.get(5) {
        game_state.fullmove_number = fullmove_part
            .parse::<u16>()
            .map_err(|_| invalid(format!("invalid fullmove number: {fullmove_part}")))?;
    }

    if is_check(&game_state, game_state.side_to_move.opposite()) {
        return Err(invalid("side not to move is in check"));
    }

    game_state.zobrist_key = compute_zobrist_key(&game_state);
    game_state
        .repetition_table
        .insert(game_state.zobrist_key, 1);
    refresh_check_state(&mut game_state);

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid("board rank has too many files"));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}' in board layout")))?;

            if file >= 8 {
                return Err(invalid("board rank has too many files"));
            }
            if piece.kind() == PieceKind::Pawn && (board_rank == 0 || board_rank == 7) {
                return Err(invalid("pawn on the first or eighth rank"));
            }

            let limit = match piece.kind() {
                PieceKind::Pawn => MAX_PAWNS_PER_SIDE,
                PieceKind::King => 1,
                _ => PIECE_LIST_CAPACITY as u8,
            };
            if game_state.piece_count(piece) >= limit {
                return Err(invalid(format!("too many '{ch}' pieces")));
            }

            game_state.put_piece(piece, square_from_file_rank(file, board_rank));
            file += 1;
        }

        if file != 8 {
            return Err(invalid("board rank does not sum to 8 files"));
        }
    }

    for color in Color::BOTH {
        if game_state.piece_count(Piece::new(color, PieceKind::King)) != 1 {
            return Err(invalid(format!("{color:?} must have exactly one king")));
        }
        check_promotion_surplus(game_state, color)?;
    }

    Ok(())
}

/// Extra officers must be paid for by missing pawns. This also keeps every
/// position reachable from the board under the piece-list capacity.
fn check_promotion_surplus(game_state: &GameState, color: Color) -> ChessResult<()> {
    let surplus: u8 = STARTING_OFFICERS
        .iter()
        .map(|&(kind, start)| {
            game_state
                .piece_count(Piece::new(color, kind))
                .saturating_sub(start)
        })
        .sum();
    let pawns = game_state.piece_count(Piece::new(color, PieceKind::Pawn));

    if surplus > MAX_PAWNS_PER_SIDE - pawns {
        return Err(invalid(format!(
            "{color:?} has {surplus} promoted pieces but only {} missing pawns",
            MAX_PAWNS_PER_SIDE - pawns
        )));
    }
    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str, game_state: &GameState) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        let (right, color, king_home, rook_home) = match ch {
            'K' => (CASTLE_WHITE_KINGSIDE, Color::White, E1, H1),
            'Q' => (CASTLE_WHITE_QUEENSIDE, Color::White, E1, A1),
            'k' => (CASTLE_BLACK_KINGSIDE, Color::Black, E8, H8),
            'q' => (CASTLE_BLACK_QUEENSIDE, Color::Black, E8, A8),
            _ => return Err(invalid(format!("invalid castling rights character: {ch}"))),
        };

        if rights & right != 0 {
            return Err(invalid(format!("duplicated castling rights character: {ch}")));
        }
        if game_state.piece_on(king_home) != Some(Piece::new(color, PieceKind::King))
            || game_state.piece_on(rook_home) != Some(Piece::new(color, PieceKind::Rook))
        {
            return Err(invalid(format!(
                "castling right '{ch}' without king and rook on their home squares"
            )));
        }
        rights |= right;
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str, side_to_move: Color) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| invalid(format!("invalid en-passant square: {en_passant_part}")))?;
    let expected_rank = match side_to_move {
        Color::White => 5,
        Color::Black => 2,
    };
    if rank_of(square) != expected_rank {
        return Err(invalid(format!(
            "en-passant square {en_passant_part} is not on the expected rank"
        )));
    }

    Ok(Some(square))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessError;
    use crate::move_generation::perft::perft;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn parse_starting_fen() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(game_state.side_to_move, Color::White);
        assert_eq!(game_state.fullmove_number, 1);
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.castling_rights, CASTLE_ALL);
        assert_eq!(game_state.all_piece_count(), 32);
        assert_eq!(game_state.material_score, [4000, 4000]);
        assert!(!game_state.in_check);
        assert_eq!(game_state.repetition_table.get(&game_state.zobrist_key), Some(&1));
    }

    #[test]
    fn short_fens_default_the_clocks() {
        let four = parse_fen("4k3/8/8/8/8/8/8/4K3 b -  -").expect("4-field FEN should parse");
        assert_eq!(four.halfmove_clock, 0);
        assert_eq!(four.fullmove_number, 1);

        let five = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 17").expect("5-field FEN should parse");
        assert_eq!(five.halfmove_clock, 17);
        assert_eq!(five.fullmove_number, 1);
    }

    #[test]
    fn rejects_malformed_positions() {
        let bad = [
            "4k3/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3x w - - 0 1",
            "4k3/8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
            "4k2P/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w KK - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w K - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - e3 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - x 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",
            "4k3/8/8/8/8/8/8/4R1K1 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w -",
        ];
        for fen in bad {
            assert!(
                matches!(parse_fen(fen), Err(ChessError::InvalidFen(_))),
                "{fen} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_too_many_pawns() {
        assert!(parse_fen("4k3/8/8/8/8/P7/PPPPPPPP/4K3 w - - 0 1").is_err());
    }

    #[test]
    fn rejects_impossible_promotion_surplus() {
        // Ten rooks plus a pawn that could still promote to an eleventh.
        assert!(matches!(
            parse_fen("7k/2P5/8/8/8/8/RRRRR3/RRRRR1K1 w - - 0 1"),
            Err(ChessError::InvalidFen(_))
        ));
        // Three queens need two missing pawns; seven are on the board.
        assert!(parse_fen("4k3/8/8/8/8/8/PPPPPPP1/QQQ1K3 w - - 0 1").is_err());
    }

    #[test]
    fn accepts_promotions_paid_for_by_missing_pawns() {
        let game_state = parse_fen("4k3/8/8/8/8/8/PPPPPPP1/QQ2K3 w - - 0 1")
            .expect("one extra queen for one missing pawn should parse");
        assert_eq!(game_state.piece_count(Piece::new(Color::White, PieceKind::Queen)), 2);

        let mut rooks = parse_fen("6k1/8/8/8/8/8/RRRRR3/RRRRR1K1 b - - 0 1")
            .expect("ten rooks and no pawns should parse");
        assert!(perft(&mut rooks, 2).expect("perft should run") > 0);
    }
}
