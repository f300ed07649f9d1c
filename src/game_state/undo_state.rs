use crate::game_state::chess_types::*;

/// Single undo record for `make_move` / `revert_move`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,

    pub prev_zobrist_key: u64,

    pub prev_moved_piece: Option<Piece>,
    pub prev_captured_piece: Option<Piece>,

    // Piece taken by this move and the piece-list slot it occupied.
    pub captured: Option<(Piece, u8)>,
    // Slot the promoting pawn vacated in its piece list.
    pub promoted_pawn_slot: Option<u8>,

    pub prev_in_check: bool,
    pub prev_in_double_check: bool,
    pub prev_checking_square: Option<Square>,
}
