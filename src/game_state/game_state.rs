//! Core incremental board state representation.
//!
//! `GameState` is the central model for the engine. It stores the padded
//! mailbox board, per-piece square lists, turn/state flags, clocks, cached
//! check information and the history stacks used by make/revert workflows.

use std::collections::HashMap;

use crate::chess_errors::ChessResult;
use crate::game_state::board_geometry::{is_playing_square, BOARD_SIZE};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Capacity of one piece list (eight promoted pawns plus two originals).
pub const PIECE_LIST_CAPACITY: usize = 10;

/// Incremental game state optimized for fast move making/reverting.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    // --- Mailbox representation ---
    pub(crate) board: [Cell; BOARD_SIZE],

    // Piece lists, indexed by `Piece::index()`. Entries at or above the count
    // and the slot index of empty squares are kept at zero.
    pub(crate) piece_list: [[Square; PIECE_LIST_CAPACITY]; Piece::COUNT],
    pub(crate) piece_counts: [u8; Piece::COUNT],
    pub(crate) piece_index: [u8; BOARD_SIZE],
    pub(crate) all_piece_count: u8,

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Incremental aggregates ---
    pub zobrist_key: u64,
    pub material_score: [i32; 2],

    // --- Check cache for the side to move ---
    pub in_check: bool,
    pub in_double_check: bool,
    pub checking_square: Option<Square>,

    // --- Last move bookkeeping ---
    pub moved_piece: Option<Piece>,
    pub captured_piece: Option<Piece>,

    // --- Repetition support ---
    pub repetition_table: HashMap<u64, u32>,

    // --- Make/revert stack ---
    pub undo_stack: Vec<UndoState>,
}

impl Default for GameState {
    fn default() -> Self {
        let mut board = [Cell::OffBoard; BOARD_SIZE];
        for (square, cell) in board.iter_mut().enumerate() {
            if is_playing_square(square as Square) {
                *cell = Cell::Empty;
            }
        }

        Self {
            board,
            piece_list: [[0; PIECE_LIST_CAPACITY]; Piece::COUNT],
            piece_counts: [0; Piece::COUNT],
            piece_index: [0; BOARD_SIZE],
            all_piece_count: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            zobrist_key: 0,
            material_score: [0; 2],

            in_check: false,
            in_double_check: false,
            checking_square: None,

            moved_piece: None,
            captured_piece: None,

            repetition_table: HashMap::new(),
            undo_stack: Vec::new(),
        }
    }
}

impl GameState {
    /// Empty board, White to move, no rights.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    /// Replace this position with the one described by `fen`.
    ///
    /// On error `self` is left untouched.
    pub fn load_fen(&mut self, fen: &str) -> ChessResult<()> {
        *self = parse_fen(fen)?;
        Ok(())
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn cell(&self, square: Square) -> Cell {
        self.board[square as usize]
    }

    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.board[square as usize].piece()
    }

    /// Squares currently holding `piece`, in piece-list order.
    #[inline]
    pub fn squares_of(&self, piece: Piece) -> &[Square] {
        &self.piece_list[piece.index()][..self.piece_counts[piece.index()] as usize]
    }

    #[inline]
    pub fn piece_count(&self, piece: Piece) -> u8 {
        self.piece_counts[piece.index()]
    }

    /// Number of pieces of `color` whose kind is one of `kinds`.
    pub fn count_of_kinds(&self, color: Color, kinds: &[PieceKind]) -> u8 {
        kinds
            .iter()
            .map(|&kind| self.piece_count(Piece::new(color, kind)))
            .sum()
    }

    #[inline]
    pub fn all_piece_count(&self) -> u8 {
        self.all_piece_count
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.piece_list[Piece::new(color, PieceKind::King).index()][0]
    }

    /// Number of moves applied since the position was loaded.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Place `piece` on an empty square, appending it to its piece list.
    pub(crate) fn put_piece(&mut self, piece: Piece, square: Square) {
        debug_assert!(self.board[square as usize].is_empty());
        let count = self.piece_counts[piece.index()] as usize;
        assert!(
            count < PIECE_LIST_CAPACITY,
            "piece list for {piece:?} is full"
        );

        self.piece_list[piece.index()][count] = square;
        self.piece_index[square as usize] = count as u8;
        self.piece_counts[piece.index()] += 1;
        self.board[square as usize] = Cell::Occupied(piece);
        self.all_piece_count += 1;
        self.material_score[piece.color().index()] += piece.kind().value();
    }

    /// Move whatever stands on `from` to the empty square `to`.
    pub(crate) fn move_piece(&mut self, from: Square, to: Square) {
        let Some(piece) = self.board[from as usize].piece() else {
            panic!("no piece to move on square {from}");
        };
        debug_assert!(self.board[to as usize].is_empty());

        let slot = self.piece_index[from as usize];
        self.piece_list[piece.index()][slot as usize] = to;
        self.piece_index[to as usize] = slot;
        self.piece_index[from as usize] = 0;
        self.board[to as usize] = Cell::Occupied(piece);
        self.board[from as usize] = Cell::Empty;
    }

    /// Remove the piece on `square` and return it with the list slot it held.
    ///
    /// The last entry of the list is swapped into the vacated slot.
    pub(crate) fn remove_piece(&mut self, square: Square) -> (Piece, u8) {
        let Some(piece) = self.board[square as usize].piece() else {
            panic!("no piece to remove on square {square}");
        };

        let list = &mut self.piece_list[piece.index()];
        let slot = self.piece_index[square as usize];
        let last = self.piece_counts[piece.index()] - 1;
        let last_square = list[last as usize];

        list[slot as usize] = last_square;
        list[last as usize] = 0;
        self.piece_index[last_square as usize] = slot;
        self.piece_index[square as usize] = 0;
        self.piece_counts[piece.index()] = last;

        self.board[square as usize] = Cell::Empty;
        self.all_piece_count -= 1;
        self.material_score[piece.color().index()] -= piece.kind().value();

        (piece, slot)
    }

    /// Exact inverse of `remove_piece`: put `piece` back into `slot`.
    pub(crate) fn reinsert_piece(&mut self, piece: Piece, square: Square, slot: u8) {
        debug_assert!(self.board[square as usize].is_empty());
        let list = &mut self.piece_list[piece.index()];
        let last = self.piece_counts[piece.index()];

        if slot != last {
            let displaced = list[slot as usize];
            list[last as usize] = displaced;
            self.piece_index[displaced as usize] = last;
        }
        list[slot as usize] = square;
        self.piece_index[square as usize] = slot;
        self.piece_counts[piece.index()] = last + 1;

        self.board[square as usize] = Cell::Occupied(piece);
        self.all_piece_count += 1;
        self.material_score[piece.color().index()] += piece.kind().value();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board_geometry::{A1, E1, H8};
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(text: &str) -> Square {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn empty_board_has_sentinel_border() {
        let game_state = GameState::new_empty();
        assert_eq!(game_state.cell(0), Cell::OffBoard);
        assert_eq!(game_state.cell(A1), Cell::Empty);
        assert_eq!(game_state.cell(H8), Cell::Empty);
        assert_eq!(game_state.all_piece_count(), 0);
    }

    #[test]
    fn remove_and_reinsert_restore_piece_lists_exactly() {
        let mut game_state = GameState::new_empty();
        let rook = Piece::new(Color::White, PieceKind::Rook);
        let e4 = sq("e4");
        game_state.put_piece(rook, A1);
        game_state.put_piece(rook, E1);
        game_state.put_piece(rook, e4);
        let before = game_state.clone();

        let (removed, slot) = game_state.remove_piece(A1);
        assert_eq!(removed, rook);
        assert_eq!(slot, 0);
        assert_eq!(game_state.squares_of(rook), &[e4, E1]);
        assert_eq!(game_state.material_score[0], 1000);

        game_state.reinsert_piece(removed, A1, slot);
        assert_eq!(game_state, before);
    }

    #[test]
    fn move_piece_keeps_slot() {
        let mut game_state = GameState::new_empty();
        let knight = Piece::new(Color::Black, PieceKind::Knight);
        let (d4, e4) = (sq("d4"), sq("e4"));
        game_state.put_piece(knight, e4);
        let before = game_state.clone();

        game_state.move_piece(e4, d4);
        assert_eq!(game_state.squares_of(knight), &[d4]);
        assert_eq!(game_state.piece_on(e4), None);

        game_state.move_piece(d4, e4);
        assert_eq!(game_state, before);
    }
}
