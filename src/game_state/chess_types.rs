//! Core value types shared by every engine subsystem.
//!
//! Squares index a padded 10x12 mailbox (see `board_geometry`), pieces are a
//! compact `color * 6 + kind` code, and board cells distinguish empty squares
//! from the off-board sentinel border.

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;
pub use crate::moves::move_descriptions::Move;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Padded-board offset of a single pawn push for this color.
    #[inline]
    pub const fn pawn_push(self) -> i8 {
        match self {
            Color::White => -10,
            Color::Black => 10,
        }
    }
}

/// Piece kind (color is carried separately by `Piece`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Material value in centipawns. The king carries no material value.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }
}

/// One of the 12 concrete piece kinds, encoded as `color * 6 + kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece(u8);

impl Piece {
    pub const COUNT: usize = 12;

    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self((color.index() * 6 + kind.index()) as u8)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn color(self) -> Color {
        if self.0 < 6 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        PieceKind::ALL[(self.0 % 6) as usize]
    }

    /// Every piece in index order (white pawn first, black king last).
    pub fn all() -> impl Iterator<Item = Piece> {
        (0..Self::COUNT as u8).map(Piece)
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match ch.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Self::new(color, kind))
    }

    pub fn to_fen_char(self) -> char {
        let ch = match self.kind() {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color() {
            Color::White => ch.to_ascii_uppercase(),
            Color::Black => ch,
        }
    }
}

/// Content of one padded-board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Occupied(Piece),
    Empty,
    OffBoard,
}

impl Cell {
    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Cell::Occupied(piece) => Some(piece),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub const fn is_off_board(self) -> bool {
        matches!(self, Cell::OffBoard)
    }

    /// True for an empty square or a square holding a piece of `enemy`.
    #[inline]
    pub fn is_empty_or_color(self, enemy: Color) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Occupied(piece) => piece.color() == enemy,
            Cell::OffBoard => false,
        }
    }
}

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights = 0x0F;
pub type CastlingRights = u8;

/// Padded mailbox square index (`0..120`).
pub type Square = u8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_code_splits_into_color_and_kind() {
        let black_rook = Piece::new(Color::Black, PieceKind::Rook);
        assert_eq!(black_rook.index(), 9);
        assert_eq!(black_rook.color(), Color::Black);
        assert_eq!(black_rook.kind(), PieceKind::Rook);
        assert_eq!(black_rook.to_fen_char(), 'r');
        assert_eq!(Piece::from_fen_char('N'), Some(Piece::new(Color::White, PieceKind::Knight)));
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn empty_and_off_board_are_not_pieces() {
        assert_eq!(Cell::Empty.piece(), None);
        assert_eq!(Cell::OffBoard.piece(), None);
        assert!(Cell::Empty.is_empty_or_color(Color::White));
        assert!(!Cell::OffBoard.is_empty_or_color(Color::White));
    }
}
