//! Bit-packed `u16` move representation.
//!
//! Layout: `kind << 14 | promotion << 12 | from << 6 | to`, where both
//! squares are dense `0..64` indexes. The encoding carries no board state, so
//! a move only becomes meaningful next to the position it was generated for.

use crate::game_state::board_geometry::{dense_index, square_from_dense};
use crate::game_state::chess_types::{PieceKind, Square};

pub type Move = u16;

const TO_SHIFT: u16 = 0;
const FROM_SHIFT: u16 = 6;
const PROMOTION_SHIFT: u16 = 12;
const KIND_SHIFT: u16 = 14;

const SQUARE_MASK: u16 = 0x3F;
const TWO_BIT_MASK: u16 = 0x3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    Promotion,
    EnPassant,
    Castle,
}

impl MoveKind {
    #[inline]
    const fn code(self) -> u16 {
        match self {
            MoveKind::Normal => 0,
            MoveKind::Promotion => 1,
            MoveKind::EnPassant => 2,
            MoveKind::Castle => 3,
        }
    }

    #[inline]
    const fn from_code(code: u16) -> Self {
        match code & TWO_BIT_MASK {
            0 => MoveKind::Normal,
            1 => MoveKind::Promotion,
            2 => MoveKind::EnPassant,
            _ => MoveKind::Castle,
        }
    }
}

/// Unpacked view of a `Move`, with padded squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedMove {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
    pub promotion: Option<PieceKind>,
}

/// Promotion targets in encoding order.
pub const PROMOTION_PIECES: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

#[inline]
fn promotion_code(piece_kind: PieceKind) -> u16 {
    match piece_kind {
        PieceKind::Knight => 0,
        PieceKind::Bishop => 1,
        PieceKind::Rook => 2,
        PieceKind::Queen => 3,
        other => panic!("{other:?} is not a promotion piece"),
    }
}

/// Pack a move. `promotion` is only stored for `MoveKind::Promotion`.
#[inline]
pub fn encode_move(
    from: Square,
    to: Square,
    kind: MoveKind,
    promotion: Option<PieceKind>,
) -> Move {
    let promotion_bits = match (kind, promotion) {
        (MoveKind::Promotion, Some(piece_kind)) => promotion_code(piece_kind),
        _ => 0,
    };

    (kind.code() << KIND_SHIFT)
        | (promotion_bits << PROMOTION_SHIFT)
        | ((dense_index(from) as u16) << FROM_SHIFT)
        | ((dense_index(to) as u16) << TO_SHIFT)
}

#[inline]
pub fn decode_move(mv: Move) -> DecodedMove {
    DecodedMove {
        from: move_from(mv),
        to: move_to(mv),
        kind: move_kind(mv),
        promotion: move_promotion(mv),
    }
}

#[inline]
pub fn move_from(mv: Move) -> Square {
    square_from_dense(((mv >> FROM_SHIFT) & SQUARE_MASK) as u8)
}

#[inline]
pub fn move_to(mv: Move) -> Square {
    square_from_dense(((mv >> TO_SHIFT) & SQUARE_MASK) as u8)
}

#[inline]
pub fn move_kind(mv: Move) -> MoveKind {
    MoveKind::from_code(mv >> KIND_SHIFT)
}

#[inline]
pub fn move_promotion(mv: Move) -> Option<PieceKind> {
    match move_kind(mv) {
        MoveKind::Promotion => {
            Some(PROMOTION_PIECES[((mv >> PROMOTION_SHIFT) & TWO_BIT_MASK) as usize])
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board_geometry::{A1, A8, E1, G1, H8};

    #[test]
    fn packs_fields_at_documented_offsets() {
        let mv = encode_move(A8, A1, MoveKind::Normal, None);
        assert_eq!(mv, 56);

        let castle = encode_move(E1, G1, MoveKind::Castle, None);
        assert_eq!(castle >> 14, 3);
        assert_eq!((castle >> 6) & 0x3F, 60);
        assert_eq!(castle & 0x3F, 62);
    }

    #[test]
    fn decodes_promotion_choice() {
        let mv = encode_move(
            crate::utils::algebraic::algebraic_to_square("g7").expect("g7 should parse"),
            H8,
            MoveKind::Promotion,
            Some(PieceKind::Rook),
        );
        let decoded = decode_move(mv);
        assert_eq!(decoded.to, H8);
        assert_eq!(decoded.kind, MoveKind::Promotion);
        assert_eq!(decoded.promotion, Some(PieceKind::Rook));
    }

    #[test]
    fn non_promotions_carry_no_piece() {
        let mv = encode_move(E1, G1, MoveKind::Castle, Some(PieceKind::Queen));
        assert_eq!(move_promotion(mv), None);
        assert_eq!(move_from(mv), E1);
        assert_eq!(move_to(mv), G1);
    }
}
