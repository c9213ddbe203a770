//! Packed 16-bit move value.
//!
//! Layout: bits 0-5 source square, bits 6-11 destination square, bits 12-15
//! special-move flag. The value is built once and never mutated.

use crate::errors::{BoardError, BoardResult};
use crate::game_state::chess_types::{PieceKind, Square};

const FROM_SHIFT: u16 = 0;
const TO_SHIFT: u16 = 6;
const FLAG_SHIFT: u16 = 12;

pub const START_SQ_MASK: u16 = 0x003f;
pub const TARGET_SQ_MASK: u16 = 0x0fc0;
pub const FLAG_MASK: u16 = 0xf000;

/// Special-move flag stored in the top four bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    None = 0,
    EnPassant = 1,
    Castle = 2,
    DoublePawnPush = 3,
    PromoteToQueen = 4,
    PromoteToKnight = 5,
    PromoteToRook = 6,
    PromoteToBishop = 7,
}

impl MoveFlag {
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(MoveFlag::None),
            1 => Some(MoveFlag::EnPassant),
            2 => Some(MoveFlag::Castle),
            3 => Some(MoveFlag::DoublePawnPush),
            4 => Some(MoveFlag::PromoteToQueen),
            5 => Some(MoveFlag::PromoteToKnight),
            6 => Some(MoveFlag::PromoteToRook),
            7 => Some(MoveFlag::PromoteToBishop),
            _ => None,
        }
    }

    pub const fn promotion(kind: PieceKind) -> Option<Self> {
        match kind {
            PieceKind::Queen => Some(MoveFlag::PromoteToQueen),
            PieceKind::Knight => Some(MoveFlag::PromoteToKnight),
            PieceKind::Rook => Some(MoveFlag::PromoteToRook),
            PieceKind::Bishop => Some(MoveFlag::PromoteToBishop),
            PieceKind::King | PieceKind::Pawn => None,
        }
    }

    pub const fn promotion_kind(self) -> Option<PieceKind> {
        match self {
            MoveFlag::PromoteToQueen => Some(PieceKind::Queen),
            MoveFlag::PromoteToKnight => Some(PieceKind::Knight),
            MoveFlag::PromoteToRook => Some(PieceKind::Rook),
            MoveFlag::PromoteToBishop => Some(PieceKind::Bishop),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

impl Move {
    /// All-zero value (a1a1, no flag).
    pub const NULL: Move = Move(0);

    /// Squares are masked to six bits.
    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        Move(
            ((from as u16) << FROM_SHIFT) & START_SQ_MASK
                | ((to as u16) << TO_SHIFT) & TARGET_SQ_MASK
                | (flag as u16) << FLAG_SHIFT,
        )
    }

    /// Accepts any raw value whose flag nibble names a known flag.
    pub fn from_raw(raw: u16) -> BoardResult<Self> {
        let code = (raw >> FLAG_SHIFT) as u8;
        if MoveFlag::from_code(code).is_none() {
            return Err(BoardError::InvalidArgument(format!("unknown move flag {code} in {raw:#06x}")));
        }
        Ok(Move(raw))
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 & START_SQ_MASK) >> FROM_SHIFT) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 & TARGET_SQ_MASK) >> TO_SHIFT) as Square
    }

    #[inline]
    pub fn flag(self) -> MoveFlag {
        // Construction guarantees a known flag.
        MoveFlag::from_code((self.0 >> FLAG_SHIFT) as u8).unwrap_or(MoveFlag::None)
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.0 >> FLAG_SHIFT >= MoveFlag::PromoteToQueen as u16
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.0 >> FLAG_SHIFT == MoveFlag::EnPassant as u16
    }

    #[inline]
    pub fn promotion_kind(self) -> Option<PieceKind> {
        self.flag().promotion_kind()
    }

    /// Same squares, different flag.
    #[inline]
    pub const fn with_flag(self, flag: MoveFlag) -> Self {
        Move((self.0 & !FLAG_MASK) | (flag as u16) << FLAG_SHIFT)
    }
}
