//! Core value types shared by the position store, the codecs and the move
//! applier: colors, piece kinds, packed piece codes, squares and rights.

use crate::errors::{BoardError, BoardResult};

pub use crate::game_state::game_state::GameState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Light, Color::Dark];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Color bit as stored in a piece code (`8` or `16`).
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Color::Light => PieceCode::LIGHT,
            Color::Dark => PieceCode::DARK,
        }
    }

    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            PieceCode::LIGHT => Some(Color::Light),
            PieceCode::DARK => Some(Color::Dark),
            _ => None,
        }
    }
}

/// Piece kind. The discriminants are the type codes stored in the low three
/// bits of a `PieceCode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    King = 1,
    Queen = 2,
    Rook = 3,
    Knight = 4,
    Bishop = 5,
    Pawn = 6,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Pawn,
    ];

    /// Dense `0..6` index for per-kind tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::King),
            2 => Some(PieceKind::Queen),
            3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Knight),
            5 => Some(PieceKind::Bishop),
            6 => Some(PieceKind::Pawn),
            _ => None,
        }
    }
}

/// Absence-or-(kind, color) packed into one byte: kind in the low three bits,
/// color as `8` (light) or `16` (dark), `0` for an empty square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PieceCode(u8);

impl PieceCode {
    pub const NONE: PieceCode = PieceCode(0);
    pub const TYPE_MASK: u8 = 7;
    pub const COLOR_MASK: u8 = 24;
    pub const LIGHT: u8 = 8;
    pub const DARK: u8 = 16;

    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        PieceCode(color.code() | kind.code())
    }

    /// Validate a raw byte: either `0`, or exactly one color bit plus a
    /// valid kind.
    pub fn from_raw(raw: u8) -> BoardResult<Self> {
        if raw == 0 {
            return Ok(PieceCode::NONE);
        }

        let valid = raw & !(Self::TYPE_MASK | Self::COLOR_MASK) == 0
            && PieceKind::from_code(raw & Self::TYPE_MASK).is_some()
            && Color::from_code(raw & Self::COLOR_MASK).is_some();

        if valid {
            Ok(PieceCode(raw))
        } else {
            Err(BoardError::InvalidArgument(format!("invalid piece code {raw}")))
        }
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn kind(self) -> Option<PieceKind> {
        PieceKind::from_code(self.0 & Self::TYPE_MASK)
    }

    #[inline]
    pub const fn color(self) -> Option<Color> {
        Color::from_code(self.0 & Self::COLOR_MASK)
    }

    /// Both halves at once; `None` for an empty square.
    #[inline]
    pub fn piece(self) -> Option<(Color, PieceKind)> {
        Some((self.color()?, self.kind()?))
    }

    #[inline]
    pub fn is(self, color: Color, kind: PieceKind) -> bool {
        self == PieceCode::new(color, kind)
    }

    /// Four-bit form used by the compact codec: kind in the low three bits,
    /// bit 3 set for dark.
    #[inline]
    pub const fn to_nibble(self) -> u8 {
        if self.0 == 0 {
            0
        } else {
            self.0 - Self::LIGHT
        }
    }

    pub fn from_nibble(nibble: u8) -> BoardResult<Self> {
        if nibble > 0x0f {
            return Err(BoardError::DecodeError(format!("nibble out of range: {nibble}")));
        }
        if nibble == 0 {
            return Ok(PieceCode::NONE);
        }
        PieceCode::from_raw(nibble + Self::LIGHT)
            .map_err(|_| BoardError::DecodeError(format!("invalid piece nibble {nibble:#x}")))
    }
}

impl From<(Color, PieceKind)> for PieceCode {
    fn from((color, kind): (Color, PieceKind)) -> Self {
        PieceCode::new(color, kind)
    }
}

/// Board square index (`0..=63`, `a1 == 0`, `h8 == 63`).
pub type Square = u8;

/// One bit per square, bit `n` for square `n`.
pub type Bitboard = u64;

/// Castling rights bitmask.
pub type CastlingRights = u8;
pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights = 0x0f;

#[inline]
pub const fn kingside_right(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_KINGSIDE,
        Color::Dark => CASTLE_DARK_KINGSIDE,
    }
}

#[inline]
pub const fn queenside_right(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_QUEENSIDE,
        Color::Dark => CASTLE_DARK_QUEENSIDE,
    }
}
