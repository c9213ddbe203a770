//! Core board state representation.
//!
//! `GameState` is the central model of the crate. The mailbox is the single
//! source of truth; piece lists and bitboards are derived caches guarded by a
//! dirty flag. Single-square writes are O(1) and only mark the caches dirty,
//! the first index read afterwards pays one 64-square rebuild.
//!
//! Index readers take `&mut self` because they may rebuild the cache. Wrap the
//! state in a `Mutex` to share it across threads; `piece_at` alone never
//! touches the cache.

use std::fmt;

use crate::errors::{BoardError, BoardResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::piece_indices::PieceIndices;
use crate::utils::algebraic::{checked_square, square_from_file_rank};
use crate::utils::compact_codec::{generate_compact, parse_compact_into};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::piece_table::PieceTable;

#[derive(Debug, Clone)]
pub struct GameState {
    // --- Mailbox, indexed by square ---
    squares: [PieceCode; 64],

    // --- Derived indices ---
    indices: PieceIndices,
    indices_dirty: bool,

    // --- Side and state flags ---
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_file: Option<u8>,
    pub(crate) double_push_file: Option<u8>,

    // --- Clocks / move counters ---
    pub(crate) halfmove_clock: u16,
    pub(crate) ply: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            squares: [PieceCode::NONE; 64],
            indices: PieceIndices::default(),
            indices_dirty: true,

            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_file: None,
            double_push_file: None,

            halfmove_clock: 0,
            ply: 0,
        }
    }
}

impl PartialEq for GameState {
    /// Positions compare by mailbox and game state; cache freshness is not
    /// part of the position.
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant_file == other.en_passant_file
            && self.double_push_file == other.double_push_file
            && self.halfmove_clock == other.halfmove_clock
            && self.ply == other.ply
    }
}

impl Eq for GameState {}

impl GameState {
    /// Empty board, light to move, no rights.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        let mut state = Self::new_empty();
        state.place_starting_pieces();
        state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> BoardResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Replace this position with the one described by `fen`. On error the
    /// current position is left untouched.
    pub fn import_fen(&mut self, fen: &str) -> BoardResult<()> {
        *self = parse_fen(fen)?;
        Ok(())
    }

    pub fn from_compact(text: &str) -> BoardResult<Self> {
        let mut state = Self::new_empty();
        state.import_compact(text)?;
        Ok(state)
    }

    /// Replace the board (and, when present, the game-state block) from the
    /// compact transport form. On error the current position is untouched.
    pub fn import_compact(&mut self, text: &str) -> BoardResult<()> {
        let mut scratch = self.clone();
        parse_compact_into(text, &mut scratch)?;
        *self = scratch;
        Ok(())
    }

    pub fn get_compact(&self) -> BoardResult<String> {
        generate_compact(self)
    }

    // --- Mailbox access ---

    /// Direct mailbox read, valid regardless of the dirty flag.
    #[inline]
    pub fn piece_at(&self, square: Square) -> PieceCode {
        self.squares
            .get(square as usize)
            .copied()
            .unwrap_or(PieceCode::NONE)
    }

    #[inline]
    pub fn squares(&self) -> &[PieceCode; 64] {
        &self.squares
    }

    /// Direct mailbox write. Marks the derived indices dirty and leaves game
    /// state (rights, clocks) alone; use the move applier for that.
    pub fn set_piece(&mut self, square: usize, piece: PieceCode) -> BoardResult<()> {
        let square = checked_square(square)?;
        self.squares[square as usize] = piece;
        self.indices_dirty = true;
        Ok(())
    }

    /// Empty every square. Game state is kept.
    pub fn clear_board(&mut self) {
        self.squares = [PieceCode::NONE; 64];
        self.indices_dirty = true;
    }

    // --- Derived indices ---

    #[inline]
    pub fn indices_dirty(&self) -> bool {
        self.indices_dirty
    }

    fn ensure_indices(&mut self) -> &PieceIndices {
        if self.indices_dirty {
            self.indices.rebuild(&self.squares);
            self.indices_dirty = false;
        }
        &self.indices
    }

    pub fn piece_list(&mut self, kind: PieceKind, color: Color) -> &[Square] {
        self.ensure_indices().piece_list(color, kind)
    }

    /// Raw-code variant of [`GameState::piece_list`]: `type_code` in `1..=6`,
    /// `color_code` `8` or `16`.
    pub fn piece_list_by_code(&mut self, type_code: u8, color_code: u8) -> BoardResult<&[Square]> {
        let (kind, color) = match (PieceKind::from_code(type_code), Color::from_code(color_code)) {
            (Some(kind), Some(color)) => (kind, color),
            _ => {
                return Err(BoardError::InvalidArgument(format!(
                    "invalid piece type or color: ({type_code}, {color_code})"
                )))
            }
        };
        Ok(self.piece_list(kind, color))
    }

    /// All occupied squares, light first.
    pub fn all_occupied(&mut self) -> [&[Square]; 2] {
        let indices = self.ensure_indices();
        [indices.all_occupied(Color::Light), indices.all_occupied(Color::Dark)]
    }

    pub fn all_piece_lists(&mut self) -> AllPieceLists {
        let indices = self.ensure_indices();
        let per_kind = |kind| {
            [
                indices.piece_list(Color::Light, kind).to_vec(),
                indices.piece_list(Color::Dark, kind).to_vec(),
            ]
        };
        AllPieceLists {
            king: per_kind(PieceKind::King),
            queen: per_kind(PieceKind::Queen),
            rook: per_kind(PieceKind::Rook),
            knight: per_kind(PieceKind::Knight),
            bishop: per_kind(PieceKind::Bishop),
            pawn: per_kind(PieceKind::Pawn),
            all_pieces: [
                indices.all_occupied(Color::Light).to_vec(),
                indices.all_occupied(Color::Dark).to_vec(),
            ],
        }
    }

    pub fn piece_bitboard(&mut self, kind: PieceKind, color: Color) -> Bitboard {
        self.ensure_indices().piece_bitboard(color, kind)
    }

    pub fn color_bitboard(&mut self, color: Color) -> Bitboard {
        self.ensure_indices().color_bitboard(color)
    }

    pub fn occupied_bitboard(&mut self) -> Bitboard {
        self.ensure_indices().occupied()
    }

    pub fn empty_bitboard(&mut self) -> Bitboard {
        !self.occupied_bitboard()
    }

    /// Raw-code bitboard lookup: type `0` selects empty squares (color is
    /// ignored), `1..=6` one kind, `7` every piece of the color.
    pub fn bitboard_by_code(&mut self, type_code: u8, color_code: u8) -> BoardResult<Bitboard> {
        if type_code == 0 {
            return Ok(self.empty_bitboard());
        }

        let color = Color::from_code(color_code)
            .ok_or_else(|| BoardError::InvalidArgument(format!("invalid color code {color_code}")))?;

        match type_code {
            7 => Ok(self.color_bitboard(color)),
            _ => {
                let kind = PieceKind::from_code(type_code).ok_or_else(|| {
                    BoardError::InvalidArgument(format!("invalid piece type {type_code}"))
                })?;
                Ok(self.piece_bitboard(kind, color))
            }
        }
    }

    // --- Game state ---

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn has_kingside_castle_right(&self, color: Color) -> bool {
        self.castling_rights & kingside_right(color) != 0
    }

    #[inline]
    pub fn has_queenside_castle_right(&self, color: Color) -> bool {
        self.castling_rights & queenside_right(color) != 0
    }

    #[inline]
    pub fn en_passant_file(&self) -> Option<u8> {
        self.en_passant_file
    }

    /// Square a pawn may capture onto en passant: rank 6 when light is to
    /// move, rank 3 when dark is. Only set when an enemy pawn stood next to
    /// the pawn that just advanced two squares.
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_file.map(|file| self.target_on_file(file))
    }

    /// Square behind a pawn that just advanced two squares, whether or not
    /// anything can capture it. This is what FEN records.
    pub fn double_push_target(&self) -> Option<Square> {
        self.double_push_file.map(|file| self.target_on_file(file))
    }

    fn target_on_file(&self, file: u8) -> Square {
        let rank = match self.side_to_move {
            Color::Light => 5,
            Color::Dark => 2,
        };
        square_from_file_rank(file, rank)
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn ply(&self) -> u16 {
        self.ply
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.ply / 2 + 1
    }

    // --- Crate-internal incremental edits used by the move applier ---
    //
    // These keep clean indices clean; dirty indices are left for the next
    // rebuild.

    pub(crate) fn take_piece(&mut self, square: Square) -> PieceCode {
        let code = self.squares[square as usize];
        if let Some((color, kind)) = code.piece() {
            self.squares[square as usize] = PieceCode::NONE;
            if !self.indices_dirty {
                self.indices.remove(color, kind, square);
            }
        }
        code
    }

    pub(crate) fn put_piece(&mut self, square: Square, code: PieceCode) {
        debug_assert!(self.squares[square as usize].is_empty());
        if let Some((color, kind)) = code.piece() {
            self.squares[square as usize] = code;
            if !self.indices_dirty {
                self.indices.add(color, kind, square);
            }
        }
    }

    /// Move the piece on `from` to an already-emptied `to`.
    pub(crate) fn relocate_piece(&mut self, from: Square, to: Square) {
        let code = self.squares[from as usize];
        debug_assert!(self.squares[to as usize].is_empty());
        if let Some((color, kind)) = code.piece() {
            self.squares[to as usize] = code;
            self.squares[from as usize] = PieceCode::NONE;
            if !self.indices_dirty {
                self.indices.relocate(color, kind, from, to);
            }
        }
    }

    pub(crate) fn indices_consistent(&self) -> bool {
        self.indices_dirty || self.indices.matches_mailbox(&self.squares)
    }

    fn place_starting_pieces(&mut self) {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            self.squares[square_from_file_rank(file, 0) as usize] = PieceCode::new(Color::Light, *kind);
            self.squares[square_from_file_rank(file, 1) as usize] =
                PieceCode::new(Color::Light, PieceKind::Pawn);
            self.squares[square_from_file_rank(file, 6) as usize] =
                PieceCode::new(Color::Dark, PieceKind::Pawn);
            self.squares[square_from_file_rank(file, 7) as usize] = PieceCode::new(Color::Dark, *kind);
        }

        self.side_to_move = Color::Light;
        self.castling_rights = CASTLE_ALL;
        self.en_passant_file = None;
        self.double_push_file = None;
        self.halfmove_clock = 0;
        self.ply = 0;
        self.indices_dirty = true;

        debug_assert_eq!(generate_fen(self), STARTING_POSITION_FEN);
    }
}

/// Snapshot of every piece list, `[light, dark]` per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllPieceLists {
    pub king: [Vec<Square>; 2],
    pub queen: [Vec<Square>; 2],
    pub rook: [Vec<Square>; 2],
    pub knight: [Vec<Square>; 2],
    pub bishop: [Vec<Square>; 2],
    pub pawn: [Vec<Square>; 2],
    pub all_pieces: [Vec<Square>; 2],
}

impl fmt::Display for GameState {
    /// ASCII grid with FEN letters, rank 8 at the top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = PieceTable::standard();
        let row_margin = "+---+---+---+---+---+---+---+---+";

        writeln!(f, "{row_margin}")?;
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let letter = match self.piece_at(square_from_file_rank(file, rank)).piece() {
                    Some((color, kind)) => table.letter_for(color, kind),
                    None => ' ',
                };
                write!(f, "| {letter} ")?;
            }
            writeln!(f, "| {}", rank + 1)?;
            writeln!(f, "{row_margin}")?;
        }
        write!(f, "  a   b   c   d   e   f   g   h  ")
    }
}
