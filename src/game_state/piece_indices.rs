//! Derived indices over the mailbox: per-(color, kind) piece lists, per-color
//! occupancy lists, and the matching bitboards.
//!
//! `GameState` owns one `PieceIndices` next to its mailbox. The indices are
//! either rebuilt from scratch in one 64-square scan, or patched square by
//! square by the move applier while they are known to be clean.

use tracing::trace;

use crate::game_state::chess_types::{Bitboard, Color, PieceCode, PieceKind, Square};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceIndices {
    // [color][kind]
    lists: [[Vec<Square>; 6]; 2],
    all: [Vec<Square>; 2],

    piece_bitboards: [[Bitboard; 6]; 2],
    color_bitboards: [Bitboard; 2],
    occupied: Bitboard,
}

impl PieceIndices {
    pub fn from_mailbox(squares: &[PieceCode; 64]) -> Self {
        let mut indices = Self::default();
        indices.rebuild(squares);
        indices
    }

    /// Clear everything and repopulate from the mailbox.
    pub fn rebuild(&mut self, squares: &[PieceCode; 64]) {
        for color in 0..2 {
            self.all[color].clear();
            for list in &mut self.lists[color] {
                list.clear();
            }
        }
        self.piece_bitboards = [[0; 6]; 2];
        self.color_bitboards = [0; 2];
        self.occupied = 0;

        for (sq, code) in squares.iter().enumerate() {
            if let Some((color, kind)) = code.piece() {
                self.add(color, kind, sq as Square);
            }
        }

        trace!(occupied = self.occupied.count_ones(), "rebuilt piece indices");
    }

    pub fn add(&mut self, color: Color, kind: PieceKind, square: Square) {
        let bit = 1u64 << square;
        self.lists[color.index()][kind.index()].push(square);
        self.all[color.index()].push(square);
        self.piece_bitboards[color.index()][kind.index()] |= bit;
        self.color_bitboards[color.index()] |= bit;
        self.occupied |= bit;
    }

    pub fn remove(&mut self, color: Color, kind: PieceKind, square: Square) {
        let bit = !(1u64 << square);
        drop_square(&mut self.lists[color.index()][kind.index()], square);
        drop_square(&mut self.all[color.index()], square);
        self.piece_bitboards[color.index()][kind.index()] &= bit;
        self.color_bitboards[color.index()] &= bit;
        self.occupied &= bit;
    }

    /// Move one piece from `from` to an empty `to`, keeping list order.
    pub fn relocate(&mut self, color: Color, kind: PieceKind, from: Square, to: Square) {
        let from_bit = 1u64 << from;
        let to_bit = 1u64 << to;
        replace_square(&mut self.lists[color.index()][kind.index()], from, to);
        replace_square(&mut self.all[color.index()], from, to);
        self.piece_bitboards[color.index()][kind.index()] =
            (self.piece_bitboards[color.index()][kind.index()] & !from_bit) | to_bit;
        self.color_bitboards[color.index()] = (self.color_bitboards[color.index()] & !from_bit) | to_bit;
        self.occupied = (self.occupied & !from_bit) | to_bit;
    }

    #[inline]
    pub fn piece_list(&self, color: Color, kind: PieceKind) -> &[Square] {
        &self.lists[color.index()][kind.index()]
    }

    #[inline]
    pub fn all_occupied(&self, color: Color) -> &[Square] {
        &self.all[color.index()]
    }

    #[inline]
    pub fn piece_bitboard(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.piece_bitboards[color.index()][kind.index()]
    }

    #[inline]
    pub fn color_bitboard(&self, color: Color) -> Bitboard {
        self.color_bitboards[color.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// True when every occupied square appears in exactly its own kind list,
    /// its color list and the matching bitboards, and nothing else does.
    pub fn matches_mailbox(&self, squares: &[PieceCode; 64]) -> bool {
        let mut expected = Self::default();
        for (sq, code) in squares.iter().enumerate() {
            if let Some((color, kind)) = code.piece() {
                expected.add(color, kind, sq as Square);
            }
        }

        if self.piece_bitboards != expected.piece_bitboards
            || self.color_bitboards != expected.color_bitboards
            || self.occupied != expected.occupied
        {
            return false;
        }

        // Lists are unordered; compare as sorted sets.
        let same_set = |a: &[Square], b: &[Square]| {
            let mut a = a.to_vec();
            let mut b = b.to_vec();
            a.sort_unstable();
            b.sort_unstable();
            a == b
        };

        (0..2).all(|color| {
            same_set(&self.all[color], &expected.all[color])
                && (0..6).all(|kind| same_set(&self.lists[color][kind], &expected.lists[color][kind]))
        })
    }
}

fn drop_square(list: &mut Vec<Square>, square: Square) {
    if let Some(pos) = list.iter().position(|s| *s == square) {
        list.swap_remove(pos);
    }
}

fn replace_square(list: &mut [Square], from: Square, to: Square) {
    if let Some(slot) = list.iter_mut().find(|s| **s == from) {
        *slot = to;
    }
}

#[cfg(test)]
mod tests {
    use super::PieceIndices;
    use crate::game_state::chess_types::{Color, PieceCode, PieceKind};

    fn sample_mailbox() -> [PieceCode; 64] {
        let mut squares = [PieceCode::NONE; 64];
        squares[4] = PieceCode::new(Color::Light, PieceKind::King);
        squares[12] = PieceCode::new(Color::Light, PieceKind::Pawn);
        squares[60] = PieceCode::new(Color::Dark, PieceKind::King);
        squares[63] = PieceCode::new(Color::Dark, PieceKind::Rook);
        squares
    }

    #[test]
    fn rebuild_indexes_every_occupied_square() {
        let squares = sample_mailbox();
        let indices = PieceIndices::from_mailbox(&squares);

        assert_eq!(indices.piece_list(Color::Light, PieceKind::Pawn), &[12]);
        assert_eq!(indices.piece_list(Color::Dark, PieceKind::Rook), &[63]);
        assert_eq!(indices.all_occupied(Color::Dark), &[60, 63]);
        assert_eq!(indices.color_bitboard(Color::Light), (1 << 4) | (1 << 12));
        assert_eq!(indices.occupied().count_ones(), 4);
        assert!(indices.matches_mailbox(&squares));
    }

    #[test]
    fn incremental_updates_track_the_mailbox() {
        let mut squares = sample_mailbox();
        let mut indices = PieceIndices::from_mailbox(&squares);

        squares[28] = squares[12];
        squares[12] = PieceCode::NONE;
        indices.relocate(Color::Light, PieceKind::Pawn, 12, 28);
        assert!(indices.matches_mailbox(&squares));

        squares[63] = PieceCode::NONE;
        indices.remove(Color::Dark, PieceKind::Rook, 63);
        assert!(indices.matches_mailbox(&squares));
        assert_eq!(indices.piece_bitboard(Color::Dark, PieceKind::Rook), 0);
    }

    #[test]
    fn stale_indices_do_not_match() {
        let mut squares = sample_mailbox();
        let indices = PieceIndices::from_mailbox(&squares);
        squares[0] = PieceCode::new(Color::Light, PieceKind::Rook);
        assert!(!indices.matches_mailbox(&squares));
    }
}
