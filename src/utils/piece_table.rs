//! Piece-letter table used by the text codecs.
//!
//! The table is passed explicitly into the FEN parser/generator and the
//! ASCII renderer instead of living in a global, so alternative letter sets
//! (localized notation, figurine-free variants) can reuse the same codecs.

use crate::errors::{BoardError, BoardResult};
use crate::game_state::chess_types::{Color, PieceKind};

/// Lowercase letters per kind plus the two side-to-move letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceTable {
    /// Indexed by `PieceKind::index()`: King, Queen, Rook, Knight, Bishop, Pawn.
    letters: [char; 6],
    /// Indexed by `Color::index()`.
    side_letters: [char; 2],
}

impl Default for PieceTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl PieceTable {
    /// English FEN letters with `w`/`b` sides.
    pub const fn standard() -> Self {
        Self {
            letters: ['k', 'q', 'r', 'n', 'b', 'p'],
            side_letters: ['w', 'b'],
        }
    }

    /// Build a table from six kind letters (King, Queen, Rook, Knight,
    /// Bishop, Pawn order) and two side letters (light, dark).
    pub fn new(kind_letters: &str, light_side: char, dark_side: char) -> BoardResult<Self> {
        let letters: Vec<char> = kind_letters.chars().map(|c| c.to_ascii_lowercase()).collect();
        let letters: [char; 6] = letters.try_into().map_err(|_| {
            BoardError::InvalidArgument(format!("piece table needs six letters, got {kind_letters:?}"))
        })?;

        if letters.iter().any(|c| !c.is_ascii_alphabetic()) {
            return Err(BoardError::InvalidArgument(format!(
                "piece letters must be ASCII alphabetic: {kind_letters:?}"
            )));
        }
        for (i, c) in letters.iter().enumerate() {
            if letters[i + 1..].contains(c) {
                return Err(BoardError::InvalidArgument(format!("duplicate piece letter '{c}'")));
            }
        }
        if light_side == dark_side {
            return Err(BoardError::InvalidArgument(format!(
                "side letters must differ, got '{light_side}' twice"
            )));
        }

        Ok(Self {
            letters,
            side_letters: [light_side, dark_side],
        })
    }

    /// Uppercase for light pieces, lowercase for dark.
    pub fn letter_for(&self, color: Color, kind: PieceKind) -> char {
        let base = self.letters[kind.index()];
        match color {
            Color::Light => base.to_ascii_uppercase(),
            Color::Dark => base,
        }
    }

    pub fn piece_for_letter(&self, letter: char) -> Option<(Color, PieceKind)> {
        let color = if letter.is_ascii_uppercase() {
            Color::Light
        } else if letter.is_ascii_lowercase() {
            Color::Dark
        } else {
            return None;
        };

        let lower = letter.to_ascii_lowercase();
        let index = self.letters.iter().position(|c| *c == lower)?;
        Some((color, PieceKind::ALL[index]))
    }

    pub fn side_letter(&self, color: Color) -> char {
        self.side_letters[color.index()]
    }

    pub fn side_for_letter(&self, field: &str) -> Option<Color> {
        let mut chars = field.chars();
        let letter = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Color::ALL
            .into_iter()
            .find(|color| self.side_letters[color.index()] == letter)
    }
}

#[cfg(test)]
mod tests {
    use super::PieceTable;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn standard_table_maps_fen_letters() {
        let table = PieceTable::standard();
        assert_eq!(table.piece_for_letter('N'), Some((Color::Light, PieceKind::Knight)));
        assert_eq!(table.piece_for_letter('q'), Some((Color::Dark, PieceKind::Queen)));
        assert_eq!(table.piece_for_letter('x'), None);
        assert_eq!(table.piece_for_letter('3'), None);
        assert_eq!(table.letter_for(Color::Light, PieceKind::Bishop), 'B');
        assert_eq!(table.side_for_letter("b"), Some(Color::Dark));
        assert_eq!(table.side_for_letter("x"), None);
        assert_eq!(table.side_for_letter("wb"), None);
    }

    #[test]
    fn custom_table_uses_its_own_letters() {
        // German letters: Koenig, Dame, Turm, Springer, Laeufer, Bauer.
        let table = PieceTable::new("kdtslb", 'w', 's').expect("table should build");
        assert_eq!(table.piece_for_letter('S'), Some((Color::Light, PieceKind::Knight)));
        assert_eq!(table.letter_for(Color::Dark, PieceKind::Queen), 'd');
        assert_eq!(table.side_for_letter("s"), Some(Color::Dark));
    }

    #[test]
    fn rejects_bad_tables() {
        assert!(PieceTable::new("kqrnb", 'w', 'b').is_err());
        assert!(PieceTable::new("kqrnbk", 'w', 'b').is_err());
        assert!(PieceTable::new("kqrnb1", 'w', 'b').is_err());
        assert!(PieceTable::new("kqrnbp", 'w', 'w').is_err());
    }
}
