//! Terminal-oriented Unicode board renderer.
//!
//! Reads only the mailbox, so it works whether or not the piece indices are
//! current.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_from_file_rank;

/// Which side sits at the bottom of the rendered board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    LightBottom,
    DarkBottom,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::LightBottom => Orientation::DarkBottom,
            Orientation::DarkBottom => Orientation::LightBottom,
        }
    }
}

/// Render the board to a Unicode string for terminal output.
pub fn render_game_state(game_state: &GameState, orientation: Orientation) -> String {
    let (ranks, files): (Vec<u8>, Vec<u8>) = match orientation {
        Orientation::LightBottom => ((0..8).rev().collect(), (0..8).collect()),
        Orientation::DarkBottom => ((0..8).collect(), (0..8).rev().collect()),
    };

    let file_labels = files
        .iter()
        .map(|file| char::from(b'a' + file).to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    out.push_str("  ");
    out.push_str(&file_labels);
    out.push('\n');

    for rank in &ranks {
        let rank_label = char::from(b'1' + rank);
        out.push(rank_label);
        out.push(' ');

        for (i, file) in files.iter().enumerate() {
            let square = square_from_file_rank(*file, *rank);
            match game_state.piece_at(square).piece() {
                Some((color, kind)) => out.push(piece_to_unicode(color, kind)),
                None => out.push('·'),
            }

            if i < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_label);
        out.push('\n');
    }

    out.push_str("  ");
    out.push_str(&file_labels);

    out
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}
