//! Crate root module declarations for the Plum board-state library.
//!
//! Exposes the position model (mailbox plus lazily rebuilt piece indices),
//! the FEN and compact codecs, move encoding and application, diagnostics,
//! and the stdin command loop used by the binary.

pub mod errors;
pub mod logging;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_record;
    pub mod game_state;
    pub mod piece_indices;
}

pub mod moves {
    pub mod move_codec;
    pub mod move_descriptions;
    pub mod move_list;
}

pub mod move_application {
    pub mod move_apply;
}

pub mod command {
    pub mod command_loop;
}

pub mod utils {
    pub mod algebraic;
    pub mod bitboard_display;
    pub mod compact_codec;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod piece_table;
    pub mod render_game_state;
}
