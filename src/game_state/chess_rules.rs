//! Canonical chess-rule constants.
//!
//! Static literals used by the codecs and the move applier: the starting
//! position, rook home squares, castling square pairs and the compact move
//! alphabet.

use crate::game_state::chess_types::{
    CastlingRights, Square, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE, CASTLE_LIGHT_KINGSIDE,
    CASTLE_LIGHT_QUEENSIDE,
};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const A1: Square = 0;
pub const C1: Square = 2;
pub const E1: Square = 4;
pub const G1: Square = 6;
pub const H1: Square = 7;
pub const A8: Square = 56;
pub const C8: Square = 58;
pub const E8: Square = 60;
pub const G8: Square = 62;
pub const H8: Square = 63;

/// Rook home squares and the right each one guards.
pub const ROOK_HOME_SQUARES: [(Square, CastlingRights); 4] = [
    (H1, CASTLE_LIGHT_KINGSIDE),
    (A1, CASTLE_LIGHT_QUEENSIDE),
    (H8, CASTLE_DARK_KINGSIDE),
    (A8, CASTLE_DARK_QUEENSIDE),
];

/// King source/destination pairs that denote castling.
pub const CASTLING_KING_MOVES: [(Square, Square); 4] = [(E1, G1), (E1, C1), (E8, G8), (E8, C8)];

/// 64-symbol alphabet of the compact move format, indexed by square.
pub const COMPACT_MOVE_ALPHABET: &[u8; 64] =
    b"456789+/wxyz0123opqrstuvghijklmnYZabcdefQRSTUVWXIJKLMNOPABCDEFGH";

/// Separator between the board block and the game-state block of a compact
/// position.
pub const COMPACT_BLOCK_DELIMITER: char = ':';

/// Largest ply count the compact game-state block can carry.
pub const MAX_COMPACT_PLY: u16 = 0x7fff;
