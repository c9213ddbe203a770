//! Compact position codec.
//!
//! The board travels as 32 bytes of 4-bit piece nibbles in FEN reading order
//! (a8, b8, ... h1; high nibble first), the game state as 3 bytes:
//!
//! ```text
//! byte0: dark-to-move << 7 | castling << 3 | en-passant file
//! byte1: en-passant present << 7 | ply >> 8
//! byte2: ply & 0xff
//! ```
//!
//! Each block is base64 encoded without padding and the two are joined by
//! `:`. The game-state block is optional on import.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use tracing::debug;

use crate::errors::{BoardError, BoardResult};
use crate::game_state::chess_rules::{COMPACT_BLOCK_DELIMITER, MAX_COMPACT_PLY};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::flip_square;

const BOARD_BYTES: usize = 32;
const STATE_BYTES: usize = 3;

/// Standard alphabet; emits no padding, accepts input with or without it.
const TRANSPORT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    NO_PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn generate_compact(game_state: &GameState) -> BoardResult<String> {
    let board = encode_board(game_state);
    let state = encode_state(game_state)?;

    Ok(format!(
        "{}{}{}",
        TRANSPORT.encode(board),
        COMPACT_BLOCK_DELIMITER,
        TRANSPORT.encode(state)
    ))
}

/// Decode `text` into `game_state`. The board is replaced; game-state fields
/// are replaced only when the second block is present.
pub fn parse_compact_into(text: &str, game_state: &mut GameState) -> BoardResult<()> {
    let mut chunks = text.trim().split(COMPACT_BLOCK_DELIMITER);
    let board_chunk = chunks.next().unwrap_or_default();
    let state_chunk = chunks.next().filter(|chunk| !chunk.is_empty());
    if chunks.next().is_some() {
        return Err(decode_error("compact position has more than two blocks"));
    }

    let board = decode_block::<BOARD_BYTES>(board_chunk, "board")?;
    let squares = decode_board(&board)?;
    let state = state_chunk
        .map(|chunk| decode_block::<STATE_BYTES>(chunk, "game state"))
        .transpose()?;

    // Everything decoded; now write.
    game_state.clear_board();
    for (sq, code) in squares.into_iter().enumerate() {
        game_state.set_piece(sq, code)?;
    }

    if let Some(state) = state {
        apply_state(&state, game_state);
    } else {
        debug!("compact position carried no game-state block; keeping previous state");
    }

    Ok(())
}

fn encode_board(game_state: &GameState) -> [u8; BOARD_BYTES] {
    let mut out = [0u8; BOARD_BYTES];
    for (i, byte) in out.iter_mut().enumerate() {
        let high = game_state.piece_at(reading_order_square(i << 1)).to_nibble();
        let low = game_state.piece_at(reading_order_square(i << 1 | 1)).to_nibble();
        *byte = (high << 4) | low;
    }
    out
}

fn decode_board(bytes: &[u8; BOARD_BYTES]) -> BoardResult<[PieceCode; 64]> {
    let mut squares = [PieceCode::NONE; 64];
    for (i, byte) in bytes.iter().enumerate() {
        squares[reading_order_square(i << 1) as usize] = PieceCode::from_nibble(byte >> 4)?;
        squares[reading_order_square(i << 1 | 1) as usize] = PieceCode::from_nibble(byte & 0x0f)?;
    }
    Ok(squares)
}

fn encode_state(game_state: &GameState) -> BoardResult<[u8; STATE_BYTES]> {
    let ply = game_state.ply();
    if ply > MAX_COMPACT_PLY {
        return Err(BoardError::InvalidArgument(format!(
            "ply {ply} exceeds the compact format limit of {MAX_COMPACT_PLY}"
        )));
    }

    let dark = u8::from(game_state.side_to_move() == Color::Dark);
    let ep_present = u8::from(game_state.en_passant_file().is_some());
    let ep_file = game_state.en_passant_file().unwrap_or(0) & 7;

    Ok([
        dark << 7 | (game_state.castling_rights() & CASTLE_ALL) << 3 | ep_file,
        ep_present << 7 | (ply >> 8) as u8,
        (ply & 0xff) as u8,
    ])
}

fn apply_state(state: &[u8; STATE_BYTES], game_state: &mut GameState) {
    game_state.side_to_move = if state[0] & 0x80 != 0 {
        Color::Dark
    } else {
        Color::Light
    };
    game_state.castling_rights = (state[0] >> 3) & CASTLE_ALL;
    game_state.en_passant_file = (state[1] & 0x80 != 0).then_some(state[0] & 7);
    game_state.double_push_file = game_state.en_passant_file;
    game_state.ply = u16::from(state[1] & 0x7f) << 8 | u16::from(state[2]);
}

fn decode_block<const N: usize>(chunk: &str, what: &str) -> BoardResult<[u8; N]> {
    let bytes = TRANSPORT
        .decode(chunk)
        .map_err(|err| decode_error(format!("{what} block: {err}")))?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| decode_error(format!("{what} block must be {N} bytes, got {len}")))
}

/// Square at position `index` of FEN reading order (a8 first, h1 last).
#[inline]
fn reading_order_square(index: usize) -> Square {
    flip_square(index as Square)
}

fn decode_error(message: impl Into<String>) -> BoardError {
    BoardError::DecodeError(message.into())
}
