//! Whole-game move lists in long-algebraic and compact form.
//!
//! Long algebraic lists are whitespace separated (`e2e4 e7e5 g1f3`). Compact
//! lists are the two-character pairs run together; whitespace between pairs
//! is ignored on input.
//!
//! Parsing replays every move on a scratch copy of the starting position, so
//! en-passant inference and the compact promotion rule see live state.

use tracing::debug;

use crate::errors::{BoardError, BoardResult};
use crate::game_state::game_state::GameState;
use crate::moves::move_codec::{
    compact_to_move_in, long_algebraic_to_move_in, move_to_compact, move_to_long_algebraic,
};
use crate::moves::move_descriptions::Move;

pub fn format_long_algebraic_moves(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|mv| move_to_long_algebraic(*mv))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn parse_long_algebraic_moves(text: &str, start: &GameState) -> BoardResult<Vec<Move>> {
    let mut scratch = start.clone();
    let mut moves = Vec::new();

    for (index, token) in text.split_whitespace().enumerate() {
        let mv = long_algebraic_to_move_in(token, &scratch).map_err(|err| at_move(index, err))?;
        scratch.make_move(mv).map_err(|err| at_move(index, err))?;
        moves.push(mv);
    }

    Ok(moves)
}

pub fn format_compact_moves(moves: &[Move]) -> BoardResult<String> {
    let mut out = String::with_capacity(moves.len() * 2);
    for mv in moves {
        out.push_str(&move_to_compact(*mv)?);
    }
    Ok(out)
}

pub fn parse_compact_moves(text: &str, start: &GameState) -> BoardResult<Vec<Move>> {
    let symbols: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if symbols.len() % 2 != 0 {
        debug!(len = symbols.len(), "odd-length compact move list");
        return Err(BoardError::DecodeError(format!(
            "compact move list has an odd number of symbols ({})",
            symbols.len()
        )));
    }

    let mut scratch = start.clone();
    let mut moves = Vec::with_capacity(symbols.len() / 2);

    for (index, pair) in symbols.chunks(2).enumerate() {
        let pair: String = pair.iter().collect();
        let mv = compact_to_move_in(&pair, &scratch).map_err(|err| at_move(index, err))?;
        scratch.make_move(mv).map_err(|err| at_move(index, err))?;
        moves.push(mv);
    }

    Ok(moves)
}

/// Prefix an error with the zero-based position of the offending move.
fn at_move(index: usize, err: BoardError) -> BoardError {
    match err {
        BoardError::ParseError(msg) => BoardError::ParseError(format!("move {index}: {msg}")),
        BoardError::DecodeError(msg) => BoardError::DecodeError(format!("move {index}: {msg}")),
        BoardError::InvalidArgument(msg) => BoardError::InvalidArgument(format!("move {index}: {msg}")),
        other => other,
    }
}
