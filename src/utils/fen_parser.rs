//! FEN-to-GameState parser.
//!
//! Builds a complete position from a Forsyth-Edwards Notation string,
//! validating each field. Parsing always happens into a fresh `GameState`,
//! so a failed import never leaves a half-written position behind.

use tracing::debug;

use crate::errors::{BoardError, BoardResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::{algebraic_to_square, square_from_file_rank, square_rank};
use crate::utils::piece_table::PieceTable;

pub fn parse_fen(fen: &str) -> BoardResult<GameState> {
    parse_fen_with(fen, &PieceTable::standard())
}

pub fn parse_fen_with(fen: &str, table: &PieceTable) -> BoardResult<GameState> {
    let result = parse_fields(fen, table);
    if let Err(err) = &result {
        debug!(%err, fen, "rejected FEN");
    }
    result
}

fn parse_fields(fen: &str, table: &PieceTable) -> BoardResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| malformed("missing board layout in FEN"))?;
    let side_part = parts.next().ok_or_else(|| malformed("missing side-to-move in FEN"))?;
    let castling_part = parts.next().ok_or_else(|| malformed("missing castling rights in FEN"))?;
    let en_passant_part = parts.next().ok_or_else(|| malformed("missing en-passant square in FEN"))?;
    let halfmove_part = parts.next().ok_or_else(|| malformed("missing halfmove clock in FEN"))?;
    let fullmove_part = parts.next().ok_or_else(|| malformed("missing fullmove number in FEN"))?;

    if parts.next().is_some() {
        return Err(malformed("FEN has extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, table, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part, table)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_file =
        parse_en_passant_target(en_passant_part, game_state.side_to_move, &game_state)?;
    game_state.double_push_file = game_state.en_passant_file;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| malformed(format!("invalid halfmove clock: {halfmove_part}")))?;
    game_state.ply = parse_fullmove_as_ply(fullmove_part, game_state.side_to_move)?;

    Ok(game_state)
}

fn parse_board(board_part: &str, table: &PieceTable, game_state: &mut GameState) -> BoardResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(malformed("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(malformed(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(malformed(format!("rank {} has too many files", board_rank + 1)));
                }
                continue;
            }

            let (color, kind) = table
                .piece_for_letter(ch)
                .ok_or_else(|| malformed(format!("invalid piece character '{ch}' in board layout")))?;

            if file >= 8 {
                return Err(malformed(format!("rank {} has too many files", board_rank + 1)));
            }

            let sq = square_from_file_rank(file, board_rank);
            game_state.set_piece(sq as usize, PieceCode::new(color, kind))?;
            file += 1;
        }

        if file != 8 {
            return Err(malformed(format!("rank {} does not sum to 8 files", board_rank + 1)));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str, table: &PieceTable) -> BoardResult<Color> {
    table
        .side_for_letter(side_part)
        .ok_or_else(|| malformed(format!("invalid side-to-move field: {side_part}")))
}

fn parse_castling_rights(castling_part: &str) -> BoardResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }
    if castling_part.is_empty() {
        return Err(BoardError::InvalidCastlingRights("empty castling field".to_owned()));
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        let bit = match ch {
            'K' => CASTLE_LIGHT_KINGSIDE,
            'Q' => CASTLE_LIGHT_QUEENSIDE,
            'k' => CASTLE_DARK_KINGSIDE,
            'q' => CASTLE_DARK_QUEENSIDE,
            _ => {
                return Err(BoardError::InvalidCastlingRights(format!(
                    "unable to parse {castling_part:?}: only 'K', 'Q', 'k', 'q' or '-' are allowed"
                )))
            }
        };
        if rights & bit != 0 {
            return Err(BoardError::InvalidCastlingRights(format!(
                "duplicate '{ch}' in {castling_part:?}"
            )));
        }
        rights |= bit;
    }

    Ok(rights)
}

/// Returns the en-passant file. The target must sit on rank 6 with light to
/// move (rank 3 with dark to move) and have an enemy pawn right behind it.
fn parse_en_passant_target(
    en_passant_part: &str,
    side_to_move: Color,
    game_state: &GameState,
) -> BoardResult<Option<u8>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let target = algebraic_to_square(en_passant_part)
        .map_err(|_| BoardError::InvalidEnPassantTarget(en_passant_part.to_owned()))?;

    let (expected_rank, pawn_square) = match side_to_move {
        Color::Light => (5, target.wrapping_sub(8)),
        Color::Dark => (2, target + 8),
    };
    if square_rank(target) != expected_rank {
        return Err(BoardError::InvalidEnPassantTarget(format!(
            "{en_passant_part} is invalid for {side_to_move:?} to move"
        )));
    }

    if !game_state
        .piece_at(pawn_square)
        .is(side_to_move.opposite(), PieceKind::Pawn)
    {
        return Err(BoardError::InvalidEnPassantTarget(format!(
            "no enemy pawn positioned to allow en passant at {en_passant_part}"
        )));
    }

    Ok(Some(target & 7))
}

fn parse_fullmove_as_ply(fullmove_part: &str, side_to_move: Color) -> BoardResult<u16> {
    let fullmove = fullmove_part
        .parse::<u16>()
        .map_err(|_| malformed(format!("invalid fullmove number: {fullmove_part}")))?;
    if fullmove == 0 {
        return Err(malformed("fullmove number starts at 1"));
    }

    (fullmove - 1)
        .checked_mul(2)
        .and_then(|ply| ply.checked_add(u16::from(side_to_move == Color::Dark)))
        .ok_or_else(|| malformed(format!("fullmove number too large: {fullmove_part}")))
}

fn malformed(message: impl Into<String>) -> BoardError {
    BoardError::MalformedInput(message.into())
}
