//! Text forms of a single move.
//!
//! Long algebraic: source + destination + optional promotion letter
//! (`e2e4`, `a7a8q`). Compact: one character per square from
//! `COMPACT_MOVE_ALPHABET`, two characters per move. The compact form has no
//! room for a promotion piece: decoding against a position turns a pawn
//! reaching the last rank into a queen promotion, and under-promotions
//! cannot be encoded.
//!
//! Bare square pairs get their flag inferred in a fixed order: castle, double
//! pawn push, en passant, none.

use crate::errors::{BoardError, BoardResult};
use crate::game_state::chess_rules::{CASTLING_KING_MOVES, COMPACT_MOVE_ALPHABET};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::{Move, MoveFlag};
use crate::utils::algebraic::{algebraic_to_square, square_file, square_rank, square_to_algebraic};

pub fn move_to_long_algebraic(mv: Move) -> String {
    let mut out = String::with_capacity(5);
    // Both squares are six-bit values, so conversion cannot fail.
    out.push_str(&square_to_algebraic(mv.from()).unwrap_or_default());
    out.push_str(&square_to_algebraic(mv.to()).unwrap_or_default());
    if let Some(kind) = mv.promotion_kind() {
        out.push(promotion_to_char(kind));
    }
    out
}

/// Parse a long-algebraic token. `en_passant_target` is the square a pawn may
/// capture onto en passant in the position the move is played from.
pub fn long_algebraic_to_move(token: &str, en_passant_target: Option<Square>) -> BoardResult<Move> {
    if !token.is_ascii() || (token.len() != 4 && token.len() != 5) {
        return Err(BoardError::ParseError(format!("invalid long algebraic move: {token:?}")));
    }

    let from = algebraic_to_square(&token[0..2])?;
    let to = algebraic_to_square(&token[2..4])?;

    if let Some(letter) = token[4..].chars().next() {
        let kind = char_to_promotion(letter)?;
        let flag = MoveFlag::promotion(kind).unwrap_or(MoveFlag::PromoteToQueen);
        return Ok(Move::new(from, to, flag));
    }

    Ok(Move::new(from, to, infer_flag(from, to, en_passant_target)))
}

/// Two compact characters for the move's squares. Under-promotions are
/// rejected; a queen promotion encodes as its bare square pair.
pub fn move_to_compact(mv: Move) -> BoardResult<String> {
    match mv.promotion_kind() {
        None | Some(PieceKind::Queen) => {}
        Some(kind) => {
            return Err(BoardError::InvalidArgument(format!(
                "compact moves cannot carry a promotion to {kind:?}: {}",
                move_to_long_algebraic(mv)
            )))
        }
    }

    let mut out = String::with_capacity(2);
    out.push(char::from(COMPACT_MOVE_ALPHABET[mv.from() as usize]));
    out.push(char::from(COMPACT_MOVE_ALPHABET[mv.to() as usize]));
    Ok(out)
}

/// Decode two compact characters without a position: flags are inferred
/// from the squares alone and promotions are not recovered.
pub fn compact_to_move(pair: &str, en_passant_target: Option<Square>) -> BoardResult<Move> {
    let bytes = pair.as_bytes();
    if bytes.len() != 2 {
        return Err(BoardError::DecodeError(format!(
            "compact move must be two characters, got {pair:?}"
        )));
    }

    let from = compact_square(bytes[0])?;
    let to = compact_square(bytes[1])?;
    Ok(Move::new(from, to, infer_flag(from, to, en_passant_target)))
}

/// Decode two compact characters against the position they are played from,
/// using its en-passant target and promoting a pawn that reaches the last
/// rank to a queen.
pub fn compact_to_move_in(pair: &str, game_state: &GameState) -> BoardResult<Move> {
    let mv = compact_to_move(pair, game_state.en_passant_square())?;

    let last_rank = square_rank(mv.to()) == 0 || square_rank(mv.to()) == 7;
    if last_rank && game_state.piece_at(mv.from()).kind() == Some(PieceKind::Pawn) {
        return Ok(mv.with_flag(MoveFlag::PromoteToQueen));
    }
    Ok(mv)
}

/// Parse a long-algebraic token against the position it is played from.
pub fn long_algebraic_to_move_in(token: &str, game_state: &GameState) -> BoardResult<Move> {
    long_algebraic_to_move(token, game_state.en_passant_square())
}

/// Flag for a bare (from, to) pair; first matching rule wins.
pub fn infer_flag(from: Square, to: Square, en_passant_target: Option<Square>) -> MoveFlag {
    if CASTLING_KING_MOVES.contains(&(from, to)) {
        return MoveFlag::Castle;
    }

    let same_file = square_file(from) == square_file(to);
    let (from_rank, to_rank) = (square_rank(from), square_rank(to));
    if same_file && ((from_rank == 1 && to_rank == 3) || (from_rank == 6 && to_rank == 4)) {
        return MoveFlag::DoublePawnPush;
    }

    let one_file_over = square_file(from).abs_diff(square_file(to)) == 1;
    let diagonal_step = (from_rank == 4 && to_rank == 5) || (from_rank == 3 && to_rank == 2);
    if one_file_over && diagonal_step && en_passant_target == Some(to) {
        return MoveFlag::EnPassant;
    }

    MoveFlag::None
}

fn compact_square(symbol: u8) -> BoardResult<Square> {
    COMPACT_MOVE_ALPHABET
        .iter()
        .position(|c| *c == symbol)
        .map(|index| index as Square)
        .ok_or_else(|| {
            BoardError::DecodeError(format!(
                "'{}' is not in the compact move alphabet",
                char::from(symbol)
            ))
        })
}

fn promotion_to_char(kind: PieceKind) -> char {
    match kind {
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        _ => 'q',
    }
}

fn char_to_promotion(ch: char) -> BoardResult<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(BoardError::ParseError(format!("invalid promotion piece character: {ch}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("test square should parse")
    }

    #[test]
    fn long_algebraic_round_trip_all_square_pairs() {
        for from in 0..64u8 {
            for to in 0..64u8 {
                let mv = Move::new(from, to, MoveFlag::None);
                let text = move_to_long_algebraic(mv);
                let decoded = long_algebraic_to_move(&text, None).expect("own output parses");
                assert_eq!((decoded.from(), decoded.to()), (from, to), "{text}");
                assert_eq!(decoded.flag(), infer_flag(from, to, None));
            }
        }
    }

    #[test]
    fn compact_round_trip_all_square_pairs() {
        for from in 0..64u8 {
            for to in 0..64u8 {
                let mv = Move::new(from, to, infer_flag(from, to, None));
                let text = move_to_compact(mv).expect("no promotion");
                assert_eq!(text.len(), 2);
                assert_eq!(compact_to_move(&text, None).expect("own output decodes"), mv);
            }
        }
    }

    #[test]
    fn compact_alphabet_symbols() {
        assert_eq!(move_to_compact(Move::new(0, 63, MoveFlag::None)).expect("encodes"), "4H");
        assert_eq!(move_to_compact(Move::new(sq("e2"), sq("e4"), MoveFlag::DoublePawnPush)).expect("encodes"), "0k");
    }

    #[test]
    fn promotion_suffix_round_trip() {
        for (token, kind) in [
            ("a7a8q", PieceKind::Queen),
            ("a7a8n", PieceKind::Knight),
            ("h2h1R", PieceKind::Rook),
            ("b7c8b", PieceKind::Bishop),
        ] {
            let mv = long_algebraic_to_move(token, None).expect("promotion parses");
            assert_eq!(mv.promotion_kind(), Some(kind));
            assert_eq!(move_to_long_algebraic(mv), token.to_ascii_lowercase());
        }
    }

    #[test]
    fn infers_castle_before_other_rules() {
        for (from, to) in [("e1", "g1"), ("e1", "c1"), ("e8", "g8"), ("e8", "c8")] {
            assert_eq!(infer_flag(sq(from), sq(to), None), MoveFlag::Castle);
        }
        assert_eq!(infer_flag(sq("e1"), sq("f1"), None), MoveFlag::None);
    }

    #[test]
    fn infers_double_push_on_the_same_file_only() {
        assert_eq!(infer_flag(sq("e2"), sq("e4"), None), MoveFlag::DoublePawnPush);
        assert_eq!(infer_flag(sq("d7"), sq("d5"), None), MoveFlag::DoublePawnPush);
        assert_eq!(infer_flag(sq("e2"), sq("f4"), None), MoveFlag::None);
        assert_eq!(infer_flag(sq("e3"), sq("e5"), None), MoveFlag::None);
        assert_eq!(infer_flag(sq("e4"), sq("e2"), None), MoveFlag::None);
    }

    #[test]
    fn infers_en_passant_only_onto_the_tracked_target() {
        assert_eq!(infer_flag(sq("e5"), sq("d6"), Some(sq("d6"))), MoveFlag::EnPassant);
        assert_eq!(infer_flag(sq("d4"), sq("e3"), Some(sq("e3"))), MoveFlag::EnPassant);
        assert_eq!(infer_flag(sq("e5"), sq("d6"), None), MoveFlag::None);
        assert_eq!(infer_flag(sq("e5"), sq("d6"), Some(sq("f6"))), MoveFlag::None);
        // Straight push onto the target is not a capture.
        assert_eq!(infer_flag(sq("d5"), sq("d6"), Some(sq("d6"))), MoveFlag::None);
    }

    #[test]
    fn position_aware_decoding_uses_live_state() {
        let game = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3").expect("FEN should parse");
        let lan = long_algebraic_to_move_in("e5d6", &game).expect("move parses");
        assert!(lan.is_en_passant());

        let pair = move_to_compact(lan).expect("encodes");
        assert!(compact_to_move_in(&pair, &game).expect("decodes").is_en_passant());
    }

    #[test]
    fn compact_pawn_to_last_rank_promotes_to_queen() {
        let game = parse_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let pair = move_to_compact(Move::new(sq("a7"), sq("a8"), MoveFlag::PromoteToQueen)).expect("encodes");
        let decoded = compact_to_move_in(&pair, &game).expect("decodes");
        assert_eq!(decoded.promotion_kind(), Some(PieceKind::Queen));

        let under = Move::new(sq("a7"), sq("a8"), MoveFlag::PromoteToKnight);
        assert!(matches!(move_to_compact(under), Err(BoardError::InvalidArgument(_))));
    }

    #[test]
    fn malformed_tokens_fail_fast() {
        for token in ["", "e2", "e2e", "e2e4qq", "e9e4", "e2e4x", "x2e4", "é2e4"] {
            assert!(
                matches!(long_algebraic_to_move(token, None), Err(BoardError::ParseError(_))),
                "{token:?} should be rejected"
            );
        }
        for pair in ["", "4", "4H5", "4!"] {
            assert!(
                matches!(compact_to_move(pair, None), Err(BoardError::DecodeError(_))),
                "{pair:?} should be rejected"
            );
        }
    }
}
