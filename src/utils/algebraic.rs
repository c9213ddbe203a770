//! Square and bitboard conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square/bitboard representations reused by the FEN, move and compact codecs.

use crate::errors::{BoardError, BoardResult};
use crate::game_state::chess_types::{Bitboard, Square};

#[inline]
pub const fn square_file(square: Square) -> u8 {
    square & 7
}

#[inline]
pub const fn square_rank(square: Square) -> u8 {
    square >> 3
}

#[inline]
pub const fn square_from_file_rank(file: u8, rank: u8) -> Square {
    (rank << 3) | file
}

/// Mirror a square vertically (`a1 <-> a8`).
#[inline]
pub const fn flip_square(square: Square) -> Square {
    square ^ 56
}

#[inline]
pub fn checked_square(square: usize) -> BoardResult<Square> {
    Square::try_from(square)
        .ok()
        .filter(|sq| *sq < 64)
        .ok_or_else(|| BoardError::InvalidArgument(format!("square index out of bounds: {square}")))
}

/// Convert algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> BoardResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(BoardError::ParseError(format!("invalid algebraic square: {square:?}")));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(BoardError::ParseError(format!("invalid algebraic file in {square:?}")));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(BoardError::ParseError(format!("invalid algebraic rank in {square:?}")));
    }

    Ok(square_from_file_rank(file - b'a', rank - b'1'))
}

/// Convert algebraic notation (for example: "e4") to a one-hot bitboard.
#[inline]
pub fn algebraic_to_bitboard(square: &str) -> BoardResult<Bitboard> {
    let index = algebraic_to_square(square)?;
    Ok(1u64 << index)
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> BoardResult<String> {
    if square > 63 {
        return Err(BoardError::InvalidArgument(format!("square index out of bounds: {square}")));
    }

    let file_char = char::from(b'a' + square_file(square));
    let rank_char = char::from(b'1' + square_rank(square));

    Ok(format!("{file_char}{rank_char}"))
}

/// Convert a one-hot bitboard to algebraic notation (for example: "e4").
#[inline]
pub fn bitboard_to_algebraic(bitboard: Bitboard) -> BoardResult<String> {
    if bitboard.count_ones() != 1 {
        return Err(BoardError::InvalidArgument(format!(
            "bitboard must contain exactly one set bit, got {}",
            bitboard.count_ones()
        )));
    }

    square_to_algebraic(bitboard.trailing_zeros() as Square)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_square_conversions() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 0);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), 63);
        assert_eq!(algebraic_to_square("e4").expect("e4 should parse"), 28);
        assert_eq!(square_to_algebraic(0).expect("0 should convert"), "a1");
        assert_eq!(square_to_algebraic(63).expect("63 should convert"), "h8");

        for sq in 0..64u8 {
            let text = square_to_algebraic(sq).expect("square in range");
            assert_eq!(algebraic_to_square(&text).expect("own output parses"), sq);
        }
    }

    #[test]
    fn bitboard_conversions() {
        assert_eq!(algebraic_to_bitboard("c3").expect("c3 should parse"), 1u64 << 18);
        assert_eq!(bitboard_to_algebraic(1u64 << 18).expect("one bit"), "c3");
        assert!(bitboard_to_algebraic(0).is_err());
        assert!(bitboard_to_algebraic(0b11).is_err());
    }

    #[test]
    fn rejects_malformed_coordinates() {
        for bad in ["", "e", "e44", "i1", "a0", "a9", "E4", "4e"] {
            assert!(
                matches!(algebraic_to_square(bad), Err(BoardError::ParseError(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(matches!(square_to_algebraic(64), Err(BoardError::InvalidArgument(_))));
        assert!(checked_square(64).is_err());
        assert_eq!(checked_square(63).expect("in range"), 63);
    }

    #[test]
    fn file_rank_helpers() {
        let e4 = algebraic_to_square("e4").expect("e4 should parse");
        assert_eq!(square_file(e4), 4);
        assert_eq!(square_rank(e4), 3);
        assert_eq!(flip_square(e4), algebraic_to_square("e5").expect("e5 should parse"));
    }
}
