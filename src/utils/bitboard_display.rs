//! Bitboard diagnostics: grid rendering and square-list conversions.

use crate::errors::{BoardError, BoardResult};
use crate::game_state::chess_types::{Bitboard, Square};
use crate::utils::algebraic::square_from_file_rank;

/// 8x8 grid of `1`/`.` with rank 8 on top, followed by the hex value.
pub fn bitboard_to_string(bitboard: Bitboard) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');
        for file in 0..8u8 {
            let bit = 1u64 << square_from_file_rank(file, rank);
            out.push(if bitboard & bit != 0 { '1' } else { '.' });
            if file < 7 {
                out.push(' ');
            }
        }
        out.push('\n');
    }

    out.push_str("  a b c d e f g h\n");
    out.push_str(&format!("  0x{bitboard:016X}"));
    out
}

/// Set squares in ascending order.
pub fn bitboard_to_squares(mut bitboard: Bitboard) -> Vec<Square> {
    let mut squares = Vec::with_capacity(bitboard.count_ones() as usize);
    while bitboard != 0 {
        squares.push(bitboard.trailing_zeros() as Square);
        bitboard &= bitboard - 1;
    }
    squares
}

pub fn squares_to_bitboard(squares: &[Square]) -> BoardResult<Bitboard> {
    squares.iter().try_fold(0u64, |acc, sq| {
        if *sq > 63 {
            return Err(BoardError::InvalidArgument(format!("square {sq} out of range")));
        }
        Ok(acc | (1u64 << sq))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_marks_set_squares() {
        let rendered = bitboard_to_string((1u64 << 0) | (1u64 << 63));
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "8 . . . . . . . 1");
        assert_eq!(lines[7], "1 1 . . . . . . .");
        assert_eq!(lines[8], "  a b c d e f g h");
        assert_eq!(lines[9], "  0x8000000000000001");
    }

    #[test]
    fn square_list_conversions() {
        let squares = vec![3, 12, 28, 63];
        let bitboard = squares_to_bitboard(&squares).expect("squares in range");
        assert_eq!(bitboard.count_ones(), 4);
        assert_eq!(bitboard_to_squares(bitboard), squares);
        assert!(bitboard_to_squares(0).is_empty());
        assert!(squares_to_bitboard(&[64]).is_err());
    }
}
