//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square indices reused by the FEN, long-algebraic and SAN helpers.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::{square_file, square_rank, Square};

/// Convert algebraic notation (for example: "e4") to a square index.
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidSquare(square.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
///
/// Indices above 63 are masked onto the board.
pub fn square_to_algebraic(square: Square) -> String {
    let square = square & 63;
    format!("{}{}", file_char(square), rank_char(square))
}

#[inline]
pub fn file_char(square: Square) -> char {
    char::from(b'a' + square_file(square & 63))
}

#[inline]
pub fn rank_char(square: Square) -> char {
    char::from(b'1' + square_rank(square & 63))
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};
    use crate::chess_errors::ChessErrors;

    #[test]
    fn corners_and_centre() {
        assert_eq!(algebraic_to_square("a1").expect("valid"), 0);
        assert_eq!(algebraic_to_square("h1").expect("valid"), 7);
        assert_eq!(algebraic_to_square("e4").expect("valid"), 28);
        assert_eq!(algebraic_to_square("h8").expect("valid"), 63);
        assert_eq!(square_to_algebraic(0), "a1");
        assert_eq!(square_to_algebraic(63), "h8");
    }

    #[test]
    fn every_square_round_trips() {
        for sq in 0..64u8 {
            assert_eq!(algebraic_to_square(&square_to_algebraic(sq)).expect("valid"), sq);
        }
    }

    #[test]
    fn rejects_bad_text() {
        for bad in ["", "e", "e44", "i1", "a9", "E4", "a0"] {
            assert!(matches!(
                algebraic_to_square(bad),
                Err(ChessErrors::InvalidSquare(_))
            ));
        }
    }
}
