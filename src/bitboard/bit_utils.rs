//! Primitive bitboard operations.
//!
//! Every shift masks off squares that would wrap around a board edge, so a
//! piece on the h-file shifted east yields an empty set rather than landing on
//! the a-file of the next rank.

use crate::game_state::chess_types::{Bitboard, Square};

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_B: Bitboard = FILE_A << 1;
pub const FILE_G: Bitboard = FILE_A << 6;
pub const FILE_H: Bitboard = FILE_A << 7;
pub const RANK_1: Bitboard = 0xff;
pub const RANK_2: Bitboard = RANK_1 << 8;
pub const RANK_4: Bitboard = RANK_1 << 24;
pub const RANK_5: Bitboard = RANK_1 << 32;
pub const RANK_7: Bitboard = RANK_1 << 48;
pub const RANK_8: Bitboard = RANK_1 << 56;

const NOT_FILE_A: Bitboard = !FILE_A;
const NOT_FILE_H: Bitboard = !FILE_H;
const NOT_FILE_AB: Bitboard = !(FILE_A | FILE_B);
const NOT_FILE_GH: Bitboard = !(FILE_G | FILE_H);

#[inline]
pub const fn square_bb(square: Square) -> Bitboard {
    1u64 << square
}

#[inline]
pub const fn count_bits(bb: Bitboard) -> u32 {
    bb.count_ones()
}

/// Lowest set square, `None` for an empty set.
#[inline]
pub const fn first_set_bit(bb: Bitboard) -> Option<Square> {
    if bb == 0 {
        None
    } else {
        Some(bb.trailing_zeros() as Square)
    }
}

/// Highest set square, `None` for an empty set.
#[inline]
pub const fn last_set_bit(bb: Bitboard) -> Option<Square> {
    if bb == 0 {
        None
    } else {
        Some(63 - bb.leading_zeros() as Square)
    }
}

#[inline]
pub const fn test_bit(bb: Bitboard, square: Square) -> bool {
    bb & square_bb(square) != 0
}

#[inline]
pub const fn set_bit(bb: Bitboard, square: Square) -> Bitboard {
    bb | square_bb(square)
}

#[inline]
pub const fn clear_bit(bb: Bitboard, square: Square) -> Bitboard {
    bb & !square_bb(square)
}

/// Iterates the set squares of a bitboard from lowest to highest.
#[derive(Debug, Clone, Copy)]
pub struct Squares(Bitboard);

impl Iterator for Squares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let sq = first_set_bit(self.0)?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Squares {}

#[inline]
pub const fn squares(bb: Bitboard) -> Squares {
    Squares(bb)
}

#[inline]
pub const fn one_n(bb: Bitboard) -> Bitboard {
    bb << 8
}

#[inline]
pub const fn one_s(bb: Bitboard) -> Bitboard {
    bb >> 8
}

#[inline]
pub const fn one_e(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_H) << 1
}

#[inline]
pub const fn one_w(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_A) >> 1
}

#[inline]
pub const fn one_ne(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_H) << 9
}

#[inline]
pub const fn one_nw(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_A) << 7
}

#[inline]
pub const fn one_se(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_H) >> 7
}

#[inline]
pub const fn one_sw(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_A) >> 9
}

#[inline]
pub const fn two_n(bb: Bitboard) -> Bitboard {
    bb << 16
}

#[inline]
pub const fn two_s(bb: Bitboard) -> Bitboard {
    bb >> 16
}

// Knight jumps, named by the two steps taken: first letter(s) the long leg.

#[inline]
pub const fn knight_nne(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_H) << 17
}

#[inline]
pub const fn knight_nnw(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_A) << 15
}

#[inline]
pub const fn knight_ene(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_GH) << 10
}

#[inline]
pub const fn knight_wnw(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_AB) << 6
}

#[inline]
pub const fn knight_sse(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_H) >> 15
}

#[inline]
pub const fn knight_ssw(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_A) >> 17
}

#[inline]
pub const fn knight_ese(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_GH) >> 6
}

#[inline]
pub const fn knight_wsw(bb: Bitboard) -> Bitboard {
    (bb & NOT_FILE_AB) >> 10
}

/// One of the eight compass directions used by sliding pieces.
///
/// "Positive" directions move toward higher square indices, so the nearest
/// blocker along them is the lowest set bit; negative directions use the
/// highest set bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    NorthWest,
    South,
    SouthWest,
    West,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::NorthWest,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::SouthEast,
    ];

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::NorthEast => 1,
            Direction::East => 2,
            Direction::NorthWest => 3,
            Direction::South => 4,
            Direction::SouthWest => 5,
            Direction::West => 6,
            Direction::SouthEast => 7,
        }
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.index() < 4
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast | Direction::NorthWest | Direction::SouthWest | Direction::SouthEast
        )
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::NorthWest => Direction::SouthEast,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::SouthEast => Direction::NorthWest,
        }
    }

    #[inline]
    pub const fn shift(self, bb: Bitboard) -> Bitboard {
        match self {
            Direction::North => one_n(bb),
            Direction::NorthEast => one_ne(bb),
            Direction::East => one_e(bb),
            Direction::NorthWest => one_nw(bb),
            Direction::South => one_s(bb),
            Direction::SouthWest => one_sw(bb),
            Direction::West => one_w(bb),
            Direction::SouthEast => one_se(bb),
        }
    }

    /// Nearest member of `blockers` when walking this way from a square.
    #[inline]
    pub const fn nearest(self, blockers: Bitboard) -> Option<Square> {
        if self.is_positive() {
            first_set_bit(blockers)
        } else {
            last_set_bit(blockers)
        }
    }
}
