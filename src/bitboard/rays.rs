//! Empty-board ray table for sliding pieces.

use crate::bitboard::bit_utils::{square_bb, Direction};
use crate::game_state::chess_types::{Bitboard, Square};

/// `rays[d][sq]`: every square visible from `sq` in direction `d` on an empty
/// board, excluding `sq` itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RayTable {
    rays: [[Bitboard; 64]; 8],
}

impl RayTable {
    pub const fn new() -> Self {
        let mut rays = [[0u64; 64]; 8];
        let mut d = 0usize;
        while d < 8 {
            let dir = Direction::ALL[d];
            let mut sq = 0usize;
            while sq < 64 {
                let mut ray = 0u64;
                let mut cursor = dir.shift(square_bb(sq as Square));
                while cursor != 0 {
                    ray |= cursor;
                    cursor = dir.shift(cursor);
                }
                rays[dir.index()][sq] = ray;
                sq += 1;
            }
            d += 1;
        }
        Self { rays }
    }

    #[inline]
    pub const fn ray(&self, dir: Direction, square: Square) -> Bitboard {
        self.rays[dir.index()][square as usize]
    }

    /// Ray from `square` cut off just after the nearest blocker, which stays
    /// included.
    #[inline]
    pub fn blocked_ray(&self, dir: Direction, square: Square, occupied: Bitboard) -> Bitboard {
        let ray = self.ray(dir, square);
        match dir.nearest(ray & occupied) {
            Some(blocker) => ray & !self.ray(dir, blocker),
            None => ray,
        }
    }

    /// Nearest occupied square from `square` in `dir`.
    #[inline]
    pub fn first_blocker(&self, dir: Direction, square: Square, occupied: Bitboard) -> Option<Square> {
        dir.nearest(self.ray(dir, square) & occupied)
    }

    /// Direction leading from `from` to `to`, if they share a line.
    pub fn direction_between(&self, from: Square, to: Square) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&dir| self.ray(dir, from) & square_bb(to) != 0)
    }

    /// Squares strictly between two aligned squares; empty when not aligned.
    pub fn between(&self, from: Square, to: Square) -> Bitboard {
        match self.direction_between(from, to) {
            Some(dir) => self.ray(dir, from) & !self.ray(dir, to) & !square_bb(to),
            None => 0,
        }
    }
}

impl Default for RayTable {
    fn default() -> Self {
        Self::new()
    }
}
