//! Bishop attack bitboards built from the shared ray table.
//!
//! Each diagonal ray is truncated at its nearest blocker, which stays in the
//! set so captures fall out of the same mask.

use crate::bitboard::bit_utils::Direction;
use crate::bitboard::rays::RayTable;
use crate::game_state::chess_types::{Bitboard, Square};

/// Diagonal rays on an empty board.
#[inline]
pub fn bishop_push_naive(rays: &RayTable, square: Square) -> Bitboard {
    Direction::DIAGONAL
        .into_iter()
        .fold(0, |acc, dir| acc | rays.ray(dir, square))
}

#[inline]
pub fn bishop_attacks(rays: &RayTable, square: Square, occupied: Bitboard) -> Bitboard {
    Direction::DIAGONAL
        .into_iter()
        .fold(0, |acc, dir| acc | rays.blocked_ray(dir, square, occupied))
}

#[inline]
pub fn bishop_targets(rays: &RayTable, square: Square, own: Bitboard, enemy: Bitboard) -> Bitboard {
    bishop_attacks(rays, square, own | enemy) & !own
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::tables::STANDARD_TABLES;

    #[test]
    fn bishop_rays_from_d4_have_thirteen_squares() {
        assert_eq!(bishop_push_naive(&STANDARD_TABLES.rays, 27).count_ones(), 13);
    }

    #[test]
    fn blockers_stop_rays_and_own_pieces_drop_out() {
        let rays = &STANDARD_TABLES.rays;
        // Bishop c1; own pawn d2, enemy pawn a3.
        let own = 1u64 << 11;
        let enemy = 1u64 << 16;
        let targets = bishop_targets(rays, 2, own, enemy);
        assert_eq!(targets, (1u64 << 9) | (1u64 << 16));
        // Same bishop sees d2 as an attacked square.
        assert_ne!(bishop_attacks(rays, 2, own | enemy) & own, 0);
    }
}
