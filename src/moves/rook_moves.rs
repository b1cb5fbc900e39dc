use crate::bitboard::bit_utils::Direction;
use crate::bitboard::rays::RayTable;
use crate::game_state::chess_types::{Bitboard, Square};

/// File and rank rays on an empty board.
#[inline]
pub fn rook_push_naive(rays: &RayTable, square: Square) -> Bitboard {
    Direction::ORTHOGONAL
        .into_iter()
        .fold(0, |acc, dir| acc | rays.ray(dir, square))
}

#[inline]
pub fn rook_attacks(rays: &RayTable, square: Square, occupied: Bitboard) -> Bitboard {
    Direction::ORTHOGONAL
        .into_iter()
        .fold(0, |acc, dir| acc | rays.blocked_ray(dir, square, occupied))
}

#[inline]
pub fn rook_targets(rays: &RayTable, square: Square, own: Bitboard, enemy: Bitboard) -> Bitboard {
    rook_attacks(rays, square, own | enemy) & !own
}
