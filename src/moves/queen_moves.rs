use crate::bitboard::rays::RayTable;
use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::bishop_moves::{bishop_attacks, bishop_push_naive};
use crate::moves::rook_moves::{rook_attacks, rook_push_naive};

#[inline]
pub fn queen_push_naive(rays: &RayTable, square: Square) -> Bitboard {
    bishop_push_naive(rays, square) | rook_push_naive(rays, square)
}

#[inline]
pub fn queen_attacks(rays: &RayTable, square: Square, occupied: Bitboard) -> Bitboard {
    bishop_attacks(rays, square, occupied) | rook_attacks(rays, square, occupied)
}

#[inline]
pub fn queen_targets(rays: &RayTable, square: Square, own: Bitboard, enemy: Bitboard) -> Bitboard {
    queen_attacks(rays, square, own | enemy) & !own
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::tables::STANDARD_TABLES;

    #[test]
    fn queen_rays_from_d4_have_twenty_seven_squares() {
        assert_eq!(queen_push_naive(&STANDARD_TABLES.rays, 27).count_ones(), 27);
    }

    #[test]
    fn queen_attacks_match_union() {
        let d4 = 27u8;
        let blockers = (1u64 << 43) | (1u64 << 30);
        let attacks = queen_attacks(&STANDARD_TABLES.rays, d4, blockers);

        assert_ne!(attacks & (1u64 << 43), 0);
        assert_ne!(attacks & (1u64 << 30), 0);
        assert_eq!(attacks & (1u64 << 51), 0);
        assert_eq!(attacks & (1u64 << 31), 0);
    }
}
