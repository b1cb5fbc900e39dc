//! King step tables.

use crate::bitboard::bit_utils::{square_bb, Direction};
use crate::game_state::chess_types::{Bitboard, Square};

pub const KING_ATTACKS: [u64; 64] = generate_king_attacks();

#[inline]
pub const fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square as usize]
}

/// Single steps not landing on own pieces. Castling is generated separately.
#[inline]
pub const fn king_targets(square: Square, own: Bitboard) -> Bitboard {
    king_attacks(square) & !own
}

const fn generate_king_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let bb = square_bb(sq as Square);
        let mut attacks = 0u64;
        let mut d = 0;
        while d < 8 {
            attacks |= Direction::ALL[d].shift(bb);
            d += 1;
        }
        table[sq] = attacks;
        sq += 1;
    }

    table
}
