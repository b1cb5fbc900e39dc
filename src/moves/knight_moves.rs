use crate::bitboard::bit_utils::{
    knight_ene, knight_ese, knight_nne, knight_nnw, knight_sse, knight_ssw, knight_wnw,
    knight_wsw, square_bb,
};
use crate::game_state::chess_types::{Bitboard, Square};

pub const KNIGHT_ATTACKS: [u64; 64] = generate_knight_attacks();

#[inline]
pub const fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn knight_targets(square: Square, own: Bitboard) -> Bitboard {
    knight_attacks(square) & !own
}

const fn generate_knight_attacks() -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let bb = square_bb(sq as Square);
        table[sq] = knight_nne(bb)
            | knight_nnw(bb)
            | knight_ene(bb)
            | knight_wnw(bb)
            | knight_sse(bb)
            | knight_ssw(bb)
            | knight_ese(bb)
            | knight_wsw(bb);
        sq += 1;
    }

    table
}
