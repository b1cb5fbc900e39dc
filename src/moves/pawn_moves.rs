//! Pawn pushes and attacks.

use crate::bitboard::bit_utils::{
    one_n, one_ne, one_nw, one_s, one_se, one_sw, square_bb, RANK_2, RANK_7,
};
use crate::game_state::chess_types::{Bitboard, Color, Square};

pub const WHITE_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(Color::White);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(Color::Black);

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square as usize],
    }
}

const fn generate_pawn_attacks(color: Color) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let bb = square_bb(sq as Square);
        table[sq] = match color {
            Color::White => one_ne(bb) | one_nw(bb),
            Color::Black => one_se(bb) | one_sw(bb),
        };
        sq += 1;
    }

    table
}

#[inline]
const fn forward(color: Color, bb: Bitboard) -> Bitboard {
    match color {
        Color::White => one_n(bb),
        Color::Black => one_s(bb),
    }
}

#[inline]
const fn start_rank(color: Color) -> Bitboard {
    match color {
        Color::White => RANK_2,
        Color::Black => RANK_7,
    }
}

/// Forward steps ignoring occupancy: one square, plus two from the start rank.
#[inline]
pub const fn pawn_push_naive(color: Color, square: Square) -> Bitboard {
    let bb = square_bb(square);
    let single = forward(color, bb);
    let double = forward(color, single & forward(color, start_rank(color)));
    single | double
}

/// Forward steps onto empty squares. The double step needs both the
/// intermediate and the destination square empty.
#[inline]
pub const fn pawn_pushes(color: Color, square: Square, occupied: Bitboard) -> Bitboard {
    let bb = square_bb(square);
    let single = forward(color, bb) & !occupied;
    let double = forward(color, single & forward(color, start_rank(color))) & !occupied;
    single | double
}

/// Pushes plus diagonal captures of `enemy` pieces. En passant is handled
/// by the move generator.
#[inline]
pub const fn pawn_targets(color: Color, square: Square, own: Bitboard, enemy: Bitboard) -> Bitboard {
    pawn_pushes(color, square, own | enemy) | (pawn_attacks(color, square) & enemy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::bit_utils::square_bb as bb;

    #[test]
    fn white_pawn_attacks_from_e2() {
        assert_eq!(pawn_attacks(Color::White, 12), bb(19) | bb(21));
    }

    #[test]
    fn edge_pawns_attack_one_square() {
        assert_eq!(pawn_attacks(Color::White, 8), bb(17));
        assert_eq!(pawn_attacks(Color::Black, 55), bb(46));
    }

    #[test]
    fn naive_push_from_start_rank_includes_double_step() {
        assert_eq!(pawn_push_naive(Color::White, 12), bb(20) | bb(28));
        assert_eq!(pawn_push_naive(Color::Black, 52), bb(44) | bb(36));
        assert_eq!(pawn_push_naive(Color::White, 20), bb(28));
    }

    #[test]
    fn double_push_needs_the_intermediate_square_empty() {
        // Piece on e3 blocks both e3 and e4.
        assert_eq!(pawn_pushes(Color::White, 12, bb(20)), 0);
        // Piece on e4 blocks only the double step.
        assert_eq!(pawn_pushes(Color::White, 12, bb(28)), bb(20));
        assert_eq!(pawn_pushes(Color::Black, 52, bb(44)), 0);
    }

    #[test]
    fn targets_exclude_own_pieces_on_diagonals() {
        let own = bb(21);
        let enemy = bb(19);
        assert_eq!(pawn_targets(Color::White, 12, own, enemy), bb(19) | bb(20) | bb(28));
    }
}
