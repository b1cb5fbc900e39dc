//! Zobrist hashing support for fast position identity.
//!
//! The 781 keys are generated from a fixed seed so hashes are deterministic
//! across runs, which is useful for testing and for persisted tables. Layout:
//! `color_piece * 64 + square` for the 768 piece keys, then the four castling
//! rights, then eight en-passant files, then the side-to-move key.

use crate::bitboard::bit_utils::squares;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub const ZOBRIST_KEY_COUNT: usize = 781;
pub const DEFAULT_ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

const CASTLING_BASE: usize = 768;
const EN_PASSANT_BASE: usize = 772;
const SIDE_TO_MOVE_INDEX: usize = 780;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristKeys {
    keys: [u64; ZOBRIST_KEY_COUNT],
}

impl ZobristKeys {
    pub const fn with_seed(seed: u64) -> Self {
        let mut keys = [0u64; ZOBRIST_KEY_COUNT];
        let mut state = seed;
        let mut i = 0;
        while i < ZOBRIST_KEY_COUNT {
            let (next_state, value) = next_random_u64(state);
            state = next_state;
            keys[i] = value;
            i += 1;
        }
        Self { keys }
    }

    /// Raw key by layout index.
    #[inline]
    pub const fn key(&self, index: usize) -> u64 {
        self.keys[index]
    }

    #[inline]
    pub const fn piece_square(&self, color: Color, piece: PieceKind, square: Square) -> u64 {
        self.keys[colored_piece_index(color, piece) * 64 + square as usize]
    }

    /// XOR of the keys for every right present in `rights`.
    #[inline]
    pub const fn castling(&self, rights: CastlingRights) -> u64 {
        let mut key = 0u64;
        let mut bit = 0;
        while bit < 4 {
            if rights & (1 << bit) != 0 {
                key ^= self.keys[CASTLING_BASE + bit];
            }
            bit += 1;
        }
        key
    }

    #[inline]
    pub const fn en_passant_file(&self, file: u8) -> u64 {
        self.keys[EN_PASSANT_BASE + file as usize]
    }

    /// Toggle key, XORed in when Black is to move.
    #[inline]
    pub const fn side_to_move(&self) -> u64 {
        self.keys[SIDE_TO_MOVE_INDEX]
    }
}

// splitmix64
#[inline]
const fn next_random_u64(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (state, z ^ (z >> 31))
}

/// Compute the full position Zobrist key from scratch.
pub fn compute_zobrist_key(position: &Position) -> u64 {
    let keys = &position.tables().zobrist;
    let mut key = 0u64;

    for color in Color::ALL {
        for piece in PieceKind::ALL {
            for sq in squares(position.pieces(color, piece)) {
                key ^= keys.piece_square(color, piece, sq);
            }
        }
    }

    if position.side_to_move() == Color::Black {
        key ^= keys.side_to_move();
    }

    key ^= keys.castling(position.castling_rights());

    if let Some(file) = position.en_passant_file() {
        key ^= keys.en_passant_file(file);
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::position::Position;

    #[test]
    fn keys_are_fixed_for_a_seed() {
        let keys = ZobristKeys::with_seed(0);
        assert_eq!(keys.key(0), 0xE220_A839_7B1D_CDAF);
        assert_eq!(keys.key(100), 0x8176_DAF8_00A0_5F50);
        assert_eq!(keys.key(200), 0x566F_32CC_E830_1D95);
        assert_eq!(keys.key(300), 0xDAA5_F80F_E9D0_F70D);
        assert_eq!(keys.key(780), 0xCC5D_77CD_FDF2_F139);

        let standard = ZobristKeys::with_seed(DEFAULT_ZOBRIST_SEED);
        assert_eq!(standard.key(100), 0x8BD8_FF7A_0385_CDBC);
        assert_eq!(standard.key(200), 0xC880_1880_83D9_BA21);
        assert_eq!(standard.key(300), 0x45AB_1A6A_22D6_BC17);
    }

    #[test]
    fn different_seeds_give_different_keys() {
        assert_ne!(ZobristKeys::with_seed(1), ZobristKeys::with_seed(2));
    }

    #[test]
    fn castling_key_is_xor_of_single_rights() {
        let keys = ZobristKeys::with_seed(7);
        assert_eq!(keys.castling(0), 0);
        assert_eq!(
            keys.castling(CASTLE_ALL),
            keys.castling(CASTLE_WHITE_KINGSIDE)
                ^ keys.castling(CASTLE_WHITE_QUEENSIDE)
                ^ keys.castling(CASTLE_BLACK_KINGSIDE)
                ^ keys.castling(CASTLE_BLACK_QUEENSIDE)
        );
    }

    #[test]
    fn starting_position_hash_is_deterministic() {
        let a = Position::new_game();
        let b = Position::new_game();
        assert_eq!(a.zobrist_key(), b.zobrist_key());
        assert_eq!(a.zobrist_key(), compute_zobrist_key(&a));
    }

    #[test]
    fn side_to_move_changes_hash() {
        let w = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let b = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_eq!(w.zobrist_key() ^ b.zobrist_key(), w.tables().zobrist.side_to_move());
    }

    #[test]
    fn castling_rights_change_hash() {
        let with_rights =
            Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let without_rights =
            Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        assert_ne!(with_rights.zobrist_key(), without_rights.zobrist_key());
    }

    #[test]
    fn en_passant_file_changes_hash() {
        let no_ep =
            Position::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - - 0 1").expect("FEN should parse");
        let ep = Position::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        assert_ne!(no_ep.zobrist_key(), ep.zobrist_key());
    }
}
