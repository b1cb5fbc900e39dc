//! Immutable precomputed tables shared by every position.
//!
//! Built entirely at compile time; positions carry a `&'static Tables` so
//! there is no global initialisation order to get wrong.

use std::fmt;

use crate::bitboard::rays::RayTable;
use crate::search::zobrist::{ZobristKeys, DEFAULT_ZOBRIST_SEED};

pub struct Tables {
    pub rays: RayTable,
    pub zobrist: ZobristKeys,
    seed: u64,
}

impl Tables {
    pub const fn with_seed(seed: u64) -> Self {
        Self {
            rays: RayTable::new(),
            zobrist: ZobristKeys::with_seed(seed),
            seed,
        }
    }

    #[inline]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl fmt::Debug for Tables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tables").field("seed", &self.seed).finish()
    }
}

impl PartialEq for Tables {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed
    }
}

impl Eq for Tables {}

/// Process-wide tables used by `Position::new_game` and `Position::from_fen`.
pub static STANDARD_TABLES: Tables = Tables::with_seed(DEFAULT_ZOBRIST_SEED);

#[cfg(test)]
mod tests {
    use super::*;

    static OTHER_TABLES: Tables = Tables::with_seed(42);

    #[test]
    fn tables_compare_by_seed() {
        assert_eq!(STANDARD_TABLES.seed(), DEFAULT_ZOBRIST_SEED);
        assert_ne!(&STANDARD_TABLES, &OTHER_TABLES);
        assert_eq!(STANDARD_TABLES.rays, OTHER_TABLES.rays);
    }

    #[test]
    fn debug_output_is_compact() {
        assert_eq!(format!("{:?}", OTHER_TABLES), "Tables { seed: 42 }");
    }
}
