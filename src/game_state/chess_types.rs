//! Primitive chess types shared by every subsystem.

/// 64-bit set of squares, bit `i` set for square `i` (a1 = 0 ... h8 = 63).
pub type Bitboard = u64;

/// Board square index (`0..=63`).
pub type Square = u8;

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// +1 for White, -1 for Black.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

/// Piece kind (color is represented separately for cache-friendly layouts).
///
/// The discriminant order is the order used by the Zobrist key layout and the
/// evaluation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Rook => 1,
            PieceKind::Knight => 2,
            PieceKind::Bishop => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen)
    }

    /// Uppercase letter used by FEN and SAN (`P`, `R`, `N`, `B`, `Q`, `K`).
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'R' => Some(PieceKind::Rook),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// Index into the 12-entry (color, piece) tables: white pieces `0..6`,
/// black pieces `6..12`.
#[inline]
pub const fn colored_piece_index(color: Color, piece: PieceKind) -> usize {
    color.index() * 6 + piece.index()
}

/// Compact castling rights bitmask.
pub type CastlingRights = u8;

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights = 0b1111;

#[inline]
pub const fn square_file(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn square_rank(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn square_from_file_rank(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colored_piece_index_separates_colors() {
        assert_eq!(colored_piece_index(Color::White, PieceKind::Pawn), 0);
        assert_eq!(colored_piece_index(Color::White, PieceKind::King), 5);
        assert_eq!(colored_piece_index(Color::Black, PieceKind::Pawn), 6);
        assert_eq!(colored_piece_index(Color::Black, PieceKind::King), 11);
    }

    #[test]
    fn letters_round_trip() {
        for piece in PieceKind::ALL {
            assert_eq!(PieceKind::from_letter(piece.letter()), Some(piece));
            assert_eq!(
                PieceKind::from_letter(piece.letter().to_ascii_lowercase()),
                Some(piece)
            );
        }
        assert_eq!(PieceKind::from_letter('x'), None);
    }

    #[test]
    fn file_and_rank_of_square() {
        assert_eq!(square_file(28), 4);
        assert_eq!(square_rank(28), 3);
        assert_eq!(square_from_file_rank(4, 3), 28);
    }
}
