//! Packed 16-bit move encoding.
//!
//! Bits `0..6` hold the origin square, bits `6..12` the destination and bits
//! `12..16` a flag nibble:
//!
//! | flags  | meaning                                   |
//! |--------|-------------------------------------------|
//! | 0      | quiet move                                |
//! | 1      | double pawn push                          |
//! | 2 / 3  | king-side / queen-side castle             |
//! | 4      | capture                                   |
//! | 5      | en-passant capture                        |
//! | 8..=11 | promotion to knight, bishop, rook, queen  |
//! | 12..=15| promotion with capture                    |

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

const FROM_SHIFT: u16 = 0;
const TO_SHIFT: u16 = 6;
const FLAGS_SHIFT: u16 = 12;
const SQUARE_MASK: u16 = 0x3F;

pub const FLAG_QUIET: u8 = 0;
pub const FLAG_DOUBLE_PAWN_PUSH: u8 = 1;
pub const FLAG_KING_CASTLE: u8 = 2;
pub const FLAG_QUEEN_CASTLE: u8 = 3;
pub const FLAG_CAPTURE: u8 = 4;
pub const FLAG_EN_PASSANT: u8 = 5;
pub const FLAG_PROMOTION: u8 = 8;

pub const PROMOTION_PIECES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

pub type MoveList = Vec<Move>;

impl Move {
    /// All-zero encoding (a1 to a1); never produced by the generator.
    pub const NULL: Move = Move(0);

    #[inline]
    pub const fn new(from: Square, to: Square, flags: u8) -> Self {
        Move(
            ((from as u16 & SQUARE_MASK) << FROM_SHIFT)
                | ((to as u16 & SQUARE_MASK) << TO_SHIFT)
                | (((flags & 0x0F) as u16) << FLAGS_SHIFT),
        )
    }

    #[inline]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move::new(from, to, FLAG_QUIET)
    }

    #[inline]
    pub const fn capture(from: Square, to: Square) -> Self {
        Move::new(from, to, FLAG_CAPTURE)
    }

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Move(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn flags(self) -> u8 {
        (self.0 >> FLAGS_SHIFT) as u8
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.flags() & FLAG_CAPTURE != 0
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.flags() & FLAG_PROMOTION != 0
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.flags() == FLAG_EN_PASSANT
    }

    #[inline]
    pub const fn is_double_pawn_push(self) -> bool {
        self.flags() == FLAG_DOUBLE_PAWN_PUSH
    }

    #[inline]
    pub const fn is_king_castle(self) -> bool {
        self.flags() == FLAG_KING_CASTLE
    }

    #[inline]
    pub const fn is_queen_castle(self) -> bool {
        self.flags() == FLAG_QUEEN_CASTLE
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.is_king_castle() || self.is_queen_castle()
    }

    #[inline]
    pub const fn is_quiet(self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }

    pub const fn promotion_piece(self) -> Option<PieceKind> {
        if !self.is_promotion() {
            return None;
        }
        Some(match self.flags() & 0b11 {
            0 => PieceKind::Knight,
            1 => PieceKind::Bishop,
            2 => PieceKind::Rook,
            _ => PieceKind::Queen,
        })
    }

    /// Same move with the promotion bits set for `piece`; the capture bit is
    /// kept. Pawns and kings are not promotion targets and leave the move
    /// unchanged.
    pub const fn with_promotion(self, piece: PieceKind) -> Self {
        let code = match piece {
            PieceKind::Knight => 0,
            PieceKind::Bishop => 1,
            PieceKind::Rook => 2,
            PieceKind::Queen => 3,
            PieceKind::Pawn | PieceKind::King => return self,
        };
        let flags = (self.flags() & FLAG_CAPTURE) | FLAG_PROMOTION | code;
        Move::new(self.from(), self.to(), flags)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            square_to_algebraic(self.from()),
            square_to_algebraic(self.to())
        )?;
        if let Some(piece) = self.promotion_piece() {
            write!(f, "{}", piece.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self} flags={})", self.flags())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_from_to_and_flags() {
        let mv = Move::new(12, 28, FLAG_DOUBLE_PAWN_PUSH);
        assert_eq!(mv.from(), 12);
        assert_eq!(mv.to(), 28);
        assert!(mv.is_double_pawn_push());
        assert!(!mv.is_capture());
        assert!(mv.is_quiet());
        assert_eq!(mv.raw(), 12 | (28 << 6) | (1 << 12));
    }

    #[test]
    fn promotion_round_trips_for_every_piece() {
        for piece in PROMOTION_PIECES {
            let quiet = Move::quiet(52, 60).with_promotion(piece);
            assert_eq!(quiet.promotion_piece(), Some(piece));
            assert!(!quiet.is_capture());

            let capture = Move::capture(52, 61).with_promotion(piece);
            assert_eq!(capture.promotion_piece(), Some(piece));
            assert!(capture.is_capture());
            assert!(!capture.is_en_passant());
        }
    }

    #[test]
    fn queen_promotion_uses_the_high_codes() {
        assert_eq!(Move::quiet(52, 60).with_promotion(PieceKind::Queen).flags(), 11);
        assert_eq!(Move::capture(52, 61).with_promotion(PieceKind::Knight).flags(), 12);
    }

    #[test]
    fn pawn_or_king_promotion_is_rejected() {
        let mv = Move::quiet(52, 60);
        assert_eq!(mv.with_promotion(PieceKind::King), mv);
        assert_eq!(mv.promotion_piece(), None);
    }

    #[test]
    fn special_flags_are_distinct() {
        let ep = Move::new(36, 43, FLAG_EN_PASSANT);
        assert!(ep.is_en_passant());
        assert!(ep.is_capture());
        assert!(!ep.is_promotion());

        assert!(Move::new(4, 6, FLAG_KING_CASTLE).is_castle());
        assert!(Move::new(4, 2, FLAG_QUEEN_CASTLE).is_queen_castle());
        assert!(!Move::new(4, 2, FLAG_QUEEN_CASTLE).is_capture());
    }

    #[test]
    fn displays_as_long_algebraic() {
        assert_eq!(Move::new(12, 28, FLAG_DOUBLE_PAWN_PUSH).to_string(), "e2e4");
        assert_eq!(
            Move::quiet(48, 56).with_promotion(PieceKind::Queen).to_string(),
            "a7a8q"
        );
    }
}
