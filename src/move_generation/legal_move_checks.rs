//! Attack queries, check detection and single-move legality.
//!
//! `is_legal` expects a pseudo-legal move (one the pseudo-legal generator
//! could produce) and answers whether it leaves the mover's king safe.

use crate::bitboard::bit_utils::{count_bits, first_set_bit, square_bb};
use crate::bitboard::rays::RayTable;
use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;
use crate::moves::targets::all_targets;

/// Details of a check against one side's king.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInfo {
    /// Kind of the first checking piece found.
    pub checker: PieceKind,
    pub checker_square: Square,
    pub double_check: bool,
}

impl Position {
    /// Pieces of `attacker` that attack `square`, with `occupied` as the
    /// blocker set for sliding pieces.
    pub fn attackers_to(&self, square: Square, attacker: Color, occupied: Bitboard) -> Bitboard {
        let rays = &self.tables().rays;
        PieceKind::ALL.into_iter().fold(0, |acc, piece| {
            acc | (reverse_attacks(rays, attacker, piece, square, occupied)
                & self.pieces(attacker, piece))
        })
    }

    pub fn is_square_attacked(&self, square: Square, attacker: Color, occupied: Bitboard) -> bool {
        let rays = &self.tables().rays;
        PieceKind::ALL.into_iter().any(|piece| {
            reverse_attacks(rays, attacker, piece, square, occupied) & self.pieces(attacker, piece)
                != 0
        })
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.is_square_attacked(king, color.opposite(), self.all_occupied()),
            None => false,
        }
    }

    /// Checking piece, its square and whether a second checker exists.
    pub fn check_info(&self, color: Color) -> Option<CheckInfo> {
        let king = self.king_square(color)?;
        let them = color.opposite();
        let rays = &self.tables().rays;
        let occupied = self.all_occupied();

        let mut first: Option<(PieceKind, Square)> = None;
        let mut count = 0;
        for piece in PieceKind::ALL {
            let hits = reverse_attacks(rays, them, piece, king, occupied) & self.pieces(them, piece);
            if hits == 0 {
                continue;
            }
            count += count_bits(hits);
            if first.is_none() {
                first = first_set_bit(hits).map(|sq| (piece, sq));
            }
            if count >= 2 {
                break;
            }
        }

        first.map(|(checker, checker_square)| CheckInfo {
            checker,
            checker_square,
            double_check: count >= 2,
        })
    }

    /// Whether `mv` leaves the opponent in check.
    pub fn gives_check(&self, mv: Move) -> bool {
        let next = self.make_move(mv);
        next.is_in_check(next.side_to_move())
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.is_legal_with(mv, self.check_info(self.side_to_move()))
    }

    /// `is_legal` with the side to move's check state precomputed.
    pub(crate) fn is_legal_with(&self, mv: Move, check: Option<CheckInfo>) -> bool {
        let us = self.side_to_move();
        let them = us.opposite();
        let from = mv.from();
        let to = mv.to();
        let to_bb = square_bb(to);

        let Some(piece) = self.piece_kind_on(us, from) else {
            return false;
        };
        if self.occupied(us) & to_bb != 0 {
            return false;
        }
        let Some(king) = self.king_square(us) else {
            return true;
        };

        if mv.is_castle() {
            return piece == PieceKind::King && check.is_none() && self.castle_path_is_safe(mv);
        }

        if piece == PieceKind::King {
            let occupied = self.all_occupied() & !square_bb(from);
            return !self.is_square_attacked(to, them, occupied);
        }

        let rays = &self.tables().rays;
        let captured_square = if mv.is_en_passant() {
            match en_passant_victim(us, to) {
                Some(square) => Some(square),
                None => return false,
            }
        } else {
            None
        };

        if let Some(check) = check {
            if check.double_check {
                return false;
            }
            let mut allowed = square_bb(check.checker_square);
            if check.checker.is_slider() {
                allowed |= rays.between(king, check.checker_square);
            }
            let removes_checker = captured_square == Some(check.checker_square);
            if allowed & to_bb == 0 && !removes_checker {
                return false;
            }
        }

        if let Some(captured_square) = captured_square {
            // Both pawns leave their squares at once, which can open a rank,
            // file or diagonal onto the king.
            let occupied =
                (self.all_occupied() & !square_bb(from) & !square_bb(captured_square)) | to_bb;
            let diagonal = self.pieces(them, PieceKind::Bishop) | self.pieces(them, PieceKind::Queen);
            let straight = self.pieces(them, PieceKind::Rook) | self.pieces(them, PieceKind::Queen);
            return bishop_attacks(rays, king, occupied) & diagonal == 0
                && rook_attacks(rays, king, occupied) & straight == 0;
        }

        match self.pin_line(king, from) {
            Some(line) => line & to_bb != 0,
            None => true,
        }
    }

    /// If the piece on `from` is pinned to the king on `king`, the squares it
    /// may still move to: the line between them plus the pinner.
    pub(crate) fn pin_line(&self, king: Square, from: Square) -> Option<Bitboard> {
        let rays = &self.tables().rays;
        let occupied = self.all_occupied();
        let them = self.side_to_move().opposite();

        let dir = rays.direction_between(king, from)?;
        if rays.first_blocker(dir, king, occupied) != Some(from) {
            return None;
        }
        let pinner = rays.first_blocker(dir, from, occupied)?;
        let pinner_kind = self.piece_kind_on(them, pinner)?;
        let aligned = match pinner_kind {
            PieceKind::Queen => true,
            PieceKind::Bishop => dir.is_diagonal(),
            PieceKind::Rook => !dir.is_diagonal(),
            _ => false,
        };
        if !aligned {
            return None;
        }
        Some(rays.ray(dir, king) & !rays.ray(dir, pinner))
    }

    /// Castling preconditions other than "not in check": right held, rook
    /// home, path empty and the king's transit squares unattacked.
    fn castle_path_is_safe(&self, mv: Move) -> bool {
        let us = self.side_to_move();
        let geometry = castling_geometry(us, mv.is_king_castle());
        if mv.from() != geometry.king_from
            || mv.to() != geometry.king_to
            || !self.has_castling_right(geometry.right)
            || self.pieces(us, PieceKind::Rook) & square_bb(geometry.rook_from) == 0
            || self.all_occupied() & geometry.must_be_empty != 0
        {
            return false;
        }
        let attacked = all_targets(&self.tables().rays, us.opposite(), self.piece_layout());
        attacked & geometry.must_be_safe == 0
    }
}

/// Squares from which a piece of `attacker` would attack `square`.
#[inline]
fn reverse_attacks(
    rays: &RayTable,
    attacker: Color,
    piece: PieceKind,
    square: Square,
    occupied: Bitboard,
) -> Bitboard {
    match piece {
        // A pawn attacks `square` from where a defending pawn would capture.
        PieceKind::Pawn => pawn_attacks(attacker.opposite(), square),
        PieceKind::Rook => rook_attacks(rays, square, occupied),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(rays, square, occupied),
        PieceKind::Queen => queen_attacks(rays, square, occupied),
        PieceKind::King => king_attacks(square),
    }
}

/// Square of the pawn removed by an en-passant capture landing on `to`, or
/// `None` when that square would be off the board.
#[inline]
pub(crate) const fn en_passant_victim(mover: Color, to: Square) -> Option<Square> {
    let victim = match mover {
        Color::White => to.checked_sub(8),
        Color::Black => to.checked_add(8),
    };
    match victim {
        Some(square) if square < 64 => Some(square),
        _ => None,
    }
}
