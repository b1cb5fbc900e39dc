//! Move application producing a new `Position`.
//!
//! The parent position is never modified. Occupancy, evaluation accumulators
//! and the Zobrist key are updated incrementally through the position's
//! placement primitives.

use crate::bitboard::bit_utils::square_bb;
use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::{castling_geometry, rights_revoked_by_square};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::en_passant_victim;
use crate::moves::move_descriptions::Move;

impl Position {
    /// Apply `mv` after checking it against the legal move list.
    pub fn apply_move(&self, mv: Move) -> ChessResult<Position> {
        if !self.generate_legal_moves().contains(&mv) {
            return Err(ChessErrors::IllegalMove {
                mv,
                fen: self.to_fen(),
            });
        }
        Ok(self.make_move(mv))
    }

    /// Apply a move produced by this position's generator without the legal
    /// list lookup of `apply_move`.
    ///
    /// # Panics
    ///
    /// When the origin holds no piece of the side to move, or the
    /// destination holds one.
    pub fn make_move(&self, mv: Move) -> Position {
        let us = self.side_to_move();
        let them = us.opposite();
        let from = mv.from();
        let to = mv.to();

        let Some(piece) = self.piece_kind_on(us, from) else {
            panic!("move {mv} has no {us:?} piece on its origin in {}", self.to_fen());
        };
        assert!(
            self.occupied(us) & square_bb(to) == 0,
            "move {mv} lands on a {us:?} piece in {}",
            self.to_fen()
        );

        let mut next = self.clone();
        let mut captured = false;

        if mv.is_en_passant() {
            if let Some(victim) = en_passant_victim(us, to)
                .filter(|&victim| self.pieces(them, PieceKind::Pawn) & square_bb(victim) != 0)
            {
                next.remove_piece(them, PieceKind::Pawn, victim);
                captured = true;
            }
        } else if let Some(victim) = self.piece_kind_on(them, to) {
            next.remove_piece(them, victim, to);
            captured = true;
        }

        let placed = match mv.promotion_piece() {
            Some(promoted) if piece == PieceKind::Pawn => promoted,
            _ => piece,
        };
        next.remove_piece(us, piece, from);
        next.put_piece(us, placed, to);

        if mv.is_castle() && piece == PieceKind::King {
            let geometry = castling_geometry(us, mv.is_king_castle());
            if self.pieces(us, PieceKind::Rook) & square_bb(geometry.rook_from) != 0 {
                next.move_piece(us, PieceKind::Rook, geometry.rook_from, geometry.rook_to);
            }
        }

        next.set_castling_rights(
            self.castling_rights() & !rights_revoked_by_square(from) & !rights_revoked_by_square(to),
        );

        let double_push = piece == PieceKind::Pawn && from.abs_diff(to) == 16;
        next.set_en_passant_file(double_push.then_some(square_file(from)));

        let halfmove_clock = if piece == PieceKind::Pawn || captured {
            0
        } else {
            self.halfmove_clock().saturating_add(1)
        };
        let fullmove_number = match us {
            Color::White => self.fullmove_number(),
            Color::Black => self.fullmove_number().saturating_add(1),
        };
        next.set_clocks(halfmove_clock, fullmove_number);
        next.set_side_to_move(them);

        next
    }
}
