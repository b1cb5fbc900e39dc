//! Move generation pipeline.
//!
//! One traversal serves every variant: pseudo-legal or legal, all moves or
//! captures only. When the side to move is in check, legal generation only
//! considers destinations that capture the checker or block its ray (king
//! moves aside); under double check only the king moves.

use crate::bitboard::bit_utils::{square_bb, squares};
use crate::game_state::chess_rules::MOVE_RULE_HALFMOVES;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::CheckInfo;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::moves::move_descriptions::{Move, MoveList, FLAG_CAPTURE, FLAG_QUIET};
use crate::moves::targets::piece_targets;

const NON_PAWN_NON_KING: [PieceKind; 4] = [
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

/// Shared state for one generation pass.
pub(crate) struct GenerationContext<'a> {
    pub position: &'a Position,
    pub us: Color,
    pub own: Bitboard,
    pub enemy: Bitboard,
    pub legal_only: bool,
    pub captures_only: bool,
    pub check: Option<CheckInfo>,
    /// Allowed destinations for pieces other than the king.
    pub evasion_mask: Bitboard,
    pub moves: MoveList,
}

impl<'a> GenerationContext<'a> {
    fn new(position: &'a Position, legal_only: bool, captures_only: bool) -> Self {
        let us = position.side_to_move();
        let check = if legal_only {
            position.check_info(us)
        } else {
            None
        };
        let evasion_mask = match (check, position.king_square(us)) {
            (Some(check), _) if check.double_check => 0,
            (Some(check), Some(king)) if check.checker.is_slider() => {
                square_bb(check.checker_square)
                    | position.tables().rays.between(king, check.checker_square)
            }
            (Some(check), _) => square_bb(check.checker_square),
            (None, _) => !0,
        };

        Self {
            position,
            us,
            own: position.occupied(us),
            enemy: position.occupied(us.opposite()),
            legal_only,
            captures_only,
            check,
            evasion_mask,
            moves: MoveList::with_capacity(64),
        }
    }

    /// Destinations allowed for non-king pieces before legality filtering.
    #[inline]
    pub fn destination_mask(&self) -> Bitboard {
        let mask = if self.captures_only { self.enemy } else { !0 };
        mask & self.evasion_mask
    }

    #[inline]
    pub fn flags_for(&self, to: Square) -> u8 {
        if self.enemy & square_bb(to) != 0 {
            FLAG_CAPTURE
        } else {
            FLAG_QUIET
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        if !self.legal_only || self.position.is_legal_with(mv, self.check) {
            self.moves.push(mv);
        }
    }
}

fn generate(position: &Position, legal_only: bool, captures_only: bool) -> MoveList {
    let mut ctx = GenerationContext::new(position, legal_only, captures_only);
    let rays = &position.tables().rays;

    generate_pawn_moves(&mut ctx);

    if ctx.evasion_mask != 0 {
        for piece in NON_PAWN_NON_KING {
            for from in squares(position.pieces(ctx.us, piece)) {
                let targets = piece_targets(rays, ctx.us, piece, from, ctx.own, ctx.enemy)
                    & ctx.destination_mask();
                for to in squares(targets) {
                    let flags = ctx.flags_for(to);
                    ctx.push(Move::new(from, to, flags));
                }
            }
        }
    }

    generate_king_moves(&mut ctx);

    ctx.moves
}

impl Position {
    pub fn generate_legal_moves(&self) -> MoveList {
        generate(self, true, false)
    }

    /// Moves obeying piece movement rules without the king-safety filter.
    /// Castling appears when the right is held and the path is empty.
    pub fn generate_pseudo_legal_moves(&self) -> MoveList {
        generate(self, false, false)
    }

    /// Pseudo-legal captures, including en passant and capturing promotions.
    pub fn generate_captures(&self) -> MoveList {
        generate(self, false, true)
    }

    /// Legal subset of `generate_captures`.
    pub fn generate_legal_captures(&self) -> MoveList {
        generate(self, true, true)
    }

    pub fn has_legal_moves(&self) -> bool {
        !self.generate_legal_moves().is_empty()
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_in_check(self.side_to_move()) && !self.has_legal_moves()
    }

    /// No legal move while not in check.
    pub fn is_stalemate_by_no_moves(&self) -> bool {
        !self.is_in_check(self.side_to_move()) && !self.has_legal_moves()
    }

    pub fn is_move_rule_draw(&self) -> bool {
        self.halfmove_clock() >= MOVE_RULE_HALFMOVES
    }

    /// Stalemate in the wide sense: no legal moves while not in check, or
    /// the half-move clock reached the move-rule limit.
    pub fn is_stalemate(&self) -> bool {
        self.is_move_rule_draw() || self.is_stalemate_by_no_moves()
    }

    pub fn is_game_over(&self) -> bool {
        self.is_move_rule_draw() || !self.has_legal_moves()
    }
}
