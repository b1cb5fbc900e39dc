use crate::bitboard::bit_utils::{square_bb, squares, RANK_1, RANK_8};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::en_passant_victim;
use crate::move_generation::legal_move_generator::GenerationContext;
use crate::moves::move_descriptions::{
    Move, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT, PROMOTION_PIECES,
};
use crate::moves::pawn_moves::{pawn_attacks, pawn_targets};

pub(crate) fn generate_pawn_moves(ctx: &mut GenerationContext) {
    let us = ctx.us;
    let pawns = ctx.position.pieces(us, PieceKind::Pawn);
    let last_rank = match us {
        Color::White => RANK_8,
        Color::Black => RANK_1,
    };

    if ctx.evasion_mask != 0 {
        for from in squares(pawns) {
            let targets = pawn_targets(us, from, ctx.own, ctx.enemy) & ctx.destination_mask();
            for to in squares(targets) {
                let mut flags = ctx.flags_for(to);
                if from.abs_diff(to) == 16 {
                    flags = FLAG_DOUBLE_PAWN_PUSH;
                }
                let mv = Move::new(from, to, flags);

                if square_bb(to) & last_rank != 0 {
                    for piece in PROMOTION_PIECES {
                        ctx.push(mv.with_promotion(piece));
                    }
                } else {
                    ctx.push(mv);
                }
            }
        }
    }

    // The en-passant destination lies outside the evasion mask even when the
    // capture removes the checker, so legality decides.
    let Some(target) = ctx.position.en_passant_square() else {
        return;
    };
    let Some(victim) = en_passant_victim(us, target) else {
        return;
    };
    if ctx.position.pieces(us.opposite(), PieceKind::Pawn) & square_bb(victim) == 0 {
        return;
    }
    for from in squares(pawn_attacks(us.opposite(), target) & pawns) {
        ctx.push(Move::new(from, target, FLAG_EN_PASSANT));
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::chess_types::PieceKind;
    use crate::game_state::position::Position;
    use crate::moves::move_descriptions::Move;

    fn pawn_moves(fen: &str) -> Vec<Move> {
        let p = Position::from_fen(fen).expect("FEN should parse");
        p.generate_legal_moves()
            .into_iter()
            .filter(|mv| p.piece_at(mv.from()).is_some_and(|(_, piece)| piece == PieceKind::Pawn))
            .collect()
    }

    #[test]
    fn start_rank_pawns_get_single_and_double_pushes() {
        let moves = pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|mv| mv.is_double_pawn_push() && mv.to() == 28));
    }

    #[test]
    fn blocked_intermediate_square_stops_the_double_push() {
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(moves.is_empty());
    }

    #[test]
    fn black_pawns_push_downward_and_promote() {
        let moves = pawn_moves("4k3/8/8/8/8/8/p7/4K3 b - - 0 1");
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|mv| mv.to() == 0 && mv.is_promotion()));
    }

    #[test]
    fn en_passant_from_both_sides() {
        let moves = pawn_moves("4k3/8/8/3PpP2/8/8/8/4K3 w - e6 0 1");
        let en_passant: Vec<&Move> = moves.iter().filter(|mv| mv.is_en_passant()).collect();
        assert_eq!(en_passant.len(), 2);
        assert!(en_passant.iter().all(|mv| mv.to() == 44));
    }

    #[test]
    fn en_passant_can_capture_a_checking_pawn() {
        // d5 pawn gives check to the e4 king; exd6 removes it.
        let p = Position::from_fen("8/8/8/3pP3/4K3/8/8/7k w - d6 0 1").expect("FEN should parse");
        assert!(p.is_in_check(p.side_to_move()));
        assert!(p
            .generate_legal_moves()
            .iter()
            .any(|mv| mv.is_en_passant() && mv.to() == 43));
    }
}
