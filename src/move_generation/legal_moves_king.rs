use crate::bitboard::bit_utils::{square_bb, squares};
use crate::game_state::chess_rules::castling_geometry;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::GenerationContext;
use crate::moves::king_moves::king_targets;
use crate::moves::move_descriptions::{Move, FLAG_KING_CASTLE, FLAG_QUEEN_CASTLE};

pub(crate) fn generate_king_moves(ctx: &mut GenerationContext) {
    let Some(from) = ctx.position.king_square(ctx.us) else {
        return;
    };

    let mask = if ctx.captures_only { ctx.enemy } else { !0 };
    for to in squares(king_targets(from, ctx.own) & mask) {
        let flags = ctx.flags_for(to);
        ctx.push(Move::new(from, to, flags));
    }

    if !ctx.captures_only && ctx.check.is_none() {
        generate_castling_moves(ctx, from);
    }
}

/// Castles whose right is held and whose path is empty. Attacked transit
/// squares are rejected by the legality filter.
fn generate_castling_moves(ctx: &mut GenerationContext, king: Square) {
    let position = ctx.position;
    let occupied = position.all_occupied();
    let rooks = position.pieces(ctx.us, PieceKind::Rook);

    for (kingside, flag) in [(true, FLAG_KING_CASTLE), (false, FLAG_QUEEN_CASTLE)] {
        let geometry = castling_geometry(ctx.us, kingside);
        if position.has_castling_right(geometry.right)
            && king == geometry.king_from
            && rooks & square_bb(geometry.rook_from) != 0
            && occupied & geometry.must_be_empty == 0
        {
            ctx.push(Move::new(geometry.king_from, geometry.king_to, flag));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::game_state::position::Position;
    use crate::moves::move_descriptions::Move;

    fn castles(fen: &str) -> Vec<Move> {
        Position::from_fen(fen)
            .expect("FEN should parse")
            .generate_legal_moves()
            .into_iter()
            .filter(|mv| mv.is_castle())
            .collect()
    }

    #[test]
    fn both_castles_when_path_is_clear() {
        let moves = castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|mv| mv.is_king_castle() && mv.to() == 6));
        assert!(moves.iter().any(|mv| mv.is_queen_castle() && mv.to() == 2));
    }

    #[test]
    fn no_castling_out_of_check_or_through_attack() {
        assert!(castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .iter()
            .all(|mv| mv.from() == 4));
        // Rook e8 checks the king.
        assert!(castles("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").is_empty());
        // Rook f8 covers f1; queenside remains.
        let moves = castles("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(moves.len(), 1);
        assert!(moves[0].is_queen_castle());
    }

    #[test]
    fn b1_may_be_attacked_for_queenside_castling() {
        let moves = castles("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn pseudo_legal_castles_skip_safety_checks() {
        let p = Position::from_fen("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let pseudo = p
            .generate_pseudo_legal_moves()
            .into_iter()
            .filter(|mv| mv.is_castle())
            .count();
        assert_eq!(pseudo, 2);
    }
}
