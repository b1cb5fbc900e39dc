use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::algebraic_to_square;

pub fn move_to_long_algebraic(mv: Move) -> String {
    mv.to_string()
}

/// Resolve `e2e4` / `a7a8q` style text against the legal moves of
/// `position`. The promotion letter is case-insensitive and required for
/// promotions.
pub fn long_algebraic_to_move(long_algebraic: &str, position: &Position) -> ChessResult<Move> {
    let err = |reason: &str| ChessErrors::invalid_move_text(long_algebraic, reason);

    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(err("expected 4 or 5 characters"));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => Some(char_to_promotion(ch).ok_or_else(|| err("invalid promotion letter"))?),
    };

    let candidates: Vec<Move> = position
        .generate_legal_moves()
        .into_iter()
        .filter(|mv| mv.from() == from && mv.to() == to)
        .collect();

    if candidates.is_empty() {
        return Err(err("no legal move between these squares"));
    }

    candidates
        .into_iter()
        .find(|mv| mv.promotion_piece() == promotion)
        .ok_or_else(|| match promotion {
            None => err("missing promotion piece"),
            Some(_) => err("move is not a promotion"),
        })
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match PieceKind::from_letter(ch)? {
        piece @ (PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen) => {
            Some(piece)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::FLAG_DOUBLE_PAWN_PUSH;

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn resolves_flags_from_the_position() {
        let p = Position::new_game();
        let mv = long_algebraic_to_move("e2e4", &p).expect("move should parse");
        assert_eq!(mv.flags(), FLAG_DOUBLE_PAWN_PUSH);
        assert_eq!(move_to_long_algebraic(mv), "e2e4");

        let castle = long_algebraic_to_move("e1g1", &pos("4k3/8/8/8/8/8/8/4K2R w K - 0 1"))
            .expect("castle should parse");
        assert!(castle.is_king_castle());

        let en_passant = long_algebraic_to_move(
            "e5d6",
            &pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1"),
        )
        .expect("en passant should parse");
        assert!(en_passant.is_en_passant());
    }

    #[test]
    fn promotion_letter_is_case_insensitive() {
        let p = pos("8/P7/8/8/8/8/8/k6K w - - 0 1");
        let lower = long_algebraic_to_move("a7a8q", &p).expect("move should parse");
        let upper = long_algebraic_to_move("a7a8Q", &p).expect("move should parse");
        assert_eq!(lower, upper);
        assert_eq!(lower.promotion_piece(), Some(PieceKind::Queen));
        assert_eq!(move_to_long_algebraic(lower), "a7a8q");

        let knight = long_algebraic_to_move("a7a8n", &p).expect("move should parse");
        assert_eq!(knight.promotion_piece(), Some(PieceKind::Knight));
    }

    #[test]
    fn rejects_bad_text_and_illegal_moves() {
        let p = Position::new_game();
        for text in ["", "e2", "e2e9", "e2e4qq", "e2e5", "e7e5", "e2e4q", "i2i4"] {
            assert!(long_algebraic_to_move(text, &p).is_err(), "accepted '{text}'");
        }
        let promo = pos("8/P7/8/8/8/8/8/k6K w - - 0 1");
        assert!(long_algebraic_to_move("a7a8", &promo).is_err());
        assert!(long_algebraic_to_move("a7a8k", &promo).is_err());
    }
}
