//! Tapered material + piece-square evaluation.
//!
//! Every position carries two running sums, one for the opening and one for
//! the endgame, each the signed total of material and piece-square values of
//! all pieces on the board (positive favors White). `Position::put_piece` and
//! `Position::remove_piece` keep them current, so `evaluate` only has to blend
//! the two by game phase.

use crate::bitboard::bit_utils::squares;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::search::piece_square_tables::*;

/// Material values in `PieceKind` order, identical for both phases.
pub const MATERIAL_VALUES: [i32; 6] = [100, 500, 320, 330, 900, 20000];

/// Non-pawn material weights used to measure game phase.
pub const PHASE_WEIGHTS: [i32; 6] = [0, 2, 1, 1, 4, 0];

/// Phase weight of the full starting material (4 minors, 4 rooks, 2 queens).
pub const TOTAL_PHASE: i32 = 24;

/// Phase value of a bare-kings endgame.
pub const MAX_PHASE: i32 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Opening,
    Endgame,
}

const fn white_table(phase: GamePhase, piece: PieceKind) -> &'static [i32; 64] {
    match (piece, phase) {
        (PieceKind::Pawn, GamePhase::Opening) => &PAWN_OPENING,
        (PieceKind::Pawn, GamePhase::Endgame) => &PAWN_ENDGAME,
        (PieceKind::Rook, _) => &ROOK,
        (PieceKind::Knight, _) => &KNIGHT,
        (PieceKind::Bishop, _) => &BISHOP,
        (PieceKind::Queen, _) => &QUEEN,
        (PieceKind::King, GamePhase::Opening) => &KING_OPENING,
        (PieceKind::King, GamePhase::Endgame) => &KING_ENDGAME,
    }
}

/// Signed contribution of one piece on one square (material + placement).
#[inline]
pub const fn feature_value(phase: GamePhase, color: Color, piece: PieceKind, square: Square) -> i32 {
    let index = match color {
        Color::White => square,
        Color::Black => square ^ 56,
    };
    color.sign() * (MATERIAL_VALUES[piece.index()] + white_table(phase, piece)[index as usize])
}

/// Blend opening and endgame scores; `phase` 0 is pure opening, 256 pure
/// endgame. Division truncates toward zero.
#[inline]
pub const fn interpolate(opening: i32, endgame: i32, phase: i32) -> i32 {
    (opening * (MAX_PHASE - phase) + endgame * phase) / MAX_PHASE
}

/// Phase from the non-pawn material in `pieces`. Extra material from
/// promotions saturates at the opening end.
pub fn phase_of(pieces: &[[Bitboard; 6]; 2]) -> i32 {
    let remaining: i32 = PieceKind::ALL
        .into_iter()
        .map(|piece| {
            let count = pieces[0][piece.index()].count_ones() + pieces[1][piece.index()].count_ones();
            count as i32 * PHASE_WEIGHTS[piece.index()]
        })
        .sum();
    let missing = (TOTAL_PHASE - remaining).max(0);
    (missing * MAX_PHASE + TOTAL_PHASE / 2) / TOTAL_PHASE
}

/// Both accumulators summed from scratch.
pub fn compute_accumulators(position: &Position) -> (i32, i32) {
    let mut opening = 0;
    let mut endgame = 0;
    for color in Color::ALL {
        for piece in PieceKind::ALL {
            for sq in squares(position.pieces(color, piece)) {
                opening += feature_value(GamePhase::Opening, color, piece, sq);
                endgame += feature_value(GamePhase::Endgame, color, piece, sq);
            }
        }
    }
    (opening, endgame)
}

impl Position {
    pub fn game_phase(&self) -> i32 {
        phase_of(self.piece_layout())
    }

    /// Phase-interpolated score from the incremental accumulators, positive
    /// favors White.
    pub fn evaluate(&self) -> i32 {
        interpolate(self.opening_score(), self.endgame_score(), self.game_phase())
    }

    /// `evaluate` from the side to move's point of view.
    pub fn evaluate_for_side_to_move(&self) -> i32 {
        self.side_to_move().sign() * self.evaluate()
    }

    /// Same as `evaluate`, but recomputing both sums from the bitboards.
    pub fn evaluate_from_scratch(&self) -> i32 {
        let (opening, endgame) = compute_accumulators(self);
        interpolate(opening, endgame, self.game_phase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::position::Position;

    #[test]
    fn starting_position_is_balanced() {
        let pos = Position::new_game();
        assert_eq!(pos.opening_score(), 0);
        assert_eq!(pos.endgame_score(), 0);
        assert_eq!(pos.game_phase(), 0);
        assert_eq!(pos.evaluate(), 0);
    }

    #[test]
    fn black_values_mirror_white_values() {
        for piece in PieceKind::ALL {
            for sq in 0..64u8 {
                for phase in [GamePhase::Opening, GamePhase::Endgame] {
                    assert_eq!(
                        feature_value(phase, Color::Black, piece, sq ^ 56),
                        -feature_value(phase, Color::White, piece, sq)
                    );
                }
            }
        }
    }

    #[test]
    fn known_feature_values() {
        // White pawn e4 in the opening: 100 + 25.
        assert_eq!(feature_value(GamePhase::Opening, Color::White, PieceKind::Pawn, 28), 125);
        // Black knight on g8 corresponds to white g1: -(320 - 40).
        assert_eq!(feature_value(GamePhase::Opening, Color::Black, PieceKind::Knight, 62), -280);
        // White king g1: opening 20000 + 30, endgame 20000 - 30.
        assert_eq!(feature_value(GamePhase::Opening, Color::White, PieceKind::King, 6), 20030);
        assert_eq!(feature_value(GamePhase::Endgame, Color::White, PieceKind::King, 6), 19970);
    }

    #[test]
    fn phase_runs_from_opening_to_bare_kings() {
        let kings_only = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(kings_only.game_phase(), 256);

        // Queens off: 24 - 8 = 16 remaining, phase = (8*256 + 12) / 24 = 85.
        let no_queens =
            Position::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1")
                .expect("FEN should parse");
        assert_eq!(no_queens.game_phase(), 85);
    }

    #[test]
    fn extra_queens_do_not_push_phase_negative() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/QQQQQQQQ/4K3 w - - 0 1").expect("FEN should parse");
        assert_eq!(pos.game_phase(), 0);
    }

    #[test]
    fn interpolation_truncates_toward_zero() {
        assert_eq!(interpolate(10, 20, 128), 15);
        assert_eq!(interpolate(-3, 0, 128), -1);
        assert_eq!(interpolate(7, -7, 0), 7);
        assert_eq!(interpolate(7, -7, 256), -7);
    }

    #[test]
    fn incremental_and_from_scratch_agree_on_fen_positions() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ] {
            let pos = Position::from_fen(fen).expect("FEN should parse");
            assert_eq!((pos.opening_score(), pos.endgame_score()), compute_accumulators(&pos));
            assert_eq!(pos.evaluate(), pos.evaluate_from_scratch());
        }
    }

    #[test]
    fn side_relative_score_flips_sign() {
        let white = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        let black = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").expect("FEN should parse");
        assert!(white.evaluate() > 800);
        assert_eq!(white.evaluate_for_side_to_move(), -black.evaluate_for_side_to_move());
    }
}
