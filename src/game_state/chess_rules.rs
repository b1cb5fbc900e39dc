//! Canonical chess-rule constants.
//!
//! Static rule literals: the starting position, move-rule limits and the
//! square geometry of castling.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-move clock value at which the game is treated as drawn.
pub const MOVE_RULE_HALFMOVES: u16 = 50;

pub const WHITE_KING_HOME: Square = 4;
pub const BLACK_KING_HOME: Square = 60;

/// Squares that must be empty to castle kingside / queenside (white).
pub const WHITE_KINGSIDE_EMPTY: Bitboard = 0x60;
pub const WHITE_QUEENSIDE_EMPTY: Bitboard = 0x0e;
/// Squares the white king crosses that must not be attacked.
pub const WHITE_KINGSIDE_SAFE: Bitboard = 0x60;
pub const WHITE_QUEENSIDE_SAFE: Bitboard = 0x0c;

pub const BLACK_KINGSIDE_EMPTY: Bitboard = WHITE_KINGSIDE_EMPTY << 56;
pub const BLACK_QUEENSIDE_EMPTY: Bitboard = WHITE_QUEENSIDE_EMPTY << 56;
pub const BLACK_KINGSIDE_SAFE: Bitboard = WHITE_KINGSIDE_SAFE << 56;
pub const BLACK_QUEENSIDE_SAFE: Bitboard = WHITE_QUEENSIDE_SAFE << 56;

/// Geometry of a single castling move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingGeometry {
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    pub must_be_empty: Bitboard,
    pub must_be_safe: Bitboard,
}

pub const fn castling_geometry(color: Color, kingside: bool) -> CastlingGeometry {
    match (color, kingside) {
        (Color::White, true) => CastlingGeometry {
            right: CASTLE_WHITE_KINGSIDE,
            king_from: 4,
            king_to: 6,
            rook_from: 7,
            rook_to: 5,
            must_be_empty: WHITE_KINGSIDE_EMPTY,
            must_be_safe: WHITE_KINGSIDE_SAFE,
        },
        (Color::White, false) => CastlingGeometry {
            right: CASTLE_WHITE_QUEENSIDE,
            king_from: 4,
            king_to: 2,
            rook_from: 0,
            rook_to: 3,
            must_be_empty: WHITE_QUEENSIDE_EMPTY,
            must_be_safe: WHITE_QUEENSIDE_SAFE,
        },
        (Color::Black, true) => CastlingGeometry {
            right: CASTLE_BLACK_KINGSIDE,
            king_from: 60,
            king_to: 62,
            rook_from: 63,
            rook_to: 61,
            must_be_empty: BLACK_KINGSIDE_EMPTY,
            must_be_safe: BLACK_KINGSIDE_SAFE,
        },
        (Color::Black, false) => CastlingGeometry {
            right: CASTLE_BLACK_QUEENSIDE,
            king_from: 60,
            king_to: 58,
            rook_from: 56,
            rook_to: 59,
            must_be_empty: BLACK_QUEENSIDE_EMPTY,
            must_be_safe: BLACK_QUEENSIDE_SAFE,
        },
    }
}

/// Castling rights lost when a piece leaves or arrives on `square`.
///
/// King home squares clear both rights of that side; rook home squares clear
/// the matching wing. Applied to both the origin and the destination of every
/// move, which covers rook captures on an untouched home square.
#[inline]
pub const fn rights_revoked_by_square(square: Square) -> CastlingRights {
    match square {
        0 => CASTLE_WHITE_QUEENSIDE,
        4 => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
        7 => CASTLE_WHITE_KINGSIDE,
        56 => CASTLE_BLACK_QUEENSIDE,
        60 => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
        63 => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}
