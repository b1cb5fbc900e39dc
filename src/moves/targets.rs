//! Per-piece target dispatch and whole-side attack maps.

use crate::bitboard::bit_utils::squares;
use crate::bitboard::rays::RayTable;
use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::{bishop_attacks, bishop_targets};
use crate::moves::king_moves::{king_attacks, king_targets};
use crate::moves::knight_moves::{knight_attacks, knight_targets};
use crate::moves::pawn_moves::{pawn_attacks, pawn_targets};
use crate::moves::queen_moves::{queen_attacks, queen_targets};
use crate::moves::rook_moves::{rook_attacks, rook_targets};

/// Destinations for a piece of `color` on `square`, excluding own pieces.
/// No legality filtering; castling and en passant are not included.
pub fn piece_targets(
    rays: &RayTable,
    color: Color,
    piece: PieceKind,
    square: Square,
    own: Bitboard,
    enemy: Bitboard,
) -> Bitboard {
    match piece {
        PieceKind::Pawn => pawn_targets(color, square, own, enemy),
        PieceKind::Rook => rook_targets(rays, square, own, enemy),
        PieceKind::Knight => knight_targets(square, own),
        PieceKind::Bishop => bishop_targets(rays, square, own, enemy),
        PieceKind::Queen => queen_targets(rays, square, own, enemy),
        PieceKind::King => king_targets(square, own),
    }
}

/// Squares a piece attacks given total occupancy. Pawns attack diagonally
/// only, and squares holding either side's pieces are included.
pub fn piece_attacks(
    rays: &RayTable,
    color: Color,
    piece: PieceKind,
    square: Square,
    occupied: Bitboard,
) -> Bitboard {
    match piece {
        PieceKind::Pawn => pawn_attacks(color, square),
        PieceKind::Rook => rook_attacks(rays, square, occupied),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(rays, square, occupied),
        PieceKind::Queen => queen_attacks(rays, square, occupied),
        PieceKind::King => king_attacks(square),
    }
}

/// Union of every square `side` attacks, ignoring pins and whose turn it is.
///
/// Squares holding `side`'s own pieces are left out; squares holding enemy
/// pieces are included.
pub fn all_targets(rays: &RayTable, side: Color, pieces: &[[Bitboard; 6]; 2]) -> Bitboard {
    let own = pieces[side.index()].iter().fold(0, |acc, bb| acc | bb);
    let enemy = pieces[side.opposite().index()]
        .iter()
        .fold(0, |acc, bb| acc | bb);
    let occupied = own | enemy;

    let mut attacked = 0u64;
    for piece in PieceKind::ALL {
        for sq in squares(pieces[side.index()][piece.index()]) {
            attacked |= piece_attacks(rays, side, piece, sq, occupied);
        }
    }
    attacked & !own
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::tables::STANDARD_TABLES;
    use crate::game_state::position::Position;

    #[test]
    fn starting_position_white_attacks_third_rank() {
        let pos = Position::new_game();
        let attacked = all_targets(&STANDARD_TABLES.rays, Color::White, pos.piece_layout());
        assert_eq!(attacked, 0x00ff_0000);
    }

    #[test]
    fn attack_map_includes_enemy_pieces_but_not_own() {
        // White rook a1, white pawn a3, black knight c1.
        let mut pieces = [[0u64; 6]; 2];
        pieces[0][PieceKind::Rook.index()] = 1 << 0;
        pieces[0][PieceKind::Pawn.index()] = 1 << 16;
        pieces[1][PieceKind::Knight.index()] = 1 << 2;
        let attacked = all_targets(&STANDARD_TABLES.rays, Color::White, &pieces);
        assert_ne!(attacked & (1 << 8), 0); // a2
        assert_ne!(attacked & (1 << 2), 0); // c1 holds the knight
        assert_eq!(attacked & (1 << 3), 0); // d1 behind it
        assert_eq!(attacked & (1 << 16), 0); // own pawn
        assert_ne!(attacked & (1 << 25), 0); // pawn attacks b4
    }

    #[test]
    fn targets_dispatch_matches_piece_modules() {
        let rays = &STANDARD_TABLES.rays;
        assert_eq!(
            piece_targets(rays, Color::White, PieceKind::Knight, 1, 1 << 11, 0),
            (1 << 16) | (1 << 18)
        );
        assert_eq!(
            piece_targets(rays, Color::Black, PieceKind::Pawn, 52, 0, 0),
            (1 << 44) | (1 << 36)
        );
    }
}
