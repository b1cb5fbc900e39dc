//! Core bitboard position representation.
//!
//! `Position` is the central model for the engine. It stores one bitboard per
//! (color, piece), occupancy caches, turn/state flags, clocks, the two
//! evaluation accumulators and the Zobrist key. Positions are values: applying
//! a move produces a new `Position` and leaves the original untouched.
//!
//! All piece placement goes through `put_piece` / `remove_piece`, which keep
//! occupancy, evaluation and hash in step with the bitboards.

use crate::bitboard::bit_utils::{first_set_bit, square_bb};
use crate::bitboard::tables::{Tables, STANDARD_TABLES};
use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::search::evaluation::{feature_value, GamePhase};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen_with_tables;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    // [color][piece_kind]
    pieces: [[Bitboard; 6]; 2],

    // Occupancy caches.
    occupancy_by_color: [Bitboard; 2],
    occupancy_all: Bitboard,

    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_file: Option<u8>,

    halfmove_clock: u16,
    fullmove_number: u16,

    // Incremental evaluation, positive favors White.
    opening_score: i32,
    endgame_score: i32,

    zobrist_key: u64,

    tables: &'static Tables,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    /// Board with no pieces, White to move, no rights, clocks at zero.
    pub(crate) fn empty(tables: &'static Tables) -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_file: None,
            halfmove_clock: 0,
            fullmove_number: 0,
            opening_score: 0,
            endgame_score: 0,
            zobrist_key: 0,
            tables,
        }
    }

    #[inline]
    pub fn new_game() -> Self {
        Self::new_game_with_tables(&STANDARD_TABLES)
    }

    pub fn new_game_with_tables(tables: &'static Tables) -> Self {
        let mut position = Self::empty(tables);
        for (file, piece) in BACK_RANK.into_iter().enumerate() {
            let file = file as u8;
            position.put_piece(Color::White, piece, square_from_file_rank(file, 0));
            position.put_piece(Color::White, PieceKind::Pawn, square_from_file_rank(file, 1));
            position.put_piece(Color::Black, PieceKind::Pawn, square_from_file_rank(file, 6));
            position.put_piece(Color::Black, piece, square_from_file_rank(file, 7));
        }
        position.set_castling_rights(CASTLE_ALL);
        position.fullmove_number = 1;
        position
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen_with_tables(fen, &STANDARD_TABLES)
    }

    #[inline]
    pub fn from_fen_with_tables(fen: &str, tables: &'static Tables) -> ChessResult<Self> {
        parse_fen_with_tables(fen, tables)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn tables(&self) -> &'static Tables {
        self.tables
    }

    #[inline]
    pub fn pieces(&self, color: Color, piece: PieceKind) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[inline]
    pub fn piece_layout(&self) -> &[[Bitboard; 6]; 2] {
        &self.pieces
    }

    #[inline]
    pub fn occupied(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn all_occupied(&self) -> Bitboard {
        self.occupancy_all
    }

    #[inline]
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupancy_all
    }

    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceKind)> {
        let mask = square_bb(square);
        if self.occupancy_all & mask == 0 {
            return None;
        }
        let color = if self.occupancy_by_color[Color::White.index()] & mask != 0 {
            Color::White
        } else {
            Color::Black
        };
        self.piece_kind_on(color, square).map(|piece| (color, piece))
    }

    /// Kind of `color`'s piece on `square`, if any.
    #[inline]
    pub fn piece_kind_on(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = square_bb(square);
        PieceKind::ALL
            .into_iter()
            .find(|piece| self.pieces[color.index()][piece.index()] & mask != 0)
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        first_set_bit(self.pieces(color, PieceKind::King))
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    /// File of the pawn that just made a double push, if any.
    #[inline]
    pub fn en_passant_file(&self) -> Option<u8> {
        self.en_passant_file
    }

    /// Square a pawn of the side to move would land on when capturing en
    /// passant.
    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        let rank = match self.side_to_move {
            Color::White => 5,
            Color::Black => 2,
        };
        self.en_passant_file
            .map(|file| square_from_file_rank(file, rank))
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn opening_score(&self) -> i32 {
        self.opening_score
    }

    #[inline]
    pub fn endgame_score(&self) -> i32 {
        self.endgame_score
    }

    /// Incrementally maintained Zobrist key.
    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        self.zobrist_key
    }

    // --- Incremental primitives ---

    /// Place a piece on an empty square.
    pub(crate) fn put_piece(&mut self, color: Color, piece: PieceKind, square: Square) {
        let mask = square_bb(square);
        debug_assert_eq!(self.occupancy_all & mask, 0, "square {square} already occupied");
        self.pieces[color.index()][piece.index()] |= mask;
        self.occupancy_by_color[color.index()] |= mask;
        self.occupancy_all |= mask;
        self.opening_score += feature_value(GamePhase::Opening, color, piece, square);
        self.endgame_score += feature_value(GamePhase::Endgame, color, piece, square);
        self.zobrist_key ^= self.tables.zobrist.piece_square(color, piece, square);
    }

    pub(crate) fn remove_piece(&mut self, color: Color, piece: PieceKind, square: Square) {
        let mask = square_bb(square);
        debug_assert_ne!(
            self.pieces[color.index()][piece.index()] & mask,
            0,
            "no {color:?} {piece:?} on square {square}"
        );
        self.pieces[color.index()][piece.index()] &= !mask;
        self.occupancy_by_color[color.index()] &= !mask;
        self.occupancy_all &= !mask;
        self.opening_score -= feature_value(GamePhase::Opening, color, piece, square);
        self.endgame_score -= feature_value(GamePhase::Endgame, color, piece, square);
        self.zobrist_key ^= self.tables.zobrist.piece_square(color, piece, square);
    }

    #[inline]
    pub(crate) fn move_piece(&mut self, color: Color, piece: PieceKind, from: Square, to: Square) {
        self.remove_piece(color, piece, from);
        self.put_piece(color, piece, to);
    }

    pub(crate) fn set_castling_rights(&mut self, rights: CastlingRights) {
        let rights = rights & CASTLE_ALL;
        let keys = &self.tables.zobrist;
        self.zobrist_key ^= keys.castling(self.castling_rights) ^ keys.castling(rights);
        self.castling_rights = rights;
    }

    pub(crate) fn set_en_passant_file(&mut self, file: Option<u8>) {
        let keys = &self.tables.zobrist;
        if let Some(old) = self.en_passant_file {
            self.zobrist_key ^= keys.en_passant_file(old);
        }
        if let Some(new) = file {
            self.zobrist_key ^= keys.en_passant_file(new & 7);
        }
        self.en_passant_file = file.map(|f| f & 7);
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        if self.side_to_move != color {
            self.zobrist_key ^= self.tables.zobrist.side_to_move();
            self.side_to_move = color;
        }
    }

    #[inline]
    pub(crate) fn set_clocks(&mut self, halfmove_clock: u16, fullmove_number: u16) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::search::evaluation::compute_accumulators;
    use crate::search::zobrist::compute_zobrist_key;

    #[test]
    fn new_game_matches_starting_fen() {
        let built = Position::new_game();
        let parsed = Position::from_fen(STARTING_POSITION_FEN).expect("FEN should parse");
        assert_eq!(built, parsed);
        assert_eq!(built.to_fen(), STARTING_POSITION_FEN);
    }

    #[test]
    fn starting_layout_queries() {
        let pos = Position::new_game();
        assert_eq!(pos.piece_at(4), Some((Color::White, PieceKind::King)));
        assert_eq!(pos.piece_at(59), Some((Color::Black, PieceKind::Queen)));
        assert_eq!(pos.piece_at(28), None);
        assert_eq!(pos.occupied(Color::White), 0xffff);
        assert_eq!(pos.occupied(Color::Black), 0xffff << 48);
        assert_eq!(pos.all_occupied().count_ones(), 32);
        assert_eq!(pos.empty_squares().count_ones(), 32);
        assert_eq!(pos.king_square(Color::Black), Some(60));
        assert_eq!(pos.castling_rights(), CASTLE_ALL);
        assert_eq!(pos.en_passant_file(), None);
    }

    #[test]
    fn put_and_remove_restore_every_cache() {
        let mut pos = Position::new_game();
        let before = pos.clone();
        pos.put_piece(Color::White, PieceKind::Knight, 27);
        assert_eq!(pos.zobrist_key(), compute_zobrist_key(&pos));
        assert_eq!((pos.opening_score(), pos.endgame_score()), compute_accumulators(&pos));
        pos.remove_piece(Color::White, PieceKind::Knight, 27);
        assert_eq!(pos, before);
    }

    #[test]
    fn state_setters_keep_hash_in_step() {
        let mut pos = Position::new_game();
        pos.set_castling_rights(CASTLE_WHITE_KINGSIDE);
        pos.set_en_passant_file(Some(3));
        pos.set_side_to_move(Color::Black);
        assert_eq!(pos.zobrist_key(), compute_zobrist_key(&pos));
        pos.set_en_passant_file(None);
        pos.set_side_to_move(Color::White);
        pos.set_castling_rights(CASTLE_ALL);
        assert_eq!(pos.zobrist_key(), Position::new_game().zobrist_key());
    }

    #[test]
    fn en_passant_square_depends_on_side_to_move() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3").expect("FEN should parse");
        assert_eq!(pos.en_passant_file(), Some(3));
        assert_eq!(pos.en_passant_square(), Some(43));
    }
}
