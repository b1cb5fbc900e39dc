//! Crate root module declarations for the chess engine core.
//!
//! Exposes the position model, bitboard tables, move generation, search,
//! and notation helpers so binaries, benches, and external tooling can
//! import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
}

pub mod bitboard {
    pub mod bit_utils;
    pub mod rays;
    pub mod tables;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
    pub mod targets;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod evaluation;
    pub mod iterative_deepening;
    pub mod piece_square_tables;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_position;
    pub mod san;
}
