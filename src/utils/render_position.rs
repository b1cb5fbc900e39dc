//! Terminal-oriented board renderer.
//!
//! Draws a position with rank 8 at the top and file letters on both edges,
//! or from Black's side when flipped.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardStyle {
    #[default]
    Unicode,
    Ascii,
}

/// Render from White's side with Unicode pieces.
pub fn render_position(position: &Position) -> String {
    render_position_with(position, BoardStyle::Unicode, Color::White)
}

/// Render with the given piece style, seen from `perspective`'s side.
pub fn render_position_with(position: &Position, style: BoardStyle, perspective: Color) -> String {
    let files: Vec<u8> = match perspective {
        Color::White => (0..8).collect(),
        Color::Black => (0..8).rev().collect(),
    };
    let ranks: Vec<u8> = match perspective {
        Color::White => (0..8).rev().collect(),
        Color::Black => (0..8).collect(),
    };

    let file_header: String = files
        .iter()
        .map(|&file| char::from(b'a' + file).to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    out.push_str("  ");
    out.push_str(&file_header);
    out.push('\n');

    for &rank in &ranks {
        let rank_label = char::from(b'1' + rank);
        out.push(rank_label);
        out.push(' ');

        for (i, &file) in files.iter().enumerate() {
            let square = square_from_file_rank(file, rank);
            out.push(match position.piece_at(square) {
                Some((color, piece)) => piece_glyph(style, color, piece),
                None => empty_glyph(style),
            });
            if i < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_label);
        out.push('\n');
    }

    out.push_str("  ");
    out.push_str(&file_header);

    out
}

fn empty_glyph(style: BoardStyle) -> char {
    match style {
        BoardStyle::Unicode => '·',
        BoardStyle::Ascii => '.',
    }
}

fn piece_glyph(style: BoardStyle, color: Color, piece: PieceKind) -> char {
    match style {
        BoardStyle::Ascii => match color {
            Color::White => piece.letter(),
            Color::Black => piece.letter().to_ascii_lowercase(),
        },
        BoardStyle::Unicode => match (color, piece) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        },
    }
}
