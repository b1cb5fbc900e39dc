//! Standard Algebraic Notation.
//!
//! Examples: `e4`, `Nf3`, `exd5`, `Rad1`, `e8=Q`, `O-O-O`, `Qh4#`.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::{algebraic_to_square, file_char, rank_char, square_to_algebraic};

/// SAN of `mv`, which must be legal in `position`.
pub fn move_to_san(position: &Position, mv: Move) -> String {
    let mut san = san_without_suffix(position, mv, &position.generate_legal_moves());

    if position.gives_check(mv) {
        let mated = !position.make_move(mv).has_legal_moves();
        san.push(if mated { '#' } else { '+' });
    }
    san
}

fn san_without_suffix(position: &Position, mv: Move, legal_moves: &[Move]) -> String {
    if mv.is_king_castle() {
        return "O-O".to_owned();
    }
    if mv.is_queen_castle() {
        return "O-O-O".to_owned();
    }

    let us = position.side_to_move();
    let from = mv.from();
    let to = mv.to();
    let piece = position.piece_kind_on(us, from).unwrap_or(PieceKind::Pawn);
    let mut out = String::new();

    if piece == PieceKind::Pawn {
        if mv.is_capture() {
            out.push(file_char(from));
        }
    } else {
        out.push(piece.letter());
        out.push_str(&disambiguation(position, mv, piece, legal_moves));
    }

    if mv.is_capture() {
        out.push('x');
    }
    out.push_str(&square_to_algebraic(to));

    if let Some(promoted) = mv.promotion_piece() {
        out.push('=');
        out.push(promoted.letter());
    }

    out
}

/// Origin file, else origin rank, else the full origin square, whichever
/// first separates `mv` from other same-piece moves to the same square.
fn disambiguation(position: &Position, mv: Move, piece: PieceKind, legal_moves: &[Move]) -> String {
    let us = position.side_to_move();
    let rivals: Vec<Square> = legal_moves
        .iter()
        .filter(|other| {
            other.to() == mv.to()
                && other.from() != mv.from()
                && position.piece_kind_on(us, other.from()) == Some(piece)
        })
        .map(|other| other.from())
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let from = mv.from();
    if rivals.iter().all(|&sq| square_file(sq) != square_file(from)) {
        file_char(from).to_string()
    } else if rivals.iter().all(|&sq| square_rank(sq) != square_rank(from)) {
        rank_char(from).to_string()
    } else {
        square_to_algebraic(from)
    }
}

/// Resolve SAN text against the legal moves of `position`. Trailing check,
/// mate and annotation marks are ignored, as are redundant disambiguation
/// and a missing capture mark.
pub fn san_to_move(position: &Position, san: &str) -> ChessResult<Move> {
    let err = |reason: &str| ChessErrors::invalid_move_text(san, reason);

    let text = san.trim().trim_end_matches(['+', '#', '!', '?']);
    if text.is_empty() || !text.is_ascii() {
        return Err(err("empty move text"));
    }

    let legal_moves = position.generate_legal_moves();

    match text {
        "O-O" | "0-0" => return find_unique(&legal_moves, |mv| mv.is_king_castle(), err),
        "O-O-O" | "0-0-0" => return find_unique(&legal_moves, |mv| mv.is_queen_castle(), err),
        _ => {}
    }

    let (piece, rest) = match text.chars().next() {
        Some(ch @ ('N' | 'B' | 'R' | 'Q' | 'K')) => (PieceKind::from_letter(ch), &text[1..]),
        _ => (Some(PieceKind::Pawn), text),
    };
    let piece = piece.ok_or_else(|| err("unknown piece letter"))?;

    let (rest, promotion) = split_promotion(rest).ok_or_else(|| err("invalid promotion"))?;
    let body: String = rest.chars().filter(|&ch| ch != 'x' && ch != '-').collect();
    if body.len() < 2 || body.len() > 4 {
        return Err(err("missing destination square"));
    }

    let (hint, destination) = body.split_at(body.len() - 2);
    let to = algebraic_to_square(destination)?;
    let mut hint_file = None;
    let mut hint_rank = None;
    for ch in hint.chars() {
        match ch {
            'a'..='h' => hint_file = Some(ch as u8 - b'a'),
            '1'..='8' => hint_rank = Some(ch as u8 - b'1'),
            _ => return Err(err("invalid disambiguation")),
        }
    }

    let us = position.side_to_move();
    find_unique(
        &legal_moves,
        |mv| {
            mv.to() == to
                && !mv.is_castle()
                && position.piece_kind_on(us, mv.from()) == Some(piece)
                && mv.promotion_piece() == promotion
                && hint_file.map_or(true, |file| square_file(mv.from()) == file)
                && hint_rank.map_or(true, |rank| square_rank(mv.from()) == rank)
        },
        err,
    )
}

/// Split `e8=Q` or `e8Q` into the body and the promotion piece.
fn split_promotion(text: &str) -> Option<(&str, Option<PieceKind>)> {
    let body = text.strip_suffix(['N', 'B', 'R', 'Q']);
    let Some(body) = body else {
        return Some((text, None));
    };
    let piece = PieceKind::from_letter(text.chars().last()?)?;
    Some((body.strip_suffix('=').unwrap_or(body), Some(piece)))
}

fn find_unique(
    legal_moves: &[Move],
    matches: impl Fn(&Move) -> bool,
    err: impl Fn(&str) -> ChessErrors,
) -> ChessResult<Move> {
    let mut found = legal_moves.iter().filter(|mv| matches(mv));
    match (found.next(), found.next()) {
        (Some(&mv), None) => Ok(mv),
        (None, _) => Err(err("no legal move matches")),
        (Some(_), Some(_)) => Err(err("ambiguous move")),
    }
}
