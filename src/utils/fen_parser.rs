//! FEN-to-Position parser.
//!
//! Builds a fully-populated position from a Forsyth-Edwards Notation string.
//! Pieces are placed through the incremental primitives, so evaluation and
//! hash are consistent from the start. The half-move and full-move fields are
//! optional and default to 0.

use crate::bitboard::tables::Tables;
use crate::chess_errors::{ChessErrors, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen_with_tables(fen: &str, tables: &'static Tables) -> ChessResult<Position> {
    let err = |reason: String| ChessErrors::invalid_fen(fen, reason);
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| err("missing board layout".to_owned()))?;
    let side_part = parts.next().ok_or_else(|| err("missing side to move".to_owned()))?;
    let castling_part = parts.next().ok_or_else(|| err("missing castling rights".to_owned()))?;
    let en_passant_part = parts.next().ok_or_else(|| err("missing en-passant square".to_owned()))?;
    let halfmove_part = parts.next();
    let fullmove_part = parts.next();

    if parts.next().is_some() {
        return Err(err("extra trailing fields".to_owned()));
    }

    let mut position = Position::empty(tables);

    parse_board(board_part, &mut position).map_err(err)?;
    let side = parse_side_to_move(side_part).map_err(err)?;
    let rights = parse_castling_rights(castling_part).map_err(err)?;
    let en_passant = parse_en_passant_file(en_passant_part, side).map_err(err)?;
    let halfmove_clock = parse_counter(halfmove_part, "half-move clock").map_err(err)?;
    let fullmove_number = parse_counter(fullmove_part, "full-move number").map_err(err)?;

    position.set_side_to_move(side);
    position.set_castling_rights(rights);
    position.set_en_passant_file(en_passant);
    position.set_clocks(halfmove_clock, fullmove_number);

    Ok(position)
}

fn parse_board(board_part: &str, position: &mut Position) -> Result<(), String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err("board layout must contain 8 ranks".to_owned());
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(format!("invalid empty-square count '{ch}'"));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(format!("rank {} has too many files", board_rank + 1));
                }
                continue;
            }

            let (color, piece) = piece_from_fen_char(ch)
                .ok_or_else(|| format!("invalid piece character '{ch}' in board layout"))?;

            if file >= 8 {
                return Err(format!("rank {} has too many files", board_rank + 1));
            }
            if piece == PieceKind::Pawn && (board_rank == 0 || board_rank == 7) {
                return Err(format!("pawn on back rank {}", board_rank + 1));
            }

            position.put_piece(color, piece, square_from_file_rank(file, board_rank));
            file += 1;
        }

        if file != 8 {
            return Err(format!("rank {} does not sum to 8 files", board_rank + 1));
        }
    }

    for color in Color::ALL {
        if position.pieces(color, PieceKind::King).count_ones() != 1 {
            return Err(format!("{color:?} must have exactly one king"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, String> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(format!("invalid side-to-move field '{side_part}'")),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, String> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        let right = match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(format!("invalid castling rights character '{ch}'")),
        };
        if rights & right != 0 {
            return Err(format!("duplicate castling right '{ch}'"));
        }
        rights |= right;
    }

    Ok(rights)
}

/// The target square must sit behind a pawn that just double-pushed: rank 6
/// when White is to move, rank 3 when Black is.
fn parse_en_passant_file(en_passant_part: &str, side: Color) -> Result<Option<u8>, String> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part).map_err(|e| e.to_string())?;
    let expected_rank = match side {
        Color::White => 5,
        Color::Black => 2,
    };
    if square_rank(square) != expected_rank {
        return Err(format!("en-passant square '{en_passant_part}' is on the wrong rank"));
    }

    Ok(Some(square_file(square)))
}

fn parse_counter(part: Option<&str>, name: &str) -> Result<u16, String> {
    match part {
        None => Ok(0),
        Some(text) => text
            .parse::<u16>()
            .map_err(|_| format!("invalid {name} '{text}'")),
    }
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    PieceKind::from_letter(ch).map(|piece| (color, piece))
}

#[cfg(test)]
mod tests {
    use crate::chess_errors::ChessErrors;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::game_state::position::Position;

    #[test]
    fn parse_starting_fen() {
        let pos = Position::from_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.fullmove_number(), 1);
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.castling_rights(), CASTLE_ALL);
        assert_eq!(pos.pieces(Color::White, PieceKind::Pawn), 0xff00);
    }

    #[test]
    fn move_counters_are_optional() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b -  -").expect("FEN should parse");
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 0);
        assert_eq!(pos.side_to_move(), Color::Black);

        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 17").expect("FEN should parse");
        assert_eq!(pos.halfmove_clock(), 17);
        assert_eq!(pos.fullmove_number(), 0);
    }

    #[test]
    fn en_passant_field_stores_the_file() {
        let pos = Position::from_fen("rnbqkbnr/pppp1ppp/8/8/3pP3/8/PPP2PPP/RNBQKBNR b KQkq e3 0 3")
            .expect("FEN should parse");
        assert_eq!(pos.en_passant_file(), Some(4));
    }

    #[test]
    fn rejects_malformed_input() {
        let bad = [
            "",
            "8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1",
            "4k3/8/8/8/8/8/8/4X3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w KX - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w KK - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - e4 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - e3 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - x 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",
            "8/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4KK2 w - - 0 1",
            "P3k3/8/8/8/8/8/8/4K3 w - - 0 1",
        ];
        for fen in bad {
            assert!(
                matches!(Position::from_fen(fen), Err(ChessErrors::InvalidFen { .. })),
                "expected rejection of '{fen}'"
            );
        }
    }
}
