//! Errors used throughout the chess core.
//!
//! `ChessErrors` is the single error type returned by position parsing,
//! notation helpers, move application and transposition-table persistence.
//! Search and move generation never fail: they operate on positions that were
//! validated on the way in.
//!
//! Usage guidelines:
//! - Parsing variants (`InvalidFen`, `InvalidSquare`, `InvalidMoveText`) are
//!   recoverable and suitable for presenting to end users.
//! - `IllegalMove` reports a move that is not legal in the position it was
//!   applied to. The position is left untouched.
//! - `InvalidTableLine` and `Io` come from loading or saving a persisted
//!   transposition table.

use thiserror::Error;

use crate::moves::move_descriptions::Move;

/// Unified error type for the chess core.
#[derive(Debug, Error)]
pub enum ChessErrors {
    /// A FEN string could not be parsed.
    ///
    /// Payload: the offending FEN text and a short reason.
    #[error("invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Square text was not a lowercase file `a`..`h` followed by a rank `1`..`8`.
    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    /// Move text (long algebraic or SAN) did not resolve to exactly one
    /// legal move.
    #[error("invalid move '{text}': {reason}")]
    InvalidMoveText { text: String, reason: String },

    /// A move was applied to a position in which it is not legal.
    #[error("illegal move {mv} in position {fen}")]
    IllegalMove { mv: Move, fen: String },

    /// A persisted transposition-table line was malformed.
    ///
    /// Payload: 1-based line number and reason.
    #[error("transposition table line {line}: {reason}")]
    InvalidTableLine { line: usize, reason: String },

    /// Reading or writing a persisted transposition table failed.
    #[error("transposition table I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type ChessResult<T> = Result<T, ChessErrors>;

impl ChessErrors {
    pub(crate) fn invalid_fen(fen: &str, reason: impl Into<String>) -> Self {
        ChessErrors::InvalidFen {
            fen: fen.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_move_text(text: &str, reason: impl Into<String>) -> Self {
        ChessErrors::InvalidMoveText {
            text: text.to_owned(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ChessErrors;

    #[test]
    fn fen_error_message_names_text_and_reason() {
        let err = ChessErrors::invalid_fen("8/8 w", "board layout must contain 8 ranks");
        assert_eq!(
            err.to_string(),
            "invalid FEN '8/8 w': board layout must contain 8 ranks"
        );
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn fails() -> Result<(), ChessErrors> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(ChessErrors::Io(_))));
    }
}
