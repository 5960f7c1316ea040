//! Errors used at the boundaries of the engine.
//!
//! The position model, move generator and search work on data that is valid
//! by precondition and never return errors. Everything that reads text from
//! the outside world (FEN strings, long algebraic moves, UCI commands, the
//! interactive prompt) reports failures through `ChessError`.

use thiserror::Error;

/// Unified error type for parsing and front-end failures.
#[derive(Error, Debug)]
pub enum ChessError {
    /// A square name such as `e4` could not be parsed.
    #[error("invalid algebraic square '{0}'")]
    InvalidSquare(String),

    /// A long algebraic move such as `e2e4` or `e7e8q` could not be parsed.
    #[error("invalid long algebraic move '{0}'")]
    InvalidMoveText(String),

    /// The fifth character of a long algebraic move was not q, r, b or n.
    #[error("invalid promotion piece '{0}'")]
    InvalidPromotion(char),

    /// A FEN string was malformed.
    #[error("invalid FEN: {reason}")]
    InvalidFen { reason: String },

    /// A move parsed fine but is not legal in the current position.
    #[error("illegal move '{0}'")]
    IllegalMove(String),

    /// Logging could not be set up.
    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChessError {
    pub(crate) fn fen(reason: impl Into<String>) -> Self {
        ChessError::InvalidFen {
            reason: reason.into(),
        }
    }
}

/// Result alias for fallible engine boundary operations.
pub type ChessResult<T> = Result<T, ChessError>;
