//! Error types for the tictactoe-q crate

use thiserror::Error;

use crate::tictactoe::Action;

/// Main error type for the tictactoe-q crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("state key must be {expected} cells, got {got} in '{key}'")]
    InvalidStateKeyLength {
        expected: usize,
        got: usize,
        key: String,
    },

    #[error("invalid cell digit '{character}' at position {position} in '{key}'")]
    InvalidCellDigit {
        character: char,
        position: usize,
        key: String,
    },

    #[error("action ({row}, {col}) is outside the 3x3 board")]
    ActionOutOfRange { row: usize, col: usize },

    #[error("action {action} is not legal for state key '{state}'")]
    IllegalTransition { state: String, action: Action },

    #[error("no legal actions available for state key '{state}'")]
    NoLegalActions { state: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid symmetry policy '{input}'. Expected one of: {expected}")]
    ParseSymmetryPolicy { input: String, expected: String },

    #[error("invalid role '{input}'. Expected one of: {expected}")]
    ParseRole { input: String, expected: String },

    #[error("unsupported save format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("invalid progress bar template: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
