//! Error types for the MENACE engine

use thiserror::Error;

/// Main error type for the engine and its learning agents
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board shape: expected 3x3, got {rows} rows and {columns} columns in '{context}'")]
    InvalidBoardShape {
        rows: usize,
        columns: usize,
        context: String,
    },

    #[error("invalid character '{character}' at row {row}, column {column}")]
    InvalidCellCharacter {
        character: char,
        row: usize,
        column: usize,
    },

    #[error("invalid move input '{input}' (expected two digits, e.g. '1, 2')")]
    InvalidMoveInput { input: String },

    #[error("state integer {value} is out of range (must be below 19683)")]
    StateOutOfRange { value: u32 },

    #[error("position ({row}, {col}) is out of bounds (must be 0-2)")]
    PositionOutOfBounds { row: usize, col: usize },

    #[error("agent '{agent}' resigned: matchbox for state {state:?} has no beads left")]
    PlayerResigned { agent: String, state: String },

    #[error("agent '{agent}' proposed illegal move {position}")]
    IllegalMove { agent: String, position: String },

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("no matchbox seeded for state {state:?}")]
    MissingMatchbox { state: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for the two conditions an interactive caller recovers from by asking again.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidMoveInput { .. } | Error::PositionOutOfBounds { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
