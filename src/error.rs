//! Error types for the gridq crate

use thiserror::Error;

/// Main error type for the gridq crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid action {action} (expected 0-3: up, right, down, left)")]
    InvalidAction { action: usize },

    #[error("state {state} is out of range (environment has {n_states} states)")]
    StateOutOfRange { state: usize, n_states: usize },

    #[error(
        "Q-table shape mismatch: expected {}x{}, found {}x{}",
        expected.0, expected.1, found.0, found.1
    )]
    ShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Q-table holds {found} values but a {n_states}x{n_actions} table needs {expected}")]
    InconsistentTable {
        n_states: usize,
        n_actions: usize,
        expected: usize,
        found: usize,
    },

    #[error("unsupported Q-table format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("no Q-table stored at '{key}'")]
    TableNotFound { key: String },

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

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "perform I/O".to_string(),
            source,
        }
    }
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration {
            message: message.into(),
        }
    }
}
