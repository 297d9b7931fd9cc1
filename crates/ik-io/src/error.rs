use thiserror::Error;

/// Result type local to ik-io.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by resource-backed sequences.
///
/// End of input is never an error; adapters stop cleanly on it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The row cursor failed to advance or to close.
    #[error("cursor error: {0}")]
    Cursor(String),

    #[error("column {column}: cannot decode {found} as {expected}")]
    Decode {
        column: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("row has {found} columns, destination expects {expected}")]
    Arity { expected: usize, found: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}
