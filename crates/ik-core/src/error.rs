use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A combinator was built with parameters it cannot work with
    /// (e.g. a chunk size of zero).
    #[error("precondition violated: {0}")]
    Precondition(String),
}
