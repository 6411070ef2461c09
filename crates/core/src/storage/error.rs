use thiserror::Error;

/// Errors that can occur during repository operations.
///
/// The in-memory store never produces these in practice (appends are
/// treated as infallible), but the trait keeps the `Result` contract so
/// alternative backends can fail without changing callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Append rejected: {0}")]
    AppendRejected(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
