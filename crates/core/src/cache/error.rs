use thiserror::Error;

/// Errors that can occur during cache operations.
///
/// The in-process cache never produces these (its store is an infallible
/// in-memory map), but the trait keeps the `Result` contract so a backed
/// cache can fail without changing callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache operation failed on key '{key}': {reason}")]
    OperationFailed { key: String, reason: String },
    #[error("Cached value for key '{0}' is corrupted")]
    Corrupted(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
