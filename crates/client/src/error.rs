//! Client error types.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
///
/// Transport and server failures feed the controller's rollback path;
/// cache and serialization failures are local bugs and propagate.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Caller-requested failure, raised before any network call is made.
    /// Exists so rollback behavior can be exercised deterministically.
    #[error("Simulated mutation failure")]
    SimulatedFailure,

    #[error("Cache error: {0}")]
    Cache(#[from] todosync_core::cache::CacheError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] todosync_core::cache::SerializationError),
}
