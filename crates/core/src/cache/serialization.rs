//! Pure functions for serializing/deserializing todo collections to/from
//! cache bytes.
//!
//! JSON is used for cache storage so cached values stay human-readable
//! and easy to inspect while debugging.

use thiserror::Error;

use crate::todo::Todo;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a todo collection to JSON bytes.
pub fn serialize_todos(todos: &[Todo]) -> Result<Vec<u8>> {
    serde_json::to_vec(todos).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a todo collection.
pub fn deserialize_todos(bytes: &[u8]) -> Result<Vec<Todo>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
