//! Cache contracts shared by the client-side query cache.
//!
//! The cache is an explicit key-value store with defined operations
//! rather than an ambient mutable map: keys are built by the helpers in
//! [`keys`], values are JSON-encoded todo collections, and read tasks
//! carry an explicit [`CancellationToken`] that is checked before a
//! read's result is committed.

mod error;
mod keys;
mod serialization;
mod token;
mod traits;

pub use error::{CacheError, Result};
pub use keys::todos_key;
pub use serialization::{deserialize_todos, serialize_todos, SerializationError};
pub use token::CancellationToken;
pub use traits::Cache;
