use async_trait::async_trait;

use super::Result;

/// Trait for basic cache operations.
///
/// Values are opaque bytes; callers use the serialization helpers in this
/// module to encode and decode them. Implementations must be safe to
/// share across tasks.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Removes a value from the cache by key.
    async fn invalidate(&self, key: &str) -> Result<()>;
}
