//! The transport seam between the mutation controller and the server.

use async_trait::async_trait;

use todosync_core::Todo;

use crate::error::Result;

/// Remote todo store operations.
///
/// The controller only ever talks to the store through this trait, so
/// tests can substitute an in-process fake and the HTTP transport stays
/// an implementation detail.
#[async_trait]
pub trait RemoteTodos: Send + Sync {
    /// Fetches the full authoritative collection.
    async fn list(&self) -> Result<Vec<Todo>>;

    /// Appends a todo and returns the server's echo of it.
    async fn append(&self, todo: &Todo) -> Result<Todo>;
}
