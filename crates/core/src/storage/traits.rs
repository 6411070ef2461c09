use async_trait::async_trait;

use crate::todo::Todo;

use super::Result;

/// Repository for todo collection operations.
///
/// The collection is an ordered sequence: `append` pushes to the end and
/// `list` returns everything in insertion order. Duplicate ids are accepted
/// silently; identity is a caller-side contract, not a store invariant.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Returns the full current collection, no pagination or filtering.
    async fn list(&self) -> Result<Vec<Todo>>;

    /// Appends a todo to the end of the collection and echoes it back
    /// as confirmation.
    async fn append(&self, todo: &Todo) -> Result<Todo>;
}
