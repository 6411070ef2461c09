//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. The store is held behind a repository trait object so
//! the concurrency policy lives in the implementation, not the handlers:
//! every append goes through the store's write lock, never through bare
//! shared state.

use std::sync::Arc;

use todosync_core::storage::TodoRepository;

use crate::storage::inmemory::InMemoryTodoStore;

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// The authoritative holder of the todo collection.
    pub todo_repo: Arc<dyn TodoRepository>,
}

impl AppState {
    /// Creates state backed by an empty in-memory store.
    pub fn new() -> Self {
        Self {
            todo_repo: Arc::new(InMemoryTodoStore::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
