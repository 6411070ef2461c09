//! In-memory todo repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use todosync_core::storage::{Result, TodoRepository};
use todosync_core::Todo;

/// In-memory storage backend.
///
/// A `Vec` wrapped in `Arc<RwLock<_>>`: the vector keeps insertion order,
/// the lock makes every append a mutual-exclusion scope so concurrent
/// writers serialize instead of interleaving. Data is not persisted and
/// is lost when the process exits.
///
/// Duplicate ids are accepted silently; the collection contract leaves
/// identity to the caller.
#[derive(Debug, Clone)]
pub struct InMemoryTodoStore {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl Default for InMemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTodoStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            todos: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Creates a store pre-populated with the given todos (useful for tests).
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: Arc::new(RwLock::new(todos)),
        }
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoStore {
    async fn list(&self) -> Result<Vec<Todo>> {
        let todos = self.todos.read().await;
        Ok(todos.clone())
    }

    async fn append(&self, todo: &Todo) -> Result<Todo> {
        let mut todos = self.todos.write().await;
        todos.push(todo.clone());
        Ok(todo.clone())
    }
}
