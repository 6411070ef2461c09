use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo item.
///
/// Identity is the `id` string, which is caller-generated. The collection
/// contract does not enforce uniqueness: the store appends whatever it is
/// given, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
}

impl Todo {
    /// Creates a todo with an explicit id.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }

    /// Creates a todo with a freshly generated UUID v4 id.
    ///
    /// This is what interactive callers use; every submission gets a
    /// distinct id so speculative entries never collide.
    pub fn with_random_id(title: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), title)
    }
}

/// Request payload for appending a todo.
///
/// Shape-identical to [`Todo`]; kept separate so the wire contract can
/// evolve independently of the domain type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub id: String,
    pub title: String,
}

impl From<CreateTodo> for Todo {
    fn from(req: CreateTodo) -> Self {
        Self {
            id: req.id,
            title: req.title,
        }
    }
}
