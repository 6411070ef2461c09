//! Todo domain types.

mod types;

pub use types::{CreateTodo, Todo};
