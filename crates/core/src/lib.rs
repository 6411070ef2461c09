//! todosync_core - shared domain types and contracts for the todosync project.
//!
//! This crate holds everything the server and the client agree on: the
//! `Todo` type itself, the repository trait the store implements, and the
//! cache contract (trait, keys, serialization, cancellation) the client's
//! mutation controller builds on.

pub mod cache;
pub mod storage;
pub mod todo;

pub use todo::{CreateTodo, Todo};
