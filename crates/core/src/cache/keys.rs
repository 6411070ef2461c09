//! Cache key helpers.
//!
//! Keys are built here rather than formatted inline so every writer and
//! reader of a query agrees on its identity.

/// Returns the cache key for the full todo collection.
///
/// There is a single collection per server, so this is a constant key;
/// it exists as a function so future scoped collections keep the same
/// call shape.
pub fn todos_key() -> String {
    "todos".to_string()
}
