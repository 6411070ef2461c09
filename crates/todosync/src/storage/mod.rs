//! Storage backend implementations.

pub mod inmemory;
