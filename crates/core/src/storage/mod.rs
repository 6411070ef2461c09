//! Storage contracts for the todo store.

mod error;
mod traits;

pub use error::{RepositoryError, Result};
pub use traits::TodoRepository;
