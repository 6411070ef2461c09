pub mod health;
pub mod todos;

pub use crate::error::AppError;
