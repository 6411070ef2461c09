//! Output formatting for the todo collection.

pub mod json;
pub mod pretty;

use todosync_core::Todo;

use crate::cli::OutputFormat;

/// Format the todo collection in the requested output format.
pub fn format_output(todos: &[Todo], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_json(todos),
        OutputFormat::Pretty => pretty::format_todos(todos),
    }
}
