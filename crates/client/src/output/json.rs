//! JSON output formatting.

use todosync_core::Todo;

/// Format a todo collection as compact JSON, matching the wire shape.
pub fn format_json(todos: &[Todo]) -> String {
    serde_json::to_string(todos).unwrap_or_default()
}
