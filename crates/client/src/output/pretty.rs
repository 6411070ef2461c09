//! Pretty output formatting.

use todosync_core::Todo;

/// Format a todo for display.
pub fn format_todo(todo: &Todo) -> String {
    format!("{}\n  ID: {}", todo.title, todo.id)
}

/// Format a todo collection for display.
pub fn format_todos(todos: &[Todo]) -> String {
    if todos.is_empty() {
        return "No todos found.".to_string();
    }
    let mut output = format!("TODOS ({})\n", todos.len());
    output.push_str(&"-".repeat(40));
    for todo in todos {
        output.push_str(&format!("\n{}", format_todo(todo)));
        output.push('\n');
    }
    output
}
