//! Todo collection handlers.
//!
//! These handlers use the repository trait object for storage access. The
//! append path performs no uniqueness check: a duplicate id lands in the
//! collection as-is.

use axum::{extract::State, Json};

use todosync_core::{CreateTodo, Todo};

use crate::{handlers::AppError, state::AppState};

/// List the full todo collection (GET /api/todos).
///
/// Returns a JSON array of `{id, title}` objects in insertion order.
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = state.todo_repo.list().await?;
    Ok(Json(todos))
}

/// Append a todo to the collection (POST /api/todos).
///
/// Echoes the appended todo back as confirmation.
pub async fn append_todo(
    State(state): State<AppState>,
    Json(payload): Json<CreateTodo>,
) -> Result<Json<Todo>, AppError> {
    let todo: Todo = payload.into();
    let echoed = state.todo_repo.append(&todo).await?;

    tracing::info!(todo_id = %echoed.id, "Appended todo");

    Ok(Json(echoed))
}
