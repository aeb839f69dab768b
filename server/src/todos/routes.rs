use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Serialize;

use super::input::{CreateTodoInput, PatchTodoInput};
use super::model::Todo;
use super::service::TodoService;
use crate::error::TodoError;

#[derive(Serialize)]
struct TodosBody {
    todos: Vec<Todo>,
}

#[derive(Serialize)]
struct TodoBody {
    todo: Todo,
}

/// `/todos` routes. Errors are rendered by `TodoError`'s `IntoResponse`.
pub fn routes() -> Router<TodoService> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{todo_id}", patch(patch_todo))
}

async fn list_todos(State(service): State<TodoService>) -> Result<Json<TodosBody>, TodoError> {
    let todos = service.list_todos().await?;
    Ok(Json(TodosBody { todos }))
}

async fn create_todo(
    State(service): State<TodoService>,
    Json(input): Json<CreateTodoInput>,
) -> Result<Json<TodoBody>, TodoError> {
    let todo = service.create_todo(input).await?;
    Ok(Json(TodoBody { todo }))
}

async fn patch_todo(
    State(service): State<TodoService>,
    Path(todo_id): Path<String>,
    Json(input): Json<PatchTodoInput>,
) -> Result<Json<TodoBody>, TodoError> {
    let todo = service.patch_todo(&todo_id, input).await?;
    Ok(Json(TodoBody { todo }))
}
