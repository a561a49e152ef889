use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CreateTodoRequest, TodoList, TodoResponse, UpdateTodoRequest},
    repo_types::Todo,
    services::{self, parse_id, TodoError},
};
use crate::state::AppState;

pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/:id",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
}

#[instrument(skip(state))]
pub async fn create_todo(
    State(state): State<AppState>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<Json<Todo>, TodoError> {
    let todo = services::create_todo(state.todos.as_ref(), body.text.as_deref()).await?;
    Ok(Json(todo))
}

#[instrument(skip(state))]
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<TodoList>, TodoError> {
    let todos = services::list_todos(state.todos.as_ref()).await?;
    Ok(Json(TodoList { todos }))
}

#[instrument(skip(state))]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, TodoError> {
    let todo = services::get_todo(state.todos.as_ref(), parse_id(&id)?).await?;
    Ok(Json(TodoResponse { todo }))
}

#[instrument(skip(state))]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTodoRequest>,
) -> Result<Json<TodoResponse>, TodoError> {
    let todo = services::update_todo(state.todos.as_ref(), parse_id(&id)?, body).await?;
    Ok(Json(TodoResponse { todo }))
}

#[instrument(skip(state))]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, TodoError> {
    let todo = services::delete_todo(state.todos.as_ref(), parse_id(&id)?).await?;
    Ok(Json(TodoResponse { todo }))
}
