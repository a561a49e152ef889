use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::StoreError;
use crate::todos::{dto::UpdateTodoRequest, repo::TodoStore, repo_types::Todo};

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("text is required")]
    MissingText,

    #[error("todo not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        match self {
            TodoError::MissingText => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            TodoError::NotFound => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            TodoError::Store(e) => {
                error!(error = %e, "todo store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

/// Ids that do not parse are treated like unknown ids.
pub fn parse_id(raw: &str) -> Result<Uuid, TodoError> {
    Uuid::parse_str(raw).map_err(|_| TodoError::NotFound)
}

fn clean_text(raw: Option<&str>) -> Result<String, TodoError> {
    match raw.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(TodoError::MissingText),
    }
}

pub async fn create_todo(store: &dyn TodoStore, text: Option<&str>) -> Result<Todo, TodoError> {
    let todo = Todo::new(clean_text(text)?);
    store.insert(&todo).await?;
    info!(todo_id = %todo.id, "todo created");
    Ok(todo)
}

pub async fn list_todos(store: &dyn TodoStore) -> Result<Vec<Todo>, TodoError> {
    Ok(store.list().await?)
}

pub async fn get_todo(store: &dyn TodoStore, id: Uuid) -> Result<Todo, TodoError> {
    store.find_by_id(id).await?.ok_or(TodoError::NotFound)
}

pub async fn update_todo(
    store: &dyn TodoStore,
    id: Uuid,
    changes: UpdateTodoRequest,
) -> Result<Todo, TodoError> {
    let mut todo = get_todo(store, id).await?;
    if let Some(text) = changes.text {
        todo.text = clean_text(Some(&text))?;
    }
    if let Some(completed) = changes.completed {
        todo.set_completed(completed);
    }
    if !store.update(&todo).await? {
        return Err(TodoError::NotFound);
    }
    Ok(todo)
}

pub async fn delete_todo(store: &dyn TodoStore, id: Uuid) -> Result<Todo, TodoError> {
    let todo = store.delete(id).await?.ok_or(TodoError::NotFound)?;
    info!(todo_id = %todo.id, "todo deleted");
    Ok(todo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todos::memory::MemoryTodoStore;

    #[tokio::test]
    async fn create_trims_and_rejects_blank() {
        let store = MemoryTodoStore::new();
        let todo = create_todo(&store, Some("  buy milk  ")).await.unwrap();
        assert_eq!(todo.text, "buy milk");
        assert!(!todo.completed);

        assert!(matches!(create_todo(&store, None).await, Err(TodoError::MissingText)));
        assert!(matches!(create_todo(&store, Some("   ")).await, Err(TodoError::MissingText)));
        assert_eq!(list_todos(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let store = MemoryTodoStore::new();
        let todo = create_todo(&store, Some("first")).await.unwrap();

        let updated = update_todo(
            &store,
            todo.id,
            UpdateTodoRequest {
                text: Some("renamed".into()),
                completed: Some(true),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.text, "renamed");
        assert!(updated.completed_at.is_some());
        assert_eq!(get_todo(&store, todo.id).await.unwrap(), updated);

        let removed = delete_todo(&store, todo.id).await.unwrap();
        assert_eq!(removed.id, todo.id);
        assert!(matches!(get_todo(&store, todo.id).await, Err(TodoError::NotFound)));
        assert!(matches!(delete_todo(&store, todo.id).await, Err(TodoError::NotFound)));
    }

    #[test]
    fn malformed_id_is_not_found() {
        assert!(matches!(parse_id("123"), Err(TodoError::NotFound)));
        assert!(parse_id(&Uuid::new_v4().to_string()).is_ok());
    }
}
