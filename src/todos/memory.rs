use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::todos::{repo::TodoStore, repo_types::Todo};

/// Insertion-ordered in-memory `TodoStore` for tests.
#[derive(Default)]
pub struct MemoryTodoStore {
    todos: Mutex<Vec<Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn insert(&self, todo: &Todo) -> Result<(), StoreError> {
        self.todos.lock().unwrap().push(todo.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.todos.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        Ok(self.todos.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn update(&self, todo: &Todo) -> Result<bool, StoreError> {
        let mut todos = self.todos.lock().unwrap();
        match todos.iter_mut().find(|t| t.id == todo.id) {
            Some(slot) => {
                *slot = todo.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.todos.lock().unwrap();
        let pos = todos.iter().position(|t| t.id == id);
        Ok(pos.map(|i| todos.remove(i)))
    }
}
