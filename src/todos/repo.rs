use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StoreError;
use crate::todos::repo_types::Todo;

#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn insert(&self, todo: &Todo) -> Result<(), StoreError>;
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, StoreError>;
    /// Returns false when no todo has this id.
    async fn update(&self, todo: &Todo) -> Result<bool, StoreError>;
    async fn delete(&self, id: Uuid) -> Result<Option<Todo>, StoreError>;
}

#[derive(Clone)]
pub struct PgTodoStore {
    db: PgPool,
}

impl PgTodoStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn insert(&self, todo: &Todo) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO todos (id, text, completed, completed_at, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(todo.id)
        .bind(&todo.text)
        .bind(todo.completed)
        .bind(todo.completed_at)
        .bind(todo.created_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let rows = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, text, completed, completed_at, created_at
            FROM todos
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let row = sqlx::query_as::<_, Todo>(
            r#"
            SELECT id, text, completed, completed_at, created_at
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn update(&self, todo: &Todo) -> Result<bool, StoreError> {
        let res = sqlx::query(
            r#"
            UPDATE todos
               SET text = $2, completed = $3, completed_at = $4
             WHERE id = $1
            "#,
        )
        .bind(todo.id)
        .bind(&todo.text)
        .bind(todo.completed)
        .bind(todo.completed_at)
        .execute(&self.db)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let row = sqlx::query_as::<_, Todo>(
            r#"
            DELETE FROM todos
            WHERE id = $1
            RETURNING id, text, completed, completed_at, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }
}
