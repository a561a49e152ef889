use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::auth::repo_types::{ActiveToken, User, UserRow};
use crate::error::StoreError;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    /// User with this id whose token list holds `{scope, token}` exactly.
    async fn find_by_active_token(
        &self,
        id: Uuid,
        scope: &str,
        token: &str,
    ) -> Result<Option<User>, StoreError>;
    async fn list(&self) -> Result<Vec<User>, StoreError>;
    /// Insert or update by id. Fails with `DuplicateEmail` on an email clash.
    async fn save(&self, user: &User) -> Result<(), StoreError>;
    /// Returns whether a user was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, tokens, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, tokens, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(User::from))
    }

    async fn find_by_active_token(
        &self,
        id: Uuid,
        scope: &str,
        token: &str,
    ) -> Result<Option<User>, StoreError> {
        let needle = vec![ActiveToken {
            access: scope.to_string(),
            token: token.to_string(),
        }];
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, tokens, created_at
            FROM users
            WHERE id = $1 AND tokens @> $2
            "#,
        )
        .bind(id)
        .bind(Json(needle))
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(User::from))
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, tokens, created_at
            FROM users
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, tokens, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
               SET email = EXCLUDED.email,
                   password_hash = EXCLUDED.password_hash,
                   tokens = EXCLUDED.tokens
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Json(&user.tokens))
        .bind(user.created_at)
        .execute(&self.db)
        .await
        .map_err(StoreError::from_write)?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
