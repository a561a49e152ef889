use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

/// Scope carried by session tokens.
pub const AUTH_SCOPE: &str = "auth";

/// One entry of a user's active-token list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveToken {
    pub access: String, // scope
    pub token: String,
}

/// User record. Not `Serialize`: clients only ever see `PublicUser`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,       // Argon2 PHC string
    pub tokens: Vec<ActiveToken>,    // login order
    pub created_at: OffsetDateTime,
}

impl User {
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            tokens: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Row shape in `users`; `tokens` is a JSONB array.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub tokens: Json<Vec<ActiveToken>>,
    pub created_at: OffsetDateTime,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            email: r.email,
            password_hash: r.password_hash,
            tokens: r.tokens.0,
            created_at: r.created_at,
        }
    }
}
