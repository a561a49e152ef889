use thiserror::Error;

/// Failure of the backing store. Never retried here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("email already registered")]
    DuplicateEmail,
}

impl StoreError {
    /// Maps a unique-index violation on insert/update to `DuplicateEmail`.
    pub fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateEmail,
            _ => StoreError::Database(err),
        }
    }
}
