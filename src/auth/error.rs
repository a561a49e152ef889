use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::error::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("invalid credentials")]
    InvalidCredentials,

    /// Bad structure or signature. Storage was not consulted.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Well-signed token that is not in the user's active list.
    #[error("unauthenticated")]
    Unauthenticated,

    #[error(transparent)]
    Store(StoreError),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl AuthError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AuthError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials | AuthError::InvalidToken(_) | AuthError::Unauthenticated
        )
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => {
                AuthError::validation("email", "Email already registered")
            }
            other => AuthError::Store(other),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "field": field, "message": message })),
            )
                .into_response(),
            AuthError::InvalidCredentials
            | AuthError::InvalidToken(_)
            | AuthError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
            }
            AuthError::Store(e) => {
                error!(error = %e, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
            AuthError::Crypto(msg) => {
                error!(error = %msg, "crypto failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
