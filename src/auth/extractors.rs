use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::{jwt::JwtKeys, repo_types::User, services};
use crate::state::AppState;

/// Resolved session: the active user and the token they presented.
pub struct AuthUser {
    pub user: User,
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Expect "Bearer <token>"
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer ").or_else(|| h.strip_prefix("bearer ")))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| (StatusCode::UNAUTHORIZED, "Unauthorized").into_response())?;

        let keys = JwtKeys::from_ref(state);
        match services::authenticate(state.users.as_ref(), &keys, token).await {
            Ok(user) => Ok(AuthUser {
                user,
                token: token.to_string(),
            }),
            Err(e) => {
                if e.is_auth_failure() {
                    warn!(reason = %e, "rejected bearer token");
                }
                Err(e.into_response())
            }
        }
    }
}
