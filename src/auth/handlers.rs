use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, PublicUser, SignupRequest, UpdateUserRequest, UserList},
        error::AuthError,
        extractors::AuthUser,
        jwt::JwtKeys,
        services::{self, UserUpdate},
    },
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(signup).get(list_users))
        .route("/users/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(get_me).patch(update_me).delete(delete_me))
        .route("/users/me/token", delete(logout))
        .route("/users/me/tokens", delete(logout_everywhere))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let keys = JwtKeys::from_ref(&state);
    let session = services::signup(
        state.users.as_ref(),
        &keys,
        state.config.password_min_length,
        &payload.email,
        &payload.password,
    )
    .await?;
    Ok(Json(AuthResponse {
        token: session.token,
        user: PublicUser::from(&session.user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let keys = JwtKeys::from_ref(&state);
    let session =
        services::login(state.users.as_ref(), &keys, &payload.email, &payload.password).await?;
    Ok(Json(AuthResponse {
        token: session.token,
        user: PublicUser::from(&session.user),
    }))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserList>, AuthError> {
    let users = services::list_users(state.users.as_ref()).await?;
    Ok(Json(UserList {
        users: users.iter().map(PublicUser::from).collect(),
    }))
}

#[instrument(skip_all)]
pub async fn get_me(auth: AuthUser) -> Json<PublicUser> {
    Json(PublicUser::from(&auth.user))
}

#[instrument(skip_all, fields(user_id = %auth.user.id))]
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<PublicUser>, AuthError> {
    let user = services::update_user(
        state.users.as_ref(),
        state.config.password_min_length,
        auth.user,
        UserUpdate {
            email: payload.email,
            new_password: payload.password,
        },
    )
    .await?;
    Ok(Json(PublicUser::from(&user)))
}

#[instrument(skip_all, fields(user_id = %auth.user.id))]
pub async fn delete_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, AuthError> {
    services::delete_user(state.users.as_ref(), auth.user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip_all, fields(user_id = %auth.user.id))]
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, AuthError> {
    // the extractor already resolved this token
    services::revoke(state.users.as_ref(), auth.user.id, &auth.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip_all, fields(user_id = %auth.user.id))]
pub async fn logout_everywhere(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, AuthError> {
    services::revoke_all(state.users.as_ref(), auth.user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
