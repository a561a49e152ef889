use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::{
    error::AuthError,
    jwt::JwtKeys,
    password::{check_length, hash_password, verify_password},
    repo::UserStore,
    repo_types::{ActiveToken, User, AUTH_SCOPE},
};

pub const EMAIL_MIN_LENGTH: usize = 4;

/// A user together with a freshly issued session token.
#[derive(Debug)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Explicit changes for `update_user`. The password is re-hashed only when
/// `new_password` is set.
#[derive(Debug, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub new_password: Option<String>,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    email.chars().count() >= EMAIL_MIN_LENGTH && EMAIL_RE.is_match(email)
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn validated_email(raw: &str) -> Result<String, AuthError> {
    let email = normalize_email(raw);
    if !is_valid_email(&email) {
        return Err(AuthError::validation(
            "email",
            format!("{email} is not a valid email"),
        ));
    }
    Ok(email)
}

/// Mints a token for `user`, records it in the user's token list and
/// persists. The token is returned only after the save succeeded.
pub async fn issue_token(
    store: &dyn UserStore,
    keys: &JwtKeys,
    user: &mut User,
    scope: &str,
) -> Result<String, AuthError> {
    let token = keys.sign(user.id, scope)?;
    user.tokens.push(ActiveToken {
        access: scope.to_string(),
        token: token.clone(),
    });
    store.save(user).await?;
    debug!(user_id = %user.id, scope, active = user.tokens.len(), "token issued");
    Ok(token)
}

/// Signature first, storage second. A malformed token never reaches the
/// store.
pub async fn resolve(
    store: &dyn UserStore,
    keys: &JwtKeys,
    token: &str,
) -> Result<User, AuthError> {
    let claims = keys.verify(token)?;
    store
        .find_by_active_token(claims.sub, AUTH_SCOPE, token)
        .await?
        .ok_or(AuthError::Unauthenticated)
}

/// Removing a token that is not present is a no-op.
pub async fn revoke(store: &dyn UserStore, user_id: Uuid, token: &str) -> Result<(), AuthError> {
    let Some(mut user) = store.find_by_id(user_id).await? else {
        return Ok(());
    };
    let before = user.tokens.len();
    user.tokens.retain(|t| t.token != token);
    if user.tokens.len() != before {
        store.save(&user).await?;
        debug!(%user_id, "token revoked");
    }
    Ok(())
}

pub async fn revoke_all(store: &dyn UserStore, user_id: Uuid) -> Result<(), AuthError> {
    let Some(mut user) = store.find_by_id(user_id).await? else {
        return Ok(());
    };
    if !user.tokens.is_empty() {
        user.tokens.clear();
        store.save(&user).await?;
    }
    info!(%user_id, "all tokens revoked");
    Ok(())
}

pub async fn signup(
    store: &dyn UserStore,
    keys: &JwtKeys,
    min_password_length: usize,
    email: &str,
    password: &str,
) -> Result<Session, AuthError> {
    let email = validated_email(email)?;
    check_length(password, min_password_length)?;

    if store.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AuthError::validation("email", "Email already registered"));
    }

    let mut user = User::new(email, hash_password(password)?);
    let token = issue_token(store, keys, &mut user, AUTH_SCOPE).await?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Session { user, token })
}

pub async fn login(
    store: &dyn UserStore,
    keys: &JwtKeys,
    email: &str,
    password: &str,
) -> Result<Session, AuthError> {
    let email = normalize_email(email);
    let Some(mut user) = store.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(AuthError::InvalidCredentials);
    }

    let token = issue_token(store, keys, &mut user, AUTH_SCOPE).await?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Session { user, token })
}

pub async fn authenticate(
    store: &dyn UserStore,
    keys: &JwtKeys,
    token: &str,
) -> Result<User, AuthError> {
    resolve(store, keys, token).await
}

/// Revokes the presented token after checking it is still active.
pub async fn logout(store: &dyn UserStore, keys: &JwtKeys, token: &str) -> Result<(), AuthError> {
    let user = resolve(store, keys, token).await?;
    revoke(store, user.id, token).await?;
    info!(user_id = %user.id, "user logged out");
    Ok(())
}

pub async fn update_user(
    store: &dyn UserStore,
    min_password_length: usize,
    mut user: User,
    update: UserUpdate,
) -> Result<User, AuthError> {
    if let Some(raw) = update.email {
        let email = validated_email(&raw)?;
        if email != user.email {
            if store.find_by_email(&email).await?.is_some() {
                return Err(AuthError::validation("email", "Email already registered"));
            }
            user.email = email;
        }
    }
    if let Some(password) = update.new_password {
        check_length(&password, min_password_length)?;
        user.password_hash = hash_password(&password)?;
    }
    store.save(&user).await?;
    info!(user_id = %user.id, "user updated");
    Ok(user)
}

pub async fn delete_user(store: &dyn UserStore, user_id: Uuid) -> Result<(), AuthError> {
    if store.delete(user_id).await? {
        info!(%user_id, "user deleted");
    }
    Ok(())
}

pub async fn list_users(store: &dyn UserStore) -> Result<Vec<User>, AuthError> {
    Ok(store.list().await?)
}
