use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

use crate::auth::error::AuthError;
use crate::config::DEFAULT_PASSWORD_MIN_LENGTH;

/// Rejects plaintexts shorter than `min_len` characters, and never accepts
/// fewer than `DEFAULT_PASSWORD_MIN_LENGTH` whatever `min_len` says.
pub fn check_length(plain: &str, min_len: usize) -> Result<(), AuthError> {
    let min_len = min_len.max(DEFAULT_PASSWORD_MIN_LENGTH);
    if plain.chars().count() < min_len {
        return Err(AuthError::validation(
            "password",
            format!("Password must be at least {min_len} characters"),
        ));
    }
    Ok(())
}

/// Argon2 with a fresh random salt per call.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            AuthError::Crypto(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        AuthError::Crypto(e.to_string())
    })?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Crypto(e.to_string())),
    }
}
