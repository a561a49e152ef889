use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::{claims::Claims, error::AuthError},
    config::JwtConfig,
    state::AppState,
};

/// Signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Option<Duration>,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::new(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: cfg
                .ttl_minutes
                .map(|m| Duration::from_secs(u64::try_from(m).unwrap_or(0).saturating_mul(60))),
        }
    }

    pub fn sign(&self, user_id: Uuid, scope: &str) -> Result<String, AuthError> {
        let now = OffsetDateTime::now_utc();
        let exp = match self.ttl {
            Some(ttl) => {
                let expires_at = i64::try_from(ttl.as_secs())
                    .ok()
                    .and_then(|secs| now.checked_add(TimeDuration::seconds(secs)))
                    .ok_or_else(|| AuthError::Crypto("token expiry out of range".into()))?;
                Some(expires_at.unix_timestamp() as usize)
            }
            None => None,
        };
        let claims = Claims {
            sub: user_id,
            access: scope.to_string(),
            iat: now.unix_timestamp() as usize,
            exp,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            jti: Uuid::new_v4(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::Crypto(format!("jwt encode: {e}")))?;
        debug!(user_id = %user_id, scope, "jwt signed");
        Ok(token)
    }

    /// Local check only: signature, issuer, audience and expiry if present.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        validation.set_required_spec_claims(&["sub", "iss", "aud"]);
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        debug!(user_id = %data.claims.sub, scope = %data.claims.access, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str, issuer: &str, audience: &str) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_minutes: None,
        })
    }

    #[test]
    fn sign_and_verify() {
        let keys = make_keys("dev-secret", "test-issuer", "test-aud");
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id, "auth").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.access, "auth");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert!(claims.exp.is_none());
    }

    #[test]
    fn tokens_for_same_user_differ() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let user_id = Uuid::new_v4();
        assert_ne!(keys.sign(user_id, "auth").unwrap(), keys.sign(user_id, "auth").unwrap());
    }

    #[test]
    fn verify_rejects_other_secret() {
        let good = make_keys("secret-a", "iss", "aud");
        let bad = make_keys("secret-b", "iss", "aud");
        let token = bad.sign(Uuid::new_v4(), "auth").unwrap();
        assert!(matches!(good.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn verify_rejects_wrong_issuer_or_audience() {
        let good = make_keys("same-secret", "good-iss", "good-aud");
        let bad = make_keys("same-secret", "bad-iss", "bad-aud");
        let token = good.sign(Uuid::new_v4(), "auth").unwrap();
        assert!(matches!(bad.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn verify_rejects_tampered_payload() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let token = keys.sign(Uuid::new_v4(), "auth").unwrap();
        let other = keys.sign(Uuid::new_v4(), "auth").unwrap();
        // splice the second token's payload under the first token's signature
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);
        assert!(matches!(keys.verify(&forged), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = make_keys("dev-secret", "iss", "aud");
        assert!(matches!(keys.verify("garbage-string"), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn ttl_adds_expiry_and_expired_tokens_fail() {
        let keys = JwtKeys::new(&JwtConfig {
            secret: "dev-secret".into(),
            issuer: "iss".into(),
            audience: "aud".into(),
            ttl_minutes: Some(5),
        });
        let token = keys.sign(Uuid::new_v4(), "auth").unwrap();
        assert!(keys.verify(&token).unwrap().exp.is_some());

        let stale = Claims {
            sub: Uuid::new_v4(),
            access: "auth".into(),
            iat: 1,
            exp: Some(2),
            iss: "iss".into(),
            aud: "aud".into(),
            jti: Uuid::new_v4(),
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(b"dev-secret"),
        )
        .unwrap();
        assert!(matches!(keys.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn oversized_ttl_is_an_error_not_a_panic() {
        let keys = JwtKeys::new(&JwtConfig {
            secret: "dev-secret".into(),
            issuer: "iss".into(),
            audience: "aud".into(),
            ttl_minutes: Some(1_000_000_000_000),
        });
        let err = keys.sign(Uuid::new_v4(), "auth").unwrap_err();
        assert!(matches!(err, AuthError::Crypto(_)));
    }
}
