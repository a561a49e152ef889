use anyhow::Context;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Tokens never expire when unset.
    pub ttl_minutes: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub password_min_length: usize,
}

/// Floor for `PASSWORD_MIN_LENGTH`; lower settings are refused.
pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 6;
/// One year.
pub const MAX_TTL_MINUTES: i64 = 60 * 24 * 365;

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "todo-api".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "todo-api-users".into()),
            ttl_minutes: parse_ttl_minutes(std::env::var("JWT_TTL_MINUTES").ok().as_deref())?,
        };
        anyhow::ensure!(!jwt.secret.is_empty(), "JWT_SECRET must not be empty");
        let password_min_length =
            parse_password_min_length(std::env::var("PASSWORD_MIN_LENGTH").ok().as_deref())?;
        Ok(Self {
            database_url,
            jwt,
            password_min_length,
        })
    }
}

/// Unset or blank means no expiry. Anything else must be a whole number of
/// minutes in `1..=MAX_TTL_MINUTES`.
pub fn parse_ttl_minutes(raw: Option<&str>) -> anyhow::Result<Option<i64>> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let minutes = raw
        .parse::<i64>()
        .with_context(|| format!("JWT_TTL_MINUTES must be a number of minutes, got {raw:?}"))?;
    anyhow::ensure!(
        (1..=MAX_TTL_MINUTES).contains(&minutes),
        "JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {minutes}"
    );
    Ok(Some(minutes))
}

pub fn parse_password_min_length(raw: Option<&str>) -> anyhow::Result<usize> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_PASSWORD_MIN_LENGTH);
    };
    let len = raw
        .parse::<usize>()
        .with_context(|| format!("PASSWORD_MIN_LENGTH must be a number, got {raw:?}"))?;
    anyhow::ensure!(
        len >= DEFAULT_PASSWORD_MIN_LENGTH,
        "PASSWORD_MIN_LENGTH must be at least {DEFAULT_PASSWORD_MIN_LENGTH}, got {len}"
    );
    Ok(len)
}
