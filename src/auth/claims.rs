use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload binding a token to a user and a scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,      // user ID
    pub access: String, // scope, "auth" for sessions
    pub iat: usize,     // issued at (unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<usize>,
    pub iss: String,
    pub aud: String,
    pub jti: Uuid, // keeps tokens unique within a user's list
}
