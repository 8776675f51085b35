use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::models::users;

/// Access-token claims.
///
/// The `sub` field is the numeric user id rendered as a string.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user id.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    /// Username at the time of issue, informational only.
    pub username: Option<String>,
}

impl Claims {
    pub fn for_user(user: &users::Model, ttl_secs: u64) -> Self {
        let now = Utc::now().timestamp() as usize;
        Self {
            sub: user.id.to_string(),
            exp: now + ttl_secs as usize,
            iat: Some(now),
            username: Some(user.username.clone()),
        }
    }

    /// Extract the user id from the `sub` claim.
    pub fn user_id(&self) -> Result<i32, String> {
        self.sub
            .parse()
            .map_err(|e| format!("Invalid user id in sub claim: {e}"))
    }
}

/// Sign `claims` with HS256.
pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("Failed to sign token: {e}"))
}

/// Validate an HS256 token and return the decoded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| format!("Token validation failed: {e:?}"))
}
