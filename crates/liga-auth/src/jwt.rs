use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AuthError;
use crate::types::{Role, Subject};

/// Session token claims. Accepts tokens issued by `liga` and by the league
/// backend, which puts a numeric `user_id` in place of `sub` and omits
/// `username`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    #[serde(alias = "user_id", deserialize_with = "string_or_number")]
    pub sub: String,
    #[serde(default)]
    pub username: String,
    /// Backend role id. Left untyped: it is decoded through
    /// [`Subject::from_role_id`] so unknown ids fail closed.
    #[serde(default)]
    pub rol: Option<i64>,
    pub exp: usize,
    pub iat: usize,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

impl SessionClaims {
    pub fn subject(&self) -> Subject {
        Subject::from_role_id(self.rol)
    }
}

pub fn create_jwt(
    user_id: &str,
    username: &str,
    role: Option<Role>,
    secret: &str,
    ttl_hours: u64,
) -> Result<String, AuthError> {
    let now = chrono::Utc::now().timestamp() as usize;
    let exp = usize::try_from(ttl_hours)
        .ok()
        .and_then(|h| h.checked_mul(3600))
        .and_then(|secs| secs.checked_add(now))
        .ok_or_else(|| AuthError::InvalidInput(format!("token ttl too large: {ttl_hours}h")))?;
    let claims = SessionClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        rol: role.map(Role::id),
        exp,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Internal(format!("jwt encode error: {e}")))
}

pub fn verify_jwt(token: &str, secret: &str) -> Result<SessionClaims, AuthError> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::Unauthorized)?;
    Ok(data.claims)
}
