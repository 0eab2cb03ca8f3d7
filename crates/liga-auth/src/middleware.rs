use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AuthError;
use crate::jwt::{SessionClaims, verify_jwt};
use crate::permissions::{Capability, GrantTable};
use crate::policy::SharedGrants;
use crate::types::Subject;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub subject: Subject,
    /// Grant table in force when the request arrived.
    pub grants: Arc<GrantTable>,
}

impl AuthUser {
    pub fn anonymous(grants: Arc<GrantTable>) -> Self {
        Self {
            user_id: None,
            username: None,
            subject: Subject::Anonymous,
            grants,
        }
    }
}

#[derive(Clone)]
pub struct AuthState {
    pub jwt_secret: String,
    pub grants: SharedGrants,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = parts
            .extensions
            .get::<AuthState>()
            .ok_or(AuthError::Internal("auth not configured".into()))?
            .clone();
        let grants = auth_state.grants.snapshot();

        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok());

        // No credentials: anonymous, every capability check will deny.
        let bearer = match auth_header {
            Some(h) if h.starts_with("Bearer ") => &h[7..],
            Some(_) => return Err(AuthError::Unauthorized),
            None => return Ok(AuthUser::anonymous(grants)),
        };

        let claims: SessionClaims = verify_jwt(bearer, &auth_state.jwt_secret)?;
        Ok(AuthUser {
            subject: claims.subject(),
            user_id: Some(claims.sub),
            username: Some(claims.username),
            grants,
        })
    }
}

pub fn require_permission(user: &AuthUser, permission: Capability) -> Result<(), AuthError> {
    if user.grants.has_permission(user.subject, permission) {
        Ok(())
    } else {
        Err(AuthError::Forbidden(format!(
            "missing permission: {permission}"
        )))
    }
}

pub fn require_any_permission(
    user: &AuthUser,
    permissions: &[Capability],
) -> Result<(), AuthError> {
    if user.grants.has_any_permission(user.subject, permissions) {
        Ok(())
    } else {
        Err(AuthError::Forbidden(format!(
            "requires one of: {}",
            join(permissions)
        )))
    }
}

pub fn require_all_permissions(
    user: &AuthUser,
    permissions: &[Capability],
) -> Result<(), AuthError> {
    let missing: Vec<Capability> = permissions
        .iter()
        .copied()
        .filter(|p| !user.grants.has_permission(user.subject, *p))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AuthError::Forbidden(format!(
            "missing permissions: {}",
            join(&missing)
        )))
    }
}

fn join(permissions: &[Capability]) -> String {
    permissions
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
