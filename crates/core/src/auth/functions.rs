use chrono::{DateTime, Duration, Utc};

use crate::catalog::{Role, User};

use super::{AuthError, Claims};

/// Builds the claims for a freshly authenticated user.
pub fn claims_for(user: &User, issued_at: DateTime<Utc>, ttl: Duration) -> Claims {
    Claims {
        sub: user.id,
        email: user.email.clone(),
        roles: user.roles.clone(),
        iat: issued_at.timestamp(),
        exp: (issued_at + ttl).timestamp(),
    }
}

/// Check if a token has expired.
pub fn is_token_expired(claims: &Claims, now: DateTime<Utc>) -> bool {
    claims.exp <= now.timestamp()
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn parse_bearer(header: &str) -> Result<&str, AuthError> {
    let token = header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .ok_or(AuthError::MissingToken)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

/// Catalog writes and user administration require `ROLE_ADMIN`.
pub fn can_manage_catalog(roles: &[Role]) -> bool {
    roles.contains(&Role::Admin)
}

/// A user may edit their own account; admins may edit any account.
pub fn can_modify_user(claims: &Claims, target_user_id: i64) -> Result<(), AuthError> {
    if claims.sub == target_user_id || claims.is_admin() {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}
