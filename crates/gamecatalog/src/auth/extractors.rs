//! Axum extractors for authentication.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use gamecatalog_core::auth::{can_manage_catalog, parse_bearer, AuthError, Claims};

use crate::{error::ApiError, state::AppState};

/// Extractor for an authenticated caller. Returns 401 without a valid token.
pub struct CurrentUser(pub Claims);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

        let token = parse_bearer(header)?;
        let claims = state.tokens.verify(token)?;

        Ok(CurrentUser(claims))
    }
}

/// Extractor for a caller holding `ROLE_ADMIN`. Returns 403 for other users.
pub struct AdminUser(pub Claims);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(claims) = CurrentUser::from_request_parts(parts, state).await?;

        if !can_manage_catalog(&claims.roles) {
            tracing::warn!(user_id = claims.sub, "Authorization denied: admin role required");
            return Err(AuthError::Forbidden.into());
        }
        Ok(AdminUser(claims))
    }
}
