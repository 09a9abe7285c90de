//! Token login.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use gamecatalog_core::auth::AuthError;
use gamecatalog_core::storage::UserRepository;

use crate::{auth::verify_password, error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/v1/login_check
///
/// Unknown emails and wrong passwords both answer 401 with the same message.
pub async fn login_check(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .store
        .get_user_by_email(request.username.trim())
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    // Argon2 is CPU bound, so it runs on the blocking pool.
    let password_hash = user.password_hash.clone();
    let verified =
        tokio::task::spawn_blocking(move || verify_password(&request.password, &password_hash))
            .await
            .map_err(|e| ApiError::Internal(format!("Password check task failed: {e}")))?;
    if !verified {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = state
        .tokens
        .issue(&user)
        .map_err(|e| ApiError::Internal(format!("Failed to sign token: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(LoginResponse { token }))
}
