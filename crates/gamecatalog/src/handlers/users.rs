//! User account handlers.
//!
//! Listing, reading, creating and deleting accounts is reserved to admins.
//! Updates are allowed for the account owner as well. Password hashes never
//! leave the store: every response goes through [`UserView`].

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use gamecatalog_core::auth::can_modify_user;
use gamecatalog_core::catalog::{CreateUserRequest, UpdateUserRequest, User, UserView};
use gamecatalog_core::storage::UserRepository;

use super::ListQuery;
use crate::{
    auth::{hash_password, AdminUser, CurrentUser},
    error::ApiError,
    state::AppState,
};

/// GET /api/v1/users
pub async fn list_users(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<UserView>>, ApiError> {
    let pagination = query.pagination()?;
    let users = state.store.list_users(pagination).await?;

    Ok(Json(users.iter().map(UserView::from).collect()))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    AdminUser(_): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserView>, ApiError> {
    let user = find_user(&state, id).await?;
    Ok(Json(UserView::from(&user)))
}

/// POST /api/v1/users
pub async fn create_user(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    request.validate()?;
    let hash = hash_secret(request.password.clone()).await?;

    let user = state.store.create_user(request.into_new_user(hash)).await?;
    tracing::info!(user_id = user.id, admin_id = admin.sub, "User created");

    Ok((StatusCode::CREATED, Json(UserView::from(&user))))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    CurrentUser(claims): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserView>, ApiError> {
    can_modify_user(&claims, id)?;

    let mut user = find_user(&state, id).await?;
    let hash = match request.new_password()? {
        Some(password) => Some(hash_secret(password.to_owned()).await?),
        None => None,
    };
    request.apply_to(&mut user, hash)?;

    state.store.update_user(&user).await?;
    tracing::info!(user_id = id, actor_id = claims.sub, "User updated");

    Ok(Json(UserView::from(&user)))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_user(id).await?;
    tracing::info!(user_id = id, admin_id = admin.sub, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn find_user(state: &AppState, id: i64) -> Result<User, ApiError> {
    state
        .store
        .get_user(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
}

/// Argon2 is CPU bound, so it runs on the blocking pool.
async fn hash_secret(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(format!("Password hashing task failed: {e}")))?
        .map_err(|e| ApiError::Internal(format!("Failed to hash password: {e}")))
}
