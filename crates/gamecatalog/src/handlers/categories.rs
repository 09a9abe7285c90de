//! Category CRUD handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use gamecatalog_core::catalog::{
    Category, CategoryDetail, CreateCategoryRequest, UpdateCategoryRequest, VideoGameSummary,
};
use gamecatalog_core::storage::{CategoryRepository, VideoGameRepository};

use super::ListQuery;
use crate::{auth::AdminUser, error::ApiError, state::AppState};

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let pagination = query.pagination()?;
    Ok(Json(state.store.list_categories(pagination).await?))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryDetail>, ApiError> {
    let category = find_category(&state, id).await?;
    let video_games = state
        .store
        .list_video_games_by_category(id)
        .await?
        .iter()
        .map(VideoGameSummary::from)
        .collect();

    Ok(Json(CategoryDetail {
        category,
        video_games,
    }))
}

/// POST /api/v1/categories
pub async fn create_category(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let category = state
        .store
        .create_category(request.into_new_category()?)
        .await?;
    tracing::info!(category_id = category.id, admin_id = admin.sub, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/categories/{id}
pub async fn update_category(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    let mut category = find_category(&state, id).await?;
    request.apply_to(&mut category)?;

    state.store.update_category(&category).await?;
    tracing::info!(category_id = id, admin_id = admin.sub, "Category updated");

    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
///
/// Games keep existing, only their link to the category is removed.
pub async fn delete_category(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_category(id).await?;
    tracing::info!(category_id = id, admin_id = admin.sub, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn find_category(state: &AppState, id: i64) -> Result<Category, ApiError> {
    state
        .store
        .get_category(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))
}
