//! Editor CRUD handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use gamecatalog_core::catalog::{
    CreateEditorRequest, Editor, EditorDetail, UpdateEditorRequest, VideoGameSummary,
};
use gamecatalog_core::storage::{EditorRepository, VideoGameRepository};

use super::ListQuery;
use crate::{auth::AdminUser, error::ApiError, state::AppState};

/// GET /api/v1/editors
pub async fn list_editors(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Editor>>, ApiError> {
    let pagination = query.pagination()?;
    Ok(Json(state.store.list_editors(pagination).await?))
}

/// GET /api/v1/editors/{id} - The editor with its published games.
pub async fn get_editor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<EditorDetail>, ApiError> {
    let editor = find_editor(&state, id).await?;
    let video_games = state
        .store
        .list_video_games_by_editor(id)
        .await?
        .iter()
        .map(VideoGameSummary::from)
        .collect();

    Ok(Json(EditorDetail {
        editor,
        video_games,
    }))
}

/// POST /api/v1/editors
pub async fn create_editor(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(request): Json<CreateEditorRequest>,
) -> Result<(StatusCode, Json<Editor>), ApiError> {
    let editor = state.store.create_editor(request.into_new_editor()?).await?;
    tracing::info!(editor_id = editor.id, admin_id = admin.sub, "Editor created");

    Ok((StatusCode::CREATED, Json(editor)))
}

/// PUT /api/v1/editors/{id}
pub async fn update_editor(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateEditorRequest>,
) -> Result<Json<Editor>, ApiError> {
    let mut editor = find_editor(&state, id).await?;
    request.apply_to(&mut editor)?;

    state.store.update_editor(&editor).await?;
    tracing::info!(editor_id = id, admin_id = admin.sub, "Editor updated");

    Ok(Json(editor))
}

/// DELETE /api/v1/editors/{id}
pub async fn delete_editor(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_editor(id).await?;
    tracing::info!(editor_id = id, admin_id = admin.sub, "Editor deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn find_editor(state: &AppState, id: i64) -> Result<Editor, ApiError> {
    state
        .store
        .get_editor(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Editor not found".to_string()))
}
