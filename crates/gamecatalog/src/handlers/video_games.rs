//! Video game CRUD handlers.
//!
//! Reads are public. Writes require `ROLE_ADMIN` and accept either a JSON
//! body or a multipart form carrying an optional cover image.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use gamecatalog_core::catalog::{
    missing_ids, CreateVideoGameRequest, UpdateVideoGameRequest, VideoGame, VideoGameDetail,
};
use gamecatalog_core::storage::{CategoryRepository, EditorRepository, VideoGameRepository};

use super::payload::{store_cover, GameForm};
use super::ListQuery;
use crate::{auth::AdminUser, error::ApiError, state::AppState};

/// A video game as it appears in list responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGameListItem {
    #[serde(flatten)]
    pub game: VideoGame,
    pub cover_image_url: Option<String>,
}

impl From<VideoGame> for VideoGameListItem {
    fn from(game: VideoGame) -> Self {
        let cover_image_url = game.cover_image_url();
        Self {
            game,
            cover_image_url,
        }
    }
}

/// GET /api/v1/videogames
pub async fn list_video_games(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<VideoGameListItem>>, ApiError> {
    let pagination = query.pagination()?;
    let games = state.store.list_video_games(pagination).await?;

    Ok(Json(games.into_iter().map(VideoGameListItem::from).collect()))
}

/// GET /api/v1/videogames/{id}
pub async fn get_video_game(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VideoGameDetail>, ApiError> {
    let game = find_video_game(&state, id).await?;
    Ok(Json(load_detail(&state, &game).await?))
}

/// POST /api/v1/videogames
pub async fn create_video_game(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    form: GameForm<CreateVideoGameRequest>,
) -> Result<(StatusCode, Json<VideoGameDetail>), ApiError> {
    let mut new_game = form.request.into_new_video_game()?;
    check_references(&state, new_game.editor_id, &new_game.category_ids).await?;

    if let Some(upload) = form.cover_file {
        new_game.cover_image = Some(store_cover(&state.cover_dir, upload).await?);
    }

    let game = state.store.create_video_game(new_game).await?;
    tracing::info!(video_game_id = game.id, admin_id = admin.sub, "Video game created");

    Ok((StatusCode::CREATED, Json(load_detail(&state, &game).await?)))
}

/// PUT /api/v1/videogames/{id}
pub async fn update_video_game(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: GameForm<UpdateVideoGameRequest>,
) -> Result<Json<VideoGameDetail>, ApiError> {
    let mut game = find_video_game(&state, id).await?;
    form.request.apply_to(&mut game)?;
    check_references(&state, game.editor_id, &game.category_ids).await?;

    if let Some(upload) = form.cover_file {
        game.cover_image = Some(store_cover(&state.cover_dir, upload).await?);
    }

    state.store.update_video_game(&game).await?;
    tracing::info!(video_game_id = id, admin_id = admin.sub, "Video game updated");

    Ok(Json(load_detail(&state, &game).await?))
}

/// DELETE /api/v1/videogames/{id}
pub async fn delete_video_game(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_video_game(id).await?;
    tracing::info!(video_game_id = id, admin_id = admin.sub, "Video game deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn find_video_game(state: &AppState, id: i64) -> Result<VideoGame, ApiError> {
    state
        .store
        .get_video_game(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Video game not found".to_string()))
}

/// Resolves the editor and categories of a game.
async fn load_detail(state: &AppState, game: &VideoGame) -> Result<VideoGameDetail, ApiError> {
    let editor = match game.editor_id {
        Some(editor_id) => state.store.get_editor(editor_id).await?,
        None => None,
    };
    let categories = state.store.get_categories(&game.category_ids).await?;

    Ok(VideoGameDetail::new(game, editor, categories))
}

/// Rejects references to editors or categories that do not exist.
async fn check_references(
    state: &AppState,
    editor_id: Option<i64>,
    category_ids: &[i64],
) -> Result<(), ApiError> {
    if let Some(editor_id) = editor_id {
        if state.store.get_editor(editor_id).await?.is_none() {
            return Err(ApiError::NotFound("Editor not found".to_string()));
        }
    }

    if !category_ids.is_empty() {
        let known: Vec<i64> = state
            .store
            .get_categories(category_ids)
            .await?
            .iter()
            .map(|category| category.id)
            .collect();
        let missing = missing_ids(category_ids, &known);
        if !missing.is_empty() {
            tracing::debug!(?missing, "Unknown category references");
            return Err(ApiError::NotFound("Category not found".to_string()));
        }
    }

    Ok(())
}
