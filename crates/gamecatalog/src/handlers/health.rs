//! Health check endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use gamecatalog_core::storage::VideoGameRepository;

use crate::state::AppState;

/// GET /healthz - Store reachability.
///
/// Returns 200 when the store answers a count query, 503 otherwise.
pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.count_video_games().await {
        Ok(video_games) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "videoGames": video_games })),
        ),
        Err(err) => {
            tracing::error!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unavailable", "error": err.to_string() })),
            )
        }
    }
}
