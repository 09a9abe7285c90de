use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use gamecatalog_core::catalog::COVER_IMAGE_BASE_PATH;

use crate::{
    handlers::{
        categories::{
            create_category, delete_category, get_category, list_categories, update_category,
        },
        editors::{create_editor, delete_editor, get_editor, list_editors, update_editor},
        health::healthz,
        login::login_check,
        users::{create_user, delete_user, get_user, list_users, update_user},
        video_games::{
            create_video_game, delete_video_game, get_video_game, list_video_games,
            update_video_game,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let api_routes = Router::new()
        .route("/login_check", post(login_check))
        // Video game routes
        .route("/videogames", get(list_video_games).post(create_video_game))
        .route(
            "/videogames/{id}",
            get(get_video_game)
                .put(update_video_game)
                .delete(delete_video_game),
        )
        // Editor routes
        .route("/editors", get(list_editors).post(create_editor))
        .route(
            "/editors/{id}",
            get(get_editor).put(update_editor).delete(delete_editor),
        )
        // Category routes
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
        // User routes
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .layer(cors);

    let covers = ServeDir::new(state.cover_dir.as_path());

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api/v1", api_routes)
        .nest_service(COVER_IMAGE_BASE_PATH, covers)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
