use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::state::SharedState;
use crate::ws;

/// Build the Axum router with all routes and middleware.
pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Lesson pages and assets, addressed by the catalogs' `file` entries.
    let lesson_pages = ServeDir::new(&state.config.lessons_dir);

    Router::new()
        // Health check (outside /api prefix)
        .route("/health", get(handlers::health))
        // Board instances
        .route(
            "/api/boards",
            post(handlers::create_board).get(handlers::list_boards),
        )
        .route(
            "/api/boards/{id}",
            get(handlers::get_board).delete(handlers::delete_board),
        )
        .route("/api/boards/{id}/commands", post(handlers::board_command))
        // Lesson catalogs
        .route("/api/lessons", get(handlers::list_lessons))
        .nest_service("/lessons", lesson_pages)
        // WebSocket: live board views
        .route("/ws/boards/{id}", get(ws::ws_handler))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
