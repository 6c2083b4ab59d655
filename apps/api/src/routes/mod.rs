pub mod health;

use axum::{
    http::Uri,
    response::Html,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::generation::handlers;
use crate::render::render_page;
use crate::state::AppState;

/// GET /
async fn page_handler() -> Html<String> {
    Html(render_page())
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/generate", post(handlers::handle_generate))
        .route(
            "/api/v1/generate/stream",
            get(handlers::handle_generate_stream),
        )
        .fallback(not_found)
        .with_state(state)
}
