pub mod advice;
pub mod api;
pub mod upload;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(upload::index))
        .route("/upload", post(upload::upload))
        // Advice partials
        .route("/advice", post(advice::advice))
        .route("/ask", post(advice::ask))
        // API
        .route("/api/summary", post(api::summary))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
