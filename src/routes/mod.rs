pub mod comments;
pub mod pages;
pub mod posts;
pub mod session;

use crate::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Every page and JSON route, with request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(pages::router())
        .nest("/api/posts", posts::router().merge(comments::router()))
        .nest("/api/session", session::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "Forum client is running!"
}
