use crate::{
    models::{response::ApiResponse, ThemeMode, User},
    state::AppState,
};
use axum::{
    extract::State,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_session))
        .route("/user", put(set_user).delete(clear_user))
        .route("/theme", put(set_theme))
        .route("/theme/toggle", post(toggle_theme))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub theme: ThemeMode,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub mode: ThemeMode,
}

fn session(state: &AppState) -> SessionView {
    SessionView {
        user: state.store.user.current(),
        is_authenticated: state.store.user.is_authenticated(),
        theme: state.store.theme.mode(),
    }
}

async fn get_session(State(state): State<Arc<AppState>>) -> Json<ApiResponse<SessionView>> {
    Json(ApiResponse::success(session(&state)))
}

async fn set_user(
    State(state): State<Arc<AppState>>,
    Json(user): Json<User>,
) -> Json<ApiResponse<SessionView>> {
    info!("Signing in as {} ({})", user.username, user.id);
    state.store.user.set_user(user);
    Json(ApiResponse::success(session(&state)))
}

async fn clear_user(State(state): State<Arc<AppState>>) -> Json<ApiResponse<SessionView>> {
    info!("Signing out");
    state.store.user.clear_user();
    Json(ApiResponse::success(session(&state)))
}

async fn set_theme(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ThemeRequest>,
) -> Json<ApiResponse<SessionView>> {
    state.store.theme.set(request.mode);
    Json(ApiResponse::success(session(&state)))
}

async fn toggle_theme(State(state): State<Arc<AppState>>) -> Json<ApiResponse<SessionView>> {
    state.store.theme.toggle();
    Json(ApiResponse::success(session(&state)))
}
