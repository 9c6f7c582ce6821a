use crate::{
    error::Result,
    models::{response::ApiResponse, EntityId, NewPostForm, Post},
    state::AppState,
    views::{PostCardView, PostDetailView},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", get(get_post))
        .route("/:id/like", post(toggle_like))
}

/// The feed, newest first.
async fn list_posts(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse<Vec<PostCardView>>>> {
    let posts = state.post_service.feed().await?;
    let viewer = state.viewer();
    let now = Utc::now();

    let cards = posts
        .iter()
        .map(|post| PostCardView::new(post, viewer.as_ref(), now))
        .collect();

    Ok(Json(ApiResponse::success(cards)))
}

async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(form): Json<NewPostForm>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>)> {
    let post = state.post_service.create_post(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(post).with_message("Post created")),
    ))
}

async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PostDetailView>>> {
    let post = state.post_service.get_post(&EntityId::parse(&id)).await?;
    let viewer = state.viewer();

    Ok(Json(ApiResponse::success(PostDetailView::new(&post, viewer.as_ref()))))
}

async fn toggle_like(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Post>>> {
    let post = state.post_service.toggle_like(&EntityId::parse(&id)).await?;
    Ok(Json(ApiResponse::success(post)))
}
