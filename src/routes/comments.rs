use crate::{
    error::Result,
    models::{response::ApiResponse, Comment, EntityId, NewCommentForm},
    state::AppState,
    views::CommentsSectionView,
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

/// Mounted next to the post routes, so `:id` is the post.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/:id/comments", get(get_post_comments).post(create_comment))
        .route("/:id/comments/:comment_id/like", post(toggle_like))
}

async fn get_post_comments(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<Json<ApiResponse<CommentsSectionView>>> {
    let post_id = EntityId::parse(&post_id);
    let (comments, threads) = state.comment_service.get_post_threads(&post_id).await?;
    let viewer = state.viewer();

    let mut section =
        CommentsSectionView::loaded(&post_id, &comments, &threads, viewer.as_ref(), Utc::now());
    section.submitting = state.comment_service.is_submitting(&post_id);

    Ok(Json(ApiResponse::success(section)))
}

async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
    Json(form): Json<NewCommentForm>,
) -> Result<(StatusCode, Json<ApiResponse<Comment>>)> {
    let comment = state
        .comment_service
        .create_comment(&EntityId::parse(&post_id), form)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(comment).with_message("Comment created")),
    ))
}

async fn toggle_like(
    State(state): State<Arc<AppState>>,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Comment>>> {
    let comment = state
        .comment_service
        .toggle_like(&EntityId::parse(&post_id), &EntityId::parse(&comment_id))
        .await?;

    Ok(Json(ApiResponse::success(comment)))
}
