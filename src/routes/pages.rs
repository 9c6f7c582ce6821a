//! Server-rendered pages.
//!
//! Forms post here and are answered with a redirect back to the page they
//! came from, so a refresh never submits twice.

use crate::{
    error::{AppError, Result},
    models::{EntityId, NewCommentForm, NewPostForm},
    state::AppState,
    views::{CommentsSectionView, FeedView, LayoutView, PostDetailView, PostPageView},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/feed") }))
        .route("/feed", get(feed_page))
        .route("/posts", post(submit_post))
        .route("/posts/:id", get(post_page))
        .route("/posts/:id/like", post(like_post))
        .route("/posts/:id/comments", post(submit_comment))
        .route("/posts/:id/comments/:comment_id/like", post(like_comment))
        .route("/theme/toggle", post(toggle_theme))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FeedQuery {
    pub compose: bool,
    pub notice: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostQuery {
    pub compose: bool,
    pub reply_to: Option<String>,
    pub notice: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LikeQuery {
    pub back: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BackForm {
    pub back: Option<String>,
}

async fn feed_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeedQuery>,
) -> Result<Html<String>> {
    let layout = LayoutView::new(&state.store, "/feed");
    let viewer = state.viewer();

    let feed = match state.post_service.feed().await {
        Ok(posts) => FeedView::loaded(&posts, viewer.as_ref(), Utc::now()),
        Err(e) => {
            warn!("Failed to load feed: {}", e);
            FeedView::failed(&e)
        }
    }
    .with_compose(query.compose, state.post_service.is_submitting());

    let html = state
        .renderer
        .render_feed(&layout, query.notice.as_deref(), &feed)?;
    Ok(Html(html))
}

async fn submit_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewPostForm>,
) -> Redirect {
    match state.post_service.create_post(form).await {
        Ok(_) => Redirect::to("/feed"),
        Err(e) => {
            let notice = failure_notice(&e, NewPostForm::NOTICE, "Could not create the post");
            Redirect::to(&with_notice("/feed?compose=true", &notice))
        }
    }
}

async fn post_page(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<PostQuery>,
) -> Result<Response> {
    let id = EntityId::parse(&id);
    let layout = LayoutView::new(&state.store, format!("/posts/{}", id));
    let viewer = state.viewer();
    let now = Utc::now();

    let (post, comments) = tokio::join!(
        state.post_service.get_post(&id),
        state.comment_service.get_post_threads(&id)
    );

    let (status, page) = match post {
        Ok(post) => {
            let mut section = match comments {
                Ok((all, threads)) => {
                    CommentsSectionView::loaded(&id, &all, &threads, viewer.as_ref(), now)
                }
                Err(e) => {
                    warn!("Failed to load comments for post {}: {}", id, e);
                    CommentsSectionView::failed(&id)
                }
            };
            section.submitting = state.comment_service.is_submitting(&id);
            (
                StatusCode::OK,
                PostPageView::loaded(PostDetailView::new(&post, viewer.as_ref()), section),
            )
        }
        Err(e) => {
            warn!("Failed to load post {}: {}", id, e);
            (StatusCode::NOT_FOUND, PostPageView::not_found())
        }
    };
    let page = page.with_forms(query.compose, query.reply_to);

    let html = state
        .renderer
        .render_post(&layout, query.notice.as_deref(), &page)?;
    Ok((status, Html(html)).into_response())
}

async fn like_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<LikeQuery>,
) -> Redirect {
    let id = EntityId::parse(&id);
    let back = match query.back.as_deref() {
        Some("feed") => "/feed".to_string(),
        _ => format!("/posts/{}", id),
    };

    match state.post_service.toggle_like(&id).await {
        Ok(_) => Redirect::to(&back),
        Err(e) => {
            warn!("Failed to toggle like on post {}: {}", id, e);
            Redirect::to(&with_notice(&back, &like_notice(&e)))
        }
    }
}

async fn submit_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<NewCommentForm>,
) -> Redirect {
    let id = EntityId::parse(&id);
    // Reopen whichever form was used.
    let retry = match form.parent() {
        Some(parent) => format!(
            "/posts/{}?reply_to={}",
            id,
            urlencoding::encode(&parent.to_string())
        ),
        None => format!("/posts/{}?compose=true", id),
    };

    match state.comment_service.create_comment(&id, form).await {
        Ok(created) => Redirect::to(&format!("/posts/{}#comment-{}", id, created.id)),
        Err(e) => {
            let notice = failure_notice(&e, NewCommentForm::NOTICE, "Could not post the comment");
            Redirect::to(&with_notice(&retry, &notice))
        }
    }
}

async fn like_comment(
    State(state): State<Arc<AppState>>,
    Path((post_id, comment_id)): Path<(String, String)>,
) -> Redirect {
    let post_id = EntityId::parse(&post_id);
    let comment_id = EntityId::parse(&comment_id);
    let back = format!("/posts/{}", post_id);

    match state.comment_service.toggle_like(&post_id, &comment_id).await {
        Ok(_) => Redirect::to(&format!("{}#comment-{}", back, comment_id)),
        Err(e) => {
            warn!("Failed to toggle like on comment {}: {}", comment_id, e);
            Redirect::to(&with_notice(&back, &like_notice(&e)))
        }
    }
}

async fn toggle_theme(State(state): State<Arc<AppState>>, Form(form): Form<BackForm>) -> Redirect {
    state.store.theme.toggle();
    Redirect::to(safe_back(form.back.as_deref()))
}

/// What the user is told after a form could not be submitted.
fn failure_notice(error: &AppError, invalid: &str, failed: &str) -> String {
    match error {
        e if e.is_validation() => invalid.to_string(),
        AppError::Authentication(_) => "Sign in to post".to_string(),
        AppError::Conflict(msg) => msg.clone(),
        e => {
            warn!("{}: {}", failed, e);
            format!("{}. Please try again.", failed)
        }
    }
}

fn like_notice(error: &AppError) -> String {
    match error {
        AppError::Authentication(_) => "Sign in to like".to_string(),
        AppError::NotFound(_) => "That item no longer exists".to_string(),
        _ => "Could not update the like. Please try again.".to_string(),
    }
}

fn with_notice(path: &str, notice: &str) -> String {
    let (path, fragment) = match path.split_once('#') {
        Some((path, fragment)) => (path, format!("#{}", fragment)),
        None => (path, String::new()),
    };
    let separator = if path.contains('?') { '&' } else { '?' };
    format!(
        "{}{}notice={}{}",
        path,
        separator,
        urlencoding::encode(notice),
        fragment
    )
}

/// Only same-site paths are followed back; anything else lands on the feed.
fn safe_back(back: Option<&str>) -> &str {
    match back {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => "/feed",
    }
}
