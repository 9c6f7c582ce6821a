use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{format, AuthorView};
use crate::models::{EntityId, Likeable, Post};

/// One post as shown in the feed.
#[derive(Debug, Clone, Serialize)]
pub struct PostCardView {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub author: AuthorView,
    pub date: String,
    pub tags: Vec<String>,
    pub liked: bool,
    pub likes: u32,
    pub comment_count: u32,
    pub views: u64,
}

impl PostCardView {
    pub fn new(post: &Post, viewer: Option<&EntityId>, now: DateTime<Utc>) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            excerpt: format::excerpt(&post.content),
            author: AuthorView::or_anonymous(post.author.as_ref()),
            date: format::relative_date(post.created_at, now, true),
            tags: post.tags.clone(),
            liked: viewer.map(|id| post.is_liked_by(id)).unwrap_or(false),
            likes: post.likes,
            comment_count: post.comment_count,
            views: post.views,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedView {
    pub posts: Vec<PostCardView>,
    pub error: Option<String>,
    pub compose: bool,
    pub submitting: bool,
}

impl FeedView {
    /// `posts` is expected newest first.
    pub fn loaded(posts: &[Post], viewer: Option<&EntityId>, now: DateTime<Utc>) -> Self {
        Self {
            posts: posts.iter().map(|p| PostCardView::new(p, viewer, now)).collect(),
            error: None,
            compose: false,
            submitting: false,
        }
    }

    pub fn failed(message: impl std::fmt::Display) -> Self {
        Self {
            posts: Vec::new(),
            error: Some(format!("Error loading posts: {}", message)),
            compose: false,
            submitting: false,
        }
    }

    pub fn with_compose(mut self, compose: bool, submitting: bool) -> Self {
        self.compose = compose;
        self.submitting = submitting;
        self
    }
}
