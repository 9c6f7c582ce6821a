use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{format, AuthorView};
use crate::models::{Comment, CommentThread, EntityId, Likeable};

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: String,
    pub author: AuthorView,
    pub date: String,
    pub content: String,
    pub liked: bool,
    pub likes: u32,
    pub reply_label: Option<String>,
    pub replies: Vec<CommentView>,
}

impl CommentView {
    fn leaf(comment: &Comment, viewer: Option<&EntityId>, now: DateTime<Utc>) -> Self {
        Self {
            id: comment.id.to_string(),
            author: AuthorView::or_anonymous(comment.author.as_ref()),
            date: format::relative_date(comment.created_at, now, false),
            content: comment.content.clone(),
            liked: viewer.map(|id| comment.is_liked_by(id)).unwrap_or(false),
            likes: comment.likes,
            reply_label: None,
            replies: Vec::new(),
        }
    }

    pub fn thread(thread: &CommentThread, viewer: Option<&EntityId>, now: DateTime<Utc>) -> Self {
        let mut view = Self::leaf(&thread.comment, viewer, now);
        if !thread.replies.is_empty() {
            view.reply_label = Some(format::reply_label(thread.replies.len()));
        }
        view.replies = thread
            .replies
            .iter()
            .map(|reply| Self::leaf(reply, viewer, now))
            .collect();
        view
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentsSectionView {
    pub post_id: String,
    /// Every comment of the post, shown or not.
    pub total: usize,
    pub threads: Vec<CommentView>,
    pub error: Option<String>,
    pub submitting: bool,
}

impl CommentsSectionView {
    pub fn loaded(
        post_id: &EntityId,
        comments: &[Comment],
        threads: &[CommentThread],
        viewer: Option<&EntityId>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            post_id: post_id.to_string(),
            total: comments.len(),
            threads: threads
                .iter()
                .map(|t| CommentView::thread(t, viewer, now))
                .collect(),
            error: None,
            submitting: false,
        }
    }

    pub fn failed(post_id: &EntityId) -> Self {
        Self {
            post_id: post_id.to_string(),
            total: 0,
            threads: Vec::new(),
            error: Some("Error loading comments".to_string()),
            submitting: false,
        }
    }
}
