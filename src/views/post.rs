use serde::Serialize;

use super::{comments::CommentsSectionView, format, AuthorView};
use crate::models::{EntityId, Likeable, Post};

#[derive(Debug, Clone, Serialize)]
pub struct PostDetailView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: AuthorView,
    pub date: String,
    pub tags: Vec<String>,
    pub liked: bool,
    pub likes: u32,
    pub comment_count: u32,
    pub views: u64,
}

impl PostDetailView {
    pub fn new(post: &Post, viewer: Option<&EntityId>) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            content: post.content.clone(),
            author: AuthorView::or_anonymous(post.author.as_ref()),
            date: format::long_date(post.created_at),
            tags: post.tags.clone(),
            liked: viewer.map(|id| post.is_liked_by(id)).unwrap_or(false),
            likes: post.likes,
            comment_count: post.comment_count,
            views: post.views,
        }
    }
}

/// The post detail page. A failed or empty lookup renders as "Post not found".
#[derive(Debug, Clone, Serialize)]
pub struct PostPageView {
    pub post: Option<PostDetailView>,
    pub comments: Option<CommentsSectionView>,
    pub error: Option<String>,
    pub reply_to: Option<String>,
    pub composing: bool,
}

impl PostPageView {
    pub fn loaded(post: PostDetailView, comments: CommentsSectionView) -> Self {
        Self {
            post: Some(post),
            comments: Some(comments),
            error: None,
            reply_to: None,
            composing: false,
        }
    }

    pub fn not_found() -> Self {
        Self {
            post: None,
            comments: None,
            error: Some("Post not found".to_string()),
            reply_to: None,
            composing: false,
        }
    }

    /// Which comment form is open: the top-level one, or a reply under `reply_to`.
    pub fn with_forms(mut self, composing: bool, reply_to: Option<String>) -> Self {
        self.composing = composing;
        self.reply_to = reply_to;
        self
    }
}
