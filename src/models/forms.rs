use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{EntityId, NewComment, NewPost, User};
use crate::utils::validation::{not_blank, parse_tags, valid_title};

/// Input of the "New Post" form. `tags` is the raw comma separated field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct NewPostForm {
    #[validate(custom = "valid_title")]
    pub title: String,
    #[validate(custom = "not_blank")]
    pub content: String,
    pub tags: String,
}

impl NewPostForm {
    pub const NOTICE: &'static str = "Please fill in title and content";

    /// Assembles the full record sent to the store, stamped with the author
    /// snapshot and zeroed counters.
    pub fn into_new_post(self, author: &User, now: DateTime<Utc>) -> NewPost {
        NewPost {
            title: self.title.trim().to_string(),
            content: self.content.trim().to_string(),
            author_id: author.id.clone(),
            author: author.author_snapshot(),
            created_at: now,
            updated_at: now,
            likes: 0,
            liked_by: Vec::new(),
            comment_count: 0,
            tags: parse_tags(&self.tags),
            views: 0,
        }
    }
}

/// Input of the comment and reply forms.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct NewCommentForm {
    #[validate(custom = "not_blank")]
    pub content: String,
    pub parent_comment_id: Option<String>,
}

impl NewCommentForm {
    pub const NOTICE: &'static str = "Please enter a comment";

    /// Parent id, if any. HTML forms post an empty string for "no parent".
    pub fn parent(&self) -> Option<EntityId> {
        self.parent_comment_id
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(EntityId::parse)
    }

    pub fn into_new_comment(self, post_id: EntityId, author: &User, now: DateTime<Utc>) -> NewComment {
        NewComment {
            post_id,
            parent_comment_id: self.parent(),
            author_id: author.id.clone(),
            author: author.author_snapshot(),
            content: self.content.trim().to_string(),
            created_at: now,
            updated_at: now,
            likes: 0,
            liked_by: Vec::new(),
            replies: 0,
        }
    }
}
