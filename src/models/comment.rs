use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, EntityId};
use crate::utils::serde_helpers::{clamped_count, null_as_default};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: EntityId,
    pub post_id: EntityId,
    #[serde(default)]
    pub parent_comment_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<EntityId>,
    #[serde(default)]
    pub author: Option<Author>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "clamped_count")]
    pub likes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub liked_by: Vec<EntityId>,
    /// Count written at creation time. Not maintained by anyone.
    #[serde(default)]
    pub replies: u32,
}

impl Comment {
    pub fn is_top_level(&self) -> bool {
        self.parent_comment_id.is_none()
    }
}

/// Body of `POST /comments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: EntityId,
    pub parent_comment_id: Option<EntityId>,
    pub author_id: EntityId,
    pub author: Author,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes: u32,
    pub liked_by: Vec<EntityId>,
    pub replies: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_parses_parent() {
        let comment: Comment = serde_json::from_str(
            r#"{
                "id": 5,
                "postId": 1,
                "parentCommentId": 2,
                "author": {"id": 3, "username": "jane", "displayName": "Jane"},
                "content": "Agreed",
                "createdAt": "2024-01-02T03:04:05Z"
            }"#,
        )
        .unwrap();

        assert!(!comment.is_top_level());
        assert_eq!(comment.parent_comment_id, Some(EntityId::Number(2)));
        assert_eq!(comment.replies, 0);
    }

    #[test]
    fn test_legacy_record_without_author() {
        let comment: Comment = serde_json::from_str(
            r#"{
                "id": 6,
                "postId": 1,
                "content": "Old",
                "createdAt": "2024-01-02T03:04:05Z",
                "likes": -1
            }"#,
        )
        .unwrap();

        assert!(comment.author.is_none());
        assert_eq!(comment.likes, 0);
    }

    #[test]
    fn test_new_comment_sends_null_parent() {
        let now = Utc::now();
        let body = NewComment {
            post_id: EntityId::Number(1),
            parent_comment_id: None,
            author_id: EntityId::Number(1),
            author: Author {
                id: EntityId::Number(1),
                username: "john_doe".to_string(),
                display_name: "John Doe".to_string(),
                avatar: String::new(),
            },
            content: "Hello".to_string(),
            created_at: now,
            updated_at: now,
            likes: 0,
            liked_by: Vec::new(),
            replies: 0,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert!(value["parentCommentId"].is_null());
        assert_eq!(value["postId"], 1);
        assert_eq!(value["likedBy"], serde_json::json!([]));
    }
}
