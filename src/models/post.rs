use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, EntityId};
use crate::utils::serde_helpers::{clamped_count, null_as_default};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<EntityId>,
    #[serde(default)]
    pub author: Option<Author>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "clamped_count")]
    pub likes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub liked_by: Vec<EntityId>,
    #[serde(default)]
    pub comment_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub views: u64,
}

/// Body of `POST /posts`: a complete post minus the id the store assigns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author_id: EntityId,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes: u32,
    pub liked_by: Vec<EntityId>,
    pub comment_count: u32,
    pub tags: Vec<String>,
    pub views: u64,
}
