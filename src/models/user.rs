use serde::{Deserialize, Serialize};

use super::EntityId;

pub const DEFAULT_AVATAR: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=default";

/// The person this client acts as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub display_name: String,
    pub avatar: String,
    pub email: String,
}

/// Author details copied into a post or comment when it is written.
///
/// The copy is never refreshed, so renaming a user leaves their older posts
/// showing the old name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: EntityId,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar: String,
}

impl User {
    pub fn author_snapshot(&self) -> Author {
        Author {
            id: self.id.clone(),
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}
