use serde::{Deserialize, Serialize};

use super::{Comment, EntityId, Post};

/// The `{likes, likedBy}` pair. Always computed and sent as one unit so the
/// count never drifts from the membership list through this client's writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeState {
    pub likes: u32,
    pub liked_by: Vec<EntityId>,
}

impl LikeState {
    pub fn new(likes: u32, liked_by: Vec<EntityId>) -> Self {
        Self { likes, liked_by }
    }

    pub fn is_liked_by(&self, user_id: &EntityId) -> bool {
        self.liked_by.contains(user_id)
    }

    /// Next state after `user_id` presses like: removes them and decrements if
    /// they had liked, otherwise appends them and increments.
    pub fn toggled(&self, user_id: &EntityId) -> Self {
        if self.is_liked_by(user_id) {
            let liked_by = self
                .liked_by
                .iter()
                .filter(|id| *id != user_id)
                .cloned()
                .collect();
            Self {
                likes: self.likes.saturating_sub(1),
                liked_by,
            }
        } else {
            let mut liked_by = self.liked_by.clone();
            liked_by.push(user_id.clone());
            Self {
                likes: self.likes.saturating_add(1),
                liked_by,
            }
        }
    }
}

pub trait Likeable {
    fn like_state(&self) -> LikeState;

    fn is_liked_by(&self, user_id: &EntityId) -> bool {
        self.like_state().is_liked_by(user_id)
    }
}

impl Likeable for Post {
    fn like_state(&self) -> LikeState {
        LikeState::new(self.likes, self.liked_by.clone())
    }
}

impl Likeable for Comment {
    fn like_state(&self) -> LikeState {
        LikeState::new(self.likes, self.liked_by.clone())
    }
}
