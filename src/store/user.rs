use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

use crate::{
    error::{AppError, Result},
    models::User,
};

/// The current user. At most one at a time.
#[derive(Clone)]
pub struct UserStore {
    current: Arc<RwLock<Option<User>>>,
}

impl UserStore {
    pub fn new(initial: Option<User>) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn current(&self) -> Option<User> {
        self.current.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    /// The acting user for a write.
    pub fn require(&self) -> Result<User> {
        self.current()
            .ok_or_else(|| AppError::unauthorized("No user is signed in"))
    }

    pub fn set_user(&self, user: User) {
        info!("Current user set to {} ({})", user.username, user.id);
        *self.current.write() = Some(user);
    }

    pub fn clear_user(&self) {
        info!("Current user cleared");
        *self.current.write() = None;
    }
}
