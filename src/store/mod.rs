//! Client-side state: who is acting and how the UI looks.
//!
//! Each slice is reachable only through its own operations.

pub mod theme;
pub mod user;

pub use theme::ThemeStore;
pub use user::UserStore;

use crate::config::Config;

#[derive(Clone)]
pub struct ClientStore {
    pub user: UserStore,
    pub theme: ThemeStore,
}

impl ClientStore {
    pub fn new(config: &Config) -> Self {
        Self {
            user: UserStore::new(Some(config.default_user())),
            theme: ThemeStore::new(config.default_theme),
        }
    }
}
