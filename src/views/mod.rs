//! Page view models and their HTML rendering.

pub mod comments;
pub mod feed;
pub mod format;
pub mod post;

use handlebars::Handlebars;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::{AppError, Result},
    models::{user::DEFAULT_AVATAR, Author, ThemeMode, User},
    store::ClientStore,
};

pub use comments::{CommentView, CommentsSectionView};
pub use feed::{FeedView, PostCardView};
pub use post::{PostDetailView, PostPageView};

const LAYOUT_TEMPLATE: &str = include_str!("../../templates/layout.hbs");
const FEED_TEMPLATE: &str = include_str!("../../templates/feed.hbs");
const POST_TEMPLATE: &str = include_str!("../../templates/post.hbs");
const COMMENT_TEMPLATE: &str = include_str!("../../templates/comment.hbs");

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorView {
    pub display_name: String,
    pub username: String,
    pub avatar: String,
}

impl AuthorView {
    /// Records written before author snapshots existed have none.
    pub fn or_anonymous(author: Option<&Author>) -> Self {
        match author {
            Some(author) => Self::from(author),
            None => Self {
                display_name: "Anonymous User".to_string(),
                username: "anonymous".to_string(),
                avatar: DEFAULT_AVATAR.to_string(),
            },
        }
    }
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            display_name: author.display_name.clone(),
            username: author.username.clone(),
            avatar: if author.avatar.is_empty() {
                DEFAULT_AVATAR.to_string()
            } else {
                author.avatar.clone()
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserChip {
    pub display_name: String,
    pub avatar: String,
}

/// Header state shared by every page.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutView {
    pub theme: ThemeMode,
    pub theme_icon: &'static str,
    pub user: Option<UserChip>,
    /// Where the theme toggle returns to.
    pub path: String,
}

impl LayoutView {
    pub fn new(store: &ClientStore, path: impl Into<String>) -> Self {
        let theme = store.theme.mode();
        Self {
            theme,
            theme_icon: match theme {
                ThemeMode::Light => "🌙",
                ThemeMode::Dark => "☀️",
            },
            user: store.user.current().as_ref().map(UserChip::from),
            path: path.into(),
        }
    }
}

impl From<&User> for UserChip {
    fn from(user: &User) -> Self {
        Self {
            display_name: user.display_name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Page<'a, T: Serialize> {
    title: &'a str,
    layout: &'a LayoutView,
    notice: Option<&'a str>,
    page: &'a T,
}

/// Handlebars registry with every page template loaded.
#[derive(Clone)]
pub struct Renderer {
    registry: Arc<Handlebars<'static>>,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        for (name, source) in [
            ("layout", LAYOUT_TEMPLATE),
            ("feed", FEED_TEMPLATE),
            ("post", POST_TEMPLATE),
            ("comment", COMMENT_TEMPLATE),
        ] {
            registry
                .register_template_string(name, source)
                .map_err(|e| AppError::Internal(format!("Invalid template {}: {}", name, e)))?;
        }

        Ok(Self {
            registry: Arc::new(registry),
        })
    }

    pub fn render_feed(&self, layout: &LayoutView, notice: Option<&str>, feed: &FeedView) -> Result<String> {
        self.render("feed", "Latest Posts", layout, notice, feed)
    }

    pub fn render_post(&self, layout: &LayoutView, notice: Option<&str>, page: &PostPageView) -> Result<String> {
        let title = page
            .post
            .as_ref()
            .map(|p| p.title.as_str())
            .unwrap_or("Post not found");
        self.render("post", title, layout, notice, page)
    }

    fn render<T: Serialize>(
        &self,
        template: &str,
        title: &str,
        layout: &LayoutView,
        notice: Option<&str>,
        page: &T,
    ) -> Result<String> {
        let context = Page {
            title,
            layout,
            notice,
            page,
        };
        Ok(self.registry.render(template, &context)?)
    }
}
