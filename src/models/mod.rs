pub mod comment;
pub mod forms;
pub mod id;
pub mod like;
pub mod post;
pub mod response;
pub mod theme;
pub mod thread;
pub mod user;

pub use comment::{Comment, NewComment};
pub use forms::{NewCommentForm, NewPostForm};
pub use id::EntityId;
pub use like::{LikeState, Likeable};
pub use post::{NewPost, Post};
pub use theme::ThemeMode;
pub use thread::CommentThread;
pub use user::{Author, User};
