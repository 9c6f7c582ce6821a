pub mod api;
pub mod comment;
pub mod mutation;
pub mod post;
pub mod query;

// Re-export the types most callers need
pub use api::ApiClient;
pub use comment::CommentService;
pub use mutation::{MutationQueue, SubmissionGuard};
pub use post::PostService;
pub use query::{Mutation, QueryClient, QueryKey};
