use crate::{
    error::Result,
    models::{EntityId, Likeable, NewPostForm, Post},
    services::{
        mutation::{EntityRef, FormKey, MutationQueue, SubmissionGuard},
        query::{Mutation, QueryClient},
    },
    store::ClientStore,
};
use chrono::Utc;
use tracing::{debug, info};
use validator::Validate;

#[derive(Clone)]
pub struct PostService {
    query: QueryClient,
    store: ClientStore,
    queue: MutationQueue,
    submissions: SubmissionGuard,
}

impl PostService {
    pub fn new(
        query: QueryClient,
        store: ClientStore,
        queue: MutationQueue,
        submissions: SubmissionGuard,
    ) -> Self {
        Self {
            query,
            store,
            queue,
            submissions,
        }
    }

    /// All posts, newest first.
    pub async fn feed(&self) -> Result<Vec<Post>> {
        let mut posts = self.query.posts().await?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    pub async fn get_post(&self, id: &EntityId) -> Result<Post> {
        debug!("Loading post {}", id);
        self.query.post(id).await
    }

    pub fn is_submitting(&self) -> bool {
        self.submissions.is_in_flight(&FormKey::NewPost)
    }

    /// Validates the form, builds the full record and creates it.
    ///
    /// Nothing is sent and no cache entry is touched when validation fails.
    pub async fn create_post(&self, form: NewPostForm) -> Result<Post> {
        form.validate()?;
        let author = self.store.user.require()?;
        let _in_flight = self.submissions.begin(FormKey::NewPost)?;

        let new_post = form.into_new_post(&author, Utc::now());
        info!("Creating post '{}' as {}", new_post.title, author.username);

        let created = self.query.api().create_post(&new_post).await?;
        self.query.settle(&Mutation::CreatePost);

        info!("Post {} created", created.id);
        Ok(created)
    }

    /// Likes the post for the current user, or takes the like back.
    pub async fn toggle_like(&self, id: &EntityId) -> Result<Post> {
        let user = self.store.user.require()?;
        let _lock = self.queue.lock(EntityRef::Post(id.clone())).await;

        let current = self.query.api().get_post(id).await?;
        let next = current.like_state().toggled(&user.id);
        info!(
            "{} post {} for user {} ({} -> {} likes)",
            if current.is_liked_by(&user.id) { "Unliking" } else { "Liking" },
            id,
            user.id,
            current.likes,
            next.likes
        );

        let updated = self.query.api().update_post_likes(id, &next).await?;
        self.query.settle(&Mutation::LikePost { post_id: id.clone() });

        Ok(updated)
    }
}
