use crate::{
    error::Result,
    models::{Comment, EntityId, Post},
    services::ApiClient,
    utils::cache::QueryCache,
};
use std::fmt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Address of one cached read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Posts,
    Post(EntityId),
    Comments(EntityId),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::Posts => f.write_str("posts"),
            QueryKey::Post(id) => write!(f, "post:{}", id),
            QueryKey::Comments(post_id) => write!(f, "comments:{}", post_id),
        }
    }
}

/// Every write this client performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreatePost,
    LikePost { post_id: EntityId },
    CreateComment { post_id: EntityId },
    LikeComment { post_id: EntityId },
}

impl Mutation {
    /// Reads that may hold a stale copy once this write succeeds.
    pub fn invalidates(&self) -> Vec<QueryKey> {
        match self {
            Mutation::CreatePost => vec![QueryKey::Posts],
            Mutation::LikePost { post_id } => {
                vec![QueryKey::Post(post_id.clone()), QueryKey::Posts]
            }
            Mutation::CreateComment { post_id } | Mutation::LikeComment { post_id } => {
                vec![QueryKey::Comments(post_id.clone())]
            }
        }
    }
}

/// Read-through cache in front of [`ApiClient`].
///
/// A read that was already in flight when a write settled returns its
/// response to its caller but does not cache it.
#[derive(Clone)]
pub struct QueryClient {
    api: ApiClient,
    posts: QueryCache<Vec<Post>>,
    post: QueryCache<Post>,
    comments: QueryCache<Vec<Comment>>,
}

impl QueryClient {
    pub fn new(api: ApiClient, stale_time: Duration, retention: Duration) -> Self {
        Self {
            api,
            posts: QueryCache::new(stale_time, retention),
            post: QueryCache::new(stale_time, retention),
            comments: QueryCache::new(stale_time, retention),
        }
    }

    /// Direct store access for writes and for reads that must bypass the cache.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn posts(&self) -> Result<Vec<Post>> {
        let key = QueryKey::Posts.to_string();
        if let Some(posts) = self.posts.get_fresh(&key) {
            debug!("Cache hit: {}", key);
            return Ok(posts);
        }

        debug!("Cache miss: {}", key);
        let seen = self.posts.generation(&key);
        let posts = self.api.list_posts().await?;
        self.posts.set_if_current(key, posts.clone(), seen);
        Ok(posts)
    }

    pub async fn post(&self, id: &EntityId) -> Result<Post> {
        let key = QueryKey::Post(id.clone()).to_string();
        if let Some(post) = self.post.get_fresh(&key) {
            debug!("Cache hit: {}", key);
            return Ok(post);
        }

        debug!("Cache miss: {}", key);
        let seen = self.post.generation(&key);
        let post = self.api.get_post(id).await?;
        self.post.set_if_current(key, post.clone(), seen);
        Ok(post)
    }

    pub async fn comments(&self, post_id: &EntityId) -> Result<Vec<Comment>> {
        let key = QueryKey::Comments(post_id.clone()).to_string();
        if let Some(comments) = self.comments.get_fresh(&key) {
            debug!("Cache hit: {}", key);
            return Ok(comments);
        }

        debug!("Cache miss: {}", key);
        let seen = self.comments.generation(&key);
        let comments = self.api.list_comments(post_id).await?;
        self.comments.set_if_current(key, comments.clone(), seen);
        Ok(comments)
    }

    /// Marks one key stale. The refetch happens on the next read.
    fn invalidate(&self, key: &QueryKey) {
        let name = key.to_string();
        let present = match key {
            QueryKey::Posts => self.posts.invalidate(&name),
            QueryKey::Post(_) => self.post.invalidate(&name),
            QueryKey::Comments(_) => self.comments.invalidate(&name),
        };
        debug!("Invalidated {} (cached: {})", name, present);
    }

    /// Applies the invalidations `mutation` declares.
    pub fn settle(&self, mutation: &Mutation) {
        for key in mutation.invalidates() {
            self.invalidate(&key);
        }
    }

    /// Whether a read of `key` would be served without a request.
    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        let name = key.to_string();
        match key {
            QueryKey::Posts => self.posts.get_fresh(&name).is_some(),
            QueryKey::Post(_) => self.post.get_fresh(&name).is_some(),
            QueryKey::Comments(_) => self.comments.get_fresh(&name).is_some(),
        }
    }

    pub fn spawn_janitors(&self, every: Duration) -> Vec<JoinHandle<()>> {
        vec![
            self.posts.spawn_janitor(every),
            self.post.spawn_janitor(every),
            self.comments.spawn_janitor(every),
        ]
    }
}
