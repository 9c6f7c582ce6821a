use crate::{
    config::Config,
    error::Result,
    models::EntityId,
    services::{ApiClient, CommentService, MutationQueue, PostService, QueryClient, SubmissionGuard},
    store::ClientStore,
    views::Renderer,
};
use tokio::task::JoinHandle;
use tracing::info;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    /// Cached reads, also the way in for writes.
    pub query: QueryClient,

    pub store: ClientStore,

    pub post_service: PostService,

    pub comment_service: CommentService,

    pub renderer: Renderer,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        Self::with_api(config, api)
    }

    /// Builds the state around an already configured store client.
    pub fn with_api(config: Config, api: ApiClient) -> Result<Self> {
        let query = QueryClient::new(api, config.stale_time(), config.retention_time());
        let store = ClientStore::new(&config);
        let queue = MutationQueue::new();
        let submissions = SubmissionGuard::new();

        let post_service = PostService::new(
            query.clone(),
            store.clone(),
            queue.clone(),
            submissions.clone(),
        );
        let comment_service = CommentService::new(query.clone(), store.clone(), queue, submissions);

        Ok(Self {
            renderer: Renderer::new()?,
            config,
            query,
            store,
            post_service,
            comment_service,
        })
    }

    /// Id of the signed-in user, used to mark what they liked.
    pub fn viewer(&self) -> Option<EntityId> {
        self.store.user.current().map(|user| user.id)
    }

    pub fn spawn_background_tasks(&self) -> Vec<JoinHandle<()>> {
        let every = self.config.cleanup_interval();
        info!("Starting cache cleanup every {:?}", every);
        self.query.spawn_janitors(every)
    }
}
