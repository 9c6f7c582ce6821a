use crate::{
    config::Config,
    error::{AppError, Result},
    models::{Comment, EntityId, LikeState, NewComment, NewPost, Post},
};
use reqwest::{header, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

/// HTTP client for the external forum data store.
///
/// One method per endpoint. No retries and no auth headers.
#[derive(Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.api_base_url, config.http_timeout())
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join replaces the last path segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http_client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// GET /posts
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        let request = self.http_client.get(self.url("posts")?);
        self.send_json(request, "posts").await
    }

    /// GET /posts/:id
    pub async fn get_post(&self, id: &EntityId) -> Result<Post> {
        let request = self.http_client.get(self.url(&format!("posts/{}", id))?);
        self.send_json(request, "Post").await
    }

    /// POST /posts
    pub async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let request = self.http_client.post(self.url("posts")?).json(post);
        self.send_json(request, "posts").await
    }

    /// PATCH /posts/:id with the `{likes, likedBy}` pair
    pub async fn update_post_likes(&self, id: &EntityId, likes: &LikeState) -> Result<Post> {
        let request = self
            .http_client
            .patch(self.url(&format!("posts/{}", id))?)
            .json(likes);
        self.send_json(request, "Post").await
    }

    /// GET /comments?postId=:id
    pub async fn list_comments(&self, post_id: &EntityId) -> Result<Vec<Comment>> {
        let request = self
            .http_client
            .get(self.url("comments")?)
            .query(&[("postId", post_id.to_string())]);
        self.send_json(request, "comments").await
    }

    /// POST /comments
    pub async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let request = self.http_client.post(self.url("comments")?).json(comment);
        self.send_json(request, "comments").await
    }

    /// PATCH /comments/:id with the `{likes, likedBy}` pair
    pub async fn update_comment_likes(&self, id: &EntityId, likes: &LikeState) -> Result<Comment> {
        let request = self
            .http_client
            .patch(self.url(&format!("comments/{}", id))?)
            .json(likes);
        self.send_json(request, "Comment").await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, resource: &str) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            error!("Failed to reach data store for {}: {}", resource, e);
            AppError::ExternalService(format!("Failed to reach data store: {}", e))
        })?;

        let status = response.status();
        let url = response.url().clone();
        debug!("Data store responded {} for {}", status, url);

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::not_found(resource));
        }
        if !status.is_success() {
            error!("Data store returned {} for {}", status, url);
            return Err(AppError::ExternalService(format!(
                "Data store returned {} for {}",
                status, resource
            )));
        }

        response.json::<T>().await.map_err(|e| {
            error!("Failed to decode {} from data store: {}", resource, e);
            AppError::ExternalService(format!("Invalid response from data store: {}", e))
        })
    }
}
