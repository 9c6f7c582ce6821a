#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use forum_client::{routes, AppState, Config};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower::ServiceExt;
use wiremock::MockServer;

pub fn author_json() -> Value {
    json!({
        "id": 1,
        "username": "john_doe",
        "displayName": "John Doe",
        "avatar": "https://example.com/john.svg"
    })
}

pub fn post_json(id: u64, title: &str, likes: u32, liked_by: Vec<u64>) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "World",
        "authorId": 1,
        "author": author_json(),
        "createdAt": "2024-03-01T08:00:00Z",
        "updatedAt": "2024-03-01T08:00:00Z",
        "likes": likes,
        "likedBy": liked_by,
        "commentCount": 0,
        "tags": ["rust"],
        "views": 0
    })
}

pub fn comment_json(id: u64, parent: Option<u64>, content: &str) -> Value {
    json!({
        "id": id,
        "postId": 1,
        "parentCommentId": parent,
        "authorId": 1,
        "author": author_json(),
        "content": content,
        "createdAt": "2024-03-01T09:00:00Z",
        "updatedAt": "2024-03-01T09:00:00Z",
        "likes": 0,
        "likedBy": [],
        "replies": 0
    })
}

pub struct TestApp {
    pub state: Arc<AppState>,
    pub router: Router,
}

impl TestApp {
    pub fn new(server: &MockServer) -> Self {
        let config = Config {
            api_base_url: server.uri(),
            ..Config::default()
        };
        let state = Arc::new(tokio_test::assert_ok!(AppState::new(config)));
        let router = routes::router(state.clone());
        Self { state, router }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<axum::body::BoxBody> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<axum::body::BoxBody> {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    /// Starts a GET that runs alongside the rest of the test.
    pub fn spawn_get(&self, uri: &str) -> JoinHandle<Response<axum::body::BoxBody>> {
        let router = self.router.clone();
        let request = Request::get(uri).body(Body::empty()).unwrap();
        tokio::spawn(async move { router.oneshot(request).await.unwrap() })
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> Response<axum::body::BoxBody> {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send_json(&self, method: &str, uri: &str, body: Value) -> Response<axum::body::BoxBody> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}

pub async fn body_text(response: Response<axum::body::BoxBody>) -> String {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<axum::body::BoxBody>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

pub fn location(response: &Response<axum::body::BoxBody>) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response.headers()[header::LOCATION].to_str().unwrap().to_string()
}
