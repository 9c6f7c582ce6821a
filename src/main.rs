use axum::http::{HeaderValue, Method};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forum_client::{routes, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting forum client...");
    info!(
        "Environment: {}, data store at {}",
        config.environment, config.api_base_url
    );
    if config.is_production() && config.api_url()?.host_str() == Some("localhost") {
        warn!("Running in production against a local data store");
    }

    let app_state = Arc::new(AppState::new(config.clone())?);

    // The store may come up after us; pages show their error state until it does.
    match app_state.post_service.feed().await {
        Ok(posts) => info!("Data store reachable, {} post(s) in the feed", posts.len()),
        Err(e) => warn!("Data store not reachable yet: {}", e),
    }

    app_state.spawn_background_tasks();

    let origins = config
        .cors_allowed_origins
        .split(',')
        .map(|origin| origin.trim().parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
        .allow_origin(origins);

    let app = routes::router(app_state)
        .layer(cors)
        .layer(CompressionLayer::new());

    let addr = format!("{}:{}", config.server_host, config.server_port);
    info!("Starting server on http://{}", addr);

    axum::Server::bind(&addr.parse()?)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
