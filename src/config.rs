use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use url::Url;

use crate::models::{theme::ThemeMode, user::User, EntityId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub log_level: String,

    // Data store configuration
    pub api_base_url: String,
    pub http_timeout_secs: u64,

    // Query cache configuration
    pub cache_stale_secs: u64,
    pub cache_retention_secs: u64,
    pub cache_cleanup_interval_secs: u64,

    // Client-side defaults
    pub default_theme: ThemeMode,
    pub default_user_id: String,
    pub default_user_username: String,
    pub default_user_display_name: String,
    pub default_user_avatar: String,
    pub default_user_email: String,

    // CORS configuration
    pub cors_allowed_origins: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "forum_client=debug,tower_http=debug".to_string()),

            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,

            cache_stale_secs: env::var("CACHE_STALE_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
            cache_retention_secs: env::var("CACHE_RETENTION_SECS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()?,
            cache_cleanup_interval_secs: env::var("CACHE_CLEANUP_INTERVAL_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()?,

            default_theme: env::var("DEFAULT_THEME")
                .unwrap_or_else(|_| "light".to_string())
                .parse()?,
            default_user_id: env::var("DEFAULT_USER_ID").unwrap_or_else(|_| "1".to_string()),
            default_user_username: env::var("DEFAULT_USER_USERNAME")
                .unwrap_or_else(|_| "john_doe".to_string()),
            default_user_display_name: env::var("DEFAULT_USER_DISPLAY_NAME")
                .unwrap_or_else(|_| "John Doe".to_string()),
            default_user_avatar: env::var("DEFAULT_USER_AVATAR").unwrap_or_else(|_| {
                "https://api.dicebear.com/7.x/avataaars/svg?seed=john_doe".to_string()
            }),
            default_user_email: env::var("DEFAULT_USER_EMAIL")
                .unwrap_or_else(|_| "john@example.com".to_string()),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that parse but cannot work.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.api_url()?;

        if self.cache_cleanup_interval_secs == 0 {
            anyhow::bail!("CACHE_CLEANUP_INTERVAL_SECS must be at least 1");
        }
        // Invalidation counters are kept for one retention window, which
        // must outlast any request.
        if self.cache_retention_secs <= self.http_timeout_secs {
            anyhow::bail!(
                "CACHE_RETENTION_SECS ({}) must exceed HTTP_TIMEOUT_SECS ({})",
                self.cache_retention_secs,
                self.http_timeout_secs
            );
        }
        Ok(())
    }

    /// Base URL of the external data store, validated.
    pub fn api_url(&self) -> anyhow::Result<Url> {
        Ok(Url::parse(&self.api_base_url)?)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.cache_stale_secs)
    }

    pub fn retention_time(&self) -> Duration {
        Duration::from_secs(self.cache_retention_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cache_cleanup_interval_secs)
    }

    /// The single user this client acts as until it is replaced or cleared.
    pub fn default_user(&self) -> User {
        User {
            id: EntityId::parse(&self.default_user_id),
            username: self.default_user_username.clone(),
            display_name: self.default_user_display_name.clone(),
            avatar: self.default_user_avatar.clone(),
            email: self.default_user_email.clone(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            environment: "development".to_string(),
            log_level: "forum_client=debug,tower_http=debug".to_string(),
            api_base_url: "http://localhost:3001".to_string(),
            http_timeout_secs: 30,
            cache_stale_secs: 300,
            cache_retention_secs: 600,
            cache_cleanup_interval_secs: 60,
            default_theme: ThemeMode::Light,
            default_user_id: "1".to_string(),
            default_user_username: "john_doe".to_string(),
            default_user_display_name: "John Doe".to_string(),
            default_user_avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=john_doe"
                .to_string(),
            default_user_email: "john@example.com".to_string(),
            cors_allowed_origins: "http://localhost:3000".to_string(),
        }
    }
}
