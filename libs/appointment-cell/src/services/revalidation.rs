// libs/appointment-cell/src/services/revalidation.rs
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

use shared_config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum RevalidationError {
    #[error("Revalidation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Revalidation endpoint answered {0}")]
    Rejected(reqwest::StatusCode),
}

/// Marks a rendered page path as stale so the frontend re-fetches it.
#[async_trait]
pub trait CacheRevalidator: Send + Sync {
    async fn revalidate_path(&self, path: &str) -> Result<(), RevalidationError>;
}

/// POSTs `{"path": ...}` to the frontend's revalidation endpoint.
pub struct WebhookRevalidator {
    client: Client,
    url: String,
    secret: Option<String>,
}

impl WebhookRevalidator {
    pub fn new(url: &str, secret: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
            secret,
        }
    }
}

#[async_trait]
impl CacheRevalidator for WebhookRevalidator {
    async fn revalidate_path(&self, path: &str) -> Result<(), RevalidationError> {
        debug!("Requesting revalidation of {} via {}", path, self.url);

        let mut req = self.client.post(&self.url).json(&json!({ "path": path }));
        if let Some(secret) = &self.secret {
            req = req.bearer_auth(secret);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RevalidationError::Rejected(status));
        }

        Ok(())
    }
}

/// Used when no revalidation endpoint is configured.
pub struct LoggingRevalidator;

#[async_trait]
impl CacheRevalidator for LoggingRevalidator {
    async fn revalidate_path(&self, path: &str) -> Result<(), RevalidationError> {
        info!("Path {} is stale (no revalidation endpoint configured)", path);
        Ok(())
    }
}

pub fn revalidator_from_config(config: &AppConfig) -> Arc<dyn CacheRevalidator> {
    match &config.revalidate_url {
        Some(url) => Arc::new(WebhookRevalidator::new(url, config.revalidate_secret.clone())),
        None => Arc::new(LoggingRevalidator),
    }
}
