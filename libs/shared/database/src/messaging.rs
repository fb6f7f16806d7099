use reqwest::Method;
use serde::Serialize;
use serde_json::to_value;
use tracing::debug;

use shared_config::AppConfig;
use shared_models::message::MessageRecord;

use crate::backend::{BackendClient, BackendError, BackendResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailRequest {
    #[serde(rename = "messageId")]
    pub message_id: String,
    pub subject: String,
    pub content: String,
    pub cc: Vec<String>,
    pub users: Vec<String>,
    pub html: bool,
}

#[derive(Clone)]
pub struct MessagingApi {
    client: BackendClient,
}

impl MessagingApi {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(BackendClient::new(config))
    }

    pub fn with_client(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn create_email(&self, request: &EmailRequest) -> BackendResult<MessageRecord> {
        debug!(
            "Dispatching email {} to {} recipient(s)",
            request.message_id,
            request.users.len()
        );

        let body = to_value(request).map_err(|e| BackendError::Decode(e.to_string()))?;
        self.client
            .request(Method::POST, "/messaging/messages/email", &[], Some(body))
            .await
    }
}
