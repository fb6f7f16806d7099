// libs/appointment-cell/src/services/notification.rs
use async_trait::async_trait;

use shared_config::AppConfig;
use shared_database::{EmailRequest, MessagingApi};
use shared_models::message::MessageRecord;

use crate::models::AppointmentError;

/// Outbound email dispatch.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn create_email(&self, email: EmailRequest) -> Result<MessageRecord, AppointmentError>;
}

pub struct BackendNotificationService {
    messaging: MessagingApi,
}

impl BackendNotificationService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_api(MessagingApi::new(config))
    }

    pub fn with_api(messaging: MessagingApi) -> Self {
        Self { messaging }
    }
}

#[async_trait]
impl NotificationService for BackendNotificationService {
    async fn create_email(&self, email: EmailRequest) -> Result<MessageRecord, AppointmentError> {
        self.messaging
            .create_email(&email)
            .await
            .map_err(|e| AppointmentError::Notification(e.to_string()))
    }
}
