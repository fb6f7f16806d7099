// libs/appointment-cell/src/services/store.rs
use async_trait::async_trait;
use serde_json::to_value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::{BackendError, DocumentsApi, Query};
use shared_models::document::DocumentList;

use crate::models::{Appointment, AppointmentError, AppointmentPatch, CreateAppointmentRequest};

/// Persistence for appointment documents.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn create(
        &self,
        document_id: &str,
        request: &CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError>;

    /// All appointments, newest first.
    async fn list_recent(&self) -> Result<DocumentList<Appointment>, AppointmentError>;

    async fn get(&self, appointment_id: &str) -> Result<Appointment, AppointmentError>;

    /// Returns `Ok(None)` when the backend accepts the update but hands back no document.
    async fn update(
        &self,
        appointment_id: &str,
        patch: &AppointmentPatch,
    ) -> Result<Option<Appointment>, AppointmentError>;
}

impl From<BackendError> for AppointmentError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::NotFound(_) => AppointmentError::NotFound,
            other => AppointmentError::Store(other.to_string()),
        }
    }
}

pub struct BackendAppointmentStore {
    documents: DocumentsApi,
    collection_id: String,
}

impl BackendAppointmentStore {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_api(DocumentsApi::new(config), &config.appointment_collection_id)
    }

    pub fn with_api(documents: DocumentsApi, collection_id: &str) -> Self {
        Self {
            documents,
            collection_id: collection_id.to_string(),
        }
    }
}

#[async_trait]
impl AppointmentStore for BackendAppointmentStore {
    async fn create(
        &self,
        document_id: &str,
        request: &CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let data = to_value(request).map_err(|e| AppointmentError::Serialization(e.to_string()))?;

        let appointment = self
            .documents
            .create_document(&self.collection_id, document_id, data)
            .await?;

        Ok(appointment)
    }

    async fn list_recent(&self) -> Result<DocumentList<Appointment>, AppointmentError> {
        let list: DocumentList<Appointment> = self
            .documents
            .list_documents(&self.collection_id, &[Query::order_desc("$createdAt")])
            .await?;

        debug!("Store returned {} of {} appointments", list.documents.len(), list.total);
        Ok(list)
    }

    async fn get(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        let appointment = self
            .documents
            .get_document(&self.collection_id, appointment_id)
            .await?;

        Ok(appointment)
    }

    async fn update(
        &self,
        appointment_id: &str,
        patch: &AppointmentPatch,
    ) -> Result<Option<Appointment>, AppointmentError> {
        let data = to_value(patch).map_err(|e| AppointmentError::Serialization(e.to_string()))?;

        let appointment = self
            .documents
            .update_document(&self.collection_id, appointment_id, data)
            .await?;

        Ok(appointment)
    }
}
