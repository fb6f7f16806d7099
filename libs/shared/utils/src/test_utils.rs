use std::sync::Arc;
use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub backend_endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub appointment_collection_id: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            backend_endpoint: "http://localhost:8080/v1".to_string(),
            project_id: "test-project".to_string(),
            api_key: "test-api-key".to_string(),
            database_id: "test-db".to_string(),
            appointment_collection_id: "appointments".to_string(),
        }
    }
}

impl TestConfig {
    /// Points the config at a mock backend (e.g. a `wiremock` server URI).
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            backend_endpoint: endpoint.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            backend_endpoint: self.backend_endpoint.clone(),
            project_id: self.project_id.clone(),
            api_key: self.api_key.clone(),
            database_id: self.database_id.clone(),
            appointment_collection_id: self.appointment_collection_id.clone(),
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }

    pub fn documents_path(&self) -> String {
        format!(
            "/databases/{}/collections/{}/documents",
            self.database_id, self.appointment_collection_id
        )
    }
}

pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn appointment_document(id: &str, status: &str) -> Value {
        json!({
            "$id": id,
            "$createdAt": "2024-01-01T09:00:00.000+00:00",
            "$updatedAt": "2024-01-01T09:00:00.000+00:00",
            "$collectionId": "appointments",
            "$databaseId": "test-db",
            "$permissions": [],
            "patient": "P1",
            "userId": "user-1",
            "primaryPhysician": "Dr. A",
            "schedule": "2024-01-05T10:00:00.000+00:00",
            "status": status,
            "reason": "Annual check-up",
            "note": null,
            "cancellationReason": null
        })
    }

    /// A stored appointment whose `status` attribute was never set.
    pub fn appointment_document_without_status(id: &str) -> Value {
        let mut document = Self::appointment_document(id, "");
        if let Some(fields) = document.as_object_mut() {
            fields.remove("status");
        }
        document
    }

    pub fn appointment_list(statuses: &[&str]) -> Value {
        let documents: Vec<Value> = statuses
            .iter()
            .enumerate()
            .map(|(index, status)| Self::appointment_document(&format!("apt-{}", index), status))
            .collect();

        Self::document_list(documents)
    }

    pub fn document_list(documents: Vec<Value>) -> Value {
        json!({
            "total": documents.len(),
            "documents": documents
        })
    }

    pub fn message_response(message_id: &str, user_id: &str) -> Value {
        json!({
            "$id": message_id,
            "$createdAt": "2024-01-01T09:00:00.000+00:00",
            "providerType": "email",
            "topics": [],
            "users": [user_id],
            "targets": [],
            "deliveredTotal": 0,
            "status": "processing"
        })
    }

    pub fn error_response(message: &str, code: u16) -> Value {
        json!({
            "message": message,
            "code": code,
            "type": "general_error"
        })
    }
}
