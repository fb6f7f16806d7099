use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::document::DocumentList;

use crate::backend::{BackendClient, BackendResult};
use crate::query::Query;

/// Collection-scoped document operations within one database.
#[derive(Clone)]
pub struct DocumentsApi {
    client: BackendClient,
    database_id: String,
}

impl DocumentsApi {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_client(BackendClient::new(config), &config.database_id)
    }

    pub fn with_client(client: BackendClient, database_id: &str) -> Self {
        Self {
            client,
            database_id: database_id.to_string(),
        }
    }

    fn collection_path(&self, collection_id: &str) -> String {
        format!(
            "/databases/{}/collections/{}/documents",
            self.database_id, collection_id
        )
    }

    pub async fn create_document<T>(
        &self,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> BackendResult<T>
    where
        T: DeserializeOwned,
    {
        debug!("Creating document {} in collection {}", document_id, collection_id);

        let body = json!({
            "documentId": document_id,
            "data": data,
        });

        self.client
            .request(Method::POST, &self.collection_path(collection_id), &[], Some(body))
            .await
    }

    pub async fn list_documents<T>(
        &self,
        collection_id: &str,
        queries: &[Query],
    ) -> BackendResult<DocumentList<T>>
    where
        T: DeserializeOwned,
    {
        debug!("Listing documents in collection {} with {} queries", collection_id, queries.len());

        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|query| ("queries[]", query.encode()))
            .collect();

        self.client
            .request(Method::GET, &self.collection_path(collection_id), &params, None)
            .await
    }

    pub async fn get_document<T>(&self, collection_id: &str, document_id: &str) -> BackendResult<T>
    where
        T: DeserializeOwned,
    {
        debug!("Fetching document {} from collection {}", document_id, collection_id);

        let path = format!("{}/{}", self.collection_path(collection_id), document_id);
        self.client.request(Method::GET, &path, &[], None).await
    }

    /// Applies a partial update. The backend may answer with no document at all.
    pub async fn update_document<T>(
        &self,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> BackendResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        debug!("Updating document {} in collection {}", document_id, collection_id);

        let path = format!("{}/{}", self.collection_path(collection_id), document_id);
        self.client
            .request_optional(Method::PATCH, &path, &[], Some(json!({ "data": data })))
            .await
    }
}
