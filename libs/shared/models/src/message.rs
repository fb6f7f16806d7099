use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record returned by the messaging API after an email is accepted.
///
/// Only the id is relied upon; the rest of the delivery metadata is kept
/// as-is so it can be handed back to callers unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "providerType", default, skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}
