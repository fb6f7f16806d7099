use serde::Serialize;

/// A single list-documents query, encoded as the JSON string the backend expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    method: &'static str,
    attribute: String,
}

impl Query {
    pub fn order_desc(attribute: &str) -> Self {
        Self {
            method: "orderDesc",
            attribute: attribute.to_string(),
        }
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
