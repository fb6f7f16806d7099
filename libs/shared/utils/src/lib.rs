pub mod datetime;
pub mod plain;
pub mod test_utils;

pub use datetime::{format_date_time, FormattedDateTime};
pub use plain::to_plain;

/// Generates a fresh identifier for documents and messages.
pub fn unique_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
