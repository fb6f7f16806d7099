pub mod backend;
pub mod documents;
pub mod messaging;
pub mod query;

pub use backend::{BackendClient, BackendError};
pub use documents::DocumentsApi;
pub use messaging::{EmailRequest, MessagingApi};
pub use query::Query;
