pub mod aggregation;
pub mod appointment;
pub mod notification;
pub mod revalidation;
pub mod store;
pub mod templates;

pub use aggregation::count_by_status;
pub use appointment::AppointmentService;
pub use notification::{BackendNotificationService, NotificationService};
pub use revalidation::{CacheRevalidator, LoggingRevalidator, RevalidationError, WebhookRevalidator};
pub use store::{AppointmentStore, BackendAppointmentStore};
pub use templates::{compose_notification, ClinicBranding, EmailContent, NotificationContext};
