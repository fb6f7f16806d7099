// libs/appointment-cell/src/services/appointment.rs
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use shared_config::AppConfig;
use shared_database::EmailRequest;
use shared_models::message::MessageRecord;
use shared_utils::{format_date_time, unique_id};

use crate::models::{
    Appointment, AppointmentCounts, AppointmentError, CreateAppointmentRequest, NotificationOutcome,
    UpdateAppointmentRequest, UpdatedAppointment,
};
use crate::services::aggregation::count_by_status;
use crate::services::notification::{BackendNotificationService, NotificationService};
use crate::services::revalidation::{revalidator_from_config, CacheRevalidator};
use crate::services::store::{AppointmentStore, BackendAppointmentStore};
use crate::services::templates::{compose_notification, ClinicBranding, NotificationContext};

/// Appointment actions over an injected store, mailer and page revalidator.
///
/// Every operation logs its own failure and hands it back as an
/// [`AppointmentError`]; nothing is retried and nothing is rolled back. Once an
/// update is written it is reported as a success, with the email result
/// carried alongside in [`UpdatedAppointment`].
pub struct AppointmentService {
    store: Arc<dyn AppointmentStore>,
    notifier: Arc<dyn NotificationService>,
    revalidator: Arc<dyn CacheRevalidator>,
    branding: ClinicBranding,
    admin_path: String,
}

impl AppointmentService {
    /// Wires the service to the configured backend.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_collaborators(
            Arc::new(BackendAppointmentStore::new(config)),
            Arc::new(BackendNotificationService::new(config)),
            revalidator_from_config(config),
            config,
        )
    }

    pub fn with_collaborators(
        store: Arc<dyn AppointmentStore>,
        notifier: Arc<dyn NotificationService>,
        revalidator: Arc<dyn CacheRevalidator>,
        config: &AppConfig,
    ) -> Self {
        Self {
            store,
            notifier,
            revalidator,
            branding: ClinicBranding::from_config(config),
            admin_path: config.admin_path.clone(),
        }
    }

    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let document_id = unique_id();
        debug!("Creating appointment {}", document_id);

        let appointment = self
            .store
            .create(&document_id, &request)
            .await
            .inspect_err(|e| error!("An error occurred while creating a new appointment: {}", e))?;

        info!("Appointment {} created", appointment.id());
        self.revalidate_admin().await;

        Ok(appointment)
    }

    pub async fn get_recent_appointment_list(&self) -> Result<AppointmentCounts, AppointmentError> {
        debug!("Fetching recent appointments");

        let list = self
            .store
            .list_recent()
            .await
            .inspect_err(|e| error!("An error occurred while retrieving the recent appointments: {}", e))?;

        Ok(count_by_status(list.documents))
    }

    pub async fn send_email_notification(
        &self,
        user_id: &str,
        subject: &str,
        content: &str,
    ) -> Result<MessageRecord, AppointmentError> {
        let email = EmailRequest {
            message_id: unique_id(),
            subject: subject.to_string(),
            content: content.to_string(),
            cc: Vec::new(),
            users: vec![user_id.to_string()],
            html: true,
        };

        debug!("Sending email {} to user {}", email.message_id, user_id);

        self.notifier
            .create_email(email)
            .await
            .inspect_err(|e| error!("An error occurred while sending email: {}", e))
    }

    pub async fn update_appointment(
        &self,
        request: UpdateAppointmentRequest,
    ) -> Result<UpdatedAppointment, AppointmentError> {
        self.update_and_notify(request)
            .await
            .inspect_err(|e| error!("An error occurred while scheduling an appointment: {}", e))
    }

    async fn update_and_notify(
        &self,
        request: UpdateAppointmentRequest,
    ) -> Result<UpdatedAppointment, AppointmentError> {
        debug!("Updating appointment {} ({})", request.appointment_id, request.kind);

        let updated = self
            .store
            .update(&request.appointment_id, &request.appointment)
            .await?
            .ok_or(AppointmentError::UpdateReturnedNothing)?;

        let patch = &request.appointment;
        let schedule = patch.schedule.unwrap_or(updated.schedule);
        let schedule_time = format_date_time(schedule, &request.time_zone).date_time;

        let email = compose_notification(
            &self.branding,
            &NotificationContext {
                kind: request.kind,
                schedule_time: &schedule_time,
                physician: patch
                    .primary_physician
                    .as_deref()
                    .unwrap_or(&updated.primary_physician),
                cancellation_reason: patch
                    .cancellation_reason
                    .as_deref()
                    .or(updated.cancellation_reason.as_deref()),
            },
        );

        let notification = match self
            .send_email_notification(&request.user_id, &email.subject, &email.html)
            .await
        {
            Ok(message) => {
                info!("Appointment {} updated, patient notified", updated.id());
                NotificationOutcome::Sent { message_id: message.id }
            }
            Err(e) => {
                warn!("Appointment {} updated but the patient was not notified: {}", updated.id(), e);
                NotificationOutcome::Failed { error: e.to_string() }
            }
        };

        self.revalidate_admin().await;

        Ok(UpdatedAppointment {
            appointment: updated,
            notification,
        })
    }

    pub async fn get_appointment(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        debug!("Fetching appointment {}", appointment_id);

        self.store
            .get(appointment_id)
            .await
            .inspect_err(|e| error!("An error occurred while retrieving the existing appointment: {}", e))
    }

    /// The write already happened, so a failed revalidation is only worth a warning.
    async fn revalidate_admin(&self) {
        if let Err(e) = self.revalidator.revalidate_path(&self.admin_path).await {
            warn!("Failed to revalidate {}: {}", self.admin_path, e);
        }
    }
}
