// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use shared_models::error::AppError;
use shared_utils::to_plain;

use crate::models::{
    AppointmentError, CreateAppointmentRequest, SendEmailRequest, UpdateAppointmentBody,
    UpdateAppointmentRequest,
};
use crate::services::AppointmentService;

impl From<AppointmentError> for AppError {
    fn from(error: AppointmentError) -> Self {
        match error {
            AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
            AppointmentError::UpdateReturnedNothing => {
                AppError::Database("Appointment update returned no document".to_string())
            }
            AppointmentError::Store(msg) => AppError::Database(msg),
            AppointmentError::Notification(msg) => AppError::ExternalService(msg),
            AppointmentError::Serialization(msg) => AppError::Internal(msg),
        }
    }
}

/// Serialization boundary: every handler answers with the plain JSON form of
/// its operation's result, with no envelope around it.
fn plain<T: serde::Serialize>(value: &T) -> Result<Value, AppError> {
    to_plain(value).map_err(|e| AppError::Internal(format!("Failed to serialize response: {}", e)))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(service): State<Arc<AppointmentService>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = service.create_appointment(request).await?;
    Ok(Json(plain(&appointment)?))
}

#[axum::debug_handler]
pub async fn get_recent_appointments(
    State(service): State<Arc<AppointmentService>>,
) -> Result<Json<Value>, AppError> {
    let counts = service.get_recent_appointment_list().await?;
    Ok(Json(plain(&counts)?))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(service): State<Arc<AppointmentService>>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let appointment = service.get_appointment(&appointment_id).await?;
    Ok(Json(plain(&appointment)?))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(service): State<Arc<AppointmentService>>,
    Path(appointment_id): Path<String>,
    Json(body): Json<UpdateAppointmentBody>,
) -> Result<Json<Value>, AppError> {
    let request = UpdateAppointmentRequest::from_body(appointment_id, body);
    let updated = service.update_appointment(request).await?;
    Ok(Json(plain(&updated)?))
}

#[axum::debug_handler]
pub async fn send_email_notification(
    State(service): State<Arc<AppointmentService>>,
    Json(request): Json<SendEmailRequest>,
) -> Result<Json<Value>, AppError> {
    let message = service
        .send_email_notification(&request.user_id, &request.subject, &request.content)
        .await?;

    Ok(Json(plain(&message)?))
}
