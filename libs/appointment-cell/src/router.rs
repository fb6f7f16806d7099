// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::services::AppointmentService;

pub fn appointment_routes(service: Arc<AppointmentService>) -> Router {
    Router::new()
        .route("/", post(handlers::create_appointment))
        .route("/recent", get(handlers::get_recent_appointments))
        .route(
            "/{appointment_id}",
            get(handlers::get_appointment).patch(handlers::update_appointment),
        )
        .with_state(service)
}

pub fn notification_routes(service: Arc<AppointmentService>) -> Router {
    Router::new()
        .route("/email", post(handlers::send_email_notification))
        .with_state(service)
}
