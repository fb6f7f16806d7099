use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::{appointment_routes, notification_routes};
use appointment_cell::AppointmentService;

pub fn create_router(service: Arc<AppointmentService>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic appointments API is running!" }))
        .nest("/appointments", appointment_routes(service.clone()))
        .nest("/notifications", notification_routes(service))
}
