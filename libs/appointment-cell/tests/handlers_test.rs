use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::{Path, State},
    http::{Request, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::handlers::*;
use appointment_cell::models::*;
use appointment_cell::router::appointment_routes;
use appointment_cell::services::AppointmentService;
use shared_models::error::AppError;
use shared_utils::test_utils::{MockBackendResponses, TestConfig};

fn service_for(mock_server: &MockServer) -> (Arc<AppointmentService>, TestConfig) {
    let test_config = TestConfig::with_endpoint(&mock_server.uri());
    let service = Arc::new(AppointmentService::new(&test_config.to_app_config()));
    (service, test_config)
}

fn update_body(kind: &str, patch: Value) -> UpdateAppointmentBody {
    serde_json::from_value(json!({
        "userId": "user-1",
        "timeZone": "UTC",
        "appointment": patch,
        "type": kind
    }))
    .unwrap()
}

#[tokio::test]
async fn test_create_appointment_success() {
    let mock_server = MockServer::start().await;
    let (service, config) = service_for(&mock_server);

    Mock::given(method("POST"))
        .and(path(config.documents_path()))
        .and(body_partial_json(json!({
            "data": {
                "patient": "P1",
                "primaryPhysician": "Dr. A",
                "status": "pending"
            }
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(MockBackendResponses::appointment_document("new-apt", "pending")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let request: CreateAppointmentRequest = serde_json::from_value(json!({
        "patient": "P1",
        "primaryPhysician": "Dr. A",
        "schedule": "2024-01-05T10:00:00Z",
        "status": "pending"
    }))
    .unwrap();

    let result = create_appointment(State(service), Json(request)).await;

    assert!(result.is_ok(), "Expected create to succeed, got error: {:?}", result.as_ref().err());
    let response = result.unwrap().0;
    assert_eq!(response["$id"], "new-apt");
    assert_eq!(response["status"], "pending");
    assert_eq!(response["primaryPhysician"], "Dr. A");
}

#[tokio::test]
async fn test_create_appointment_backend_down() {
    let mock_server = MockServer::start().await;
    let (service, _) = service_for(&mock_server);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_json(
            MockBackendResponses::error_response("Service unavailable", 503),
        ))
        .mount(&mock_server)
        .await;

    let request: CreateAppointmentRequest = serde_json::from_value(json!({
        "patient": "P1",
        "primaryPhysician": "Dr. A",
        "schedule": "2024-01-05T10:00:00Z",
        "status": "pending"
    }))
    .unwrap();

    let result = create_appointment(State(service), Json(request)).await;

    match result {
        Err(AppError::Database(msg)) => assert!(msg.contains("503")),
        other => panic!("Expected database error, got {:?}", other.map(|json| json.0)),
    }
}

#[tokio::test]
async fn test_get_recent_appointments_counts_by_status() {
    let mock_server = MockServer::start().await;
    let (service, config) = service_for(&mock_server);

    Mock::given(method("GET"))
        .and(path(config.documents_path()))
        .and(query_param("queries[]", r#"{"method":"orderDesc","attribute":"$createdAt"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::appointment_list(&[
            "scheduled",
            "pending",
            "pending",
            "cancelled",
            "archived",
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = get_recent_appointments(State(service)).await.unwrap().0;

    assert_eq!(response["totalCount"], 5);
    assert_eq!(response["scheduledCount"], 1);
    assert_eq!(response["pendingCount"], 2);
    assert_eq!(response["cancelledCount"], 1);
    assert_eq!(response["unrecognizedCount"], 1);
    assert_eq!(response["documents"].as_array().unwrap().len(), 5);
    assert_eq!(response["documents"][4]["status"], "archived");
}

#[tokio::test]
async fn test_get_recent_appointments_tolerates_missing_status() {
    let mock_server = MockServer::start().await;
    let (service, config) = service_for(&mock_server);

    let mut null_status = MockBackendResponses::appointment_document("apt-null", "pending");
    null_status["status"] = Value::Null;

    Mock::given(method("GET"))
        .and(path(config.documents_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(MockBackendResponses::document_list(vec![
            MockBackendResponses::appointment_document("apt-0", "scheduled"),
            MockBackendResponses::appointment_document_without_status("apt-missing"),
            null_status,
            MockBackendResponses::appointment_document("apt-3", "pending"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let response = get_recent_appointments(State(service)).await.unwrap().0;

    assert_eq!(response["totalCount"], 4);
    assert_eq!(response["scheduledCount"], 1);
    assert_eq!(response["pendingCount"], 1);
    assert_eq!(response["cancelledCount"], 0);
    assert_eq!(response["unrecognizedCount"], 2);
    assert_eq!(response["documents"][1]["$id"], "apt-missing");
    assert_eq!(response["documents"][1]["status"], Value::Null);
}

#[tokio::test]
async fn test_get_appointment_success_and_repeatable() {
    let mock_server = MockServer::start().await;
    let (service, config) = service_for(&mock_server);

    Mock::given(method("GET"))
        .and(path(format!("{}/a1", config.documents_path())))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockBackendResponses::appointment_document("a1", "scheduled")),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let first = get_appointment(State(service.clone()), Path("a1".to_string())).await.unwrap().0;
    let second = get_appointment(State(service), Path("a1".to_string())).await.unwrap().0;

    assert_eq!(first["$id"], "a1");
    assert_eq!(first["primaryPhysician"], "Dr. A");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_appointment_not_found() {
    let mock_server = MockServer::start().await;
    let (service, _) = service_for(&mock_server);

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(
            MockBackendResponses::error_response("Document with the requested ID could not be found.", 404),
        ))
        .mount(&mock_server)
        .await;

    let result = get_appointment(State(service), Path("missing".to_string())).await;

    let error = result.err().expect("expected not found");
    assert!(matches!(error, AppError::NotFound(_)));
    assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_appointment_schedule_sends_confirmation() {
    let mock_server = MockServer::start().await;
    let (service, config) = service_for(&mock_server);

    Mock::given(method("PATCH"))
        .and(path(format!("{}/a1", config.documents_path())))
        .and(body_partial_json(json!({ "data": { "status": "scheduled" } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockBackendResponses::appointment_document("a1", "scheduled")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/messaging/messages/email"))
        .and(body_partial_json(json!({
            "subject": "Your Appointment is Confirmed - MMU Dispensary",
            "cc": [],
            "users": ["user-1"]
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(MockBackendResponses::message_response("m1", "user-1")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = update_body(
        "schedule",
        json!({
            "primaryPhysician": "Dr. A",
            "schedule": "2024-01-05T10:00:00Z",
            "status": "scheduled"
        }),
    );

    let response = update_appointment(State(service), Path("a1".to_string()), Json(body))
        .await
        .unwrap()
        .0;

    assert_eq!(response["appointment"]["status"], "scheduled");
    assert_eq!(response["notification"], json!({ "status": "sent", "messageId": "m1" }));

    let requests = mock_server.received_requests().await.unwrap();
    let email: Value = requests
        .iter()
        .find(|r| r.url.path() == "/messaging/messages/email")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .expect("email request");
    let content = email["content"].as_str().unwrap();
    assert!(content.contains("Dr. A"));
    assert!(content.contains("Jan 5, 2024, 10:00 AM"));
}

#[tokio::test]
async fn test_update_appointment_cancel_sends_reason() {
    let mock_server = MockServer::start().await;
    let (service, config) = service_for(&mock_server);

    Mock::given(method("PATCH"))
        .and(path(format!("{}/a1", config.documents_path())))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockBackendResponses::appointment_document("a1", "cancelled")),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/messaging/messages/email"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(MockBackendResponses::message_response("m2", "user-1")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = update_body(
        "cancel",
        json!({ "status": "cancelled", "cancellationReason": "Clinic closed for the holiday" }),
    );

    let result = update_appointment(State(service), Path("a1".to_string()), Json(body)).await;
    assert!(result.is_ok());

    let requests = mock_server.received_requests().await.unwrap();
    let email: Value = requests
        .iter()
        .find(|r| r.url.path() == "/messaging/messages/email")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .expect("email request");
    assert!(email["subject"].as_str().unwrap().contains("Cancelled"));
    assert!(email["content"].as_str().unwrap().contains("Clinic closed for the holiday"));
}

#[tokio::test]
async fn test_update_appointment_email_failure_still_succeeds() {
    let mock_server = MockServer::start().await;
    let (service, config) = service_for(&mock_server);

    Mock::given(method("PATCH"))
        .and(path(format!("{}/a1", config.documents_path())))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(MockBackendResponses::appointment_document("a1", "scheduled")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/messaging/messages/email"))
        .respond_with(ResponseTemplate::new(500).set_body_json(
            MockBackendResponses::error_response("Provider unavailable", 500),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let body = update_body("schedule", json!({ "status": "scheduled" }));
    let response = update_appointment(State(service), Path("a1".to_string()), Json(body))
        .await
        .unwrap()
        .0;

    assert_eq!(response["appointment"]["$id"], "a1");
    assert_eq!(response["appointment"]["status"], "scheduled");
    assert_eq!(response["notification"]["status"], "failed");
    assert!(response["notification"]["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn test_update_appointment_empty_response_skips_email() {
    let mock_server = MockServer::start().await;
    let (service, _) = service_for(&mock_server);

    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/messaging/messages/email"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let body = update_body("schedule", json!({ "status": "scheduled" }));
    let result = update_appointment(State(service), Path("a1".to_string()), Json(body)).await;

    assert!(matches!(result, Err(AppError::Database(_))));
}

#[tokio::test]
async fn test_send_email_notification_handler() {
    let mock_server = MockServer::start().await;
    let (service, _) = service_for(&mock_server);

    Mock::given(method("POST"))
        .and(path("/messaging/messages/email"))
        .and(body_partial_json(json!({
            "subject": "Reminder",
            "content": "<p>See you soon</p>",
            "users": ["user-7"],
            "cc": []
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(MockBackendResponses::message_response("m3", "user-7")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let request: SendEmailRequest = serde_json::from_value(json!({
        "userId": "user-7",
        "subject": "Reminder",
        "content": "<p>See you soon</p>"
    }))
    .unwrap();

    let response = send_email_notification(State(service), Json(request)).await.unwrap().0;

    assert_eq!(response["$id"], "m3");
    assert_eq!(response["deliveredTotal"], 0);
}

#[tokio::test]
async fn test_routes_dispatch_recent_before_id() {
    let mock_server = MockServer::start().await;
    let (service, config) = service_for(&mock_server);

    Mock::given(method("GET"))
        .and(path(config.documents_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockBackendResponses::appointment_list(&["pending"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = appointment_routes(service);
    let response = app
        .oneshot(Request::builder().uri("/recent").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["pendingCount"], 1);
}
