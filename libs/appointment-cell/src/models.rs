// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use shared_models::document::DocumentMeta;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    pub patient: PatientRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

impl Appointment {
    pub fn id(&self) -> &str {
        &self.meta.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.meta.created_at
    }
}

/// The patient an appointment belongs to.
///
/// Written as a bare document id; the backend may hand it back either as that
/// id or as the expanded patient document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatientRef {
    Id(String),
    Record(Map<String, Value>),
}

impl PatientRef {
    pub fn id(&self) -> Option<&str> {
        match self {
            PatientRef::Id(id) => Some(id),
            PatientRef::Record(record) => record.get("$id").and_then(Value::as_str),
        }
    }
}

impl From<&str> for PatientRef {
    fn from(id: &str) -> Self {
        PatientRef::Id(id.to_string())
    }
}

/// Appointment status as stored.
///
/// Anything other than the three known values is kept verbatim in
/// `Unrecognized` so it survives a read/write round trip. A document with no
/// status at all (absent key or `null`) reads as `Missing`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum AppointmentStatus {
    Scheduled,
    Pending,
    Cancelled,
    Unrecognized(String),
    #[default]
    Missing,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Unrecognized(raw) => raw,
            AppointmentStatus::Missing => "",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(
            self,
            AppointmentStatus::Unrecognized(_) | AppointmentStatus::Missing
        )
    }
}

impl From<String> for AppointmentStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "scheduled" => AppointmentStatus::Scheduled,
            "pending" => AppointmentStatus::Pending,
            "cancelled" => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Unrecognized(raw),
        }
    }
}

impl From<Option<String>> for AppointmentStatus {
    fn from(raw: Option<String>) -> Self {
        raw.map_or(AppointmentStatus::Missing, AppointmentStatus::from)
    }
}

impl From<AppointmentStatus> for Option<String> {
    fn from(status: AppointmentStatus) -> Self {
        match status {
            AppointmentStatus::Missing => None,
            AppointmentStatus::Unrecognized(raw) => Some(raw),
            known => Some(known.as_str().to_string()),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which email goes out after an update. Only `schedule` confirms; every
/// other tag is treated as a cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationKind {
    Schedule,
    Cancel,
}

impl From<String> for NotificationKind {
    fn from(raw: String) -> Self {
        if raw == "schedule" {
            NotificationKind::Schedule
        } else {
            NotificationKind::Cancel
        }
    }
}

impl From<NotificationKind> for String {
    fn from(kind: NotificationKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Schedule => write!(f, "schedule"),
            NotificationKind::Cancel => write!(f, "cancel"),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub patient: PatientRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub primary_physician: String,
    pub schedule: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Fields to change on an existing appointment; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_physician: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
}

/// Request body for `PATCH /appointments/{appointment_id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentBody {
    pub user_id: String,
    pub time_zone: String,
    pub appointment: AppointmentPatch,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

#[derive(Debug, Clone)]
pub struct UpdateAppointmentRequest {
    pub appointment_id: String,
    pub user_id: String,
    pub time_zone: String,
    pub appointment: AppointmentPatch,
    pub kind: NotificationKind,
}

impl UpdateAppointmentRequest {
    pub fn from_body(appointment_id: String, body: UpdateAppointmentBody) -> Self {
        Self {
            appointment_id,
            user_id: body.user_id,
            time_zone: body.time_zone,
            appointment: body.appointment,
            kind: body.kind,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub user_id: String,
    pub subject: String,
    pub content: String,
}

/// What happened to the email that follows an update. The update itself has
/// already been written either way.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NotificationOutcome {
    Sent {
        #[serde(rename = "messageId")]
        message_id: String,
    },
    Failed {
        error: String,
    },
}

impl NotificationOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationOutcome::Sent { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatedAppointment {
    pub appointment: Appointment,
    pub notification: NotificationOutcome,
}

// ==============================================================================
// STATISTICS MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Per-status tallies of one list call. `unrecognized_count` covers documents
/// whose status is unknown or missing; they only show up in `total_count`.
pub struct AppointmentCounts {
    pub total_count: usize,
    pub scheduled_count: usize,
    pub pending_count: usize,
    pub cancelled_count: usize,
    pub unrecognized_count: usize,
    pub documents: Vec<Appointment>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Appointment update returned no document")]
    UpdateReturnedNothing,

    #[error("Appointment store error: {0}")]
    Store(String),

    #[error("Notification service error: {0}")]
    Notification(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
