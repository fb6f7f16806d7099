// libs/appointment-cell/src/services/aggregation.rs
use crate::models::{Appointment, AppointmentCounts, AppointmentStatus};

/// Tallies appointments per status in a single pass.
///
/// `total_count` is always the number of documents given, so documents with an
/// unrecognized or missing status show up in the total and in
/// `unrecognized_count` only.
pub fn count_by_status(documents: Vec<Appointment>) -> AppointmentCounts {
    let mut counts = AppointmentCounts {
        total_count: documents.len(),
        scheduled_count: 0,
        pending_count: 0,
        cancelled_count: 0,
        unrecognized_count: 0,
        documents: Vec::new(),
    };

    for appointment in &documents {
        match appointment.status {
            AppointmentStatus::Scheduled => counts.scheduled_count += 1,
            AppointmentStatus::Pending => counts.pending_count += 1,
            AppointmentStatus::Cancelled => counts.cancelled_count += 1,
            AppointmentStatus::Unrecognized(_) | AppointmentStatus::Missing => {
                counts.unrecognized_count += 1
            }
        }
    }

    counts.documents = documents;
    counts
}
