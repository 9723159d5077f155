//! Outbound notification event payloads.

use crate::application::domain::ApplicationId;
use crate::evaluation::domain::EvaluationId;
use crate::round::domain::RoundId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Person a notification is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// Fire-and-forget events handed to the notification dispatcher.
///
/// Dispatch failures are logged and never rolled back into the core
/// transaction; delivery is at-least-once at this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NotificationEvent {
    /// A session was booked for an evaluation.
    EvaluationScheduled {
        /// Interviewer the booking is addressed to.
        recipient: Recipient,
        /// Evaluation the booking belongs to.
        evaluation_id: EvaluationId,
        /// Application under evaluation.
        application_id: ApplicationId,
        /// Round being attempted.
        round_id: RoundId,
        /// Booked session start.
        scheduled_at: DateTime<Utc>,
    },
    /// A replacement session was booked after a miss.
    EvaluationRescheduled {
        /// Interviewer the booking is addressed to.
        recipient: Recipient,
        /// Evaluation the booking belongs to.
        evaluation_id: EvaluationId,
        /// Application under evaluation.
        application_id: ApplicationId,
        /// Round being attempted.
        round_id: RoundId,
        /// Booked session start.
        scheduled_at: DateTime<Utc>,
    },
    /// An application was shortlisted.
    ///
    /// The candidate's contact details live outside the core; when absent
    /// the dispatcher resolves the recipient from the application.
    RoundShortlisted {
        /// Candidate contact, when already known to the caller.
        recipient: Option<Recipient>,
        /// Application that was shortlisted.
        application_id: ApplicationId,
    },
}
