//! Evaluation aggregate root: one application's attempt at one round.

use super::{EvaluationDomainError, EvaluationId, ParseEvaluationStatusError, derive_status};
use crate::application::domain::ApplicationId;
use crate::round::domain::{InterviewMode, RoundId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Persisted evaluation status.
///
/// The *effective* status additionally applies time-based missed-interview
/// detection; see [`derive_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    /// Created, no session booked yet.
    Pending,
    /// A session is booked with an interviewer.
    Scheduled,
    /// The session is underway.
    InProgress,
    /// The session finished without a pass/fail verdict.
    Completed,
    /// The candidate passed the round.
    Passed,
    /// The candidate failed the round.
    Failed,
    /// The round was waived for this application.
    Skipped,
    /// The booked session elapsed without taking place.
    Missed,
    /// A missed session is awaiting a replacement booking.
    Rescheduling,
    /// A replacement session was recorded by an external writer.
    Rescheduled,
}

impl EvaluationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Missed => "missed",
            Self::Rescheduling => "rescheduling",
            Self::Rescheduled => "rescheduled",
        }
    }
}

impl TryFrom<&str> for EvaluationStatus {
    type Error = ParseEvaluationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            "skipped" => Ok(Self::Skipped),
            "missed" => Ok(Self::Missed),
            "rescheduling" => Ok(Self::Rescheduling),
            "rescheduled" => Ok(Self::Rescheduled),
            _ => Err(ParseEvaluationStatusError(value.to_owned())),
        }
    }
}

/// Locked outcome accepted by [`Evaluation::mark_completed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalStatus {
    /// Session held, verdict recorded elsewhere.
    Completed,
    /// Candidate passed.
    Passed,
    /// Candidate failed.
    Failed,
}

impl From<FinalStatus> for EvaluationStatus {
    fn from(value: FinalStatus) -> Self {
        match value {
            FinalStatus::Completed => Self::Completed,
            FinalStatus::Passed => Self::Passed,
            FinalStatus::Failed => Self::Failed,
        }
    }
}

/// Identity of the person conducting a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interviewer {
    id: Option<String>,
    name: String,
    email: String,
}

impl Interviewer {
    /// Creates a validated interviewer.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationDomainError::EmptyInterviewerName`] when the name
    /// is empty after trimming, or
    /// [`EvaluationDomainError::InvalidInterviewerEmail`] when the email
    /// lacks an `@`.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, EvaluationDomainError> {
        let name = name.into();
        let trimmed_name = name.trim();
        if trimmed_name.is_empty() {
            return Err(EvaluationDomainError::EmptyInterviewerName);
        }
        let email = email.into();
        let trimmed_email = email.trim();
        if !trimmed_email.contains('@') {
            return Err(EvaluationDomainError::InvalidInterviewerEmail(email));
        }
        Ok(Self {
            id: None,
            name: trimmed_name.to_owned(),
            email: trimmed_email.to_owned(),
        })
    }

    /// Sets the interviewer's directory identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns the directory identifier, if known.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Kind of entry in an evaluation's audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationEventKind {
    /// Record created when the application entered the round.
    Created,
    /// An interviewer and session were booked.
    InterviewerAssigned,
    /// The session elapsed unattended.
    MarkedMissed,
    /// A replacement booking was requested.
    RescheduleRequested,
    /// A final decision was locked.
    Finalized,
}

/// One entry in an evaluation's audit trail.
///
/// The trail is what lets callers tell a replacement booking apart from a
/// first-time booking: both leave the status at `Scheduled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationEvent {
    /// What happened.
    pub kind: EvaluationEventKind,
    /// When it happened.
    pub at: DateTime<Utc>,
}

/// Booking details applied by [`Evaluation::assign_interviewer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionBooking {
    interviewer: Interviewer,
    scheduled_at: DateTime<Utc>,
    duration_minutes: u32,
    mode: InterviewMode,
}

impl SessionBooking {
    /// Creates a validated session booking.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationDomainError::ZeroDuration`] when the duration is
    /// zero.
    pub fn new(
        interviewer: Interviewer,
        scheduled_at: DateTime<Utc>,
        duration_minutes: u32,
        mode: InterviewMode,
    ) -> Result<Self, EvaluationDomainError> {
        if duration_minutes == 0 {
            return Err(EvaluationDomainError::ZeroDuration);
        }
        Ok(Self {
            interviewer,
            scheduled_at,
            duration_minutes,
            mode,
        })
    }

    /// Returns the interviewer being booked.
    #[must_use]
    pub const fn interviewer(&self) -> &Interviewer {
        &self.interviewer
    }

    /// Returns the session start instant.
    #[must_use]
    pub const fn scheduled_at(&self) -> DateTime<Utc> {
        self.scheduled_at
    }

    /// Returns the session duration in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Returns the session mode.
    #[must_use]
    pub const fn mode(&self) -> &InterviewMode {
        &self.mode
    }
}

/// Evaluation aggregate root.
///
/// Exactly one evaluation exists per `(application, round)` pair; creation
/// is a get-or-create and records are never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    id: EvaluationId,
    application_id: ApplicationId,
    round_id: RoundId,
    status: EvaluationStatus,
    scheduled_at: Option<DateTime<Utc>>,
    duration_minutes: Option<u32>,
    interviewer: Option<Interviewer>,
    mode: Option<InterviewMode>,
    score: Option<i32>,
    feedback: Option<String>,
    is_final: bool,
    history: Vec<EvaluationEvent>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i64,
}

/// Parameter object for reconstructing a persisted evaluation aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedEvaluationData {
    /// Persisted evaluation identifier.
    pub id: EvaluationId,
    /// Persisted owning application.
    pub application_id: ApplicationId,
    /// Persisted round the attempt belongs to.
    pub round_id: RoundId,
    /// Persisted status.
    pub status: EvaluationStatus,
    /// Persisted session start, if booked.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Persisted session duration in minutes, if booked.
    pub duration_minutes: Option<u32>,
    /// Persisted interviewer, if assigned.
    pub interviewer: Option<Interviewer>,
    /// Persisted session mode, if booked.
    pub mode: Option<InterviewMode>,
    /// Persisted score, if recorded.
    pub score: Option<i32>,
    /// Persisted feedback, if recorded.
    pub feedback: Option<String>,
    /// Persisted finality flag.
    pub is_final: bool,
    /// Persisted audit trail.
    pub history: Vec<EvaluationEvent>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted optimistic-concurrency version.
    pub version: i64,
}

impl Evaluation {
    /// Creates a fresh pending evaluation for an application entering a
    /// round.
    #[must_use]
    pub fn new(application_id: ApplicationId, round_id: RoundId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: EvaluationId::new(),
            application_id,
            round_id,
            status: EvaluationStatus::Pending,
            scheduled_at: None,
            duration_minutes: None,
            interviewer: None,
            mode: None,
            score: None,
            feedback: None,
            is_final: false,
            history: vec![EvaluationEvent {
                kind: EvaluationEventKind::Created,
                at: timestamp,
            }],
            created_at: timestamp,
            updated_at: timestamp,
            version: 0,
        }
    }

    /// Reconstructs an evaluation from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedEvaluationData) -> Self {
        Self {
            id: data.id,
            application_id: data.application_id,
            round_id: data.round_id,
            status: data.status,
            scheduled_at: data.scheduled_at,
            duration_minutes: data.duration_minutes,
            interviewer: data.interviewer,
            mode: data.mode,
            score: data.score,
            feedback: data.feedback,
            is_final: data.is_final,
            history: data.history,
            created_at: data.created_at,
            updated_at: data.updated_at,
            version: data.version,
        }
    }

    /// Returns the evaluation identifier.
    #[must_use]
    pub const fn id(&self) -> EvaluationId {
        self.id
    }

    /// Returns the owning application identifier.
    #[must_use]
    pub const fn application_id(&self) -> ApplicationId {
        self.application_id
    }

    /// Returns the round this attempt belongs to.
    #[must_use]
    pub const fn round_id(&self) -> RoundId {
        self.round_id
    }

    /// Returns the persisted status.
    #[must_use]
    pub const fn status(&self) -> EvaluationStatus {
        self.status
    }

    /// Returns the session start instant, if booked.
    #[must_use]
    pub const fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        self.scheduled_at
    }

    /// Returns the session duration in minutes, if booked.
    #[must_use]
    pub const fn duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    /// Returns the assigned interviewer, if any.
    #[must_use]
    pub const fn interviewer(&self) -> Option<&Interviewer> {
        self.interviewer.as_ref()
    }

    /// Returns the session mode, if booked.
    #[must_use]
    pub const fn mode(&self) -> Option<&InterviewMode> {
        self.mode.as_ref()
    }

    /// Returns the recorded score, if any.
    #[must_use]
    pub const fn score(&self) -> Option<i32> {
        self.score
    }

    /// Returns the recorded feedback, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Returns whether a final decision is locked.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        self.is_final
    }

    /// Returns the append-only audit trail.
    #[must_use]
    pub fn history(&self) -> &[EvaluationEvent] {
        &self.history
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the optimistic-concurrency version loaded from storage.
    #[must_use]
    pub const fn version(&self) -> i64 {
        self.version
    }

    /// Returns whether a session was ever booked for this evaluation.
    #[must_use]
    pub fn has_prior_booking(&self) -> bool {
        self.history
            .iter()
            .any(|event| event.kind == EvaluationEventKind::InterviewerAssigned)
    }

    /// Books an interviewer and session, moving the status to `Scheduled`.
    ///
    /// Works both for a first-time booking from `Pending` and for a
    /// replacement booking from `Rescheduling`; the audit trail keeps the
    /// two distinguishable.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationDomainError::Finalized`] when a final decision is
    /// locked.
    pub fn assign_interviewer(
        &mut self,
        booking: SessionBooking,
        clock: &impl Clock,
    ) -> Result<(), EvaluationDomainError> {
        if self.is_final {
            return Err(EvaluationDomainError::Finalized(self.id));
        }
        let SessionBooking {
            interviewer,
            scheduled_at,
            duration_minutes,
            mode,
        } = booking;
        self.status = EvaluationStatus::Scheduled;
        self.scheduled_at = Some(scheduled_at);
        self.duration_minutes = Some(duration_minutes);
        self.interviewer = Some(interviewer);
        self.mode = Some(mode);
        self.record(EvaluationEventKind::InterviewerAssigned, clock);
        Ok(())
    }

    /// Locks a final decision on the evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationDomainError::InvalidState`] unless the effective
    /// status at `now` is `Scheduled`, `InProgress`, or `Missed`.
    pub fn mark_completed(
        &mut self,
        final_status: FinalStatus,
        score: Option<i32>,
        feedback: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), EvaluationDomainError> {
        let now = clock.utc();
        let effective = derive_status(self, now);
        let permitted = matches!(
            effective,
            EvaluationStatus::Scheduled | EvaluationStatus::InProgress | EvaluationStatus::Missed
        );
        if !permitted {
            return Err(EvaluationDomainError::InvalidState {
                id: self.id,
                effective,
            });
        }
        self.status = final_status.into();
        self.score = score;
        self.feedback = feedback;
        self.is_final = true;
        self.record(EvaluationEventKind::Finalized, clock);
        Ok(())
    }

    /// Requests a replacement booking for a missed session.
    ///
    /// Clears finality; a subsequent [`Self::assign_interviewer`] call moves
    /// the status back to `Scheduled`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationDomainError::InvalidState`] unless the effective
    /// status at `now` is `Missed`.
    pub fn reschedule(&mut self, clock: &impl Clock) -> Result<(), EvaluationDomainError> {
        let now = clock.utc();
        let effective = derive_status(self, now);
        if effective != EvaluationStatus::Missed {
            return Err(EvaluationDomainError::InvalidState {
                id: self.id,
                effective,
            });
        }
        self.status = EvaluationStatus::Rescheduling;
        self.is_final = false;
        self.record(EvaluationEventKind::RescheduleRequested, clock);
        Ok(())
    }

    /// Makes a derived `Missed` durable.
    ///
    /// No-op when the evaluation is no longer `Scheduled` or the deadline
    /// has not elapsed; returns whether a write is needed.
    pub fn record_missed(&mut self, clock: &impl Clock) -> bool {
        let now = clock.utc();
        if self.status != EvaluationStatus::Scheduled
            || derive_status(self, now) != EvaluationStatus::Missed
        {
            return false;
        }
        self.status = EvaluationStatus::Missed;
        self.record(EvaluationEventKind::MarkedMissed, clock);
        true
    }

    /// Returns a copy with the storage version advanced; used by adapters
    /// when committing an optimistic write.
    pub(crate) fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    fn record(&mut self, kind: EvaluationEventKind, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.history.push(EvaluationEvent {
            kind,
            at: timestamp,
        });
        self.updated_at = timestamp;
    }
}
