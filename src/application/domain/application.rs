//! Application aggregate root and pipeline status rules.

use super::{ApplicationDomainError, ApplicationId, ParseApplicationStatusError};
use crate::round::domain::{JobId, RoundId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Top-level pipeline status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Submitted, not yet picked up for review.
    Applied,
    /// Progressing through the job's interview rounds.
    UnderReview,
    /// Passed the rounds and is awaiting a hire/reject decision.
    Shortlisted,
    /// Parked to the side; round progress is retained.
    Hold,
    /// Hired. Terminal.
    Hired,
    /// Rejected. Terminal.
    Rejected,
}

impl ApplicationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::UnderReview => "under_review",
            Self::Shortlisted => "shortlisted",
            Self::Hold => "hold",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }

    /// Returns whether the status permits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Hired | Self::Rejected)
    }

    /// Returns whether the move to `target` is in the transition table.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        match self {
            Self::Applied => matches!(target, Self::UnderReview),
            Self::UnderReview => matches!(target, Self::Shortlisted | Self::Hold),
            Self::Shortlisted => matches!(target, Self::Hired | Self::Rejected | Self::Hold),
            Self::Hold => matches!(
                target,
                Self::Shortlisted | Self::UnderReview | Self::Rejected
            ),
            Self::Hired | Self::Rejected => false,
        }
    }

    /// Returns whether the move to `target` must be explicitly confirmed.
    ///
    /// Every legal transition is confirmation-gated except releasing a hold
    /// back to the shortlist; round-advances are always gated (enforced at
    /// the validator, which owns round semantics).
    #[must_use]
    pub const fn requires_confirmation(self, target: Self) -> bool {
        if !self.can_transition_to(target) {
            return false;
        }
        !matches!((self, target), (Self::Hold, Self::Shortlisted))
    }
}

impl TryFrom<&str> for ApplicationStatus {
    type Error = ParseApplicationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "applied" => Ok(Self::Applied),
            "under_review" => Ok(Self::UnderReview),
            "shortlisted" => Ok(Self::Shortlisted),
            "hold" => Ok(Self::Hold),
            "hired" => Ok(Self::Hired),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseApplicationStatusError(value.to_owned())),
        }
    }
}

/// Application aggregate root.
///
/// Invariant: `current_round_id` is set exactly while the status is
/// `UnderReview`. Applications are never deleted; terminal statuses are the
/// only form of retirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    id: ApplicationId,
    job_id: JobId,
    status: ApplicationStatus,
    current_round_id: Option<RoundId>,
    notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i64,
}

/// Parameter object for reconstructing a persisted application aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedApplicationData {
    /// Persisted application identifier.
    pub id: ApplicationId,
    /// Persisted owning-job identifier.
    pub job_id: JobId,
    /// Persisted pipeline status.
    pub status: ApplicationStatus,
    /// Persisted current-round pointer, if under review.
    pub current_round_id: Option<RoundId>,
    /// Persisted free-text notes.
    pub notes: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted optimistic-concurrency version.
    pub version: i64,
}

impl Application {
    /// Creates a freshly submitted application.
    #[must_use]
    pub fn new(job_id: JobId, notes: impl Into<String>, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ApplicationId::new(),
            job_id,
            status: ApplicationStatus::Applied,
            current_round_id: None,
            notes: notes.into(),
            created_at: timestamp,
            updated_at: timestamp,
            version: 0,
        }
    }

    /// Reconstructs an application from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedApplicationData) -> Self {
        Self {
            id: data.id,
            job_id: data.job_id,
            status: data.status,
            current_round_id: data.current_round_id,
            notes: data.notes,
            created_at: data.created_at,
            updated_at: data.updated_at,
            version: data.version,
        }
    }

    /// Returns the application identifier.
    #[must_use]
    pub const fn id(&self) -> ApplicationId {
        self.id
    }

    /// Returns the owning job identifier.
    #[must_use]
    pub const fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Returns the pipeline status.
    #[must_use]
    pub const fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Returns the current round pointer, set exactly while under review.
    #[must_use]
    pub const fn current_round_id(&self) -> Option<RoundId> {
        self.current_round_id
    }

    /// Returns the free-text notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
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

    /// Moves the application to a status other than `UnderReview`.
    ///
    /// Clears the current-round pointer, keeping the review invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationDomainError::InvalidTransition`] when the move is
    /// not in the transition table; entering review must go through
    /// [`Self::enter_round`].
    pub fn transition_to(
        &mut self,
        target: ApplicationStatus,
        clock: &impl Clock,
    ) -> Result<(), ApplicationDomainError> {
        if target == ApplicationStatus::UnderReview || !self.status.can_transition_to(target) {
            return Err(ApplicationDomainError::InvalidTransition {
                id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        self.current_round_id = None;
        self.touch(clock);
        Ok(())
    }

    /// Puts the application under review in the given round.
    ///
    /// From `UnderReview` this is a round-advance: the status is unchanged
    /// and only the pointer moves. From any other status the move must be in
    /// the transition table.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationDomainError::InvalidTransition`] when review
    /// cannot be entered from the current status.
    pub fn enter_round(
        &mut self,
        round_id: RoundId,
        clock: &impl Clock,
    ) -> Result<(), ApplicationDomainError> {
        if self.status != ApplicationStatus::UnderReview
            && !self.status.can_transition_to(ApplicationStatus::UnderReview)
        {
            return Err(ApplicationDomainError::InvalidTransition {
                id: self.id,
                from: self.status,
                to: ApplicationStatus::UnderReview,
            });
        }
        self.status = ApplicationStatus::UnderReview;
        self.current_round_id = Some(round_id);
        self.touch(clock);
        Ok(())
    }

    /// Returns a copy with the storage version advanced; used by adapters
    /// when committing an optimistic write.
    pub(crate) fn with_version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
