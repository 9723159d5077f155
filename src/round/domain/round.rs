//! Round aggregate root and scheduling template types.

use super::{JobId, ParseRoundTypeError, RoundDomainError, RoundId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Kind of assessment a round performs.
///
/// The type is fixed at round creation; downstream consumers must never
/// infer it from the round's display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundType {
    /// Multiple-choice questionnaire.
    Mcq,
    /// General interview conversation.
    Interview,
    /// Technical deep-dive interview.
    Technical,
    /// Human-resources interview.
    Hr,
    /// Live coding exercise.
    Coding,
}

impl RoundType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mcq => "mcq",
            Self::Interview => "interview",
            Self::Technical => "technical",
            Self::Hr => "hr",
            Self::Coding => "coding",
        }
    }
}

impl TryFrom<&str> for RoundType {
    type Error = ParseRoundTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "mcq" => Ok(Self::Mcq),
            "interview" => Ok(Self::Interview),
            "technical" => Ok(Self::Technical),
            "hr" => Ok(Self::Hr),
            "coding" => Ok(Self::Coding),
            _ => Err(ParseRoundTypeError(value.to_owned())),
        }
    }
}

/// How an interview session is held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InterviewMode {
    /// Remote session on a named platform (e.g. a meeting link host).
    Online {
        /// Platform or meeting host name.
        platform: String,
    },
    /// In-person session at a named location.
    Onsite {
        /// Physical location of the session.
        location: String,
    },
}

impl InterviewMode {
    /// Creates a validated online mode.
    ///
    /// # Errors
    ///
    /// Returns [`RoundDomainError::EmptyModeDetail`] when the platform is
    /// empty after trimming.
    pub fn online(platform: impl Into<String>) -> Result<Self, RoundDomainError> {
        let platform = non_empty_detail(platform)?;
        Ok(Self::Online { platform })
    }

    /// Creates a validated onsite mode.
    ///
    /// # Errors
    ///
    /// Returns [`RoundDomainError::EmptyModeDetail`] when the location is
    /// empty after trimming.
    pub fn onsite(location: impl Into<String>) -> Result<Self, RoundDomainError> {
        let location = non_empty_detail(location)?;
        Ok(Self::Onsite { location })
    }
}

fn non_empty_detail(value: impl Into<String>) -> Result<String, RoundDomainError> {
    let raw = value.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RoundDomainError::EmptyModeDetail);
    }
    Ok(trimmed.to_owned())
}

/// Default scheduling parameters applied when sessions for this round
/// are booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingTemplate {
    duration_minutes: u32,
    mode: InterviewMode,
}

impl SchedulingTemplate {
    /// Creates a validated scheduling template.
    ///
    /// # Errors
    ///
    /// Returns [`RoundDomainError::ZeroDuration`] when the duration is zero.
    pub fn new(duration_minutes: u32, mode: InterviewMode) -> Result<Self, RoundDomainError> {
        if duration_minutes == 0 {
            return Err(RoundDomainError::ZeroDuration);
        }
        Ok(Self {
            duration_minutes,
            mode,
        })
    }

    /// Returns the default session duration in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// Returns the default session mode.
    #[must_use]
    pub const fn mode(&self) -> &InterviewMode {
        &self.mode
    }
}

/// Round aggregate root: one ordered stage of a job's interview process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    id: RoundId,
    job_id: JobId,
    name: String,
    order: i32,
    round_type: RoundType,
    template: SchedulingTemplate,
    is_archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted round aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRoundData {
    /// Persisted round identifier.
    pub id: RoundId,
    /// Persisted owning-job identifier.
    pub job_id: JobId,
    /// Persisted display name.
    pub name: String,
    /// Persisted sort order within the job.
    pub order: i32,
    /// Persisted assessment type.
    pub round_type: RoundType,
    /// Persisted scheduling template.
    pub template: SchedulingTemplate,
    /// Persisted archival flag.
    pub is_archived: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Round {
    /// Creates a new active round for a job.
    ///
    /// # Errors
    ///
    /// Returns [`RoundDomainError::EmptyRoundName`] when the name is empty
    /// after trimming.
    pub fn new(
        job_id: JobId,
        name: impl Into<String>,
        order: i32,
        round_type: RoundType,
        template: SchedulingTemplate,
        clock: &impl Clock,
    ) -> Result<Self, RoundDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RoundDomainError::EmptyRoundName);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: RoundId::new(),
            job_id,
            name: trimmed.to_owned(),
            order,
            round_type,
            template,
            is_archived: false,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a round from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRoundData) -> Self {
        Self {
            id: data.id,
            job_id: data.job_id,
            name: data.name,
            order: data.order,
            round_type: data.round_type,
            template: data.template,
            is_archived: data.is_archived,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the round identifier.
    #[must_use]
    pub const fn id(&self) -> RoundId {
        self.id
    }

    /// Returns the owning job identifier.
    #[must_use]
    pub const fn job_id(&self) -> JobId {
        self.job_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sort order within the job.
    #[must_use]
    pub const fn order(&self) -> i32 {
        self.order
    }

    /// Returns the assessment type.
    #[must_use]
    pub const fn round_type(&self) -> RoundType {
        self.round_type
    }

    /// Returns the scheduling template.
    #[must_use]
    pub const fn template(&self) -> &SchedulingTemplate {
        &self.template
    }

    /// Returns whether the round is archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.is_archived
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

    /// Compares rounds by catalog position.
    ///
    /// Ascending `order`; ties break on creation timestamp then identifier
    /// so listings are stable regardless of storage ordering.
    #[must_use]
    pub fn catalog_cmp(a: &Self, b: &Self) -> Ordering {
        a.order
            .cmp(&b.order)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.into_inner().cmp(&b.id.into_inner()))
    }

    /// Archives the round, excluding it from new assignment.
    ///
    /// Historical evaluations keep pointing at archived rounds; rounds are
    /// never deleted. Archiving an already-archived round is a no-op.
    pub fn archive(&mut self, clock: &impl Clock) {
        if self.is_archived {
            return;
        }
        self.is_archived = true;
        self.updated_at = clock.utc();
    }
}
