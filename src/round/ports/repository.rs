//! Repository port for round catalog persistence and lookup.

use crate::round::domain::{JobId, Round, RoundId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for round repository operations.
pub type RoundRepositoryResult<T> = Result<T, RoundRepositoryError>;

/// Round persistence contract.
#[async_trait]
pub trait RoundRepository: Send + Sync {
    /// Stores a new round.
    ///
    /// # Errors
    ///
    /// Returns [`RoundRepositoryError::DuplicateRound`] when the round ID
    /// already exists.
    async fn store(&self, round: &Round) -> RoundRepositoryResult<()>;

    /// Persists changes to an existing round (archival, ordering).
    ///
    /// # Errors
    ///
    /// Returns [`RoundRepositoryError::NotFound`] when the round does not
    /// exist.
    async fn update(&self, round: &Round) -> RoundRepositoryResult<()>;

    /// Finds a round by identifier.
    ///
    /// Returns `None` when the round does not exist.
    async fn find_by_id(&self, id: RoundId) -> RoundRepositoryResult<Option<Round>>;

    /// Returns all rounds belonging to the given job, archived included.
    ///
    /// Ordering is unspecified; callers sort as needed.
    async fn list_by_job(&self, job_id: JobId) -> RoundRepositoryResult<Vec<Round>>;
}

/// Errors returned by round repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RoundRepositoryError {
    /// A round with the same identifier already exists.
    #[error("duplicate round identifier: {0}")]
    DuplicateRound(RoundId),

    /// The round was not found.
    #[error("round not found: {0}")]
    NotFound(RoundId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RoundRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
