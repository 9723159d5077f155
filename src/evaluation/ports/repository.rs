//! Repository port for evaluation persistence and pair-scoped lookup.

use crate::application::domain::ApplicationId;
use crate::evaluation::domain::{Evaluation, EvaluationId};
use crate::round::domain::RoundId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for evaluation repository operations.
pub type EvaluationRepositoryResult<T> = Result<T, EvaluationRepositoryError>;

/// Evaluation persistence contract.
///
/// Implementations enforce the `(application, round)` uniqueness invariant
/// and optimistic versioning on update.
#[async_trait]
pub trait EvaluationRepository: Send + Sync {
    /// Stores a new evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationRepositoryError::DuplicateEvaluation`] when an
    /// evaluation already exists for the same `(application, round)` pair,
    /// or [`EvaluationRepositoryError::DuplicateId`] on an identifier
    /// collision.
    async fn store(&self, evaluation: &Evaluation) -> EvaluationRepositoryResult<()>;

    /// Persists changes to an existing evaluation.
    ///
    /// The stored version must match the aggregate's loaded version; the
    /// persisted copy is returned with its version advanced.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationRepositoryError::NotFound`] when the evaluation
    /// does not exist, or [`EvaluationRepositoryError::Conflict`] when a
    /// concurrent writer advanced the version first.
    async fn update(&self, evaluation: &Evaluation) -> EvaluationRepositoryResult<Evaluation>;

    /// Finds an evaluation by identifier.
    ///
    /// Returns `None` when the evaluation does not exist.
    async fn find_by_id(&self, id: EvaluationId) -> EvaluationRepositoryResult<Option<Evaluation>>;

    /// Finds the unique evaluation for an `(application, round)` pair.
    ///
    /// Returns `None` when the application has not entered the round.
    async fn find_by_pair(
        &self,
        application_id: ApplicationId,
        round_id: RoundId,
    ) -> EvaluationRepositoryResult<Option<Evaluation>>;

    /// Returns all evaluations recorded for the given application.
    async fn list_by_application(
        &self,
        application_id: ApplicationId,
    ) -> EvaluationRepositoryResult<Vec<Evaluation>>;
}

/// Errors returned by evaluation repository implementations.
#[derive(Debug, Clone, Error)]
pub enum EvaluationRepositoryError {
    /// An evaluation with the same identifier already exists.
    #[error("duplicate evaluation identifier: {0}")]
    DuplicateId(EvaluationId),

    /// An evaluation already exists for the `(application, round)` pair.
    #[error("evaluation already exists for application {application_id} round {round_id}")]
    DuplicateEvaluation {
        /// Application half of the colliding pair.
        application_id: ApplicationId,
        /// Round half of the colliding pair.
        round_id: RoundId,
    },

    /// The evaluation was not found.
    #[error("evaluation not found: {0}")]
    NotFound(EvaluationId),

    /// A concurrent writer advanced the version first.
    #[error("concurrent modification of evaluation {0}")]
    Conflict(EvaluationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EvaluationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
