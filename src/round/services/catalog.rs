//! Service layer for round catalog management.

use crate::round::{
    domain::{JobId, Round, RoundDomainError, RoundId, RoundType, SchedulingTemplate},
    ports::{RoundRepository, RoundRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating an interview round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoundRequest {
    job_id: JobId,
    name: String,
    order: i32,
    round_type: RoundType,
    template: SchedulingTemplate,
}

impl CreateRoundRequest {
    /// Creates a request with all round fields.
    #[must_use]
    pub fn new(
        job_id: JobId,
        name: impl Into<String>,
        order: i32,
        round_type: RoundType,
        template: SchedulingTemplate,
    ) -> Self {
        Self {
            job_id,
            name: name.into(),
            order,
            round_type,
            template,
        }
    }
}

/// Service-level errors for round catalog operations.
#[derive(Debug, Error)]
pub enum RoundCatalogError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] RoundDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RoundRepositoryError),
}

/// Result type for round catalog service operations.
pub type RoundCatalogResult<T> = Result<T, RoundCatalogError>;

/// Round catalog orchestration service.
#[derive(Clone)]
pub struct RoundCatalogService<R, C>
where
    R: RoundRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> RoundCatalogService<R, C>
where
    R: RoundRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new round catalog service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates and persists a new round.
    ///
    /// # Errors
    ///
    /// Returns [`RoundCatalogError`] when input validation fails or the
    /// repository rejects persistence.
    pub async fn create_round(&self, request: CreateRoundRequest) -> RoundCatalogResult<Round> {
        let round = Round::new(
            request.job_id,
            request.name,
            request.order,
            request.round_type,
            request.template,
            &*self.clock,
        )?;
        self.repository.store(&round).await?;
        Ok(round)
    }

    /// Archives a round, excluding it from new assignment.
    ///
    /// # Errors
    ///
    /// Returns [`RoundCatalogError::Repository`] when the round is not found
    /// or persistence fails.
    pub async fn archive_round(&self, id: RoundId) -> RoundCatalogResult<Round> {
        let mut round = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(RoundRepositoryError::NotFound(id))?;
        round.archive(&*self.clock);
        self.repository.update(&round).await?;
        Ok(round)
    }

    /// Finds a round by identifier.
    ///
    /// Returns `Ok(None)` when the round does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`RoundCatalogError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, id: RoundId) -> RoundCatalogResult<Option<Round>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists a job's rounds in catalog order, archived included.
    ///
    /// # Errors
    ///
    /// Returns [`RoundCatalogError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_for_job(&self, job_id: JobId) -> RoundCatalogResult<Vec<Round>> {
        let mut rounds = self.repository.list_by_job(job_id).await?;
        rounds.sort_by(Round::catalog_cmp);
        Ok(rounds)
    }

    /// Returns the job's lowest-order non-archived round, if any.
    ///
    /// This is the round newly reviewed applications enter when no explicit
    /// round is given.
    ///
    /// # Errors
    ///
    /// Returns [`RoundCatalogError::Repository`] when persistence lookup
    /// fails.
    pub async fn default_round_for_job(&self, job_id: JobId) -> RoundCatalogResult<Option<Round>> {
        let rounds = self.repository.list_by_job(job_id).await?;
        Ok(rounds
            .into_iter()
            .filter(|round| !round.is_archived())
            .min_by(Round::catalog_cmp))
    }
}
