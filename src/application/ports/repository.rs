//! Repository port for application persistence and lookup.

use crate::application::domain::{Application, ApplicationId};
use crate::round::domain::JobId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for application repository operations.
pub type ApplicationRepositoryResult<T> = Result<T, ApplicationRepositoryError>;

/// Application persistence contract.
///
/// Implementations enforce optimistic versioning on update so concurrent
/// pipeline transitions serialize.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Stores a new application.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationRepositoryError::DuplicateApplication`] when the
    /// identifier already exists.
    async fn store(&self, application: &Application) -> ApplicationRepositoryResult<()>;

    /// Persists changes to an existing application.
    ///
    /// The stored version must match the aggregate's loaded version; the
    /// persisted copy is returned with its version advanced.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationRepositoryError::NotFound`] when the application
    /// does not exist, or [`ApplicationRepositoryError::Conflict`] when a
    /// concurrent writer advanced the version first.
    async fn update(&self, application: &Application)
    -> ApplicationRepositoryResult<Application>;

    /// Finds an application by identifier.
    ///
    /// Returns `None` when the application does not exist.
    async fn find_by_id(
        &self,
        id: ApplicationId,
    ) -> ApplicationRepositoryResult<Option<Application>>;

    /// Returns all applications submitted for the given job.
    async fn list_by_job(&self, job_id: JobId) -> ApplicationRepositoryResult<Vec<Application>>;
}

/// Errors returned by application repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ApplicationRepositoryError {
    /// An application with the same identifier already exists.
    #[error("duplicate application identifier: {0}")]
    DuplicateApplication(ApplicationId),

    /// The application was not found.
    #[error("application not found: {0}")]
    NotFound(ApplicationId),

    /// A concurrent writer advanced the version first.
    #[error("concurrent modification of application {0}")]
    Conflict(ApplicationId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ApplicationRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
