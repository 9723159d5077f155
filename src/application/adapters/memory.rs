//! In-memory application repository for pipeline tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::application::{
    domain::{Application, ApplicationId},
    ports::{ApplicationRepository, ApplicationRepositoryError, ApplicationRepositoryResult},
};
use crate::round::domain::JobId;

/// Thread-safe in-memory application repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApplicationRepository {
    state: Arc<RwLock<InMemoryApplicationState>>,
}

#[derive(Debug, Default)]
struct InMemoryApplicationState {
    applications: HashMap<ApplicationId, Application>,
    job_index: HashMap<JobId, Vec<ApplicationId>>,
}

impl InMemoryApplicationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn store(&self, application: &Application) -> ApplicationRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ApplicationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.applications.contains_key(&application.id()) {
            return Err(ApplicationRepositoryError::DuplicateApplication(
                application.id(),
            ));
        }
        state
            .job_index
            .entry(application.job_id())
            .or_default()
            .push(application.id());
        state
            .applications
            .insert(application.id(), application.clone());
        Ok(())
    }

    async fn update(
        &self,
        application: &Application,
    ) -> ApplicationRepositoryResult<Application> {
        let mut state = self.state.write().map_err(|err| {
            ApplicationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = state
            .applications
            .get(&application.id())
            .ok_or(ApplicationRepositoryError::NotFound(application.id()))?;
        if stored.version() != application.version() {
            return Err(ApplicationRepositoryError::Conflict(application.id()));
        }
        let committed = application.clone().with_version(application.version() + 1);
        state.applications.insert(committed.id(), committed.clone());
        Ok(committed)
    }

    async fn find_by_id(
        &self,
        id: ApplicationId,
    ) -> ApplicationRepositoryResult<Option<Application>> {
        let state = self.state.read().map_err(|err| {
            ApplicationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.applications.get(&id).cloned())
    }

    async fn list_by_job(&self, job_id: JobId) -> ApplicationRepositoryResult<Vec<Application>> {
        let state = self.state.read().map_err(|err| {
            ApplicationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let applications = state
            .job_index
            .get(&job_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.applications.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(applications)
    }
}
