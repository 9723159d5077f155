//! In-memory round repository for catalog tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::round::{
    domain::{JobId, Round, RoundId},
    ports::{RoundRepository, RoundRepositoryError, RoundRepositoryResult},
};

/// Thread-safe in-memory round repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoundRepository {
    state: Arc<RwLock<InMemoryRoundState>>,
}

#[derive(Debug, Default)]
struct InMemoryRoundState {
    rounds: HashMap<RoundId, Round>,
    job_index: HashMap<JobId, Vec<RoundId>>,
}

impl InMemoryRoundRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoundRepository for InMemoryRoundRepository {
    async fn store(&self, round: &Round) -> RoundRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            RoundRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.rounds.contains_key(&round.id()) {
            return Err(RoundRepositoryError::DuplicateRound(round.id()));
        }
        state
            .job_index
            .entry(round.job_id())
            .or_default()
            .push(round.id());
        state.rounds.insert(round.id(), round.clone());
        Ok(())
    }

    async fn update(&self, round: &Round) -> RoundRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            RoundRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.rounds.contains_key(&round.id()) {
            return Err(RoundRepositoryError::NotFound(round.id()));
        }
        state.rounds.insert(round.id(), round.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: RoundId) -> RoundRepositoryResult<Option<Round>> {
        let state = self.state.read().map_err(|err| {
            RoundRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.rounds.get(&id).cloned())
    }

    async fn list_by_job(&self, job_id: JobId) -> RoundRepositoryResult<Vec<Round>> {
        let state = self.state.read().map_err(|err| {
            RoundRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let rounds = state
            .job_index
            .get(&job_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.rounds.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(rounds)
    }
}
