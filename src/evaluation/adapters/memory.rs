//! In-memory evaluation repository for scheduling tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::application::domain::ApplicationId;
use crate::evaluation::{
    domain::{Evaluation, EvaluationId},
    ports::{EvaluationRepository, EvaluationRepositoryError, EvaluationRepositoryResult},
};
use crate::round::domain::RoundId;

/// Thread-safe in-memory evaluation repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEvaluationRepository {
    state: Arc<RwLock<InMemoryEvaluationState>>,
}

#[derive(Debug, Default)]
struct InMemoryEvaluationState {
    evaluations: HashMap<EvaluationId, Evaluation>,
    pair_index: HashMap<(ApplicationId, RoundId), EvaluationId>,
    application_index: HashMap<ApplicationId, Vec<EvaluationId>>,
}

impl InMemoryEvaluationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EvaluationRepository for InMemoryEvaluationRepository {
    async fn store(&self, evaluation: &Evaluation) -> EvaluationRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            EvaluationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.evaluations.contains_key(&evaluation.id()) {
            return Err(EvaluationRepositoryError::DuplicateId(evaluation.id()));
        }
        let pair = (evaluation.application_id(), evaluation.round_id());
        if state.pair_index.contains_key(&pair) {
            return Err(EvaluationRepositoryError::DuplicateEvaluation {
                application_id: evaluation.application_id(),
                round_id: evaluation.round_id(),
            });
        }
        state.pair_index.insert(pair, evaluation.id());
        state
            .application_index
            .entry(evaluation.application_id())
            .or_default()
            .push(evaluation.id());
        state.evaluations.insert(evaluation.id(), evaluation.clone());
        Ok(())
    }

    async fn update(&self, evaluation: &Evaluation) -> EvaluationRepositoryResult<Evaluation> {
        let mut state = self.state.write().map_err(|err| {
            EvaluationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = state
            .evaluations
            .get(&evaluation.id())
            .ok_or(EvaluationRepositoryError::NotFound(evaluation.id()))?;
        if stored.version() != evaluation.version() {
            return Err(EvaluationRepositoryError::Conflict(evaluation.id()));
        }
        let committed = evaluation.clone().with_version(evaluation.version() + 1);
        state.evaluations.insert(committed.id(), committed.clone());
        Ok(committed)
    }

    async fn find_by_id(&self, id: EvaluationId) -> EvaluationRepositoryResult<Option<Evaluation>> {
        let state = self.state.read().map_err(|err| {
            EvaluationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.evaluations.get(&id).cloned())
    }

    async fn find_by_pair(
        &self,
        application_id: ApplicationId,
        round_id: RoundId,
    ) -> EvaluationRepositoryResult<Option<Evaluation>> {
        let state = self.state.read().map_err(|err| {
            EvaluationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let evaluation = state
            .pair_index
            .get(&(application_id, round_id))
            .and_then(|id| state.evaluations.get(id))
            .cloned();
        Ok(evaluation)
    }

    async fn list_by_application(
        &self,
        application_id: ApplicationId,
    ) -> EvaluationRepositoryResult<Vec<Evaluation>> {
        let state = self.state.read().map_err(|err| {
            EvaluationRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let evaluations = state
            .application_index
            .get(&application_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.evaluations.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(evaluations)
    }
}
