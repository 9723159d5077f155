//! Service layer for pipeline transitions and the transition validator.

use crate::application::{
    domain::{Application, ApplicationDomainError, ApplicationId, ApplicationStatus},
    ports::{ApplicationRepository, ApplicationRepositoryError},
};
use crate::evaluation::{
    domain::Evaluation,
    ports::{EvaluationRepository, EvaluationRepositoryError},
};
use crate::notify::{NotificationDispatcher, NotificationEvent, dispatch_fire_and_forget};
use crate::round::{
    domain::{JobId, Round, RoundId},
    ports::{RoundRepository, RoundRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for a pipeline transition or round-advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRequest {
    application_id: ApplicationId,
    target_status: ApplicationStatus,
    target_round_id: Option<RoundId>,
    confirmed: bool,
}

impl TransitionRequest {
    /// Creates an unconfirmed request for the given status move.
    #[must_use]
    pub const fn new(application_id: ApplicationId, target_status: ApplicationStatus) -> Self {
        Self {
            application_id,
            target_status,
            target_round_id: None,
            confirmed: false,
        }
    }

    /// Targets a specific round when entering or advancing review.
    #[must_use]
    pub const fn with_target_round(mut self, round_id: RoundId) -> Self {
        self.target_round_id = Some(round_id);
        self
    }

    /// Marks the request as explicitly confirmed by the caller.
    #[must_use]
    pub const fn confirmed(mut self) -> Self {
        self.confirmed = true;
        self
    }
}

/// Service-level errors for pipeline operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Domain validation failed (including invalid transitions).
    #[error(transparent)]
    Domain(#[from] ApplicationDomainError),

    /// The move is legal but gated and the caller did not confirm.
    ///
    /// Nothing was mutated; re-submit with confirmation to commit.
    #[error("transition of application {application_id} to {target_status:?} requires confirmation")]
    ConfirmationRequired {
        /// Application the request targeted.
        application_id: ApplicationId,
        /// Requested status.
        target_status: ApplicationStatus,
    },

    /// The target round does not exist or belongs to a different job.
    #[error("round not found for this job: {0}")]
    RoundNotFound(RoundId),

    /// The job has no non-archived round to enter by default.
    #[error("job {0} has no active rounds")]
    NoActiveRounds(JobId),

    /// The target round is archived and closed to new assignment.
    #[error("round is archived: {0}")]
    RoundArchived(RoundId),

    /// Application persistence failed.
    #[error(transparent)]
    Application(#[from] ApplicationRepositoryError),

    /// Round lookup failed.
    #[error(transparent)]
    Round(#[from] RoundRepositoryError),

    /// Evaluation persistence failed.
    #[error(transparent)]
    Evaluation(#[from] EvaluationRepositoryError),

    /// A concurrent writer won twice in a row; the caller must re-read and
    /// decide.
    #[error("concurrent modification of application {0}")]
    ConcurrentModification(ApplicationId),
}

/// Result type for pipeline service operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Pipeline orchestration service and transition validator.
///
/// All writes to application status and round pointers go through
/// [`Self::transition`]; the validator enforces the transition table, round
/// scoping, archival, and the confirmation gate before anything is mutated.
#[derive(Clone)]
pub struct PipelineService<A, R, E, N, C>
where
    A: ApplicationRepository,
    R: RoundRepository,
    E: EvaluationRepository,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    applications: Arc<A>,
    rounds: Arc<R>,
    evaluations: Arc<E>,
    dispatcher: Arc<N>,
    clock: Arc<C>,
}

impl<A, R, E, N, C> PipelineService<A, R, E, N, C>
where
    A: ApplicationRepository,
    R: RoundRepository,
    E: EvaluationRepository,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates a new pipeline service.
    #[must_use]
    pub const fn new(
        applications: Arc<A>,
        rounds: Arc<R>,
        evaluations: Arc<E>,
        dispatcher: Arc<N>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            applications,
            rounds,
            evaluations,
            dispatcher,
            clock,
        }
    }

    /// Records a fresh submission in `Applied` status.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Application`] when persistence fails.
    pub async fn create_application(
        &self,
        job_id: JobId,
        notes: impl Into<String> + Send,
    ) -> PipelineResult<Application> {
        let application = Application::new(job_id, notes, &*self.clock);
        self.applications.store(&application).await?;
        Ok(application)
    }

    /// Validates and commits a status transition or round-advance.
    ///
    /// Gated moves return [`PipelineError::ConfirmationRequired`] without
    /// mutating state until re-submitted with confirmation. Entering a round
    /// lazily creates its evaluation; re-entering a visited round reuses the
    /// existing record.
    ///
    /// # Errors
    ///
    /// Returns the taxonomy errors described on [`PipelineError`]. A version
    /// conflict with a concurrent transition is retried once against fresh
    /// state before surfacing as
    /// [`PipelineError::ConcurrentModification`].
    pub async fn transition(&self, request: TransitionRequest) -> PipelineResult<Application> {
        let mut retried = false;
        loop {
            let application = self.find_or_error(request.application_id).await?;
            let (committed, entered_round) = match self.attempt(application, request).await {
                Ok(outcome) => outcome,
                Err(PipelineError::Application(ApplicationRepositoryError::Conflict(_)))
                    if !retried =>
                {
                    retried = true;
                    continue;
                }
                Err(PipelineError::Application(ApplicationRepositoryError::Conflict(id))) => {
                    return Err(PipelineError::ConcurrentModification(id));
                }
                Err(err) => return Err(err),
            };

            if let Some(round_id) = entered_round {
                self.ensure_evaluation(committed.id(), round_id).await?;
            }
            if request.target_status == ApplicationStatus::Shortlisted {
                let event = NotificationEvent::RoundShortlisted {
                    recipient: None,
                    application_id: committed.id(),
                };
                dispatch_fire_and_forget(&*self.dispatcher, event).await;
            }
            return Ok(committed);
        }
    }

    /// Finds an application by identifier.
    ///
    /// Returns `Ok(None)` when the application does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Application`] when persistence lookup fails.
    pub async fn find(&self, id: ApplicationId) -> PipelineResult<Option<Application>> {
        Ok(self.applications.find_by_id(id).await?)
    }

    /// Returns every application submitted for a job.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Application`] when persistence lookup fails.
    pub async fn list_for_job(&self, job_id: JobId) -> PipelineResult<Vec<Application>> {
        Ok(self.applications.list_by_job(job_id).await?)
    }

    /// Runs one validated transition attempt against a freshly loaded
    /// aggregate. Returns the committed application and the round entered,
    /// if any.
    async fn attempt(
        &self,
        mut application: Application,
        request: TransitionRequest,
    ) -> PipelineResult<(Application, Option<RoundId>)> {
        let entered_round = if request.target_status == ApplicationStatus::UnderReview {
            let round = self
                .resolve_entry_round(&application, request.target_round_id)
                .await?;
            let from = application.status();
            if from != ApplicationStatus::UnderReview
                && !from.can_transition_to(ApplicationStatus::UnderReview)
            {
                return Err(ApplicationDomainError::InvalidTransition {
                    id: application.id(),
                    from,
                    to: ApplicationStatus::UnderReview,
                }
                .into());
            }
            // Entering review and every round-advance is confirmation-gated.
            if !request.confirmed {
                return Err(PipelineError::ConfirmationRequired {
                    application_id: application.id(),
                    target_status: request.target_status,
                });
            }
            application.enter_round(round.id(), &*self.clock)?;
            Some(round.id())
        } else {
            let from = application.status();
            if !from.can_transition_to(request.target_status) {
                return Err(ApplicationDomainError::InvalidTransition {
                    id: application.id(),
                    from,
                    to: request.target_status,
                }
                .into());
            }
            if from.requires_confirmation(request.target_status) && !request.confirmed {
                return Err(PipelineError::ConfirmationRequired {
                    application_id: application.id(),
                    target_status: request.target_status,
                });
            }
            application.transition_to(request.target_status, &*self.clock)?;
            None
        };

        let committed = self.applications.update(&application).await?;
        Ok((committed, entered_round))
    }

    /// Resolves the round an application enters: the explicit target when
    /// given, otherwise the job's lowest-order non-archived round.
    async fn resolve_entry_round(
        &self,
        application: &Application,
        target_round_id: Option<RoundId>,
    ) -> PipelineResult<Round> {
        if let Some(round_id) = target_round_id {
            let round = self
                .rounds
                .find_by_id(round_id)
                .await?
                .ok_or(PipelineError::RoundNotFound(round_id))?;
            if round.job_id() != application.job_id() {
                return Err(PipelineError::RoundNotFound(round_id));
            }
            if round.is_archived() {
                return Err(PipelineError::RoundArchived(round_id));
            }
            return Ok(round);
        }

        let rounds = self.rounds.list_by_job(application.job_id()).await?;
        rounds
            .into_iter()
            .filter(|round| !round.is_archived())
            .min_by(Round::catalog_cmp)
            .ok_or(PipelineError::NoActiveRounds(application.job_id()))
    }

    /// Get-or-creates the evaluation for `(application, round)`; losing a
    /// concurrent creation race is fine because the winner's record is
    /// equivalent.
    async fn ensure_evaluation(
        &self,
        application_id: ApplicationId,
        round_id: RoundId,
    ) -> PipelineResult<()> {
        if self
            .evaluations
            .find_by_pair(application_id, round_id)
            .await?
            .is_some()
        {
            return Ok(());
        }
        let evaluation = Evaluation::new(application_id, round_id, &*self.clock);
        match self.evaluations.store(&evaluation).await {
            Ok(()) | Err(EvaluationRepositoryError::DuplicateEvaluation { .. }) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_or_error(&self, id: ApplicationId) -> PipelineResult<Application> {
        self.applications
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationRepositoryError::NotFound(id).into())
    }
}
