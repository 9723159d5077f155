//! Service layer for evaluation scheduling, completion, and rescheduling.

use crate::application::domain::ApplicationId;
use crate::evaluation::{
    domain::{
        Evaluation, EvaluationDomainError, EvaluationEventKind, EvaluationId, EvaluationStatus,
        FinalStatus, SessionBooking, derive_status,
    },
    ports::{EvaluationRepository, EvaluationRepositoryError},
};
use crate::notify::{
    NotificationDispatcher, NotificationEvent, Recipient, dispatch_fire_and_forget,
};
use crate::round::domain::RoundId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for evaluation scheduling operations.
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] EvaluationDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] EvaluationRepositoryError),
    /// A concurrent writer won twice in a row; the caller must re-read and
    /// decide.
    #[error("concurrent modification of evaluation {0}")]
    ConcurrentModification(EvaluationId),
}

/// Result type for evaluation scheduling service operations.
pub type SchedulingResult<T> = Result<T, SchedulingError>;

/// Evaluation scheduling orchestration service.
#[derive(Clone)]
pub struct EvaluationSchedulingService<E, N, C>
where
    E: EvaluationRepository,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    repository: Arc<E>,
    dispatcher: Arc<N>,
    clock: Arc<C>,
}

impl<E, N, C> EvaluationSchedulingService<E, N, C>
where
    E: EvaluationRepository,
    N: NotificationDispatcher,
    C: Clock + Send + Sync,
{
    /// Creates a new evaluation scheduling service.
    #[must_use]
    pub const fn new(repository: Arc<E>, dispatcher: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            repository,
            dispatcher,
            clock,
        }
    }

    /// Returns the unique evaluation for `(application, round)`, creating a
    /// pending record on first entry.
    ///
    /// Idempotent: a concurrent duplicate insert resolves to the winner's
    /// record rather than erroring.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::Repository`] when persistence fails.
    pub async fn get_or_create(
        &self,
        application_id: ApplicationId,
        round_id: RoundId,
    ) -> SchedulingResult<Evaluation> {
        if let Some(existing) = self
            .repository
            .find_by_pair(application_id, round_id)
            .await?
        {
            return Ok(existing);
        }
        let evaluation = Evaluation::new(application_id, round_id, &*self.clock);
        match self.repository.store(&evaluation).await {
            Ok(()) => Ok(evaluation),
            Err(EvaluationRepositoryError::DuplicateEvaluation { .. }) => {
                // Lost the race; the winner's record is the canonical one.
                let winner = self
                    .repository
                    .find_by_pair(application_id, round_id)
                    .await?;
                winner.ok_or_else(|| {
                    SchedulingError::Repository(EvaluationRepositoryError::NotFound(
                        evaluation.id(),
                    ))
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Books an interviewer and session for an evaluation.
    ///
    /// Moves the status to `Scheduled` and dispatches an
    /// `EvaluationScheduled` notification, or `EvaluationRescheduled` when
    /// the booking replaces a missed session.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::Repository`] with
    /// [`EvaluationRepositoryError::NotFound`] when the evaluation does not
    /// exist, [`SchedulingError::Domain`] with
    /// [`EvaluationDomainError::Finalized`] when a decision is locked, or
    /// [`SchedulingError::ConcurrentModification`] when the retry also loses.
    pub async fn assign_interviewer(
        &self,
        evaluation_id: EvaluationId,
        booking: SessionBooking,
    ) -> SchedulingResult<Evaluation> {
        let apply_booking = booking.clone();
        let committed = self
            .mutate_with_retry(evaluation_id, move |evaluation| {
                evaluation.assign_interviewer(apply_booking.clone(), &*self.clock)
            })
            .await?;

        let recipient = Recipient {
            name: booking.interviewer().name().to_owned(),
            email: booking.interviewer().email().to_owned(),
        };
        let bookings = committed
            .history()
            .iter()
            .filter(|event| event.kind == EvaluationEventKind::InterviewerAssigned)
            .count();
        let event = if bookings > 1 {
            NotificationEvent::EvaluationRescheduled {
                recipient,
                evaluation_id,
                application_id: committed.application_id(),
                round_id: committed.round_id(),
                scheduled_at: booking.scheduled_at(),
            }
        } else {
            NotificationEvent::EvaluationScheduled {
                recipient,
                evaluation_id,
                application_id: committed.application_id(),
                round_id: committed.round_id(),
                scheduled_at: booking.scheduled_at(),
            }
        };
        dispatch_fire_and_forget(&*self.dispatcher, event).await;
        Ok(committed)
    }

    /// Locks a final decision on an evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::Domain`] with
    /// [`EvaluationDomainError::InvalidState`] unless the effective status is
    /// `Scheduled`, `InProgress`, or `Missed`, plus the lookup and
    /// concurrency failures of [`Self::assign_interviewer`].
    pub async fn mark_completed(
        &self,
        evaluation_id: EvaluationId,
        final_status: FinalStatus,
        score: Option<i32>,
        feedback: Option<String>,
    ) -> SchedulingResult<Evaluation> {
        self.mutate_with_retry(evaluation_id, move |evaluation| {
            evaluation.mark_completed(final_status, score, feedback.clone(), &*self.clock)
        })
        .await
    }

    /// Requests a replacement booking for a missed session.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::Domain`] with
    /// [`EvaluationDomainError::InvalidState`] unless the effective status is
    /// `Missed`, plus the lookup and concurrency failures of
    /// [`Self::assign_interviewer`].
    pub async fn reschedule(&self, evaluation_id: EvaluationId) -> SchedulingResult<Evaluation> {
        self.mutate_with_retry(evaluation_id, |evaluation| {
            evaluation.reschedule(&*self.clock)
        })
        .await
    }

    /// Makes a derived `Missed` durable.
    ///
    /// No-op when the session has not elapsed or the evaluation is no longer
    /// `Scheduled`; safe to call from read-path flushes.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::Repository`] when the evaluation does not
    /// exist or persistence fails.
    pub async fn record_missed(&self, evaluation_id: EvaluationId) -> SchedulingResult<Evaluation> {
        let mut evaluation = self.find_or_error(evaluation_id).await?;
        if !evaluation.record_missed(&*self.clock) {
            return Ok(evaluation);
        }
        match self.repository.update(&evaluation).await {
            Ok(committed) => Ok(committed),
            // Another flusher got there first; their write is equivalent.
            Err(EvaluationRepositoryError::Conflict(_)) => {
                Ok(self.find_or_error(evaluation_id).await?)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Computes the effective status of an evaluation now.
    ///
    /// With `persist`, a derived `Missed` is written back so later reads stop
    /// recomputing it.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::Repository`] when the evaluation does not
    /// exist or persistence fails.
    pub async fn effective_status(
        &self,
        evaluation_id: EvaluationId,
        persist: bool,
    ) -> SchedulingResult<EvaluationStatus> {
        let evaluation = self.find_or_error(evaluation_id).await?;
        let effective = derive_status(&evaluation, self.clock.utc());
        if persist
            && effective == EvaluationStatus::Missed
            && evaluation.status() == EvaluationStatus::Scheduled
        {
            self.record_missed(evaluation_id).await?;
        }
        Ok(effective)
    }

    /// Finds an evaluation by identifier.
    ///
    /// Returns `Ok(None)` when the evaluation does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::Repository`] when persistence lookup fails.
    pub async fn find(&self, evaluation_id: EvaluationId) -> SchedulingResult<Option<Evaluation>> {
        Ok(self.repository.find_by_id(evaluation_id).await?)
    }

    /// Returns every evaluation recorded for an application.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::Repository`] when persistence lookup fails.
    pub async fn list_for_application(
        &self,
        application_id: ApplicationId,
    ) -> SchedulingResult<Vec<Evaluation>> {
        Ok(self.repository.list_by_application(application_id).await?)
    }

    async fn find_or_error(&self, id: EvaluationId) -> SchedulingResult<Evaluation> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| EvaluationRepositoryError::NotFound(id).into())
    }

    /// Applies a domain mutation with one automatic retry on version
    /// conflict; each attempt re-reads fresh state and re-checks its own
    /// preconditions.
    async fn mutate_with_retry<F>(
        &self,
        id: EvaluationId,
        mut apply: F,
    ) -> SchedulingResult<Evaluation>
    where
        F: FnMut(&mut Evaluation) -> Result<(), EvaluationDomainError>,
    {
        let mut retried = false;
        loop {
            let mut evaluation = self.find_or_error(id).await?;
            apply(&mut evaluation)?;
            match self.repository.update(&evaluation).await {
                Ok(committed) => return Ok(committed),
                Err(EvaluationRepositoryError::Conflict(_)) if !retried => {
                    retried = true;
                }
                Err(EvaluationRepositoryError::Conflict(_)) => {
                    return Err(SchedulingError::ConcurrentModification(id));
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
