//! `PostgreSQL` repository implementation for evaluation storage.

use super::{
    models::{EvaluationRow, NewEvaluationRow},
    schema::evaluations,
};
use crate::application::domain::ApplicationId;
use crate::evaluation::{
    domain::{
        Evaluation, EvaluationEvent, EvaluationId, EvaluationStatus, Interviewer,
        PersistedEvaluationData,
    },
    ports::{EvaluationRepository, EvaluationRepositoryError, EvaluationRepositoryResult},
};
use crate::round::adapters::postgres::PgPool;
use crate::round::domain::{InterviewMode, RoundId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed evaluation repository.
#[derive(Debug, Clone)]
pub struct PostgresEvaluationRepository {
    pool: PgPool,
}

impl PostgresEvaluationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> EvaluationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> EvaluationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(EvaluationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(EvaluationRepositoryError::persistence)?
    }
}

#[async_trait]
impl EvaluationRepository for PostgresEvaluationRepository {
    async fn store(&self, evaluation: &Evaluation) -> EvaluationRepositoryResult<()> {
        let evaluation_id = evaluation.id();
        let application_id = evaluation.application_id();
        let round_id = evaluation.round_id();
        let new_row = to_new_row(evaluation)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(evaluations::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_pair_unique_violation(info.as_ref()) =>
                    {
                        EvaluationRepositoryError::DuplicateEvaluation {
                            application_id,
                            round_id,
                        }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        EvaluationRepositoryError::DuplicateId(evaluation_id)
                    }
                    _ => EvaluationRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, evaluation: &Evaluation) -> EvaluationRepositoryResult<Evaluation> {
        let evaluation_id = evaluation.id();
        let loaded_version = evaluation.version();
        let committed = evaluation.clone().with_version(loaded_version + 1);
        let row = to_new_row(&committed)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                evaluations::table
                    .filter(evaluations::id.eq(evaluation_id.into_inner()))
                    .filter(evaluations::version.eq(loaded_version)),
            )
            .set((
                evaluations::status.eq(row.status),
                evaluations::scheduled_at.eq(row.scheduled_at),
                evaluations::duration_minutes.eq(row.duration_minutes),
                evaluations::interviewer.eq(row.interviewer),
                evaluations::mode.eq(row.mode),
                evaluations::score.eq(row.score),
                evaluations::feedback.eq(row.feedback),
                evaluations::is_final.eq(row.is_final),
                evaluations::history.eq(row.history),
                evaluations::updated_at.eq(row.updated_at),
                evaluations::version.eq(row.version),
            ))
            .execute(connection)
            .map_err(EvaluationRepositoryError::persistence)?;

            if affected == 0 {
                let exists = evaluations::table
                    .filter(evaluations::id.eq(evaluation_id.into_inner()))
                    .count()
                    .get_result::<i64>(connection)
                    .map_err(EvaluationRepositoryError::persistence)?
                    > 0;
                if exists {
                    return Err(EvaluationRepositoryError::Conflict(evaluation_id));
                }
                return Err(EvaluationRepositoryError::NotFound(evaluation_id));
            }
            Ok(())
        })
        .await?;
        Ok(committed)
    }

    async fn find_by_id(&self, id: EvaluationId) -> EvaluationRepositoryResult<Option<Evaluation>> {
        self.run_blocking(move |connection| {
            let row = evaluations::table
                .filter(evaluations::id.eq(id.into_inner()))
                .select(EvaluationRow::as_select())
                .first::<EvaluationRow>(connection)
                .optional()
                .map_err(EvaluationRepositoryError::persistence)?;
            row.map(row_to_evaluation).transpose()
        })
        .await
    }

    async fn find_by_pair(
        &self,
        application_id: ApplicationId,
        round_id: RoundId,
    ) -> EvaluationRepositoryResult<Option<Evaluation>> {
        self.run_blocking(move |connection| {
            let row = evaluations::table
                .filter(evaluations::application_id.eq(application_id.into_inner()))
                .filter(evaluations::round_id.eq(round_id.into_inner()))
                .select(EvaluationRow::as_select())
                .first::<EvaluationRow>(connection)
                .optional()
                .map_err(EvaluationRepositoryError::persistence)?;
            row.map(row_to_evaluation).transpose()
        })
        .await
    }

    async fn list_by_application(
        &self,
        application_id: ApplicationId,
    ) -> EvaluationRepositoryResult<Vec<Evaluation>> {
        self.run_blocking(move |connection| {
            let rows = evaluations::table
                .filter(evaluations::application_id.eq(application_id.into_inner()))
                .select(EvaluationRow::as_select())
                .load::<EvaluationRow>(connection)
                .map_err(EvaluationRepositoryError::persistence)?;
            rows.into_iter().map(row_to_evaluation).collect()
        })
        .await
    }
}

fn to_new_row(evaluation: &Evaluation) -> EvaluationRepositoryResult<NewEvaluationRow> {
    let interviewer = evaluation
        .interviewer()
        .map(serde_json::to_value)
        .transpose()
        .map_err(EvaluationRepositoryError::persistence)?;
    let mode = evaluation
        .mode()
        .map(serde_json::to_value)
        .transpose()
        .map_err(EvaluationRepositoryError::persistence)?;
    let history =
        serde_json::to_value(evaluation.history()).map_err(EvaluationRepositoryError::persistence)?;
    let duration_minutes = evaluation
        .duration_minutes()
        .map(i32::try_from)
        .transpose()
        .map_err(EvaluationRepositoryError::persistence)?;

    Ok(NewEvaluationRow {
        id: evaluation.id().into_inner(),
        application_id: evaluation.application_id().into_inner(),
        round_id: evaluation.round_id().into_inner(),
        status: evaluation.status().as_str().to_owned(),
        scheduled_at: evaluation.scheduled_at(),
        duration_minutes,
        interviewer,
        mode,
        score: evaluation.score(),
        feedback: evaluation.feedback().map(str::to_owned),
        is_final: evaluation.is_final(),
        history,
        created_at: evaluation.created_at(),
        updated_at: evaluation.updated_at(),
        version: evaluation.version(),
    })
}

fn row_to_evaluation(row: EvaluationRow) -> EvaluationRepositoryResult<Evaluation> {
    let status = EvaluationStatus::try_from(row.status.as_str())
        .map_err(EvaluationRepositoryError::persistence)?;
    let interviewer = row
        .interviewer
        .map(serde_json::from_value::<Interviewer>)
        .transpose()
        .map_err(EvaluationRepositoryError::persistence)?;
    let mode = row
        .mode
        .map(serde_json::from_value::<InterviewMode>)
        .transpose()
        .map_err(EvaluationRepositoryError::persistence)?;
    let history = serde_json::from_value::<Vec<EvaluationEvent>>(row.history)
        .map_err(EvaluationRepositoryError::persistence)?;
    let duration_minutes = row
        .duration_minutes
        .map(u32::try_from)
        .transpose()
        .map_err(EvaluationRepositoryError::persistence)?;

    Ok(Evaluation::from_persisted(PersistedEvaluationData {
        id: EvaluationId::from_uuid(row.id),
        application_id: ApplicationId::from_uuid(row.application_id),
        round_id: RoundId::from_uuid(row.round_id),
        status,
        scheduled_at: row.scheduled_at,
        duration_minutes,
        interviewer,
        mode,
        score: row.score,
        feedback: row.feedback,
        is_final: row.is_final,
        history,
        created_at: row.created_at,
        updated_at: row.updated_at,
        version: row.version,
    }))
}

fn is_pair_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "idx_evaluations_pair_unique")
}
