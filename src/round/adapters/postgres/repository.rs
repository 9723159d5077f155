//! `PostgreSQL` repository implementation for round catalog storage.

use super::{
    models::{NewRoundRow, RoundRow},
    schema::rounds,
};
use crate::round::{
    domain::{JobId, PersistedRoundData, Round, RoundId, RoundType, SchedulingTemplate},
    ports::{RoundRepository, RoundRepositoryError, RoundRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by gatehouse adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed round repository.
#[derive(Debug, Clone)]
pub struct PostgresRoundRepository {
    pool: PgPool,
}

impl PostgresRoundRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RoundRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RoundRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RoundRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RoundRepositoryError::persistence)?
    }
}

#[async_trait]
impl RoundRepository for PostgresRoundRepository {
    async fn store(&self, round: &Round) -> RoundRepositoryResult<()> {
        let round_id = round.id();
        let new_row = to_new_row(round)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(rounds::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        RoundRepositoryError::DuplicateRound(round_id)
                    }
                    _ => RoundRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, round: &Round) -> RoundRepositoryResult<()> {
        let round_id = round.id();
        let template =
            serde_json::to_value(round.template()).map_err(RoundRepositoryError::persistence)?;
        let name = round.name().to_owned();
        let sort_order = round.order();
        let round_type = round.round_type().as_str().to_owned();
        let is_archived = round.is_archived();
        let updated_at = round.updated_at();

        self.run_blocking(move |connection| {
            let affected = diesel::update(rounds::table.filter(rounds::id.eq(round_id.into_inner())))
                .set((
                    rounds::name.eq(name),
                    rounds::sort_order.eq(sort_order),
                    rounds::round_type.eq(round_type),
                    rounds::template.eq(template),
                    rounds::is_archived.eq(is_archived),
                    rounds::updated_at.eq(updated_at),
                ))
                .execute(connection)
                .map_err(RoundRepositoryError::persistence)?;
            if affected == 0 {
                return Err(RoundRepositoryError::NotFound(round_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: RoundId) -> RoundRepositoryResult<Option<Round>> {
        self.run_blocking(move |connection| {
            let row = rounds::table
                .filter(rounds::id.eq(id.into_inner()))
                .select(RoundRow::as_select())
                .first::<RoundRow>(connection)
                .optional()
                .map_err(RoundRepositoryError::persistence)?;
            row.map(row_to_round).transpose()
        })
        .await
    }

    async fn list_by_job(&self, job_id: JobId) -> RoundRepositoryResult<Vec<Round>> {
        self.run_blocking(move |connection| {
            let rows = rounds::table
                .filter(rounds::job_id.eq(job_id.into_inner()))
                .select(RoundRow::as_select())
                .load::<RoundRow>(connection)
                .map_err(RoundRepositoryError::persistence)?;
            rows.into_iter().map(row_to_round).collect()
        })
        .await
    }
}

fn to_new_row(round: &Round) -> RoundRepositoryResult<NewRoundRow> {
    let template =
        serde_json::to_value(round.template()).map_err(RoundRepositoryError::persistence)?;
    Ok(NewRoundRow {
        id: round.id().into_inner(),
        job_id: round.job_id().into_inner(),
        name: round.name().to_owned(),
        sort_order: round.order(),
        round_type: round.round_type().as_str().to_owned(),
        template,
        is_archived: round.is_archived(),
        created_at: round.created_at(),
        updated_at: round.updated_at(),
    })
}

fn row_to_round(row: RoundRow) -> RoundRepositoryResult<Round> {
    let round_type = RoundType::try_from(row.round_type.as_str())
        .map_err(RoundRepositoryError::persistence)?;
    let template = serde_json::from_value::<SchedulingTemplate>(row.template)
        .map_err(RoundRepositoryError::persistence)?;

    Ok(Round::from_persisted(PersistedRoundData {
        id: RoundId::from_uuid(row.id),
        job_id: JobId::from_uuid(row.job_id),
        name: row.name,
        order: row.sort_order,
        round_type,
        template,
        is_archived: row.is_archived,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
