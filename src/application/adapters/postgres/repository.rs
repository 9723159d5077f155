//! `PostgreSQL` repository implementation for application pipeline storage.

use super::{
    models::{ApplicationRow, NewApplicationRow},
    schema::applications,
};
use crate::application::{
    domain::{Application, ApplicationId, ApplicationStatus, PersistedApplicationData},
    ports::{ApplicationRepository, ApplicationRepositoryError, ApplicationRepositoryResult},
};
use crate::round::adapters::postgres::PgPool;
use crate::round::domain::{JobId, RoundId};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed application repository.
#[derive(Debug, Clone)]
pub struct PostgresApplicationRepository {
    pool: PgPool,
}

impl PostgresApplicationRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ApplicationRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ApplicationRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(ApplicationRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ApplicationRepositoryError::persistence)?
    }
}

#[async_trait]
impl ApplicationRepository for PostgresApplicationRepository {
    async fn store(&self, application: &Application) -> ApplicationRepositoryResult<()> {
        let application_id = application.id();
        let new_row = to_new_row(application);

        self.run_blocking(move |connection| {
            diesel::insert_into(applications::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ApplicationRepositoryError::DuplicateApplication(application_id)
                    }
                    _ => ApplicationRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(
        &self,
        application: &Application,
    ) -> ApplicationRepositoryResult<Application> {
        let application_id = application.id();
        let loaded_version = application.version();
        let committed = application.clone().with_version(loaded_version + 1);
        let row = to_new_row(&committed);

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                applications::table
                    .filter(applications::id.eq(application_id.into_inner()))
                    .filter(applications::version.eq(loaded_version)),
            )
            .set((
                applications::status.eq(row.status),
                applications::current_round_id.eq(row.current_round_id),
                applications::notes.eq(row.notes),
                applications::updated_at.eq(row.updated_at),
                applications::version.eq(row.version),
            ))
            .execute(connection)
            .map_err(ApplicationRepositoryError::persistence)?;

            if affected == 0 {
                let exists = applications::table
                    .filter(applications::id.eq(application_id.into_inner()))
                    .count()
                    .get_result::<i64>(connection)
                    .map_err(ApplicationRepositoryError::persistence)?
                    > 0;
                if exists {
                    return Err(ApplicationRepositoryError::Conflict(application_id));
                }
                return Err(ApplicationRepositoryError::NotFound(application_id));
            }
            Ok(())
        })
        .await?;
        Ok(committed)
    }

    async fn find_by_id(
        &self,
        id: ApplicationId,
    ) -> ApplicationRepositoryResult<Option<Application>> {
        self.run_blocking(move |connection| {
            let row = applications::table
                .filter(applications::id.eq(id.into_inner()))
                .select(ApplicationRow::as_select())
                .first::<ApplicationRow>(connection)
                .optional()
                .map_err(ApplicationRepositoryError::persistence)?;
            row.map(row_to_application).transpose()
        })
        .await
    }

    async fn list_by_job(&self, job_id: JobId) -> ApplicationRepositoryResult<Vec<Application>> {
        self.run_blocking(move |connection| {
            let rows = applications::table
                .filter(applications::job_id.eq(job_id.into_inner()))
                .select(ApplicationRow::as_select())
                .load::<ApplicationRow>(connection)
                .map_err(ApplicationRepositoryError::persistence)?;
            rows.into_iter().map(row_to_application).collect()
        })
        .await
    }
}

fn to_new_row(application: &Application) -> NewApplicationRow {
    NewApplicationRow {
        id: application.id().into_inner(),
        job_id: application.job_id().into_inner(),
        status: application.status().as_str().to_owned(),
        current_round_id: application.current_round_id().map(RoundId::into_inner),
        notes: application.notes().to_owned(),
        created_at: application.created_at(),
        updated_at: application.updated_at(),
        version: application.version(),
    }
}

fn row_to_application(row: ApplicationRow) -> ApplicationRepositoryResult<Application> {
    let status = ApplicationStatus::try_from(row.status.as_str())
        .map_err(ApplicationRepositoryError::persistence)?;

    Ok(Application::from_persisted(PersistedApplicationData {
        id: ApplicationId::from_uuid(row.id),
        job_id: JobId::from_uuid(row.job_id),
        status,
        current_round_id: row.current_round_id.map(RoundId::from_uuid),
        notes: row.notes,
        created_at: row.created_at,
        updated_at: row.updated_at,
        version: row.version,
    }))
}
