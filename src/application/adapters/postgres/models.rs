//! Diesel row models for application persistence.

use super::schema::applications;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for application records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ApplicationRow {
    /// Application identifier.
    pub id: uuid::Uuid,
    /// Owning job identifier.
    pub job_id: uuid::Uuid,
    /// Pipeline status.
    pub status: String,
    /// Current-round pointer, if under review.
    pub current_round_id: Option<uuid::Uuid>,
    /// Free-text notes.
    pub notes: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic-concurrency version.
    pub version: i64,
}

/// Insert model for application records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = applications)]
pub struct NewApplicationRow {
    /// Application identifier.
    pub id: uuid::Uuid,
    /// Owning job identifier.
    pub job_id: uuid::Uuid,
    /// Pipeline status.
    pub status: String,
    /// Current-round pointer, if under review.
    pub current_round_id: Option<uuid::Uuid>,
    /// Free-text notes.
    pub notes: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic-concurrency version.
    pub version: i64,
}
