//! Diesel row models for round persistence.

use super::schema::rounds;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for round records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rounds)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoundRow {
    /// Round identifier.
    pub id: uuid::Uuid,
    /// Owning job identifier.
    pub job_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Sort order within the job.
    pub sort_order: i32,
    /// Assessment type.
    pub round_type: String,
    /// Scheduling template JSON payload.
    pub template: Value,
    /// Archival flag.
    pub is_archived: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for round records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rounds)]
pub struct NewRoundRow {
    /// Round identifier.
    pub id: uuid::Uuid,
    /// Owning job identifier.
    pub job_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Sort order within the job.
    pub sort_order: i32,
    /// Assessment type.
    pub round_type: String,
    /// Scheduling template JSON payload.
    pub template: Value,
    /// Archival flag.
    pub is_archived: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
