//! Diesel row models for evaluation persistence.

use super::schema::evaluations;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for evaluation records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = evaluations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EvaluationRow {
    /// Evaluation identifier.
    pub id: uuid::Uuid,
    /// Owning application identifier.
    pub application_id: uuid::Uuid,
    /// Round the attempt belongs to.
    pub round_id: uuid::Uuid,
    /// Persisted status.
    pub status: String,
    /// Booked session start, if any.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Booked session duration in minutes, if any.
    pub duration_minutes: Option<i32>,
    /// Assigned interviewer JSON payload, if any.
    pub interviewer: Option<Value>,
    /// Session mode JSON payload, if any.
    pub mode: Option<Value>,
    /// Recorded score, if any.
    pub score: Option<i32>,
    /// Recorded feedback, if any.
    pub feedback: Option<String>,
    /// Finality flag.
    pub is_final: bool,
    /// Audit trail JSON payload.
    pub history: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic-concurrency version.
    pub version: i64,
}

/// Insert model for evaluation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = evaluations)]
pub struct NewEvaluationRow {
    /// Evaluation identifier.
    pub id: uuid::Uuid,
    /// Owning application identifier.
    pub application_id: uuid::Uuid,
    /// Round the attempt belongs to.
    pub round_id: uuid::Uuid,
    /// Persisted status.
    pub status: String,
    /// Booked session start, if any.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Booked session duration in minutes, if any.
    pub duration_minutes: Option<i32>,
    /// Assigned interviewer JSON payload, if any.
    pub interviewer: Option<Value>,
    /// Session mode JSON payload, if any.
    pub mode: Option<Value>,
    /// Recorded score, if any.
    pub score: Option<i32>,
    /// Recorded feedback, if any.
    pub feedback: Option<String>,
    /// Finality flag.
    pub is_final: bool,
    /// Audit trail JSON payload.
    pub history: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Optimistic-concurrency version.
    pub version: i64,
}
