//! Time-based effective-status derivation.
//!
//! An evaluation's persisted status says what was last written; the
//! *effective* status additionally detects sessions whose booked slot has
//! elapsed unattended. Derivation is a pure function of the evaluation and
//! the supplied instant, which keeps it deterministic under test; making a
//! derived `Missed` durable is the caller's responsibility (see
//! [`Evaluation::record_missed`]).

use super::{Evaluation, EvaluationStatus};
use chrono::{DateTime, Duration, Utc};

/// Grace period appended to a session before it counts as missed.
pub const GRACE_MINUTES: i64 = 15;

/// Computes the effective status of an evaluation at `now`.
///
/// Only `Scheduled` evaluations are subject to missed detection; every
/// other persisted status is returned unchanged. The session start is an
/// absolute instant, so no calendar-date/wall-clock recombination is
/// needed at comparison time. The deadline is
/// `scheduled_at + duration + GRACE_MINUTES`, and the status flips to
/// `Missed` strictly after it.
#[must_use]
pub fn derive_status(evaluation: &Evaluation, now: DateTime<Utc>) -> EvaluationStatus {
    if evaluation.status() != EvaluationStatus::Scheduled {
        return evaluation.status();
    }
    let Some(start) = evaluation.scheduled_at() else {
        // A scheduled evaluation without a booked instant cannot elapse.
        return evaluation.status();
    };
    let duration = i64::from(evaluation.duration_minutes().unwrap_or(0));
    let deadline = start + Duration::minutes(duration + GRACE_MINUTES);
    if now > deadline {
        EvaluationStatus::Missed
    } else {
        EvaluationStatus::Scheduled
    }
}
