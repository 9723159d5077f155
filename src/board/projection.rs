//! Read-side kanban projection of the pipeline.

use crate::application::domain::{Application, ApplicationId, ApplicationStatus};
use crate::evaluation::domain::{Evaluation, EvaluationId, EvaluationStatus, derive_status};
use crate::round::domain::{Round, RoundId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Identity of a board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKey {
    /// Submissions not yet picked up for review.
    Applied,
    /// Applications attempting the given round.
    Round(RoundId),
    /// Applications awaiting a hire/reject decision.
    Shortlisted,
    /// Applications parked to the side.
    Hold,
    /// Hired applications.
    Hired,
    /// Rejected applications.
    Rejected,
}

/// One application card on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCard {
    /// Application the card represents.
    pub application_id: ApplicationId,
    /// Top-level pipeline status.
    pub status: ApplicationStatus,
    /// Effective status of the card's round evaluation, when under review.
    ///
    /// This is the only place derivation output crosses into the read
    /// model.
    pub evaluation_status: Option<EvaluationStatus>,
}

/// One ordered column of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn {
    /// Column identity.
    pub key: ColumnKey,
    /// Human-readable column label.
    pub label: String,
    /// Cards in the column.
    pub cards: Vec<BoardCard>,
}

/// Result of projecting the pipeline onto a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardProjection {
    /// Columns in presentation order.
    pub columns: Vec<BoardColumn>,
    /// Evaluations whose derived `Missed` is not yet durable.
    ///
    /// The projection performs no writes; callers flush these through the
    /// scheduling service when they are on a write-capable path.
    pub missed_detected: Vec<EvaluationId>,
}

/// Projects applications onto ordered board columns at `now`.
///
/// Column order is `Applied`, one column per non-archived round ascending by
/// catalog order, then `Shortlisted`, `Hold`, `Hired`, `Rejected` --
/// regardless of the input ordering of `rounds`. Under-review cards land in
/// the column of their current round; a missing pointer (legacy data) and a
/// pointer to an archived round both fall back to the lowest-order round
/// column, or to `Applied` when the job has no active rounds.
#[must_use]
pub fn project(
    applications: &[Application],
    rounds: &[Round],
    evaluations: &[Evaluation],
    now: DateTime<Utc>,
) -> BoardProjection {
    let mut active_rounds: Vec<&Round> = rounds.iter().filter(|r| !r.is_archived()).collect();
    active_rounds.sort_by(|a, b| Round::catalog_cmp(a, b));

    let mut columns = Vec::with_capacity(active_rounds.len() + 5);
    columns.push(BoardColumn {
        key: ColumnKey::Applied,
        label: "Applied".to_owned(),
        cards: Vec::new(),
    });
    for round in &active_rounds {
        columns.push(BoardColumn {
            key: ColumnKey::Round(round.id()),
            label: round.name().to_owned(),
            cards: Vec::new(),
        });
    }
    for (key, label) in [
        (ColumnKey::Shortlisted, "Shortlisted"),
        (ColumnKey::Hold, "Hold"),
        (ColumnKey::Hired, "Hired"),
        (ColumnKey::Rejected, "Rejected"),
    ] {
        columns.push(BoardColumn {
            key,
            label: label.to_owned(),
            cards: Vec::new(),
        });
    }

    let by_pair: HashMap<(ApplicationId, RoundId), &Evaluation> = evaluations
        .iter()
        .map(|evaluation| {
            (
                (evaluation.application_id(), evaluation.round_id()),
                evaluation,
            )
        })
        .collect();
    let default_round = active_rounds.first().map(|round| round.id());
    let active_ids: Vec<RoundId> = active_rounds.iter().map(|round| round.id()).collect();

    for application in applications {
        let (key, evaluation_status) = match application.status() {
            ApplicationStatus::Applied => (ColumnKey::Applied, None),
            ApplicationStatus::UnderReview => {
                let round_id = application
                    .current_round_id()
                    .filter(|id| active_ids.contains(id))
                    .or(default_round);
                round_id.map_or((ColumnKey::Applied, None), |id| {
                    let effective = by_pair
                        .get(&(application.id(), id))
                        .map(|evaluation| derive_status(evaluation, now));
                    (ColumnKey::Round(id), effective)
                })
            }
            ApplicationStatus::Shortlisted => (ColumnKey::Shortlisted, None),
            ApplicationStatus::Hold => (ColumnKey::Hold, None),
            ApplicationStatus::Hired => (ColumnKey::Hired, None),
            ApplicationStatus::Rejected => (ColumnKey::Rejected, None),
        };
        if let Some(column) = columns.iter_mut().find(|column| column.key == key) {
            column.cards.push(BoardCard {
                application_id: application.id(),
                status: application.status(),
                evaluation_status,
            });
        }
    }

    let missed_detected = evaluations
        .iter()
        .filter(|evaluation| {
            evaluation.status() == EvaluationStatus::Scheduled
                && derive_status(evaluation, now) == EvaluationStatus::Missed
        })
        .map(Evaluation::id)
        .collect();

    BoardProjection {
        columns,
        missed_detected,
    }
}
