//! Domain model for evaluation records and effective-status derivation.
//!
//! An evaluation records a specific application's attempt at a specific
//! round: its status, session booking, interviewer, outcome, and an
//! append-only audit trail. Missed-interview detection is a pure derivation
//! over the persisted record and the current instant.

mod derive;
mod error;
mod evaluation;
mod ids;

pub use derive::{GRACE_MINUTES, derive_status};
pub use error::{EvaluationDomainError, ParseEvaluationStatusError};
pub use evaluation::{
    Evaluation, EvaluationEvent, EvaluationEventKind, EvaluationStatus, FinalStatus, Interviewer,
    PersistedEvaluationData, SessionBooking,
};
pub use ids::EvaluationId;
