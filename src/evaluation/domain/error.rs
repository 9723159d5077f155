//! Error types for evaluation domain validation and parsing.

use super::{EvaluationId, EvaluationStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating domain evaluation values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvaluationDomainError {
    /// The evaluation carries a locked final decision.
    #[error("evaluation {0} is finalized and cannot be modified")]
    Finalized(EvaluationId),

    /// The evaluation's effective status does not permit the operation.
    #[error("evaluation {id} is {effective:?}, which does not permit this operation")]
    InvalidState {
        /// Evaluation the operation targeted.
        id: EvaluationId,
        /// Effective status at the time of the attempt.
        effective: EvaluationStatus,
    },

    /// The interviewer name is empty after trimming.
    #[error("interviewer name must not be empty")]
    EmptyInterviewerName,

    /// The interviewer email is not a plausible address.
    #[error("invalid interviewer email: {0}")]
    InvalidInterviewerEmail(String),

    /// The session duration is zero.
    #[error("session duration must be a positive number of minutes")]
    ZeroDuration,
}

/// Error returned while parsing evaluation statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown evaluation status: {0}")]
pub struct ParseEvaluationStatusError(pub String);
