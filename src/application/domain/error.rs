//! Error types for application pipeline validation and parsing.

use super::{ApplicationId, ApplicationStatus};
use thiserror::Error;

/// Errors returned while mutating domain application values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApplicationDomainError {
    /// The requested status move is not in the transition table.
    #[error("invalid transition for application {id}: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Application the move targeted.
        id: ApplicationId,
        /// Status at the time of the attempt.
        from: ApplicationStatus,
        /// Requested status.
        to: ApplicationStatus,
    },
}

/// Error returned while parsing application statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown application status: {0}")]
pub struct ParseApplicationStatusError(pub String);
