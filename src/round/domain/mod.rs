//! Domain model for the round catalog.
//!
//! Rounds are the ordered stages of a job's interview process. The catalog
//! owns their naming, ordering, assessment type, scheduling template, and
//! archival flag while keeping infrastructure concerns outside the domain
//! boundary.

mod error;
mod ids;
mod round;

pub use error::{ParseRoundTypeError, RoundDomainError};
pub use ids::{JobId, RoundId};
pub use round::{InterviewMode, PersistedRoundData, Round, RoundType, SchedulingTemplate};
