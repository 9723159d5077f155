//! Domain model for the application pipeline.
//!
//! An application carries a candidate's top-level pipeline status and, while
//! under review, a pointer to the round currently being attempted. All
//! status moves go through the transition table; terminal statuses admit
//! none.

mod application;
mod error;
mod ids;

pub use application::{Application, ApplicationStatus, PersistedApplicationData};
pub use error::{ApplicationDomainError, ParseApplicationStatusError};
pub use ids::ApplicationId;
