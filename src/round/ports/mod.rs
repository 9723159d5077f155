//! Port contracts for the round catalog.
//!
//! Ports define infrastructure-agnostic interfaces used by catalog services.

pub mod repository;

pub use repository::{RoundRepository, RoundRepositoryError, RoundRepositoryResult};
