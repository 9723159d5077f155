//! Port contracts for the evaluation store.
//!
//! Ports define infrastructure-agnostic interfaces used by scheduling
//! services.

pub mod repository;

pub use repository::{EvaluationRepository, EvaluationRepositoryError, EvaluationRepositoryResult};
