//! Application pipeline: the top-level lifecycle of a candidate's
//! submission.
//!
//! The pipeline owns the application status machine and the current-round
//! pointer. Every write goes through the transition validator, which
//! enforces the transition table, round scoping, archival, and the
//! confirmation gate. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
