//! Evaluation store and status derivation.
//!
//! One evaluation exists per `(application, round)` pair and is created
//! lazily when the application enters the round. The module owns interviewer
//! assignment, missed-session detection, completion locking, and
//! rescheduling. The module follows hexagonal architecture:
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
