//! Round catalog: the ordered stages of a job's interview process.
//!
//! The catalog owns round creation, ordering, scheduling templates, and
//! archival. Archived rounds stay resolvable for historical evaluations and
//! are only excluded from new assignment. The module follows hexagonal
//! architecture:
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
