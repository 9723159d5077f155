//! Gatehouse: application pipeline and evaluation scheduling service.
//!
//! This crate provides the core of a recruiting pipeline: the application
//! status state machine, a per-job catalog of interview rounds, evaluation
//! records tying applications to rounds, time-based missed-interview
//! detection, and a kanban board projection.
//!
//! # Architecture
//!
//! Gatehouse follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, PostgreSQL)
//!
//! # Modules
//!
//! - [`application`]: Pipeline status machine and transition validation
//! - [`round`]: Interview round catalog and scheduling templates
//! - [`evaluation`]: Evaluation records, booking, and status derivation
//! - [`board`]: Read-side kanban projection
//! - [`notify`]: Notification events and dispatch

pub mod application;
pub mod board;
pub mod evaluation;
pub mod notify;
pub mod round;
