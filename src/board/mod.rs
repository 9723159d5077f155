//! Kanban board projection over applications, rounds, and evaluations.
//!
//! The projection is a pure read model: it never writes, and it reports
//! evaluations whose derived `Missed` status has not yet been persisted so
//! that callers on a write path can flush them.

mod projection;

pub use projection::{BoardCard, BoardColumn, BoardProjection, ColumnKey, project};

#[cfg(test)]
mod tests;
