//! Adapter implementations of evaluation store ports.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryEvaluationRepository;
pub use postgres::PostgresEvaluationRepository;
