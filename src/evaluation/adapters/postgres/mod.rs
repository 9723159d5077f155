//! `PostgreSQL` adapters for evaluation persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresEvaluationRepository;
