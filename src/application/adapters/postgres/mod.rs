//! `PostgreSQL` adapters for application pipeline persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresApplicationRepository;
