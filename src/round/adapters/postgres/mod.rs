//! `PostgreSQL` adapters for round catalog persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PgPool, PostgresRoundRepository};
