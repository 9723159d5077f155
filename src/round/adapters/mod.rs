//! Adapter implementations of round catalog ports.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRoundRepository;
pub use postgres::{PgPool, PostgresRoundRepository};
