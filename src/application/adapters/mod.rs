//! Adapter implementations of application pipeline ports.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryApplicationRepository;
pub use postgres::PostgresApplicationRepository;
