//! Application services for round catalog management.

mod catalog;

pub use catalog::{CreateRoundRequest, RoundCatalogError, RoundCatalogResult, RoundCatalogService};
