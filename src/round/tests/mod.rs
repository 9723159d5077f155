//! Unit tests for the round catalog module.

mod domain_tests;
mod service_tests;
