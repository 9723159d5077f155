//! Unit tests for the evaluation module.

mod derive_tests;
mod service_tests;
