//! Unit tests for the application pipeline module.

mod domain_tests;
