//! Error types for round catalog validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain round values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoundDomainError {
    /// The round name is empty after trimming.
    #[error("round name must not be empty")]
    EmptyRoundName,

    /// The scheduling template duration is zero.
    #[error("round duration must be a positive number of minutes")]
    ZeroDuration,

    /// The interview mode detail (platform or location) is empty.
    #[error("interview mode detail must not be empty")]
    EmptyModeDetail,
}

/// Error returned while parsing round types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown round type: {0}")]
pub struct ParseRoundTypeError(pub String);
