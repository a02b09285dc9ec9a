//! Error types for availability-engine operations.
//!
//! Slot validation outcomes live in [`crate::validator::Rejection`] and negative
//! durations in [`crate::duration::DurationError`]; this enum covers malformed
//! input at the edges (wire records, CLI/WASM arguments, config files).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Invalid time '{0}': expected zero-padded HH:mm between 00:00 and 23:59")]
    InvalidTime(String),

    #[error("Invalid day of week: {0}")]
    InvalidDay(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AvailabilityError>;
