//! Error types for slot-engine operations.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// Malformed input: bad `HH:MM`, inverted work day, non-positive duration or step.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An interval whose start is not strictly before its end.
    #[error("Invalid interval: start {} is not before end {}", .start.to_rfc3339(), .end.to_rfc3339())]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SlotError {
    /// Whether this error is a validation failure (interval ordering included).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SlotError::Validation(_) | SlotError::InvalidInterval { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
