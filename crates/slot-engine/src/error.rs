//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// A configured time range was not a valid `HH:MM` wall-clock time.
    #[error("Invalid availability config for '{day}': '{value}' is not a valid HH:MM time")]
    InvalidAvailabilityConfig { day: String, value: String },

    /// The availability payload could not be parsed or resolved.
    #[error("Invalid availability payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
