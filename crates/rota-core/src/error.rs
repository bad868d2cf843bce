//! Error types for rota configuration and input parsing.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while loading the schedule table or parsing caller input.
///
/// The resolver itself never fails: an unscheduled cell is `false`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("unknown day: {0}")]
    UnknownDay(String),

    #[error("hour out of range: {0}")]
    InvalidHour(u8),

    #[error("minute must be 0, 15, 30 or 45: {0}")]
    InvalidMinute(u8),

    #[error("malformed time range {range:?}: {reason}")]
    InvalidRange { range: String, reason: String },

    #[error("{role} has an empty entry for {day}")]
    EmptyDay { role: String, day: String },
}
