//! Error types for schedule-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid working day: {0} (expected 0-6, 0 = Sunday)")]
    InvalidWorkingDay(i64),

    #[error("Inverted range: end {end} is before start {start}")]
    InvertedRange { start: String, end: String },

    #[error("Ambiguous inactivity range: both ending_date ({ending_date}) and ending_hour ({ending_hour}) are set")]
    AmbiguousInactivityRange {
        ending_date: String,
        ending_hour: String,
    },

    #[error("Invalid RRULE: {0}")]
    InvalidRule(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

impl ScheduleError {
    /// True for malformed date, time, duration, weekday or range values.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidDate(_)
                | ScheduleError::InvalidTime(_)
                | ScheduleError::InvalidDuration(_)
                | ScheduleError::InvalidWorkingDay(_)
                | ScheduleError::InvertedRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
