//! Behavior switches for the cases where the stored data is ambiguous.

use serde::{Deserialize, Serialize};

/// How to resolve an inactivity record that sets both `ending_date` and
/// `ending_hour`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// End at `{ending_date}T{ending_hour}`.
    #[default]
    FillGap,
    /// Refuse with `ScheduleError::AmbiguousInactivityRange`.
    Strict,
    /// Produce no end at all, leaving it to the calendar widget.
    Legacy,
}

/// How a calendar event treats a booking that runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolloverPolicy {
    /// The event ends on the day the booking actually ends.
    #[default]
    CarryDate,
    /// The event ends on the booking's own date at the rolled time of day.
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub inactivity_range: RangePolicy,
    pub booking_rollover: RolloverPolicy,
    /// Fail inactivity records whose end falls before their start instead of
    /// passing them to the calendar as stored.
    pub reject_inverted: bool,
}
