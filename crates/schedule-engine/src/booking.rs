//! Booking end-time resolution.
//!
//! A booking is stored as a date, a start time and a duration in minutes. The
//! calendar needs an end time, which is derived here with calendar-correct
//! minute arithmetic: minutes roll into hours and hours roll into the next day.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Result, ScheduleError};
use crate::time::{empty_as_none, parse_date, DurationMinutes, TimeOfDay};

/// A booking as returned by the bookings API.
///
/// Only the fields needed for interval resolution are typed. Everything else
/// (patient name, status, notes, ...) is carried through untouched in
/// `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub starting_time: TimeOfDay,
    pub duration: DurationMinutes,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub ending_time: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// The end of a booking, with the number of midnights crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEnd {
    pub ending_date: NaiveDate,
    pub ending_time: TimeOfDay,
    /// Zero when the booking ends on the day it starts.
    pub days_rolled: i64,
}

impl ResolvedEnd {
    pub fn rolled_over(&self) -> bool {
        self.days_rolled > 0
    }
}

/// Compute a booking's end time of day from string inputs.
///
/// Only the time of day is returned; if the booking runs past midnight the
/// date change is dropped. Use [`resolve_end_with_rollover`] to keep it.
///
/// # Errors
/// Returns an invalid-input error when `date` is not `YYYY-MM-DD`,
/// `starting_time` is not `HH:MM[:SS]`, or `duration_minutes` is negative.
pub fn resolve_end(date: &str, starting_time: &str, duration_minutes: i64) -> Result<TimeOfDay> {
    let date = parse_date(date)?;
    let start = TimeOfDay::parse(starting_time)?;
    let duration = DurationMinutes::try_from(duration_minutes)?;
    Ok(resolve_end_with_rollover(date, start, duration)?.ending_time)
}

/// Compute a booking's end date and time, reporting any rollover past midnight.
///
/// The start is taken at whole-minute precision (seconds zeroed).
pub fn resolve_end_with_rollover(
    date: NaiveDate,
    starting_time: TimeOfDay,
    duration: DurationMinutes,
) -> Result<ResolvedEnd> {
    let t = starting_time.naive();
    let start: NaiveDateTime = date
        .and_hms_opt(t.hour(), t.minute(), 0)
        .ok_or_else(|| ScheduleError::InvalidTime(starting_time.to_string()))?;

    let end = start
        .checked_add_signed(duration.as_chrono())
        .ok_or_else(|| {
            ScheduleError::InvalidDuration(format!(
                "{} minutes from {} overflows the calendar",
                duration, start
            ))
        })?;

    let resolved = ResolvedEnd {
        ending_date: end.date(),
        ending_time: TimeOfDay::from_naive(end.time()),
        days_rolled: (end.date() - date).num_days(),
    };

    debug!(
        %date,
        start = %starting_time,
        duration = duration.get(),
        end = %resolved.ending_time,
        days_rolled = resolved.days_rolled,
        "resolved booking end"
    );

    Ok(resolved)
}

impl Booking {
    /// Resolve this booking's end from its own date, start and duration.
    pub fn resolve_end(&self) -> Result<ResolvedEnd> {
        resolve_end_with_rollover(self.date, self.starting_time, self.duration)
    }

    /// Return the booking with `ending_time` filled in. No other field changes.
    pub fn with_ending_time(mut self) -> Result<Self> {
        let resolved = self.resolve_end()?;
        if resolved.rolled_over() {
            warn!(
                id = ?self.id,
                date = %self.date,
                ending_date = %resolved.ending_date,
                "booking ends on a later day; ending_time keeps only the time of day"
            );
        }
        self.ending_time = Some(resolved.ending_time);
        Ok(self)
    }
}

/// Fill in `ending_time` on every booking, failing on the first invalid one.
pub fn resolve_booking_ends(bookings: Vec<Booking>) -> Result<Vec<Booking>> {
    bookings.into_iter().map(Booking::with_ending_time).collect()
}
