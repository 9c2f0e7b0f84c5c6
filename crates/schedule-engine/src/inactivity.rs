//! Display spans for holidays, private absences and private events.
//!
//! An inactivity record always has a starting date. The starting hour, ending
//! date and ending hour are each optional; a missing bound means "the whole
//! day". [`resolve_end`] applies the decision table below, first match wins:
//!
//! | ending_date | ending_hour | end                              |
//! |-------------|-------------|----------------------------------|
//! | absent      | absent      | `{starting_date}T23:59:59`       |
//! | present     | absent      | `{ending_date}T23:59:59`         |
//! | absent      | present     | `{starting_date}T{ending_hour}`  |
//! | present     | present     | per [`RangePolicy`]              |
//!
//! The table is total. An end that lands before the start is returned as is;
//! [`check_order`] is the opt-in check for callers that want to refuse it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::options::{EngineOptions, RangePolicy};
use crate::time::{empty_as_none, CalendarTimestamp, TimeOfDay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InactivityKind {
    /// National (bank) holiday.
    #[serde(rename = "nHoliday")]
    NationalHoliday,
    /// The professional's own holiday.
    #[serde(rename = "pHoliday")]
    PrivateHoliday,
    /// A private event blocking part of a day.
    #[serde(rename = "pEvent")]
    PrivateEvent,
}

impl InactivityKind {
    /// Wire name stored in the `type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            InactivityKind::NationalHoliday => "nHoliday",
            InactivityKind::PrivateHoliday => "pHoliday",
            InactivityKind::PrivateEvent => "pEvent",
        }
    }

    /// CSS class the calendar uses to color this kind of event.
    pub fn class_name(&self) -> &'static str {
        match self {
            InactivityKind::NationalHoliday => "bank-holiday",
            InactivityKind::PrivateHoliday => "private-holiday",
            InactivityKind::PrivateEvent => "private-event",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InactivityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pro_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub starting_date: NaiveDate,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub starting_hour: Option<TimeOfDay>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub ending_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub ending_hour: Option<TimeOfDay>,
    #[serde(rename = "type")]
    pub kind: InactivityKind,
}

impl InactivityRecord {
    /// An all-day record of the given kind on a single date.
    pub fn all_day(kind: InactivityKind, starting_date: NaiveDate) -> Self {
        Self {
            id: None,
            pro_id: None,
            title: None,
            starting_date,
            starting_hour: None,
            ending_date: None,
            ending_hour: None,
            kind,
        }
    }
}

/// The display start: midnight unless a starting hour is set.
pub fn resolve_start(record: &InactivityRecord) -> CalendarTimestamp {
    CalendarTimestamp::new(
        record.starting_date,
        record.starting_hour.unwrap_or_else(TimeOfDay::start_of_day),
    )
}

/// The display end, following the module-level decision table.
///
/// Returns `Ok(None)` only under [`RangePolicy::Legacy`] when both ending
/// fields are set.
///
/// # Errors
/// `AmbiguousInactivityRange` under [`RangePolicy::Strict`] when both ending
/// fields are set.
pub fn resolve_end(
    record: &InactivityRecord,
    policy: RangePolicy,
) -> Result<Option<CalendarTimestamp>> {
    let end = match (record.ending_date, record.ending_hour) {
        (None, None) => CalendarTimestamp::new(record.starting_date, TimeOfDay::end_of_day()),
        (Some(date), None) => CalendarTimestamp::new(date, TimeOfDay::end_of_day()),
        (None, Some(hour)) => CalendarTimestamp::new(record.starting_date, hour),
        (Some(date), Some(hour)) => match policy {
            RangePolicy::FillGap => CalendarTimestamp::new(date, hour),
            RangePolicy::Strict => {
                return Err(ScheduleError::AmbiguousInactivityRange {
                    ending_date: date.to_string(),
                    ending_hour: hour.to_string(),
                })
            }
            RangePolicy::Legacy => {
                debug!(
                    starting_date = %record.starting_date,
                    "inactivity sets both ending_date and ending_hour; leaving end unset"
                );
                return Ok(None);
            }
        },
    };

    if end < resolve_start(record) {
        debug!(
            starting_date = %record.starting_date,
            end = %end,
            "inactivity ends before it starts"
        );
    }

    Ok(Some(end))
}

/// Refuse an end that falls before the record's start.
///
/// # Errors
/// `InvertedRange` carrying both resolved timestamps.
pub fn check_order(record: &InactivityRecord, end: &CalendarTimestamp) -> Result<()> {
    let start = resolve_start(record);
    if *end < start {
        return Err(ScheduleError::InvertedRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

/// [`resolve_end`] under `options`, with [`check_order`] applied when
/// `options.reject_inverted` is set.
pub fn resolve_end_with(
    record: &InactivityRecord,
    options: &EngineOptions,
) -> Result<Option<CalendarTimestamp>> {
    let end = resolve_end(record, options.inactivity_range)?;
    if options.reject_inverted {
        if let Some(end) = &end {
            check_order(record, end)?;
        }
    }
    Ok(end)
}
