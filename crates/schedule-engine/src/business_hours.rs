//! Collapse a per-day working-hours table into recurring business-hours blocks.
//!
//! Each working day carries up to two shifts (morning and afternoon). Shifts
//! with identical start and end times are merged into one block spanning all
//! of their days, which is the shape the calendar widget expects for its
//! `businessHours` overlay.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::time::{empty_as_none, TimeOfDay, WorkingDay};

/// One row of a professional's weekly schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingHourRecord {
    pub working_day: WorkingDay,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub starting_hour_morning: Option<TimeOfDay>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub ending_hour_morning: Option<TimeOfDay>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub starting_hour_after: Option<TimeOfDay>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub ending_hour_after: Option<TimeOfDay>,
}

impl WorkingHourRecord {
    /// The morning shift, when both of its bounds are set.
    pub fn morning(&self) -> Option<(TimeOfDay, TimeOfDay)> {
        self.starting_hour_morning.zip(self.ending_hour_morning)
    }

    /// The afternoon shift, when both of its bounds are set.
    pub fn afternoon(&self) -> Option<(TimeOfDay, TimeOfDay)> {
        self.starting_hour_after.zip(self.ending_hour_after)
    }
}

/// A recurring weekly availability window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHoursBlock {
    /// Days in first-insertion order, without duplicates.
    pub days_of_week: Vec<WorkingDay>,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl BusinessHoursBlock {
    /// Length of one occurrence in minutes. Zero when the end is not after the start.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time.naive() - self.start_time.naive())
            .num_minutes()
            .max(0)
    }
}

/// Reduce working-hour records into the minimal list of business-hours blocks.
///
/// Morning and afternoon shifts are independent candidates. A shift is
/// skipped unless both its start and end are present. Blocks appear in the
/// order their (start, end) pair is first seen.
pub fn reduce_business_hours(records: &[WorkingHourRecord]) -> Vec<BusinessHoursBlock> {
    let mut blocks: Vec<BusinessHoursBlock> = Vec::new();

    for record in records {
        for (start, end) in [record.morning(), record.afternoon()].into_iter().flatten() {
            merge_shift(&mut blocks, record.working_day, start, end);
        }
    }

    debug!(
        records = records.len(),
        blocks = blocks.len(),
        "reduced working hours into business-hours blocks"
    );

    blocks
}

fn merge_shift(
    blocks: &mut Vec<BusinessHoursBlock>,
    day: WorkingDay,
    start: TimeOfDay,
    end: TimeOfDay,
) {
    match blocks
        .iter_mut()
        .find(|b| b.start_time == start && b.end_time == end)
    {
        Some(block) => {
            if !block.days_of_week.contains(&day) {
                block.days_of_week.push(day);
            }
        }
        None => blocks.push(BusinessHoursBlock {
            days_of_week: vec![day],
            start_time: start,
            end_time: end,
        }),
    }
}
