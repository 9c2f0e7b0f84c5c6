//! Expand recurring business-hours blocks into concrete instances.
//!
//! Each block becomes an RFC 5545 weekly rule (`FREQ=WEEKLY;BYDAY=MO,TU`)
//! anchored at the window's first day, expanded with the `rrule` crate in the
//! professional's IANA timezone so DST transitions keep wall-clock times.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rrule::RRuleSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::business_hours::BusinessHoursBlock;
use crate::error::{Result, ScheduleError};
use crate::time::{TimeOfDay, WorkingDay};

/// One concrete occurrence of a business-hours block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHoursInstance {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// The RRULE body for a block, e.g. `FREQ=WEEKLY;BYDAY=SU,MO`.
///
/// Returns `None` for a block with no days.
pub fn block_rrule(block: &BusinessHoursBlock) -> Option<String> {
    if block.days_of_week.is_empty() {
        return None;
    }
    let byday: Vec<&str> = block.days_of_week.iter().map(WorkingDay::byday_code).collect();
    Some(format!("FREQ=WEEKLY;BYDAY={}", byday.join(",")))
}

/// Expand every block into instances on the dates `from..=to`.
///
/// Instances are returned sorted by start. Blocks with no days or a
/// non-positive length contribute nothing.
///
/// # Errors
/// - `InvalidTimezone` if `timezone` is not an IANA identifier.
/// - `InvertedRange` if `to` is before `from`.
/// - `InvalidRule` if the generated rule is rejected by the RRULE parser.
pub fn expand_business_hours(
    blocks: &[BusinessHoursBlock],
    from: NaiveDate,
    to: NaiveDate,
    timezone: &str,
) -> Result<Vec<BusinessHoursInstance>> {
    let _tz: chrono_tz::Tz = timezone
        .parse()
        .map_err(|_| ScheduleError::InvalidTimezone(timezone.to_string()))?;

    if to < from {
        return Err(ScheduleError::InvertedRange {
            start: from.to_string(),
            end: to.to_string(),
        });
    }

    let weeks = (to - from).num_days() / 7 + 2;
    let mut instances = Vec::new();

    for block in blocks {
        let Some(rule) = block_rrule(block) else {
            continue;
        };
        let duration_minutes = block.duration_minutes();
        if duration_minutes == 0 {
            continue;
        }

        let dtstart = from
            .and_time(block.start_time.naive())
            .format("%Y%m%dT%H%M%S");
        // The rrule crate requires UNTIL and DTSTART to share the same timezone;
        // UTC needs the "Z" suffix, named zones use bare local time.
        let mut until = to
            .and_time(TimeOfDay::end_of_day().naive())
            .format("%Y%m%dT%H%M%S")
            .to_string();
        if timezone == "UTC" {
            until.push('Z');
        }

        let rrule_text = format!(
            "DTSTART;TZID={}:{}\nRRULE:{};UNTIL={}",
            timezone, dtstart, rule, until
        );
        let rrule_set: RRuleSet = rrule_text
            .parse()
            .map_err(|e| ScheduleError::InvalidRule(format!("{}", e)))?;

        let limit = (weeks * block.days_of_week.len() as i64).clamp(1, i64::from(u16::MAX)) as u16;
        let duration = chrono::Duration::minutes(duration_minutes);

        // DTSTART itself may fall on a day outside BYDAY; keep only listed days.
        instances.extend(
            rrule_set
                .all(limit)
                .dates
                .into_iter()
                .filter(|dt| {
                    block
                        .days_of_week
                        .contains(&WorkingDay::from_weekday(dt.weekday()))
                })
                .map(|dt| {
                    let start = dt.with_timezone(&Utc);
                    BusinessHoursInstance {
                        start,
                        end: start + duration,
                    }
                }),
        );
    }

    instances.sort_by_key(|i| (i.start, i.end));

    debug!(
        blocks = blocks.len(),
        instances = instances.len(),
        %from,
        %to,
        timezone,
        "expanded business hours"
    );

    Ok(instances)
}
