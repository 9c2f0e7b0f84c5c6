//! Seed national holidays from the holiday lookup service.
//!
//! The lookup returns `{"holidays": [{"date": "Wed, 25 Dec 2024 00:00:00 GMT",
//! "holiday": "Christmas Day"}, ...]}`. Each entry becomes an all-day
//! `nHoliday` inactivity record for the professional.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::inactivity::{InactivityKind, InactivityRecord};
use crate::time::parse_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayLookupEntry {
    pub date: String,
    pub holiday: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HolidayLookup {
    #[serde(default)]
    pub holidays: Vec<HolidayLookupEntry>,
}

/// Parse a lookup date: the HTTP-date form (`Wed, 25 Dec 2024 00:00:00 GMT`)
/// or a plain `YYYY-MM-DD`.
pub fn parse_lookup_date(raw: &str) -> Result<NaiveDate> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    if parts.len() >= 4 {
        let day_month_year = parts[1..4].join(" ");
        return NaiveDate::parse_from_str(&day_month_year, "%d %b %Y")
            .map_err(|e| ScheduleError::InvalidDate(format!("'{}': {}", raw, e)));
    }
    parse_date(raw)
}

/// Build `nHoliday` records for `pro_id` from a lookup payload.
///
/// Seeding only happens for a professional with no inactivity yet; when
/// `existing` is non-empty nothing is returned, so re-running never duplicates
/// holidays.
pub fn seed_national_holidays(
    existing: &[InactivityRecord],
    lookup: &HolidayLookup,
    pro_id: i64,
) -> Result<Vec<InactivityRecord>> {
    if !existing.is_empty() {
        debug!(
            pro_id,
            existing = existing.len(),
            "inactivity already present; skipping holiday seeding"
        );
        return Ok(Vec::new());
    }

    lookup
        .holidays
        .iter()
        .map(|entry| {
            let date = parse_lookup_date(&entry.date)?;
            let mut record = InactivityRecord::all_day(InactivityKind::NationalHoliday, date);
            record.pro_id = Some(pro_id);
            record.title = Some(entry.holiday.clone());
            Ok(record)
        })
        .collect()
}
