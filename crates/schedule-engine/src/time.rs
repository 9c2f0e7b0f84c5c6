//! Wall-clock value types shared by every resolver.
//!
//! The API and the booking forms exchange times as `HH:MM` or `HH:MM:SS`
//! strings, dates as `YYYY-MM-DD`, and durations as whole minutes (sometimes
//! quoted). These types parse those shapes strictly so that a malformed value
//! fails loudly instead of turning into a plausible but wrong timestamp.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, ScheduleError};

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| ScheduleError::InvalidDate(format!("'{}': {}", s, e)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precision {
    Minutes,
    Seconds,
}

/// A time of day as exchanged with the API.
///
/// Equality, ordering and hashing look only at the instant of the day, so
/// `09:00` and `09:00:00` are the same time. Rendering keeps the precision the
/// value was parsed with; computed values always render as `HH:MM:SS`.
#[derive(Debug, Clone, Copy)]
pub struct TimeOfDay {
    time: NaiveTime,
    precision: Precision,
}

impl TimeOfDay {
    /// Parse `HH:MM` or `HH:MM:SS`.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(time) = NaiveTime::parse_from_str(trimmed, "%H:%M:%S") {
            return Ok(Self {
                time,
                precision: Precision::Seconds,
            });
        }
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map(|time| Self {
                time,
                precision: Precision::Minutes,
            })
            .map_err(|e| ScheduleError::InvalidTime(format!("'{}': {}", s, e)))
    }

    /// Wrap a computed time; it renders with seconds.
    pub fn from_naive(time: NaiveTime) -> Self {
        // Sub-second components never reach the calendar.
        let time = time.with_nanosecond(0).unwrap_or(time);
        Self {
            time,
            precision: Precision::Seconds,
        }
    }

    /// `23:59:59`, the display end of an all-day inactivity.
    pub fn end_of_day() -> Self {
        Self::from_naive(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
    }

    /// `00:00:00`, the display start of an all-day inactivity.
    pub fn start_of_day() -> Self {
        Self::from_naive(NaiveTime::MIN)
    }

    pub fn naive(&self) -> NaiveTime {
        self.time
    }

    /// Render as `HH:MM:SS` regardless of the parsed precision.
    pub fn to_hms_string(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }
}

impl PartialEq for TimeOfDay {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
    }
}

impl Eq for TimeOfDay {}

impl Hash for TimeOfDay {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.time.hash(state);
    }
}

impl PartialOrd for TimeOfDay {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeOfDay {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time.cmp(&other.time)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            Precision::Minutes => write!(f, "{}", self.time.format("%H:%M")),
            Precision::Seconds => write!(f, "{}", self.time.format("%H:%M:%S")),
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}

/// A date plus a time of day, rendered as `YYYY-MM-DDTHH:MM[:SS]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarTimestamp {
    pub date: NaiveDate,
    pub time: TimeOfDay,
}

impl CalendarTimestamp {
    pub fn new(date: NaiveDate, time: TimeOfDay) -> Self {
        Self { date, time }
    }

    pub fn to_naive(&self) -> NaiveDateTime {
        self.date.and_time(self.time.naive())
    }
}

impl fmt::Display for CalendarTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date.format("%Y-%m-%d"), self.time)
    }
}

impl Serialize for CalendarTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A non-negative whole number of minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DurationMinutes(u32);

impl DurationMinutes {
    pub fn new(minutes: u32) -> Self {
        Self(minutes)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn as_chrono(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.0))
    }
}

impl TryFrom<i64> for DurationMinutes {
    type Error = ScheduleError;

    fn try_from(minutes: i64) -> Result<Self> {
        u32::try_from(minutes).map(Self).map_err(|_| {
            ScheduleError::InvalidDuration(format!(
                "{} minutes (expected a non-negative whole number)",
                minutes
            ))
        })
    }
}

impl FromStr for DurationMinutes {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        let minutes: i64 = s.trim().parse().map_err(|_| {
            ScheduleError::InvalidDuration(format!("'{}' is not a whole number of minutes", s))
        })?;
        Self::try_from(minutes)
    }
}

impl fmt::Display for DurationMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Always written as a JSON number, even when it was read from a string.
impl Serialize for DurationMinutes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for DurationMinutes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct DurationVisitor;

        impl Visitor<'_> for DurationVisitor {
            type Value = DurationMinutes;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative whole number of minutes, as a number or string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                DurationMinutes::try_from(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                u32::try_from(v)
                    .map(DurationMinutes)
                    .map_err(|_| E::custom(ScheduleError::InvalidDuration(format!("{} minutes", v))))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
                if v.fract() != 0.0 || v < 0.0 || v > f64::from(u32::MAX) {
                    return Err(E::custom(ScheduleError::InvalidDuration(format!(
                        "{} minutes",
                        v
                    ))));
                }
                Ok(DurationMinutes(v as u32))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(DurationVisitor)
    }
}

/// Weekday index used by the hours table and the calendar widget, 0 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkingDay(u8);

impl WorkingDay {
    pub fn get(&self) -> u8 {
        self.0
    }

    pub fn weekday(&self) -> Weekday {
        match self.0 {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        Self(weekday.num_days_from_sunday() as u8)
    }

    /// Two-letter RFC 5545 BYDAY code.
    pub fn byday_code(&self) -> &'static str {
        match self.weekday() {
            Weekday::Sun => "SU",
            Weekday::Mon => "MO",
            Weekday::Tue => "TU",
            Weekday::Wed => "WE",
            Weekday::Thu => "TH",
            Weekday::Fri => "FR",
            Weekday::Sat => "SA",
        }
    }
}

impl TryFrom<i64> for WorkingDay {
    type Error = ScheduleError;

    fn try_from(day: i64) -> Result<Self> {
        match day {
            0..=6 => Ok(Self(day as u8)),
            other => Err(ScheduleError::InvalidWorkingDay(other)),
        }
    }
}

impl Serialize for WorkingDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for WorkingDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let day = i64::deserialize(deserializer)?;
        WorkingDay::try_from(day).map_err(de::Error::custom)
    }
}

/// Deserialize an optional field where `null`, a missing key and `""` all
/// mean "absent".
pub(crate) fn empty_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) if !s.trim().is_empty() => s.trim().parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

