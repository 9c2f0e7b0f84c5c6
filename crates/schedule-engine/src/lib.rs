//! # schedule-engine
//!
//! Calendar interval shaping for a clinic scheduling front-end.
//!
//! Sits between the scheduling API and the calendar view. Every function is
//! pure: it takes normalized records (working hours, bookings, inactivity) and
//! returns calendar-ready structures without touching shared state.
//!
//! ## Modules
//!
//! - [`business_hours`] — working-hours table → recurring business-hours blocks
//! - [`booking`] — booking start + duration → end time
//! - [`inactivity`] — holiday/absence record → display start and end
//! - [`calendar`] — schedule snapshot → calendar view model
//! - [`recurrence`] — business-hours blocks → concrete instances in a window
//! - [`holidays`] — national-holiday lookup → inactivity records
//! - [`patients`] — patient search
//! - [`options`] — policies for ambiguous stored data
//! - [`time`] — date, time-of-day, duration and weekday value types
//! - [`error`] — Error types

pub mod booking;
pub mod business_hours;
pub mod calendar;
pub mod error;
pub mod holidays;
pub mod inactivity;
pub mod options;
pub mod patients;
pub mod recurrence;
pub mod time;

pub use booking::{resolve_booking_ends, resolve_end, resolve_end_with_rollover, Booking, ResolvedEnd};
pub use business_hours::{reduce_business_hours, BusinessHoursBlock, WorkingHourRecord};
pub use calendar::{build_calendar, CalendarEvent, CalendarView, ScheduleSnapshot};
pub use error::ScheduleError;
pub use holidays::{seed_national_holidays, HolidayLookup, HolidayLookupEntry};
pub use inactivity::{InactivityKind, InactivityRecord};
pub use options::{EngineOptions, RangePolicy, RolloverPolicy};
pub use patients::{filter_patients, Patient};
pub use recurrence::{expand_business_hours, BusinessHoursInstance};
pub use time::{CalendarTimestamp, DurationMinutes, TimeOfDay, WorkingDay};
