//! Assemble the calendar view model from a schedule snapshot.
//!
//! The calendar widget takes a `businessHours` overlay and a flat list of
//! time-ranged events. Bookings and inactivity records are turned into events
//! here, with the CSS class the stylesheet uses for each kind.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::booking::Booking;
use crate::business_hours::{reduce_business_hours, BusinessHoursBlock, WorkingHourRecord};
use crate::error::Result;
use crate::inactivity::{self, InactivityRecord};
use crate::options::{EngineOptions, RolloverPolicy};

/// Class name applied to every booking event.
pub const BOOKING_CLASS: &str = "booking-event";

/// Untyped booking fields surfaced to the booking detail panel, as
/// (API field, `extendedProps` key).
const BOOKING_DETAIL_KEYS: [(&str, &str); 7] = [
    ("specialization", "specialization"),
    ("pro_service_id", "proServiceId"),
    ("patient_name", "patientName"),
    ("patient_lastname", "patientLastName"),
    ("status", "status"),
    ("patient_notes", "patientNotes"),
    ("pro_notes", "proNotes"),
];

/// Everything fetched for one professional, as an immutable value.
///
/// The caller re-fetches and passes a fresh snapshot whenever the data
/// changes; nothing here holds on to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    #[serde(default)]
    pub hours: Vec<WorkingHourRecord>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub inactivity: Vec<InactivityRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub title: String,
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    pub class_name: String,
    pub extended_props: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarView {
    pub business_hours: Vec<BusinessHoursBlock>,
    pub events: Vec<CalendarEvent>,
}

/// Turn a booking into a calendar event.
///
/// The end is always recomputed from the booking's start and duration, so a
/// stale `ending_time` from the API never reaches the calendar.
pub fn booking_event(booking: &Booking, rollover: RolloverPolicy) -> Result<CalendarEvent> {
    let resolved = booking.resolve_end()?;
    let end_date = match rollover {
        RolloverPolicy::CarryDate => resolved.ending_date,
        RolloverPolicy::Discard => booking.date,
    };

    let mut props = Map::new();
    props.insert("booking".into(), json!(booking));
    if let Some(id) = booking.id {
        props.insert("id".into(), json!(id));
    }
    props.insert("date".into(), json!(booking.date.to_string()));
    props.insert("startTime".into(), json!(booking.starting_time.to_string()));
    props.insert("endingTime".into(), json!(resolved.ending_time.to_string()));
    if let Some(service) = &booking.service_name {
        props.insert("service".into(), json!(service));
    }
    props.insert("duration".into(), json!(booking.duration.get()));
    for (field, key) in BOOKING_DETAIL_KEYS {
        if let Some(value) = booking.details.get(field) {
            props.insert(key.into(), value.clone());
        }
    }
    props.insert("type".into(), json!("booking"));

    Ok(CalendarEvent {
        title: booking.service_name.clone().unwrap_or_default(),
        start: format!("{}T{}", booking.date, booking.starting_time.to_hms_string()),
        end: Some(format!("{}T{}", end_date, resolved.ending_time)),
        class_name: BOOKING_CLASS.to_string(),
        extended_props: props,
    })
}

/// Turn an inactivity record into a calendar event.
///
/// An inverted record is kept as stored unless `options.reject_inverted` is set.
pub fn inactivity_event(record: &InactivityRecord, options: &EngineOptions) -> Result<CalendarEvent> {
    let end = inactivity::resolve_end_with(record, options)?;

    let mut props = Map::new();
    props.insert("type".into(), json!(record.kind.as_str()));
    if let Some(id) = record.id {
        props.insert("id".into(), json!(id));
    }

    Ok(CalendarEvent {
        title: record.title.clone().unwrap_or_default(),
        start: inactivity::resolve_start(record).to_string(),
        end: end.map(|e| e.to_string()),
        class_name: record.kind.class_name().to_string(),
        extended_props: props,
    })
}

/// Build the full calendar view: business hours plus booking and inactivity
/// events, bookings first, each group in snapshot order.
pub fn build_calendar(snapshot: &ScheduleSnapshot, options: &EngineOptions) -> Result<CalendarView> {
    let business_hours = reduce_business_hours(&snapshot.hours);

    let mut events = Vec::with_capacity(snapshot.bookings.len() + snapshot.inactivity.len());
    for booking in &snapshot.bookings {
        events.push(booking_event(booking, options.booking_rollover)?);
    }
    for record in &snapshot.inactivity {
        events.push(inactivity_event(record, options)?);
    }

    debug!(
        blocks = business_hours.len(),
        bookings = snapshot.bookings.len(),
        inactivity = snapshot.inactivity.len(),
        "built calendar view"
    );

    Ok(CalendarView {
        business_hours,
        events,
    })
}
