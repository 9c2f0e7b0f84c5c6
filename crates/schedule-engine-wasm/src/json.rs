//! JSON-string front end shared by the WASM exports.
//!
//! Every function takes and returns JSON text and reports failures as plain
//! strings, so it can be exercised natively without a JavaScript host.

use schedule_engine::time::{parse_date, DurationMinutes, TimeOfDay};
use schedule_engine::{
    calendar, inactivity, EngineOptions, HolidayLookup, InactivityRecord, Patient,
    ScheduleSnapshot, WorkingHourRecord,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub type JsonResult = Result<String, String>;

#[derive(Serialize)]
struct BookingEndDto {
    ending_date: String,
    ending_time: String,
    days_rolled: i64,
}

#[derive(Serialize)]
struct InactivitySpanDto {
    start: String,
    end: Option<String>,
}

fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn render<T: Serialize + ?Sized>(value: &T) -> JsonResult {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

/// Options from JSON; an empty string means defaults.
fn parse_options(options_json: &str) -> Result<EngineOptions, String> {
    if options_json.trim().is_empty() {
        return Ok(EngineOptions::default());
    }
    parse(options_json, "options")
}

pub fn reduce_business_hours(hours_json: &str) -> JsonResult {
    let records: Vec<WorkingHourRecord> = parse(hours_json, "working hours")?;
    render(&schedule_engine::reduce_business_hours(&records))
}

pub fn resolve_booking_end(date: &str, starting_time: &str, duration_minutes: &str) -> JsonResult {
    let date = parse_date(date).map_err(|e| e.to_string())?;
    let start = TimeOfDay::parse(starting_time).map_err(|e| e.to_string())?;
    let duration = duration_minutes
        .parse::<DurationMinutes>()
        .map_err(|e| e.to_string())?;
    let resolved = schedule_engine::resolve_end_with_rollover(date, start, duration)
        .map_err(|e| e.to_string())?;
    render(&BookingEndDto {
        ending_date: resolved.ending_date.to_string(),
        ending_time: resolved.ending_time.to_string(),
        days_rolled: resolved.days_rolled,
    })
}

pub fn resolve_inactivity_end(record_json: &str, options_json: &str) -> JsonResult {
    let record: InactivityRecord = parse(record_json, "inactivity")?;
    let options = parse_options(options_json)?;
    let end = inactivity::resolve_end_with(&record, &options).map_err(|e| e.to_string())?;
    render(&InactivitySpanDto {
        start: inactivity::resolve_start(&record).to_string(),
        end: end.map(|e| e.to_string()),
    })
}

pub fn build_calendar(snapshot_json: &str, options_json: &str) -> JsonResult {
    let snapshot: ScheduleSnapshot = parse(snapshot_json, "schedule snapshot")?;
    let options = parse_options(options_json)?;
    let view = calendar::build_calendar(&snapshot, &options).map_err(|e| e.to_string())?;
    render(&view)
}

pub fn filter_patients(patients_json: &str, query: &str) -> JsonResult {
    let patients: Vec<Patient> = parse(patients_json, "patients")?;
    render(&schedule_engine::filter_patients(&patients, query))
}

pub fn seed_holidays(existing_json: &str, lookup_json: &str, pro_id: i64) -> JsonResult {
    let existing: Vec<InactivityRecord> = parse(existing_json, "inactivity")?;
    let lookup: HolidayLookup = parse(lookup_json, "holiday lookup")?;
    let seeded = schedule_engine::seed_national_holidays(&existing, &lookup, pro_id)
        .map_err(|e| e.to_string())?;
    render(&seeded)
}

pub fn expand_business_hours(hours_json: &str, from: &str, to: &str, timezone: &str) -> JsonResult {
    let records: Vec<WorkingHourRecord> = parse(hours_json, "working hours")?;
    let from = parse_date(from).map_err(|e| e.to_string())?;
    let to = parse_date(to).map_err(|e| e.to_string())?;
    let blocks = schedule_engine::reduce_business_hours(&records);
    let instances = schedule_engine::expand_business_hours(&blocks, from, to, timezone)
        .map_err(|e| e.to_string())?;
    render(&instances)
}
