//! WASM bindings for schedule-engine.
//!
//! Exposes business-hours reduction, booking and inactivity resolution,
//! calendar assembly, patient search, holiday seeding and business-hours
//! expansion to the browser via `wasm-bindgen`. All complex types cross the
//! boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p schedule-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/schedule-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/schedule_engine_wasm.wasm
//! ```

pub mod json;

use wasm_bindgen::prelude::*;

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Reduce a working-hours table to `businessHours` blocks.
///
/// `hours_json` is an array of working-hour records. Returns an array of
/// `{daysOfWeek, startTime, endTime}` objects.
#[wasm_bindgen(js_name = "reduceBusinessHours")]
pub fn reduce_business_hours(hours_json: &str) -> Result<String, JsValue> {
    json::reduce_business_hours(hours_json).map_err(js_error)
}

/// Compute a booking's end.
///
/// Returns `{ending_date, ending_time, days_rolled}`; `ending_time` alone is
/// the value stored on the booking.
#[wasm_bindgen(js_name = "resolveBookingEnd")]
pub fn resolve_booking_end(
    date: &str,
    starting_time: &str,
    duration_minutes: &str,
) -> Result<String, JsValue> {
    json::resolve_booking_end(date, starting_time, duration_minutes).map_err(js_error)
}

/// Resolve the display `{start, end}` of one inactivity record.
///
/// `options_json` may be empty for defaults, or e.g.
/// `{"inactivity_range": "strict", "reject_inverted": true}`.
#[wasm_bindgen(js_name = "resolveInactivityEnd")]
pub fn resolve_inactivity_end(record_json: &str, options_json: &str) -> Result<String, JsValue> {
    json::resolve_inactivity_end(record_json, options_json).map_err(js_error)
}

/// Build `{businessHours, events}` from a `{hours, bookings, inactivity}` snapshot.
#[wasm_bindgen(js_name = "buildCalendar")]
pub fn build_calendar(snapshot_json: &str, options_json: &str) -> Result<String, JsValue> {
    json::build_calendar(snapshot_json, options_json).map_err(js_error)
}

#[wasm_bindgen(js_name = "filterPatients")]
pub fn filter_patients(patients_json: &str, query: &str) -> Result<String, JsValue> {
    json::filter_patients(patients_json, query).map_err(js_error)
}

/// Turn a holiday lookup payload into `nHoliday` records, unless the
/// professional already has inactivity.
#[wasm_bindgen(js_name = "seedHolidays")]
pub fn seed_holidays(existing_json: &str, lookup_json: &str, pro_id: i32) -> Result<String, JsValue> {
    json::seed_holidays(existing_json, lookup_json, i64::from(pro_id)).map_err(js_error)
}

#[wasm_bindgen(js_name = "expandBusinessHours")]
pub fn expand_business_hours(
    hours_json: &str,
    from: &str,
    to: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    json::expand_business_hours(hours_json, from, to, timezone).map_err(js_error)
}
