//! Native tests for the JSON front end behind the WASM exports.

use schedule_engine_wasm::json;

fn value(s: &str) -> serde_json::Value {
    serde_json::from_str(s).unwrap()
}

#[test]
fn reduce_business_hours_round_trips_json() {
    let out = json::reduce_business_hours(
        r#"[{"working_day": 1, "starting_hour_morning": "09:00", "ending_hour_morning": "12:00"},
            {"working_day": 2, "starting_hour_morning": "09:00", "ending_hour_morning": "12:00"}]"#,
    )
    .unwrap();

    assert_eq!(
        value(&out),
        serde_json::json!([{"daysOfWeek": [1, 2], "startTime": "09:00", "endTime": "12:00"}])
    );
}

#[test]
fn booking_end_reports_rollover() {
    let out = json::resolve_booking_end("2024-03-01", "23:50", "30").unwrap();
    let v = value(&out);

    assert_eq!(v["ending_time"], "00:20:00");
    assert_eq!(v["ending_date"], "2024-03-02");
    assert_eq!(v["days_rolled"], 1);
}

#[test]
fn booking_end_rejects_bad_duration() {
    let err = json::resolve_booking_end("2024-03-01", "09:00", "abc").unwrap_err();
    assert!(err.contains("Invalid duration"));
    assert!(json::resolve_booking_end("2024-03-01", "09:00", "-5").is_err());
}

#[test]
fn inactivity_end_uses_default_options_when_empty() {
    let out = json::resolve_inactivity_end(
        r#"{"starting_date": "2024-12-25", "type": "nHoliday"}"#,
        "",
    )
    .unwrap();

    assert_eq!(value(&out)["end"], "2024-12-25T23:59:59");
}

#[test]
fn inactivity_end_honors_strict_option() {
    let err = json::resolve_inactivity_end(
        r#"{"starting_date": "2024-05-01", "ending_date": "2024-05-02", "ending_hour": "10:00", "type": "pEvent"}"#,
        r#"{"inactivity_range": "strict"}"#,
    )
    .unwrap_err();

    assert!(err.contains("Ambiguous"));
}

#[test]
fn inactivity_end_inverted_only_fails_when_asked() {
    let record = r#"{"starting_date": "2024-12-25", "starting_hour": "15:00", "ending_hour": "14:00", "type": "pEvent"}"#;

    let out = json::resolve_inactivity_end(record, "").unwrap();
    assert_eq!(value(&out)["end"], "2024-12-25T14:00");

    let err = json::resolve_inactivity_end(record, r#"{"reject_inverted": true}"#).unwrap_err();
    assert!(err.contains("Inverted range"));
}

#[test]
fn calendar_view_from_snapshot() {
    let out = json::build_calendar(
        r#"{"bookings": [{"date": "2024-03-04", "starting_time": "10:00", "duration": 15, "service_name": "Consult"}]}"#,
        "",
    )
    .unwrap();
    let v = value(&out);

    assert_eq!(v["events"][0]["title"], "Consult");
    assert_eq!(v["events"][0]["end"], "2024-03-04T10:15:00");
    assert_eq!(v["businessHours"], serde_json::json!([]));
}

#[test]
fn malformed_json_is_reported() {
    let err = json::build_calendar("{", "").unwrap_err();
    assert!(err.starts_with("Invalid schedule snapshot JSON"));
}

#[test]
fn patients_and_holidays() {
    let found = json::filter_patients(
        r#"[{"name": "Ana", "lastname": "Marín", "email": "", "phone": ""}]"#,
        "ana",
    )
    .unwrap();
    assert_eq!(value(&found).as_array().unwrap().len(), 1);

    let seeded = json::seed_holidays(
        "[]",
        r#"{"holidays": [{"date": "Fri, 06 Jan 2023 00:00:00 GMT", "holiday": "Epiphany"}]}"#,
        3,
    )
    .unwrap();
    assert_eq!(value(&seeded)[0]["starting_date"], "2023-01-06");
}

#[test]
fn expand_business_hours_in_timezone() {
    let out = json::expand_business_hours(
        r#"[{"working_day": 1, "starting_hour_morning": "09:00", "ending_hour_morning": "10:00"}]"#,
        "2024-03-04",
        "2024-03-04",
        "UTC",
    )
    .unwrap();

    assert_eq!(value(&out)[0]["start"], "2024-03-04T09:00:00Z");
}
