//! Tests for inactivity (holiday / absence / private event) span resolution.

use schedule_engine::inactivity::{
    check_order, resolve_end, resolve_end_with, resolve_start, InactivityKind, InactivityRecord,
};
use schedule_engine::options::{EngineOptions, RangePolicy};
use schedule_engine::ScheduleError;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn record(json: serde_json::Value) -> InactivityRecord {
    serde_json::from_value(json).unwrap()
}

fn end(json: serde_json::Value) -> String {
    resolve_end(&record(json), RangePolicy::default())
        .unwrap()
        .unwrap()
        .to_string()
}

// ── Decision table ──────────────────────────────────────────────────────────

#[test]
fn no_ending_fields_ends_at_end_of_starting_day() {
    let e = end(serde_json::json!({"starting_date": "2024-12-25", "type": "nHoliday"}));
    assert_eq!(e, "2024-12-25T23:59:59");
}

#[test]
fn ending_date_only_ends_at_end_of_that_day() {
    let e = end(serde_json::json!({
        "starting_date": "2024-08-01",
        "ending_date": "2024-08-15",
        "type": "pHoliday"
    }));
    assert_eq!(e, "2024-08-15T23:59:59");
}

#[test]
fn ending_hour_only_ends_on_starting_day() {
    let e = end(serde_json::json!({
        "starting_date": "2024-12-25",
        "ending_hour": "14:00",
        "type": "pEvent"
    }));
    assert_eq!(e, "2024-12-25T14:00");
}

#[test]
fn both_ending_fields_fill_gap_by_default() {
    let e = end(serde_json::json!({
        "starting_date": "2024-05-01",
        "starting_hour": "09:00",
        "ending_date": "2024-05-03",
        "ending_hour": "13:30",
        "type": "pEvent"
    }));
    assert_eq!(e, "2024-05-03T13:30");
}

#[test]
fn both_ending_fields_are_ambiguous_under_strict() {
    let r = record(serde_json::json!({
        "starting_date": "2024-05-01",
        "ending_date": "2024-05-03",
        "ending_hour": "13:30",
        "type": "pEvent"
    }));

    let err = resolve_end(&r, RangePolicy::Strict).unwrap_err();

    assert!(matches!(err, ScheduleError::AmbiguousInactivityRange { .. }));
    assert!(!err.is_invalid_input());
}

#[test]
fn both_ending_fields_yield_nothing_under_legacy() {
    let r = record(serde_json::json!({
        "starting_date": "2024-05-01",
        "ending_date": "2024-05-03",
        "ending_hour": "13:30",
        "type": "pEvent"
    }));

    assert_eq!(resolve_end(&r, RangePolicy::Legacy).unwrap(), None);
}

#[test]
fn legacy_policy_leaves_other_rows_alone() {
    let r = record(serde_json::json!({"starting_date": "2024-12-25", "type": "nHoliday"}));
    let e = resolve_end(&r, RangePolicy::Legacy).unwrap().unwrap();
    assert_eq!(e.to_string(), "2024-12-25T23:59:59");
}

#[test]
fn empty_strings_count_as_absent() {
    let e = end(serde_json::json!({
        "starting_date": "2024-12-25",
        "starting_hour": "",
        "ending_date": "",
        "ending_hour": null,
        "type": "nHoliday"
    }));
    assert_eq!(e, "2024-12-25T23:59:59");
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn ending_hour_before_starting_hour_passes_through() {
    let e = end(serde_json::json!({
        "starting_date": "2024-12-25",
        "starting_hour": "15:00",
        "ending_hour": "14:00",
        "type": "pEvent"
    }));
    assert_eq!(e, "2024-12-25T14:00");
}

#[test]
fn ending_date_before_starting_date_passes_through() {
    let e = end(serde_json::json!({
        "starting_date": "2024-05-10",
        "ending_date": "2024-05-01",
        "type": "pHoliday"
    }));
    assert_eq!(e, "2024-05-01T23:59:59");
}

#[test]
fn order_check_refuses_inverted_range() {
    let r = record(serde_json::json!({
        "starting_date": "2024-05-10",
        "ending_date": "2024-05-01",
        "type": "pHoliday"
    }));
    let e = resolve_end(&r, RangePolicy::FillGap).unwrap().unwrap();

    let err = check_order(&r, &e).unwrap_err();

    assert!(matches!(err, ScheduleError::InvertedRange { .. }));
    assert!(err.is_invalid_input());
}

#[test]
fn reject_inverted_option_applies_order_check() {
    let r = record(serde_json::json!({
        "starting_date": "2024-12-25",
        "starting_hour": "15:00",
        "ending_hour": "14:00",
        "type": "pEvent"
    }));
    let strict = EngineOptions {
        reject_inverted: true,
        ..EngineOptions::default()
    };

    assert!(resolve_end_with(&r, &EngineOptions::default()).is_ok());
    assert!(matches!(
        resolve_end_with(&r, &strict),
        Err(ScheduleError::InvertedRange { .. })
    ));
}

#[test]
fn order_check_accepts_same_day_span() {
    let r = record(serde_json::json!({
        "starting_date": "2024-12-25",
        "starting_hour": "10:00",
        "ending_hour": "11:00",
        "type": "pEvent"
    }));
    let e = resolve_end(&r, RangePolicy::FillGap).unwrap().unwrap();
    assert!(check_order(&r, &e).is_ok());
}

#[test]
fn malformed_dates_fail_to_parse() {
    let raw = serde_json::json!({"starting_date": "25/12/2024", "type": "nHoliday"});
    assert!(serde_json::from_value::<InactivityRecord>(raw).is_err());

    let raw = serde_json::json!({"starting_date": "2024-12-25", "ending_hour": "2pm", "type": "pEvent"});
    assert!(serde_json::from_value::<InactivityRecord>(raw).is_err());
}

#[test]
fn unknown_type_fails_to_parse() {
    let raw = serde_json::json!({"starting_date": "2024-12-25", "type": "Holiday"});
    assert!(serde_json::from_value::<InactivityRecord>(raw).is_err());
}

// ── Start and kinds ─────────────────────────────────────────────────────────

#[test]
fn start_defaults_to_midnight() {
    let r = record(serde_json::json!({"starting_date": "2024-12-25", "type": "nHoliday"}));
    assert_eq!(resolve_start(&r).to_string(), "2024-12-25T00:00:00");
}

#[test]
fn start_uses_starting_hour_as_given() {
    let r = record(serde_json::json!({
        "starting_date": "2024-12-25",
        "starting_hour": "10:30",
        "type": "pEvent"
    }));
    assert_eq!(resolve_start(&r).to_string(), "2024-12-25T10:30");
}

#[test]
fn kinds_map_to_wire_names_and_classes() {
    let cases = [
        (InactivityKind::NationalHoliday, "nHoliday", "bank-holiday"),
        (InactivityKind::PrivateHoliday, "pHoliday", "private-holiday"),
        (InactivityKind::PrivateEvent, "pEvent", "private-event"),
    ];
    for (kind, wire, class) in cases {
        assert_eq!(kind.as_str(), wire);
        assert_eq!(kind.class_name(), class);
        assert_eq!(serde_json::to_value(kind).unwrap(), wire);
    }
}
