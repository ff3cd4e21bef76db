//! Tests for the availability payload contract and resolution into wall-clock values.

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use chrono_tz::Tz;
use slot_engine::model::{
    parse_timezone, parse_wall_clock, AvailabilityEdit, AvailabilityPayload, BookingDraft,
    DayGate, DayRule, WeeklyAvailability,
};
use slot_engine::{Slot, SlotError};

const PAYLOAD: &str = r#"{
    "availability": [
        {"dayId": "monday", "available": true,
         "timeSlotRanges": [{"start": "09:00", "end": "12:00"}, {"start": "18:00", "end": "00:00"}]},
        {"dayId": "sunday", "available": false, "timeSlotRanges": []}
    ],
    "bookedSlots": [
        {"start": "2024-06-10T04:30:00.000Z", "end": "2024-06-10T05:30:00.000Z"},
        {"start": "2024-06-10T18:00", "end": "2024-06-10T19:00"}
    ],
    "pausedDates": ["2024-06-17", "2024-06-24"]
}"#;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
}

#[test]
fn payload_deserializes_camel_case_fields() {
    let payload = AvailabilityPayload::from_json(PAYLOAD).unwrap();
    assert_eq!(payload.availability.len(), 2);
    assert_eq!(payload.availability[0].day_id, "monday");
    assert_eq!(payload.availability[0].time_slot_ranges.len(), 2);
    assert_eq!(payload.booked_slots.len(), 2);
    assert_eq!(payload.paused_dates, vec!["2024-06-17", "2024-06-24"]);
}

#[test]
fn missing_payload_fields_default_to_empty() {
    let payload = AvailabilityPayload::from_json("{}").unwrap();
    let resolved = payload.resolve(Tz::UTC).unwrap();
    assert!(resolved.weekly.is_empty());
    assert!(resolved.booked.is_empty());
    assert!(resolved.paused.is_empty());
}

#[test]
fn offset_timestamps_convert_into_freelancer_timezone() {
    let tz: Tz = "Asia/Kolkata".parse().unwrap();
    let resolved = AvailabilityPayload::from_json(PAYLOAD)
        .unwrap()
        .resolve(tz)
        .unwrap();

    // 04:30Z is 10:00 in IST (+05:30).
    assert_eq!(resolved.booked[0].start, at("2024-06-10T10:00"));
    assert_eq!(resolved.booked[0].end, at("2024-06-10T11:00"));
    // Naive timestamps are already wall-clock.
    assert_eq!(resolved.booked[1].start, at("2024-06-10T18:00"));
    assert!(resolved.is_paused(date("2024-06-17")));
}

#[test]
fn resolved_payload_drives_slot_generation() {
    let tz: Tz = "Asia/Kolkata".parse().unwrap();
    let resolved = AvailabilityPayload::from_json(PAYLOAD)
        .unwrap()
        .resolve(tz)
        .unwrap();

    let slots = resolved
        .slots_for(date("2024-06-10"), at("2024-06-01T00:00"))
        .unwrap();
    let labels: Vec<String> = slots.iter().map(Slot::label).collect();
    assert_eq!(
        labels,
        vec!["9:00 AM", "11:00 AM", "7:00 PM", "8:00 PM", "9:00 PM", "10:00 PM", "11:00 PM"]
    );
}

#[test]
fn malformed_booking_timestamp_is_rejected() {
    let payload = AvailabilityPayload::from_json(
        r#"{"bookedSlots": [{"start": "tomorrow", "end": "2024-06-10T10:00"}]}"#,
    )
    .unwrap();
    assert!(matches!(
        payload.resolve(Tz::UTC),
        Err(SlotError::InvalidPayload(_))
    ));
}

#[test]
fn reversed_booking_is_rejected() {
    let payload = AvailabilityPayload::from_json(
        r#"{"bookedSlots": [{"start": "2024-06-10T11:00", "end": "2024-06-10T10:00"}]}"#,
    )
    .unwrap();
    assert!(payload.resolve(Tz::UTC).is_err());
}

#[test]
fn malformed_paused_date_is_rejected() {
    let payload = AvailabilityPayload::from_json(r#"{"pausedDates": ["17/06/2024"]}"#).unwrap();
    assert!(matches!(
        payload.resolve(Tz::UTC),
        Err(SlotError::InvalidDate(_))
    ));
}

#[test]
fn invalid_json_is_a_json_error() {
    assert!(matches!(
        AvailabilityPayload::from_json("{not json"),
        Err(SlotError::Json(_))
    ));
}

#[test]
fn parse_wall_clock_accepts_seconds_and_minutes() {
    assert_eq!(
        parse_wall_clock("2024-06-10T09:00:00", Tz::UTC).unwrap(),
        at("2024-06-10T09:00")
    );
    assert_eq!(
        parse_wall_clock("2024-06-10T09:00", Tz::UTC).unwrap(),
        at("2024-06-10T09:00")
    );
}

#[test]
fn unknown_timezone_is_rejected() {
    assert!(matches!(
        parse_timezone("Mars/Olympus"),
        Err(SlotError::InvalidTimezone(_))
    ));
    assert!(parse_timezone("Europe/London").is_ok());
}

#[test]
fn gate_distinguishes_unconfigured_closed_and_open() {
    assert_eq!(WeeklyAvailability::default().gate(Weekday::Mon), DayGate::Unconfigured);

    let weekly = WeeklyAvailability::new(vec![
        DayRule::new("monday", true, &[("09:00", "10:00")]),
        DayRule::new("tuesday", false, &[]),
    ]);
    assert!(matches!(weekly.gate(Weekday::Mon), DayGate::Open(_)));
    assert_eq!(weekly.gate(Weekday::Tue), DayGate::Closed);
    assert_eq!(weekly.gate(Weekday::Wed), DayGate::Closed);
}

#[test]
fn unknown_day_id_never_matches() {
    let weekly = WeeklyAvailability::new(vec![DayRule::new("mon", true, &[("09:00", "10:00")])]);
    assert!(weekly.rule_for(Weekday::Mon).is_none());
}

#[test]
fn booking_draft_carries_slot_label() {
    let slot = Slot::new(date("2024-06-10"), 18);
    let draft = BookingDraft::for_slot(&slot, 60, "Nets, Oval ground", None);
    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(json["date"], "2024-06-10");
    assert_eq!(json["timeSlotLabel"], "6:00 PM");
    assert_eq!(json["durationMinutes"], 60);
    assert_eq!(json["location"], "Nets, Oval ground");
    assert!(json.get("notes").is_none());
}

#[test]
fn slot_serializes_with_label() {
    let json = serde_json::to_value(Slot::new(date("2024-06-10"), 9)).unwrap();
    assert_eq!(json["date"], "2024-06-10");
    assert_eq!(json["hour"], 9);
    assert_eq!(json["label"], "9:00 AM");
}

#[test]
fn edits_serialize_to_api_shapes() {
    let range = AvailabilityEdit::Range {
        start_date: date("2024-06-10"),
        end_date: date("2024-06-20"),
    };
    assert_eq!(
        serde_json::to_string(&range).unwrap(),
        r#"{"startDate":"2024-06-10","endDate":"2024-06-20"}"#
    );

    let paused = AvailabilityEdit::Paused {
        paused_dates: vec![date("2024-06-12"), date("2024-06-13")],
    };
    assert_eq!(
        serde_json::to_string(&paused).unwrap(),
        r#"{"pausedDates":["2024-06-12","2024-06-13"]}"#
    );
}
