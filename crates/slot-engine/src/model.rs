//! Availability data model -- the JSON contract with the availability API and
//! the typed values the engine computes over.
//!
//! The REST endpoint returns `{ availability, bookedSlots, pausedDates }`.
//! [`AvailabilityPayload`] mirrors that shape for serde; [`AvailabilityPayload::resolve`]
//! turns it into an [`Availability`] expressed in the freelancer's wall-clock time.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::slots::Slot;

/// One configured `{start, end}` range of a weekday, as `HH:MM` 24-hour strings.
///
/// The strings are kept raw; the slot engine validates them when it reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotRange {
    pub start: String,
    pub end: String,
}

impl TimeSlotRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Per-weekday configuration: open or closed, plus the ranges offered that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRule {
    /// Lowercase English weekday name (`"monday"` ... `"sunday"`).
    pub day_id: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub time_slot_ranges: Vec<TimeSlotRange>,
}

impl DayRule {
    pub fn new(day_id: impl Into<String>, available: bool, ranges: &[(&str, &str)]) -> Self {
        Self {
            day_id: day_id.into(),
            available,
            time_slot_ranges: ranges
                .iter()
                .map(|(start, end)| TimeSlotRange::new(*start, *end))
                .collect(),
        }
    }

    /// Whether this rule is for `weekday`. Matching is case-insensitive on the full name.
    pub fn applies_to(&self, weekday: Weekday) -> bool {
        self.day_id.trim().eq_ignore_ascii_case(weekday_name(weekday))
    }
}

/// Outcome of looking up a weekday in a [`WeeklyAvailability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayGate<'a> {
    /// No rules are configured at all. The day is not closed, but has no ranges.
    Unconfigured,
    /// The weekday has no rule, or its rule is marked unavailable.
    Closed,
    /// The weekday is open with the given rule.
    Open(&'a DayRule),
}

/// The weekly availability configuration: at most one [`DayRule`] per weekday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyAvailability {
    pub rules: Vec<DayRule>,
}

impl WeeklyAvailability {
    pub fn new(rules: Vec<DayRule>) -> Self {
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule whose `day_id` names `weekday`. Unknown `day_id` values never match.
    pub fn rule_for(&self, weekday: Weekday) -> Option<&DayRule> {
        self.rules.iter().find(|rule| rule.applies_to(weekday))
    }

    /// Apply the default-closed policy: once anything is configured, a weekday
    /// without a rule is closed.
    pub fn gate(&self, weekday: Weekday) -> DayGate<'_> {
        if self.is_empty() {
            return DayGate::Unconfigured;
        }
        match self.rule_for(weekday) {
            Some(rule) if rule.available => DayGate::Open(rule),
            _ => DayGate::Closed,
        }
    }
}

/// Lowercase English name of a weekday, as used in `dayId`.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// An existing booking, in the freelancer's wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A booked interval as it arrives over the wire (ISO 8601 strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlotInput {
    pub start: String,
    pub end: String,
}

/// The availability API response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPayload {
    #[serde(default)]
    pub availability: Vec<DayRule>,
    #[serde(default)]
    pub booked_slots: Vec<BookedSlotInput>,
    #[serde(default)]
    pub paused_dates: Vec<String>,
}

impl AvailabilityPayload {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve wire strings into typed values in the `tz` wall clock.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidPayload` for an unparseable booking timestamp or a
    /// booking that ends before it starts, and `SlotError::InvalidDate` for a
    /// paused date that is not `YYYY-MM-DD`.
    pub fn resolve(&self, tz: Tz) -> Result<Availability> {
        let booked = self
            .booked_slots
            .iter()
            .map(|slot| {
                let start = parse_wall_clock(&slot.start, tz)?;
                let end = parse_wall_clock(&slot.end, tz)?;
                if end < start {
                    return Err(SlotError::InvalidPayload(format!(
                        "booking ends before it starts: {} > {}",
                        slot.start, slot.end
                    )));
                }
                Ok(BookedInterval { start, end })
            })
            .collect::<Result<Vec<_>>>()?;

        let paused = self
            .paused_dates
            .iter()
            .map(|d| parse_date(d))
            .collect::<Result<BTreeSet<_>>>()?;

        Ok(Availability {
            weekly: WeeklyAvailability::new(self.availability.clone()),
            booked,
            paused,
        })
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| SlotError::InvalidDate(s.to_string()))
}

/// Parse an ISO 8601 timestamp into wall-clock time in `tz`.
///
/// RFC 3339 strings (with an offset or `Z`) are converted into `tz`. Naive
/// `YYYY-MM-DDTHH:MM[:SS]` strings are already wall-clock time and kept as-is.
pub fn parse_wall_clock(s: &str, tz: Tz) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&tz).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| SlotError::InvalidPayload(format!("invalid datetime '{}'", s)))
}

/// Parse an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Everything the engine needs about one freelancer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    pub weekly: WeeklyAvailability,
    pub booked: Vec<BookedInterval>,
    pub paused: BTreeSet<NaiveDate>,
}

impl Availability {
    /// The state used when nothing is configured or the fetch failed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_paused(&self, date: NaiveDate) -> bool {
        self.paused.contains(&date)
    }
}

/// A booking request packaged for checkout once the client picks a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub date: NaiveDate,
    pub time_slot_label: String,
    pub duration_minutes: u32,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BookingDraft {
    pub fn for_slot(
        slot: &Slot,
        duration_minutes: u32,
        location: impl Into<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            date: slot.date,
            time_slot_label: slot.label(),
            duration_minutes,
            location: location.into(),
            notes,
        }
    }
}

/// What the calendar widget hands back on Apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AvailabilityEdit {
    #[serde(rename_all = "camelCase")]
    Range {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    #[serde(rename_all = "camelCase")]
    Paused { paused_dates: Vec<NaiveDate> },
}
