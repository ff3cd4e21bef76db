//! Hourly slot generation for a single calendar date.
//!
//! Turns a weekday's configured `HH:MM` ranges into whole-hour, one-hour slots,
//! then removes slots that collide with existing bookings or have already started.
//! The result is sorted by time of day and contains each hour at most once.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::debug;

use crate::error::{Result, SlotError};
use crate::model::{weekday_name, BookedInterval, DayGate, TimeSlotRange, WeeklyAvailability};
use crate::policy::NoonEndPolicy;

/// A bookable one-hour window starting on the hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub date: NaiveDate,
    /// Start hour, `0..=23`.
    pub hour: u32,
}

impl Slot {
    pub fn new(date: NaiveDate, hour: u32) -> Self {
        Self {
            date,
            hour: hour % 24,
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(self.hour))
    }

    pub fn end(&self) -> NaiveDateTime {
        self.start() + Duration::hours(1)
    }

    /// 12-hour clock label, e.g. `"6:00 PM"`.
    pub fn label(&self) -> String {
        hour_label(self.hour)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Slot", 3)?;
        s.serialize_field("date", &self.date)?;
        s.serialize_field("hour", &self.hour)?;
        s.serialize_field("label", &self.label())?;
        s.end()
    }
}

/// Format an hour of the day (taken mod 24) on a 12-hour clock.
pub fn hour_label(hour: u32) -> String {
    let hour = hour % 24;
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let twelve = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:00 {}", twelve, suffix)
}

/// Two intervals overlap iff `slot.start < booking.end && slot.end > booking.start`.
///
/// Back-to-back intervals that share an endpoint do NOT overlap.
pub fn overlaps(slot: &Slot, booking: &BookedInterval) -> bool {
    slot.start() < booking.end && slot.end() > booking.start
}

/// Strict `HH:MM`: two-digit fields, no padding.
fn is_hh_mm(value: &str) -> bool {
    match value.as_bytes() {
        [h1, h2, b':', m1, m2] => [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit()),
        _ => false,
    }
}

fn parse_clock(value: &str, day: &str) -> Result<(u32, u32)> {
    let invalid = || SlotError::InvalidAvailabilityConfig {
        day: day.to_string(),
        value: value.to_string(),
    };
    if !is_hh_mm(value) {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .map(|t| (t.hour(), t.minute()))
        .map_err(|_| invalid())
}

/// Start hours of every whole slot that fits in one configured range.
///
/// `day` is only used for error reporting. Hours past midnight from an overnight
/// range are folded back onto `0..=23`.
///
/// # Errors
/// Returns `SlotError::InvalidAvailabilityConfig` if `start` or `end` is not `HH:MM`.
pub fn range_hours(range: &TimeSlotRange, day: &str, policy: NoonEndPolicy) -> Result<Vec<u32>> {
    let (start_hour, start_minute) = parse_clock(&range.start, day)?;
    let (mut end_hour, end_minute) = parse_clock(&range.end, day)?;

    // 00:00 can never be later than the start, so it always means end of day.
    if end_hour == 0 && end_minute == 0 {
        end_hour = 24;
    }

    if policy == NoonEndPolicy::Midnight && start_hour >= 12 && end_hour == 12 && end_minute == 0 {
        end_hour = 24;
    }

    if end_hour < start_hour {
        end_hour += 24;
    }

    let end_minutes = end_hour * 60 + end_minute;
    let mut cursor = if start_minute > 0 {
        start_hour + 1
    } else {
        start_hour
    };

    let mut hours = Vec::new();
    while (cursor + 1) * 60 <= end_minutes {
        hours.push(cursor % 24);
        cursor += 1;
    }
    Ok(hours)
}

/// Generate bookable slots for `target_date`.
///
/// Uses the default [`NoonEndPolicy`]. See [`generate_slots_with_policy`].
pub fn generate_slots(
    target_date: NaiveDate,
    weekly: &WeeklyAvailability,
    booked: &[BookedInterval],
    now: NaiveDateTime,
) -> Result<Vec<Slot>> {
    generate_slots_with_policy(target_date, weekly, booked, now, NoonEndPolicy::default())
}

/// Generate bookable slots for `target_date` with an explicit noon-end policy.
///
/// `now` is the current wall-clock time in the freelancer's timezone. Paused dates
/// are not consulted here; see [`crate::dates`] for the date-level gate.
///
/// Returns an empty list when the weekday is closed or has no ranges.
///
/// # Errors
/// Returns `SlotError::InvalidAvailabilityConfig` if any range of the day's rule
/// is not `HH:MM`.
pub fn generate_slots_with_policy(
    target_date: NaiveDate,
    weekly: &WeeklyAvailability,
    booked: &[BookedInterval],
    now: NaiveDateTime,
    policy: NoonEndPolicy,
) -> Result<Vec<Slot>> {
    let weekday = target_date.weekday();
    let rule = match weekly.gate(weekday) {
        DayGate::Closed => {
            debug!(date = %target_date, weekday = weekday_name(weekday), "day closed");
            return Ok(Vec::new());
        }
        DayGate::Unconfigured => {
            debug!(date = %target_date, "no weekly availability configured");
            return Ok(Vec::new());
        }
        DayGate::Open(rule) => rule,
    };

    let mut hours = BTreeSet::new();
    for range in &rule.time_slot_ranges {
        hours.extend(range_hours(range, &rule.day_id, policy)?);
    }

    let is_today = target_date == now.date();
    let slots: Vec<Slot> = hours
        .into_iter()
        .map(|hour| Slot::new(target_date, hour))
        .filter(|slot| !booked.iter().any(|b| overlaps(slot, b)))
        .filter(|slot| !is_today || slot.start() > now)
        .collect();

    debug!(date = %target_date, count = slots.len(), "generated slots");
    Ok(slots)
}
