//! Date-level availability: whether a calendar date can be booked at all.
//!
//! This layer sits in front of slot generation. A paused or closed date never
//! reaches [`generate_slots`].

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

use crate::error::Result;
use crate::model::{Availability, DayGate, WeeklyAvailability};
use crate::slots::{generate_slots, Slot};

/// The weekday gate alone: closed when the config is non-empty and the weekday
/// is missing or marked unavailable.
pub fn day_is_open(date: NaiveDate, weekly: &WeeklyAvailability) -> bool {
    !matches!(weekly.gate(date.weekday()), DayGate::Closed)
}

/// Whether `date` is selectable in the booking calendar.
///
/// False for past dates, paused dates, and weekdays closed by the weekly rules.
pub fn is_date_open(date: NaiveDate, availability: &Availability, today: NaiveDate) -> bool {
    date >= today && !availability.is_paused(date) && day_is_open(date, &availability.weekly)
}

/// Open dates in `[from, from + days)`, ascending.
pub fn open_dates(
    availability: &Availability,
    from: NaiveDate,
    days: u32,
    today: NaiveDate,
) -> Vec<NaiveDate> {
    (0..i64::from(days))
        .filter_map(|offset| from.checked_add_signed(Duration::days(offset)))
        .filter(|date| is_date_open(*date, availability, today))
        .collect()
}

impl Availability {
    /// Slots for `date`, or nothing if the date itself is not open.
    pub fn slots_for(&self, date: NaiveDate, now: NaiveDateTime) -> Result<Vec<Slot>> {
        if !is_date_open(date, self, now.date()) {
            return Ok(Vec::new());
        }
        generate_slots(date, &self.weekly, &self.booked, now)
    }
}
