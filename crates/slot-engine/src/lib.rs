//! # slot-engine
//!
//! Booking-slot generation and calendar range selection for freelancer availability.
//!
//! A freelancer publishes a weekly availability (per-weekday open/closed flag
//! plus `HH:MM` ranges), a list of existing bookings, and a set of paused dates.
//! This crate turns that into the one-hour slots a client can book on a given
//! day, and drives the calendar widget used to edit availability.
//!
//! ## Modules
//!
//! - [`model`] — Availability payload, day rules, bookings, edits
//! - [`slots`] — Weekly rules + bookings → ordered one-hour slots for a date
//! - [`dates`] — Whether a date is bookable at all (past, paused, closed)
//! - [`policy`] — Interpretation of ambiguous `12:00` range ends
//! - [`calendar`] — Month arithmetic and lazy month pagination
//! - [`range`] — Select-mode state machine (click, hover, drag)
//! - [`pause`] — Pause-mode toggling and range fill
//! - [`selector`] — The widget: mode, open/close, apply/cancel
//! - [`loader`] — Fetch lifecycle with stale-response discarding
//! - [`error`] — Error types

pub mod calendar;
pub mod dates;
pub mod error;
pub mod loader;
pub mod model;
pub mod pause;
pub mod policy;
pub mod range;
pub mod selector;
pub mod slots;

pub use dates::{is_date_open, open_dates};
pub use error::SlotError;
pub use model::{
    Availability, AvailabilityEdit, AvailabilityPayload, BookedInterval, BookingDraft, DayRule,
    TimeSlotRange, WeeklyAvailability,
};
pub use policy::NoonEndPolicy;
pub use selector::{DateRangeSelector, SelectorMode};
pub use slots::{generate_slots, generate_slots_with_policy, Slot};
