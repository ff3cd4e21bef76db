//! WASM bindings for slot-engine.
//!
//! Exposes slot generation, the open-date gate and the calendar selector to the
//! JavaScript booking UI via `wasm-bindgen`. Complex values cross the boundary as
//! JSON strings; dates are `YYYY-MM-DD` and times are ISO 8601.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::Serialize;
use slot_engine::model::{parse_date, parse_timezone, parse_wall_clock};
use slot_engine::pause::PauseSelection;
use slot_engine::range::RangeSelection;
use slot_engine::{Availability, AvailabilityPayload, DateRangeSelector};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: boundary parsing
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn tz(name: &str) -> Result<Tz, JsValue> {
    parse_timezone(name).map_err(js_err)
}

fn date(s: &str) -> Result<NaiveDate, JsValue> {
    parse_date(s).map_err(js_err)
}

fn wall_clock(s: &str, zone: Tz) -> Result<NaiveDateTime, JsValue> {
    parse_wall_clock(s, zone).map_err(js_err)
}

/// Parse the availability API response body and resolve it in `zone`.
fn availability(payload_json: &str, zone: Tz) -> Result<Availability, JsValue> {
    AvailabilityPayload::from_json(payload_json)
        .and_then(|payload| payload.resolve(zone))
        .map_err(js_err)
}

// ---------------------------------------------------------------------------
// WASM exports: slots and dates
// ---------------------------------------------------------------------------

/// Bookable slots for `date`.
///
/// `payload_json` is the availability API body (`{availability, bookedSlots,
/// pausedDates}`). `now` is the current time, either RFC 3339 or naive wall-clock
/// in `timezone`. Returns a JSON array of `{date, hour, label}` objects; a paused,
/// past or closed date yields `[]`.
#[wasm_bindgen(js_name = "generateSlots")]
pub fn generate_slots(
    payload_json: &str,
    date_str: &str,
    now: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    let zone = tz(timezone)?;
    let availability = availability(payload_json, zone)?;
    let slots = availability
        .slots_for(date(date_str)?, wall_clock(now, zone)?)
        .map_err(js_err)?;
    to_json(&slots)
}

/// Whether `date` can be picked in the booking calendar.
#[wasm_bindgen(js_name = "isDateOpen")]
pub fn is_date_open(
    payload_json: &str,
    date_str: &str,
    today: &str,
    timezone: &str,
) -> Result<bool, JsValue> {
    let availability = availability(payload_json, tz(timezone)?)?;
    Ok(slot_engine::is_date_open(
        date(date_str)?,
        &availability,
        date(today)?,
    ))
}

/// Open dates in `[from, from + days)` as a JSON array of `YYYY-MM-DD` strings.
#[wasm_bindgen(js_name = "openDates")]
pub fn open_dates(
    payload_json: &str,
    from: &str,
    days: u32,
    today: &str,
    timezone: &str,
) -> Result<String, JsValue> {
    let availability = availability(payload_json, tz(timezone)?)?;
    let dates = slot_engine::open_dates(&availability, date(from)?, days, date(today)?);
    to_json(&dates)
}

// ---------------------------------------------------------------------------
// WASM exports: calendar selector
// ---------------------------------------------------------------------------

/// The availability-editing calendar's selection state.
#[wasm_bindgen]
pub struct CalendarSelector {
    inner: DateRangeSelector,
}

#[wasm_bindgen]
impl CalendarSelector {
    /// Select mode, opened with optional `start`/`end` dates.
    #[wasm_bindgen(js_name = "range")]
    pub fn range(
        start: Option<String>,
        end: Option<String>,
        fixed_start: bool,
        today: &str,
    ) -> Result<CalendarSelector, JsValue> {
        let start = start.as_deref().map(date).transpose()?;
        let end = end.as_deref().map(date).transpose()?;
        let range = match (fixed_start, start) {
            (true, Some(start)) => RangeSelection::with_fixed_start(start, end),
            (true, None) => return Err(JsValue::from_str("fixed start requires a start date")),
            (false, _) => RangeSelection::new(start, end),
        };
        Ok(Self {
            inner: DateRangeSelector::select(range, date(today)?),
        })
    }

    /// Pause mode. `paused_json` is a JSON array of `YYYY-MM-DD` strings.
    #[wasm_bindgen(js_name = "pause")]
    pub fn pause(
        paused_json: &str,
        window_start: Option<String>,
        window_end: Option<String>,
        today: &str,
    ) -> Result<CalendarSelector, JsValue> {
        let raw: Vec<String> = serde_json::from_str(paused_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid paused dates JSON: {}", e)))?;
        let paused = raw.iter().map(|d| date(d)).collect::<Result<Vec<_>, _>>()?;
        let window = match (window_start, window_end) {
            (Some(start), Some(end)) => Some((date(&start)?, date(&end)?)),
            _ => None,
        };
        Ok(Self {
            inner: DateRangeSelector::pause(PauseSelection::new(paused, window), date(today)?),
        })
    }

    pub fn open(&mut self) {
        self.inner.open();
    }

    pub fn close(&mut self) {
        self.inner.close();
    }

    pub fn cancel(&mut self) {
        self.inner.cancel();
    }

    #[wasm_bindgen(js_name = "isOpen")]
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    #[wasm_bindgen(js_name = "isSelectable")]
    pub fn is_selectable(&self, date_str: &str) -> Result<bool, JsValue> {
        Ok(self.inner.is_selectable(date(date_str)?))
    }

    pub fn click(&mut self, date_str: &str) -> Result<bool, JsValue> {
        Ok(self.inner.click(date(date_str)?))
    }

    pub fn hover(&mut self, date_str: &str) -> Result<(), JsValue> {
        self.inner.hover(date(date_str)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(&mut self, date_str: &str) -> Result<bool, JsValue> {
        Ok(self.inner.pointer_down(date(date_str)?))
    }

    #[wasm_bindgen(js_name = "pointerMove")]
    pub fn pointer_move(&mut self, date_str: &str) -> Result<(), JsValue> {
        self.inner.pointer_move(date(date_str)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&mut self) -> bool {
        self.inner.pointer_up()
    }

    #[wasm_bindgen(js_name = "canApply")]
    pub fn can_apply(&self) -> bool {
        self.inner.can_apply()
    }

    /// Commit and close. Returns the edit as JSON, or `undefined` while Apply is disabled.
    pub fn apply(&mut self) -> Result<Option<String>, JsValue> {
        self.inner.apply().map(|edit| to_json(&edit)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "availability": [{"dayId": "monday", "available": true,
                          "timeSlotRanges": [{"start": "09:00", "end": "12:00"}]}],
        "bookedSlots": [{"start": "2024-06-10T10:00:00Z", "end": "2024-06-10T11:00:00Z"}],
        "pausedDates": ["2024-06-17"]
    }"#;

    #[test]
    fn generate_slots_returns_labels_as_json() {
        let json = generate_slots(PAYLOAD, "2024-06-10", "2024-06-01T08:00:00", "UTC").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let labels: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["9:00 AM", "11:00 AM"]);
    }

    #[test]
    fn paused_monday_is_not_open() {
        assert!(is_date_open(PAYLOAD, "2024-06-10", "2024-06-01", "UTC").unwrap());
        assert!(!is_date_open(PAYLOAD, "2024-06-17", "2024-06-01", "UTC").unwrap());
    }

    #[test]
    fn open_dates_lists_mondays_only() {
        let json = open_dates(PAYLOAD, "2024-06-10", 14, "2024-06-01", "UTC").unwrap();
        assert_eq!(json, r#"["2024-06-10"]"#);
    }

    #[test]
    fn range_selector_applies_swapped_range() {
        let mut selector = CalendarSelector::range(None, None, false, "2024-06-01").unwrap();
        selector.open();
        selector.click("2024-06-20").unwrap();
        selector.click("2024-06-12").unwrap();
        assert_eq!(
            selector.apply().unwrap().as_deref(),
            Some(r#"{"startDate":"2024-06-12","endDate":"2024-06-20"}"#)
        );
        assert!(!selector.is_open());
    }

    #[test]
    fn pause_selector_fills_range() {
        let mut selector = CalendarSelector::pause(
            r#"["2024-06-13"]"#,
            Some("2024-06-01".into()),
            Some("2024-06-30".into()),
            "2024-06-01",
        )
        .unwrap();
        selector.click("2024-06-12").unwrap();
        selector.click("2024-06-14").unwrap();
        assert_eq!(
            selector.apply().unwrap().as_deref(),
            Some(r#"{"pausedDates":["2024-06-12","2024-06-13","2024-06-14"]}"#)
        );
    }
}
