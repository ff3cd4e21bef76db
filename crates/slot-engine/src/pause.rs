//! Pause mode: toggling a scattered set of paused dates, with two-click range fill.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::calendar::dates_inclusive;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseSelection {
    paused: BTreeSet<NaiveDate>,
    opened_with: BTreeSet<NaiveDate>,
    window: Option<(NaiveDate, NaiveDate)>,
    anchor: Option<NaiveDate>,
}

impl PauseSelection {
    /// `window` is the freelancer's availability window; `None` leaves every
    /// non-past date toggleable.
    pub fn new(
        paused: impl IntoIterator<Item = NaiveDate>,
        window: Option<(NaiveDate, NaiveDate)>,
    ) -> Self {
        let paused: BTreeSet<NaiveDate> = paused.into_iter().collect();
        Self {
            opened_with: paused.clone(),
            paused,
            window: window.map(|(a, b)| (a.min(b), a.max(b))),
            anchor: None,
        }
    }

    pub fn paused(&self) -> &BTreeSet<NaiveDate> {
        &self.paused
    }

    pub fn is_paused(&self, date: NaiveDate) -> bool {
        self.paused.contains(&date)
    }

    /// First click of an unfinished range fill.
    pub fn anchor(&self) -> Option<NaiveDate> {
        self.anchor
    }

    pub fn window(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.window
    }

    pub fn set_window(&mut self, start: NaiveDate, end: NaiveDate) {
        self.window = Some((start.min(end), start.max(end)));
    }

    fn in_window(&self, date: NaiveDate) -> bool {
        self.window
            .is_none_or(|(start, end)| start <= date && date <= end)
    }

    /// Not in the past, and inside the window or already paused.
    ///
    /// Paused dates stay toggleable after the window shrinks past them.
    pub fn is_selectable(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= today && (self.is_paused(date) || self.in_window(date))
    }

    /// Handle a click. Returns whether the paused set changed.
    pub fn click(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        if !self.is_selectable(date, today) {
            return false;
        }

        if self.paused.remove(&date) {
            if self.anchor == Some(date) {
                self.anchor = None;
            }
            return true;
        }

        match self.anchor.take() {
            None => {
                self.paused.insert(date);
                self.anchor = Some(date);
                true
            }
            Some(anchor) => {
                let before = self.paused.len();
                self.paused.extend(dates_inclusive(anchor, date));
                self.paused.len() != before
            }
        }
    }

    pub fn can_apply(&self) -> bool {
        !self.paused.is_empty()
    }

    pub fn apply(&self) -> Option<Vec<NaiveDate>> {
        self.can_apply()
            .then(|| self.paused.iter().copied().collect())
    }

    /// Drop pending edits and return to the opening set.
    pub fn reset(&mut self) {
        self.paused = self.opened_with.clone();
        self.anchor = None;
    }

    pub fn commit(&mut self) {
        self.opened_with = self.paused.clone();
        self.anchor = None;
    }
}
