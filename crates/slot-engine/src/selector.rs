//! The calendar widget's selection state, in either Select or Pause mode.
//!
//! The selector owns the open/closed flag but not any global modal state: the
//! caller passes an `on_open_change` callback and reacts to it (scroll lock etc.).

use std::fmt;

use chrono::NaiveDate;
use tracing::debug;

use crate::model::AvailabilityEdit;
use crate::pause::PauseSelection;
use crate::range::RangeSelection;

/// The two mutually exclusive selection modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorMode {
    Select(RangeSelection),
    Pause(PauseSelection),
}

pub type OpenChangeCallback = Box<dyn FnMut(bool)>;

pub struct DateRangeSelector {
    mode: SelectorMode,
    today: NaiveDate,
    open: bool,
    on_open_change: Option<OpenChangeCallback>,
}

impl fmt::Debug for DateRangeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateRangeSelector")
            .field("mode", &self.mode)
            .field("today", &self.today)
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

impl DateRangeSelector {
    pub fn new(mode: SelectorMode, today: NaiveDate) -> Self {
        Self {
            mode,
            today,
            open: false,
            on_open_change: None,
        }
    }

    pub fn select(range: RangeSelection, today: NaiveDate) -> Self {
        Self::new(SelectorMode::Select(range), today)
    }

    pub fn pause(pause: PauseSelection, today: NaiveDate) -> Self {
        Self::new(SelectorMode::Pause(pause), today)
    }

    /// Called with `true` when the widget opens and `false` when it closes.
    pub fn on_open_change(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_open_change = Some(Box::new(callback));
        self
    }

    pub fn mode(&self) -> &SelectorMode {
        &self.mode
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the cell for `date` accepts clicks.
    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        match &self.mode {
            SelectorMode::Select(_) => date >= self.today,
            SelectorMode::Pause(pause) => pause.is_selectable(date, self.today),
        }
    }

    /// Open the widget. Select mode starts over from its opening values; Pause
    /// mode keeps any draft left from the last time it was dismissed.
    pub fn open(&mut self) {
        if let SelectorMode::Select(range) = &mut self.mode {
            range.reset();
        }
        self.set_open(true);
    }

    /// Dismiss without reverting.
    pub fn close(&mut self) {
        self.set_open(false);
    }

    /// Revert to the values the widget was opened with, then close.
    pub fn cancel(&mut self) {
        match &mut self.mode {
            SelectorMode::Select(range) => range.reset(),
            SelectorMode::Pause(pause) => pause.reset(),
        }
        self.set_open(false);
    }

    /// Click on `date`. Non-selectable dates are ignored.
    pub fn click(&mut self, date: NaiveDate) -> bool {
        if !self.is_selectable(date) {
            debug!(%date, "ignoring click on non-selectable date");
            return false;
        }
        let today = self.today;
        match &mut self.mode {
            SelectorMode::Select(range) => range.click(date),
            SelectorMode::Pause(pause) => pause.click(date, today),
        }
    }

    pub fn hover(&mut self, date: NaiveDate) {
        if date < self.today {
            return;
        }
        if let SelectorMode::Select(range) = &mut self.mode {
            range.hover(date);
        }
    }

    pub fn pointer_down(&mut self, date: NaiveDate) -> bool {
        match &mut self.mode {
            SelectorMode::Select(range) if date >= self.today => range.pointer_down(date),
            _ => false,
        }
    }

    pub fn pointer_move(&mut self, date: NaiveDate) {
        if date < self.today {
            return;
        }
        if let SelectorMode::Select(range) = &mut self.mode {
            range.pointer_move(date);
        }
    }

    /// Pointer released anywhere, including outside the calendar.
    pub fn pointer_up(&mut self) -> bool {
        match &mut self.mode {
            SelectorMode::Select(range) => range.pointer_up(),
            SelectorMode::Pause(_) => false,
        }
    }

    /// Whether Apply is enabled.
    pub fn can_apply(&self) -> bool {
        match &self.mode {
            SelectorMode::Select(range) => range.can_apply(),
            SelectorMode::Pause(pause) => pause.can_apply(),
        }
    }

    /// Commit the selection and close. `None` while Apply is disabled.
    pub fn apply(&mut self) -> Option<AvailabilityEdit> {
        let edit = match &mut self.mode {
            SelectorMode::Select(range) => {
                let (start_date, end_date) = range.apply()?;
                range.commit();
                AvailabilityEdit::Range {
                    start_date,
                    end_date,
                }
            }
            SelectorMode::Pause(pause) => {
                let paused_dates = pause.apply()?;
                pause.commit();
                AvailabilityEdit::Paused { paused_dates }
            }
        };
        self.set_open(false);
        Some(edit)
    }

    fn set_open(&mut self, open: bool) {
        if self.open == open {
            return;
        }
        self.open = open;
        if let Some(callback) = self.on_open_change.as_mut() {
            callback(open);
        }
    }
}
