//! Select mode: choosing one contiguous date range by clicking or dragging.
//!
//! Callers are expected to filter out non-selectable dates (see
//! [`crate::selector::DateRangeSelector`]) before forwarding pointer events here.

use chrono::NaiveDate;

/// Where the selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeState {
    Empty,
    StartChosen { start: NaiveDate },
    /// Always `start <= end`.
    RangeComplete { start: NaiveDate, end: NaiveDate },
}

impl RangeState {
    fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (start, end) {
            (None, _) => RangeState::Empty,
            (Some(start), None) => RangeState::StartChosen { start },
            (Some(a), Some(b)) => RangeState::RangeComplete {
                start: a.min(b),
                end: a.max(b),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSelection {
    state: RangeState,
    opened_with: RangeState,
    fixed_start: bool,
    tentative_end: Option<NaiveDate>,
    drag_end: Option<NaiveDate>,
}

impl RangeSelection {
    /// A selection opened with the given values. Reversed bounds are swapped.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let state = RangeState::from_bounds(start, end);
        Self {
            state,
            opened_with: state,
            fixed_start: false,
            tentative_end: None,
            drag_end: None,
        }
    }

    /// A selection whose start cannot move; clicks only set the end.
    ///
    /// An `end` that is not after `start` is dropped.
    pub fn with_fixed_start(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        let state = match end {
            Some(end) if end > start => RangeState::RangeComplete { start, end },
            _ => RangeState::StartChosen { start },
        };
        Self {
            state,
            opened_with: state,
            fixed_start: true,
            tentative_end: None,
            drag_end: None,
        }
    }

    pub fn state(&self) -> RangeState {
        self.state
    }

    pub fn is_fixed_start(&self) -> bool {
        self.fixed_start
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match self.state {
            RangeState::Empty => None,
            RangeState::StartChosen { start } | RangeState::RangeComplete { start, .. } => {
                Some(start)
            }
        }
    }

    /// The committed end, or the live end while a drag is in progress.
    pub fn end(&self) -> Option<NaiveDate> {
        match self.state {
            RangeState::RangeComplete { end, .. } => Some(self.drag_end.unwrap_or(end)),
            _ => None,
        }
    }

    /// Hover preview end while only the start is chosen.
    pub fn tentative_end(&self) -> Option<NaiveDate> {
        self.tentative_end
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_end.is_some()
    }

    /// Whether `date` should be highlighted, including the hover preview.
    pub fn highlights(&self, date: NaiveDate) -> bool {
        let Some(start) = self.start() else {
            return false;
        };
        let end = self.end().or(self.tentative_end).unwrap_or(start);
        start <= date && date <= end
    }

    /// Handle a click on a selectable date. Returns whether the selection changed.
    pub fn click(&mut self, date: NaiveDate) -> bool {
        self.tentative_end = None;
        self.drag_end = None;

        let next = if self.fixed_start {
            match self.start() {
                Some(start) if date > start => RangeState::RangeComplete { start, end: date },
                _ => return false,
            }
        } else {
            match self.state {
                RangeState::Empty | RangeState::RangeComplete { .. } => {
                    RangeState::StartChosen { start: date }
                }
                RangeState::StartChosen { start } if date > start => {
                    RangeState::RangeComplete { start, end: date }
                }
                RangeState::StartChosen { start } => RangeState::RangeComplete {
                    start: date,
                    end: start,
                },
            }
        };

        let changed = next != self.state;
        self.state = next;
        changed
    }

    /// Pointer hover. Only previews while the end is still open.
    pub fn hover(&mut self, date: NaiveDate) {
        self.tentative_end = match self.state {
            RangeState::StartChosen { start } if date > start => Some(date),
            _ => None,
        };
    }

    /// Press on a cell. Starts a drag if it is the end cell of a complete,
    /// movable range.
    pub fn pointer_down(&mut self, date: NaiveDate) -> bool {
        match self.state {
            RangeState::RangeComplete { end, .. } if !self.fixed_start && date == end => {
                self.drag_end = Some(end);
                true
            }
            _ => false,
        }
    }

    /// Pointer moved over `date` during a drag.
    pub fn pointer_move(&mut self, date: NaiveDate) {
        if let (Some(_), RangeState::RangeComplete { start, .. }) = (self.drag_end, self.state) {
            if date > start {
                self.drag_end = Some(date);
            }
        }
    }

    /// Release anywhere. Commits the dragged end; returns whether it moved.
    pub fn pointer_up(&mut self) -> bool {
        let Some(dragged) = self.drag_end.take() else {
            return false;
        };
        match self.state {
            RangeState::RangeComplete { start, end } if dragged != end => {
                self.state = RangeState::RangeComplete {
                    start,
                    end: dragged,
                };
                true
            }
            _ => false,
        }
    }

    pub fn can_apply(&self) -> bool {
        matches!(self.state, RangeState::RangeComplete { .. })
    }

    /// The `(start, end)` pair to commit, if the range is complete.
    pub fn apply(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self.state {
            RangeState::RangeComplete { start, end } => Some((start, self.drag_end.unwrap_or(end))),
            _ => None,
        }
    }

    /// Drop pending edits and return to the opening values.
    pub fn reset(&mut self) {
        self.state = self.opened_with;
        self.tentative_end = None;
        self.drag_end = None;
    }

    /// Make the current selection the new opening values.
    pub fn commit(&mut self) {
        if let Some(end) = self.drag_end.take() {
            if let RangeState::RangeComplete { start, .. } = self.state {
                self.state = RangeState::RangeComplete { start, end };
            }
        }
        self.opened_with = self.state;
        self.tentative_end = None;
    }
}
