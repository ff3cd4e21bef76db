//! Calendar arithmetic for the month-grid widget.
//!
//! Dates are immutable [`NaiveDate`] values; nothing here carries a time of day.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};

/// Months appended per page when the list is scrolled near its end.
pub const PAGE_MONTHS: usize = 3;

/// A calendar month, represented by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self(date - chrono::Duration::days(i64::from(date.day0())))
    }

    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.days().last().unwrap_or(self.0)
    }

    pub fn next(&self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    /// Every day of the month, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.0.month();
        self.0.iter_days().take_while(move |d| d.month() == month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// The months currently rendered by the calendar list.
///
/// Starts with the span of the caller's start/end dates and only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    months: Vec<YearMonth>,
}

impl MonthWindow {
    /// Months from `start` through `end`, with `start` clamped to not precede `min`.
    pub fn new(start: NaiveDate, end: NaiveDate, min: NaiveDate) -> Self {
        let start = start.max(min);
        let first = YearMonth::of(start);
        let last = YearMonth::of(end.max(start));

        let mut months = vec![first];
        let mut cursor = first;
        while cursor < last {
            match cursor.next() {
                Some(next) => {
                    months.push(next);
                    cursor = next;
                }
                None => break,
            }
        }
        Self { months }
    }

    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.months.iter().any(|m| m.contains(date))
    }

    /// Append up to `count` months after the last one. Returns how many were added.
    pub fn extend(&mut self, count: usize) -> usize {
        let mut added = 0;
        while added < count {
            let Some(next) = self.months.last().and_then(YearMonth::next) else {
                break;
            };
            self.months.push(next);
            added += 1;
        }
        added
    }

    /// Scroll notification: when the last visible month is the final rendered
    /// one, append another page.
    pub fn on_scroll(&mut self, last_visible: usize) -> usize {
        if last_visible + 1 >= self.months.len() {
            self.extend(PAGE_MONTHS)
        } else {
            0
        }
    }
}

/// Sunday-first grid cells for a month, padded with `None` to whole weeks.
pub fn month_grid(month: YearMonth) -> Vec<Option<NaiveDate>> {
    let lead = month.first_day().weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
    cells.extend(month.days().map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    cells
}

/// Every date between `a` and `b` inclusive, ascending, in either argument order.
pub fn dates_inclusive(a: NaiveDate, b: NaiveDate) -> Vec<NaiveDate> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    lo.iter_days().take_while(|d| *d <= hi).collect()
}
