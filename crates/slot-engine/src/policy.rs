//! Interpretation policies for ambiguous range endpoints.

/// How an `end` of exactly `12:00` is read when the range starts in the afternoon.
///
/// Twelve-hour pickers emit "12:00" for both noon and midnight, so a range like
/// `18:00-12:00` is ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoonEndPolicy {
    /// Read `12:00` as end of day when `start >= 12:00` (so `18:00-12:00` is 6 PM to midnight).
    #[default]
    Midnight,
    /// Read `12:00` literally. An afternoon start then wraps overnight to noon the next day.
    Noon,
}
