use std::{cmp::Ordering, iter::FusedIterator, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    CalendarDate, ParseError, RANGE_SEPARATOR,
    calendar::{first_day_of_month, first_day_of_next_month, last_day_of_month, on_or_before},
    prelude::*,
};

/// The first and last day of a single calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct MonthRange {
    start: CalendarDate,
    end:   CalendarDate,
}

/// Error type for month range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// The dates are not the first and last day of one month.
    #[error("Not a month range: {start}/{end} must be the first and last day of the same month")]
    NotMonthAligned { start: CalendarDate, end: CalendarDate },

    /// Error parsing date component.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl MonthRange {
    /// The range of the month `date` falls in.
    pub const fn containing(date: CalendarDate) -> Self {
        Self {
            start: first_day_of_month(date),
            end:   last_day_of_month(date),
        }
    }

    /// Creates a month range from explicit bounds.
    ///
    /// # Errors
    /// Returns `RangeError::NotMonthAligned` unless `start` is the 1st of a
    /// month and `end` is the last day of that same month.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, RangeError> {
        let range = Self::containing(start);
        if range.start != start || range.end != end {
            return Err(RangeError::NotMonthAligned { start, end });
        }
        Ok(range)
    }

    /// Returns the first day of the month
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Returns the last day of the month
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Returns both bounds as a tuple
    pub const fn dates(&self) -> (CalendarDate, CalendarDate) {
        (self.start, self.end)
    }

    pub const fn year(&self) -> u16 {
        self.start.year()
    }

    pub const fn month(&self) -> u8 {
        self.start.month()
    }

    /// Number of days in the month
    pub const fn len_days(&self) -> u8 {
        self.end.day()
    }

    /// Checks if `date` falls within this month
    pub const fn contains(&self, date: &CalendarDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl FromStr for MonthRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;
                let start = start_str.parse::<CalendarDate>()?;
                let end = end_str.parse::<CalendarDate>()?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl PartialOrd for MonthRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MonthRange {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}

impl Serialize for MonthRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MonthRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Lazily yields the [`MonthRange`] of every month from `start`'s month up to
/// `end`, in chronological order.
///
/// The month containing `start` is always yielded. Each following month is
/// yielded while its 1st is on or before `end`, so a reversed pair yields a
/// single month.
#[derive(Debug, Clone)]
pub struct MonthRanges {
    cursor:  Option<CalendarDate>,
    end:     CalendarDate,
    started: bool,
}

impl MonthRanges {
    pub const fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self {
            cursor: Some(first_day_of_month(start)),
            end,
            started: false,
        }
    }
}

impl Iterator for MonthRanges {
    type Item = MonthRange;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor?;
        if self.started && !on_or_before(cursor, self.end) {
            self.cursor = None;
            return None;
        }
        self.started = true;

        self.cursor = first_day_of_next_month(cursor);
        if self.cursor.is_none() {
            debug!(%cursor, end = %self.end, "month generation stopped at the last representable month");
        }

        let range = MonthRange::containing(cursor);
        trace!(%range, "month range");
        Some(range)
    }
}

impl FusedIterator for MonthRanges {}

/// Returns the first and last day of every month between `start` and `end`
/// inclusive, in chronological order.
///
/// Only calendar fields are compared. `end` before `start` is not an error;
/// the result is then the single month containing `start`.
pub fn generate(start: CalendarDate, end: CalendarDate) -> Vec<MonthRange> {
    trace!(%start, %end, "generating month ranges");
    let ranges: Vec<MonthRange> = MonthRanges::new(start, end).collect();
    trace!(count = ranges.len(), "generated month ranges");
    ranges
}
