//! Shorthand constructors for tests.

use crate::{CalendarDate, MonthRange};

pub fn date(year: u16, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day)
        .unwrap_or_else(|err| panic!("invalid test date {year}-{month:02}-{day:02}: {err}"))
}

/// The range covering the month of `year`-`month`.
pub fn month_of(year: u16, month: u8) -> MonthRange {
    MonthRange::containing(date(year, month, 1))
}
