mod calendar;
mod consts;
mod prelude;
mod range;
#[cfg(test)]
mod test_utils;

pub use calendar::{
    days_in_month, first_day_of_month, first_day_of_next_month, is_leap_year, last_day_of_month,
};
pub use consts::*;
pub use range::{MonthRange, MonthRanges, RangeError, generate};

use crate::prelude::*;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use std::str::FromStr;

/// A calendar date: year, month and day, with no time of day or time zone.
///
/// Values are always valid Gregorian dates between `0001-01-01` and
/// `9999-12-31`. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year:04}-{month:02}-{day:02}")]
pub struct CalendarDate {
    year:  u16,
    month: u8,
    day:   u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl CalendarDate {
    /// Creates a date, validating every component.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear`, `ParseError::InvalidMonth` or
    /// `ParseError::InvalidDay` for the first component that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        if year < MIN_YEAR || year > MAX_YEAR {
            return Err(ParseError::InvalidYear(year));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(ParseError::InvalidMonth(month));
        }
        if day < MIN_DAY || day > days_in_month(year, month) {
            return Err(ParseError::InvalidDay { month, day, year });
        }
        Ok(Self { year, month, day })
    }

    /// Builds a date from components the caller has already range-checked.
    pub(crate) const fn from_parts(year: u16, month: u8, day: u8) -> Self {
        debug_assert!(year >= MIN_YEAR && year <= MAX_YEAR);
        debug_assert!(month != 0 && month <= MAX_MONTH);
        debug_assert!(day >= MIN_DAY && day <= days_in_month(year, month));
        Self { year, month, day }
    }

    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Converts to database columns: (year, month, day)
    pub const fn to_columns(&self) -> (u16, u8, u8) {
        (self.year, self.month, self.day)
    }

    fn from_chrono(date: NaiveDate) -> Result<Self, ParseError> {
        let year = u16::try_from(date.year())
            .map_err(|_| ParseError::InvalidFormat(format!("Year {} out of range", date.year())))?;
        // chrono guarantees month and day fit their calendar ranges
        let month = u8::try_from(date.month()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        let day = u8::try_from(date.day()).map_err(|_| ParseError::InvalidFormat(date.to_string()))?;
        Self::new(year, month, day)
    }

    fn parse_u16(s: &str) -> Result<u16, ParseError> {
        s.parse::<u16>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }

    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        match parts.as_slice() {
            [year, month, day] => {
                let year = Self::parse_u16(year)?;
                let month = Self::parse_u8(month)?;
                let day = Self::parse_u8(day)?;
                Self::new(year, month, day)
            }
            _ => Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} component(s) in {trimmed}",
                parts.len()
            ))),
        }
    }
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = ParseError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = ParseError;

    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_chrono(value)
    }
}

/// Takes the UTC calendar date of the instant; the local date in `Tz` and the
/// time of day are ignored.
impl<Tz: TimeZone> TryFrom<DateTime<Tz>> for CalendarDate {
    type Error = ParseError;

    fn try_from(value: DateTime<Tz>) -> Result<Self, Self::Error> {
        Self::from_chrono(value.naive_utc().date())
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
