//! Gregorian calendar arithmetic on [`CalendarDate`] values.

use crate::CalendarDate;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DECEMBER, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    JANUARY, LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MIN_DAY,
};

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// The 1st of the month `date` falls in.
pub const fn first_day_of_month(date: CalendarDate) -> CalendarDate {
    CalendarDate::from_parts(date.year(), date.month(), MIN_DAY)
}

/// The final day of the month `date` falls in, accounting for leap years.
pub const fn last_day_of_month(date: CalendarDate) -> CalendarDate {
    let (year, month) = (date.year(), date.month());
    CalendarDate::from_parts(year, month, days_in_month(year, month))
}

/// The 1st of the month after the one `date` falls in.
/// December rolls over into January of the next year.
///
/// Returns `None` when the next month would be past `MAX_YEAR`.
pub const fn first_day_of_next_month(date: CalendarDate) -> Option<CalendarDate> {
    let (year, month) = (date.year(), date.month());
    if month == DECEMBER {
        if year >= MAX_YEAR {
            None
        } else {
            Some(CalendarDate::from_parts(year + 1, JANUARY, MIN_DAY))
        }
    } else {
        Some(CalendarDate::from_parts(year, month + 1, MIN_DAY))
    }
}

/// Day-granular "on or before" check used to bound month generation.
///
/// Not a lexicographic comparison: within the same year the month and the day
/// are each checked against `max` on their own, so `2015-03-31` is not on or
/// before `2015-06-20`. Callers that need true chronological order should use
/// `Ord` on [`CalendarDate`].
pub(crate) const fn on_or_before(date: CalendarDate, max: CalendarDate) -> bool {
    date.year() < max.year()
        || (date.year() == max.year() && date.month() <= max.month() && date.day() <= max.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year:        u16,
            is_leap:     bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year:        2016,
                is_leap:     true,
                description: "divisible by 4",
            },
            TestCase {
                year:        2015,
                is_leap:     false,
                description: "not divisible by 4",
            },
            TestCase {
                year:        1900,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2100,
                is_leap:     false,
                description: "century not divisible by 400",
            },
            TestCase {
                year:        2000,
                is_leap:     true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description
            );
        }
    }

    #[test]
    fn test_days_in_month_common_year() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                days_in_month(2015, month),
                expected[month as usize],
                "Month {month} has incorrect day count"
            );
        }
    }

    #[test]
    fn test_days_in_month_february_leap() {
        assert_eq!(days_in_month(2016, 2), 29);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn test_first_day_of_month() {
        for (y, m, d) in [(2015, 1, 2), (2015, 1, 1), (2016, 2, 29), (2016, 12, 31)] {
            let first = first_day_of_month(date(y, m, d));
            assert_eq!(first.year(), y);
            assert_eq!(first.month(), m);
            assert_eq!(first.day(), 1);
        }
    }

    #[test]
    fn test_last_day_of_month_table() {
        struct TestCase {
            input:    (u16, u8, u8),
            expected: (u16, u8, u8),
        }

        let cases = [
            TestCase {
                input:    (2015, 1, 2),
                expected: (2015, 1, 31),
            },
            TestCase {
                input:    (2015, 2, 10),
                expected: (2015, 2, 28),
            },
            TestCase {
                input:    (2016, 2, 1),
                expected: (2016, 2, 29),
            },
            TestCase {
                input:    (2015, 4, 30),
                expected: (2015, 4, 30),
            },
            TestCase {
                input:    (2015, 6, 20),
                expected: (2015, 6, 30),
            },
            TestCase {
                input:    (2015, 11, 6),
                expected: (2015, 11, 30),
            },
        ];

        for case in &cases {
            let (y, m, d) = case.input;
            let (ey, em, ed) = case.expected;
            assert_eq!(
                last_day_of_month(date(y, m, d)),
                date(ey, em, ed),
                "last day of {y}-{m:02}"
            );
        }
    }

    #[test]
    fn test_last_day_of_month_year_end() {
        assert_eq!(last_day_of_month(date(2016, 12, 31)), date(2016, 12, 31));
        assert_eq!(last_day_of_month(date(2016, 12, 1)), date(2016, 12, 31));
    }

    #[test]
    fn test_first_day_of_next_month() {
        assert_eq!(first_day_of_next_month(date(2016, 11, 30)), Some(date(2016, 12, 1)));
        assert_eq!(first_day_of_next_month(date(2016, 11, 1)), Some(date(2016, 12, 1)));
        assert_eq!(first_day_of_next_month(date(2016, 1, 31)), Some(date(2016, 2, 1)));
    }

    #[test]
    fn test_first_day_of_next_month_december_rollover() {
        assert_eq!(first_day_of_next_month(date(2015, 12, 6)), Some(date(2016, 1, 1)));
        assert_eq!(first_day_of_next_month(date(2016, 12, 31)), Some(date(2017, 1, 1)));
    }

    #[test]
    fn test_first_day_of_next_month_at_year_limit() {
        assert_eq!(first_day_of_next_month(date(9999, 12, 1)), None);
        assert_eq!(first_day_of_next_month(date(9999, 11, 15)), Some(date(9999, 12, 1)));
    }

    #[test]
    fn test_on_or_before() {
        let max = date(2015, 6, 20);
        assert!(on_or_before(date(2014, 12, 31), max), "earlier year");
        assert!(on_or_before(date(2015, 6, 1), max), "same month, earlier day");
        assert!(on_or_before(date(2015, 6, 20), max), "equal");
        assert!(!on_or_before(date(2015, 6, 21), max), "same month, later day");
        assert!(!on_or_before(date(2015, 7, 1), max), "later month");
        assert!(!on_or_before(date(2016, 1, 1), max), "later year");
    }

    #[test]
    fn test_on_or_before_checks_day_independently_of_month() {
        let max = date(2015, 6, 20);
        // Chronologically earlier, but the day exceeds max's day
        assert!(date(2015, 3, 31) < max);
        assert!(!on_or_before(date(2015, 3, 31), max));
        // An earlier year short-circuits before the day is looked at
        assert!(on_or_before(date(2014, 3, 31), max));
    }
}
