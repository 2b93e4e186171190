//! Actual-day conventions: calendar days over a fixed year length.

use super::DayCount;
use crate::types::Date;

/// Calendar days from `start` to `end`.
fn actual_days(start: Date, end: Date) -> i64 {
    start.days_between(&end)
}

/// ACT/365 Fixed: leap days count, the year is always 365 days.
///
/// Curve time, zero rates, option expiry and survival time use this basis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365"
    }

    fn basis(&self) -> f64 {
        365.0
    }

    fn days(&self, start: Date, end: Date) -> i64 {
        actual_days(start, end)
    }
}

/// ACT/360, the money-market basis for deposits and futures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn basis(&self) -> f64 {
        360.0
    }

    fn days(&self, start: Date, end: Date) -> i64 {
        actual_days(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_three_month_deposit() {
        let (start, end) = (date(2023, 2, 2), date(2023, 5, 2));

        assert_eq!(Act360.days(start, end), 89);
        assert_relative_eq!(Act360.year_fraction(start, end), 89.0 / 360.0);
        assert_relative_eq!(Act365Fixed.year_fraction(start, end), 89.0 / 365.0);
    }

    #[test]
    fn test_leap_year_counts_extra_day() {
        let (start, end) = (date(2024, 2, 2), date(2025, 2, 2));

        assert_eq!(Act365Fixed.days(start, end), 366);
        assert_relative_eq!(Act365Fixed.year_fraction(start, end), 366.0 / 365.0);
        assert_relative_eq!(Act360.year_fraction(start, end), 366.0 / 360.0);
    }

    #[test]
    fn test_reversed_dates_are_negative() {
        let (start, end) = (date(2023, 5, 2), date(2023, 2, 2));
        assert_eq!(Act365Fixed.days(start, end), -89);
        assert!(Act360.year_fraction(start, end) < 0.0);
    }
}
