//! 30E/360, the Eurobond basis.

use super::DayCount;
use crate::types::Date;

/// 30E/360: every month has 30 days and a day-of-month of 31 counts as 30,
/// at either end. February is not adjusted.
///
/// Fixed swap legs and defaultable bond coupons accrue on this basis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn basis(&self) -> f64 {
        360.0
    }

    fn days(&self, start: Date, end: Date) -> i64 {
        let serial = |date: Date| {
            i64::from(date.year()) * 360 + i64::from(date.month()) * 30 + i64::from(date.day().min(30))
        };
        serial(end) - serial(start)
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
    fn test_month_ends_count_as_thirtieth() {
        assert_eq!(Thirty360E.days(date(2023, 1, 31), date(2023, 3, 31)), 60);
        // end of February stays 28
        assert_eq!(Thirty360E.days(date(2023, 2, 28), date(2023, 3, 31)), 32);
    }

    #[test]
    fn test_rolled_coupon_period() {
        // 2025-02-02 is a Sunday and pays on Monday the 3rd
        let (start, end) = (date(2024, 2, 2), date(2025, 2, 3));

        assert_eq!(Thirty360E.days(start, end), 361);
        assert_relative_eq!(Thirty360E.year_fraction(start, end), 361.0 / 360.0);
    }

    #[test]
    fn test_whole_years_are_exact() {
        assert_eq!(
            Thirty360E.year_fraction(date(2023, 2, 2), date(2033, 2, 2)),
            10.0
        );
    }
}
