//! Business-date offsets and payment schedule generation.

use log::trace;

use super::{Calendar, WeekendCalendar};
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Offsets `base` by whole years, months and days, then rolls forward
/// onto the next business day.
///
/// Months overflow into years. When the base day does not exist in the target
/// month it is clamped to the month's last day (Jan 31 + 1M = Feb 28/29). The
/// day offset is applied after clamping. A Saturday rolls to Monday (+2), a
/// Sunday to Monday (+1). No holidays are modeled.
///
/// # Errors
///
/// Returns `CoreError::InvalidDate` if the target date is out of range,
/// including offsets too large to represent.
///
/// # Example
///
/// ```rust
/// use ratekit_core::calendars::offset;
/// use ratekit_core::types::Date;
///
/// let base = Date::from_ymd(2023, 1, 31).unwrap();
/// // 2023-02-28 is a Tuesday
/// assert_eq!(offset(base, 0, 1, 0).unwrap(), Date::from_ymd(2023, 2, 28).unwrap());
/// // 2023-03-04 is a Saturday
/// assert_eq!(offset(base, 0, 1, 4).unwrap(), Date::from_ymd(2023, 3, 6).unwrap());
/// ```
pub fn offset(base: Date, years: i32, months: i32, days: i64) -> CoreResult<Date> {
    let total_months = years
        .checked_mul(12)
        .and_then(|m| m.checked_add(months))
        .ok_or_else(|| {
            CoreError::invalid_date(format!("{base} + {years}Y {months}M is out of range"))
        })?;
    let shifted = base.add_months(total_months)?.checked_add_days(days)?;
    Ok(WeekendCalendar.following(shifted))
}

/// Generates payment dates from `start` to `end` at `frequency` dates per year.
///
/// The k-th date is `offset(start, 0, k * 12 / frequency, 0)`, always measured
/// from `start` so that month-end clamping does not drift. Generation stops
/// once a date reaches or passes `end`; an overshooting date is dropped and
/// `end` is appended if it is not already last.
///
/// The result is strictly increasing, begins with `start` and ends with `end`.
/// When `start == end` the result is the single date.
///
/// # Errors
///
/// Returns `CoreError::InvalidSchedule` if `start > end` or `frequency` is
/// not in `1..=12`.
pub fn generate_schedule(start: Date, end: Date, frequency: u32) -> CoreResult<Vec<Date>> {
    if start > end {
        return Err(CoreError::invalid_schedule(format!(
            "start {start} is after end {end}"
        )));
    }
    if !(1..=12).contains(&frequency) {
        return Err(CoreError::invalid_schedule(format!(
            "frequency must be between 1 and 12 payments per year, got {frequency}"
        )));
    }

    let frequency = frequency as i32;
    let mut dates = vec![start];
    let mut k = 1;
    while let Some(&last) = dates.last() {
        if last >= end {
            break;
        }
        // multiply first so 12 / frequency is never truncated
        dates.push(offset(start, 0, k * 12 / frequency, 0)?);
        k += 1;
    }

    if dates.last().is_some_and(|last| *last > end) {
        dates.pop();
    }
    if dates.last() != Some(&end) {
        dates.push(end);
    }

    trace!(
        "schedule {start} -> {end} at {frequency}/y: {} dates",
        dates.len()
    );
    Ok(dates)
}
