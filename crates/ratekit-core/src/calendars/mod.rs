//! Business days and payment schedules.
//!
//! Only weekends are non-business days; holidays are not modelled. Dates
//! that land on a weekend roll forward to the following Monday.

mod schedule;

pub use schedule::{generate_schedule, offset};

use crate::types::Date;

/// Business-day rules.
pub trait Calendar: Send + Sync {
    /// Returns true if settlement can happen on `date`.
    fn is_business_day(&self, date: Date) -> bool;

    /// `date` itself if it is a business day, otherwise the first business
    /// day after it ("following" convention).
    fn following(&self, date: Date) -> Date {
        let mut rolled = date;
        while !self.is_business_day(rolled) {
            rolled = rolled.add_days(1);
        }
        rolled
    }
}

/// Saturday and Sunday closed, every other day open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}
