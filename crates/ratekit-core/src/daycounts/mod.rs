//! Day count conventions.
//!
//! A day count convention turns a pair of dates into a year fraction.
//!
//! # Supported Conventions
//!
//! - [`Act365Fixed`]: Actual/365 Fixed, used for curve time and survival time
//! - [`Act360`]: Actual/360, money market deposits and futures
//! - [`Thirty360E`]: 30E/360 (Eurobond basis), fixed swap legs and bond coupons
//!
//! # Usage
//!
//! ```rust
//! use ratekit_core::daycounts::{DayCount, Act360, DayCountConvention};
//! use ratekit_core::types::Date;
//!
//! let start = Date::from_ymd(2023, 2, 2).unwrap();
//! let end = Date::from_ymd(2023, 5, 2).unwrap();
//!
//! assert_eq!(Act360.days(start, end), 89);
//! let yf = DayCountConvention::Act360.year_fraction(start, end);
//! assert!((yf - 89.0 / 360.0).abs() < 1e-15);
//! ```
//!
//! All conventions return zero for identical dates and a year fraction
//! with the sign of `end - start`.

mod actual;
mod thirty360;

pub use actual::{Act360, Act365Fixed};
pub use thirty360::Thirty360E;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

/// A day counting rule over a fixed year basis.
pub trait DayCount: Send + Sync {
    /// Market name, e.g. "ACT/360".
    fn name(&self) -> &'static str;

    /// Days in a year under this convention.
    fn basis(&self) -> f64;

    /// Days from `start` to `end` under the convention's counting rule.
    fn days(&self, start: Date, end: Date) -> i64;

    /// `days / basis`; negative if `end < start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.days(start, end) as f64 / self.basis()
    }
}

/// Runtime selection of a day count convention.
///
/// Serializes as its market name so that configuration files can say
/// `deposit_day_count = "ACT/360"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DayCountConvention {
    /// Actual/365 Fixed
    Act365Fixed,
    /// Actual/360
    Act360,
    /// 30E/360 (Eurobond basis)
    Thirty360E,
}

impl DayCountConvention {
    /// Creates a boxed day count implementation.
    #[must_use]
    pub fn to_day_count(&self) -> Box<dyn DayCount> {
        match self {
            DayCountConvention::Act365Fixed => Box::new(Act365Fixed),
            DayCountConvention::Act360 => Box::new(Act360),
            DayCountConvention::Thirty360E => Box::new(Thirty360E),
        }
    }

    /// Year fraction between two dates without boxing.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            DayCountConvention::Act365Fixed => Act365Fixed.year_fraction(start, end),
            DayCountConvention::Act360 => Act360.year_fraction(start, end),
            DayCountConvention::Thirty360E => Thirty360E.year_fraction(start, end),
        }
    }

    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act365Fixed => "ACT/365",
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Thirty360E => "30E/360",
        }
    }

    /// Returns all supported conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act365Fixed,
            DayCountConvention::Act360,
            DayCountConvention::Thirty360E,
        ]
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = CoreError;

    /// Parses market names and common aliases, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACT365" => {
                Ok(DayCountConvention::Act365Fixed)
            }
            "ACT/360" | "ACTUAL/360" | "ACT360" => Ok(DayCountConvention::Act360),
            "30E/360" | "30/360-EU" | "30/360 EU" | "30/360 ICMA" | "EUROBOND" | "30E360" => {
                Ok(DayCountConvention::Thirty360E)
            }
            _ => Err(CoreError::unknown_day_count(s)),
        }
    }
}

impl TryFrom<String> for DayCountConvention {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayCountConvention> for String {
    fn from(value: DayCountConvention) -> Self {
        value.name().to_string()
    }
}
