//! Curve bootstrap.
//!
//! Pillars are resolved tier by tier, each from the pillars before it:
//!
//! 1. **Deposits**: `DF = 1 / (1 + r * tau)`
//! 2. **Futures**: `DF(end) = DF(start) / (1 + r * tau)`
//! 3. **Swaps**: terminal DF such that the swap's par rate equals its quote
//!
//! A quote whose end date does not extend the curve is superseded by the
//! earlier tier and skipped. A non-positive implied discount factor fails the
//! bootstrap with [`CurveError::CalibrationFailure`] naming the quote.
//!
//! # Example
//!
//! ```rust
//! use ratekit_core::Date;
//! use ratekit_curves::bootstrap::Bootstrapper;
//! use ratekit_curves::quotes::{Quote, QuoteSet};
//!
//! let settle = Date::from_ymd(2023, 2, 2).unwrap();
//! let quotes = QuoteSet::new(
//!     settle,
//!     vec![Quote::deposit(settle, Date::from_ymd(2023, 5, 2).unwrap(), 0.03)],
//!     vec![Quote::future(
//!         Date::from_ymd(2023, 5, 2).unwrap(),
//!         Date::from_ymd(2023, 8, 2).unwrap(),
//!         0.031,
//!     )],
//!     vec![Quote::swap(settle, Date::from_ymd(2025, 2, 3).unwrap(), 0.032)],
//! )
//! .unwrap();
//!
//! let result = Bootstrapper::default().bootstrap_validated(&quotes).unwrap();
//! assert!(result.is_valid());
//! assert_eq!(result.curve.len(), 3);
//! ```
//!
//! [`CurveError::CalibrationFailure`]: crate::error::CurveError::CalibrationFailure

mod deposits;
mod futures;
mod pillars;
mod sequential;
mod swaps;

pub use sequential::{bootstrap, BootstrapResult, Bootstrapper};
