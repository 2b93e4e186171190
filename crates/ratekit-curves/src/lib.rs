//! # Ratekit Curves
//!
//! Discount curve construction from money-market, futures and swap quotes.
//!
//! - **Quotes**: validated [`QuoteSet`]s with value-level scenario transforms
//! - **Curve**: [`DiscountCurve`], an immutable set of (date, discount factor)
//!   pillars interpolated linearly in continuously-compounded zero rates
//! - **Bootstrap**: [`Bootstrapper`], resolving deposits, then futures, then
//!   swaps so that every input quote reprices exactly
//! - **Repricing**: a per-quote repricing report for bootstrapped curves
//!
//! ## Quick Start
//!
//! ```rust
//! use ratekit_core::Date;
//! use ratekit_curves::prelude::*;
//!
//! let settle = Date::from_ymd(2023, 2, 2).unwrap();
//! let quotes = QuoteSet::new(
//!     settle,
//!     vec![Quote::deposit(settle, Date::from_ymd(2023, 5, 2).unwrap(), 0.03)],
//!     vec![],
//!     vec![
//!         Quote::swap(settle, Date::from_ymd(2025, 2, 3).unwrap(), 0.032),
//!         Quote::swap(settle, Date::from_ymd(2026, 2, 2).unwrap(), 0.031),
//!     ],
//! )
//! .unwrap();
//!
//! let curve = Bootstrapper::default().bootstrap(&quotes).unwrap();
//! assert_eq!(curve.discount_factor(settle).unwrap(), 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]

pub mod bootstrap;
pub mod config;
pub mod curve;
pub mod error;
pub mod instruments;
pub mod quotes;
pub mod repricing;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{bootstrap, BootstrapResult, Bootstrapper};
    pub use crate::config::{BootstrapConfig, SolverSettings};
    pub use crate::curve::DiscountCurve;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::FixedLeg;
    pub use crate::quotes::{Quote, QuoteKind, QuoteSet};
    pub use crate::repricing::{RepricingCheck, RepricingReport};
}

pub use bootstrap::{bootstrap, BootstrapResult, Bootstrapper};
pub use curve::DiscountCurve;
pub use error::{CurveError, CurveResult};
pub use quotes::{Quote, QuoteKind, QuoteSet};
