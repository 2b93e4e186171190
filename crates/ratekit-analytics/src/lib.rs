//! # Ratekit Analytics
//!
//! Valuation on bootstrapped discount curves:
//!
//! - **Rates**: swap par rate, mark-to-market, proxy duration and Black-76
//!   swaption price and delta
//! - **Credit**: survival probabilities under flat or piecewise-constant
//!   hazard rates, defaultable bond dirty prices (intensity or Z-spread) and
//!   their calibration to observed prices
//! - **Scenarios**: parallel and bucketed quote shocks, re-bootstrapped and
//!   revalued (in parallel with the `parallel` feature)
//!
//! ## Usage
//!
//! ```rust
//! use ratekit_analytics::prelude::*;
//! use ratekit_core::Date;
//! use ratekit_curves::DiscountCurve;
//!
//! let anchor = Date::from_ymd(2023, 2, 2).unwrap();
//! let one_year = Date::from_ymd(2024, 2, 2).unwrap();
//! let curve = DiscountCurve::new(anchor, vec![(one_year, (-0.03f64).exp())]).unwrap();
//!
//! let bond = DefaultableBond::new(anchor, one_year, 0.0, 1, 100.0).unwrap();
//! let price = dirty_price_from_intensity(&bond, &curve, 0.02, 0.3).unwrap();
//!
//! let expected = 100.0 * (-0.05f64).exp() + 30.0 * (-0.03f64).exp() * (1.0 - (-0.02f64).exp());
//! assert!((price - expected).abs() < 1e-6);
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
#![allow(clippy::many_single_char_names)]
#![allow(clippy::float_cmp)]

pub mod credit;
pub mod error;
pub mod rates;
pub mod scenarios;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::credit::{
        dirty_price_from_hazard, dirty_price_from_intensity, dirty_price_from_piecewise_intensity,
        dirty_price_from_z_spread, CalibrationConfig, CalibrationResult, CreditCalibrator,
        DefaultableBond, HazardModel, PiecewiseHazard,
    };
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::rates::{
        basis_point_value, par_rate, swap_mtm, swap_proxy_duration, swaption_price,
        SwapDirection, SwaptionSpec, SwaptionValuation,
    };
    pub use crate::scenarios::{
        bucket_dv01, bucket_scenarios, evaluate_scenarios, parallel_dv01, Scenario,
    };
}

pub use error::{AnalyticsError, AnalyticsResult};
