//! Reduced-form credit: hazard rates, defaultable bonds and calibration.
//!
//! Survival to a date `t` is `S(t) = exp(-H(t))` with cumulative hazard `H`
//! on ACT/365 time from the bond's reference date. A defaultable bond pays
//! each scheduled flow if the issuer survives and recovers a fraction of
//! notional, at the end of the period, if it defaults within the period.

mod bond;
mod calibration;
mod hazard;
mod pricing;

pub use bond::DefaultableBond;
pub use calibration::{CalibrationConfig, CalibrationResult, CreditCalibrator};
pub use hazard::{HazardModel, PiecewiseHazard};
pub use pricing::{
    dirty_price_from_hazard, dirty_price_from_intensity, dirty_price_from_piecewise_intensity,
    dirty_price_from_z_spread,
};
