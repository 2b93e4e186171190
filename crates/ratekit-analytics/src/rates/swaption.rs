//! European swaptions under Black-76.
//!
//! The underlying swap accrues from the option expiry to the underlying
//! maturity on the weekend-adjusted schedule at the given frequency. Its
//! annuity is measured forward from expiry:
//!
//! ```text
//! BPV   = sum_i tau_i * DF(p_i) / DF(expiry)      (tau on 30E/360)
//! d1    = ln(F / K) / (sigma sqrt(T)) + sigma sqrt(T) / 2
//! d2    = d1 - sigma sqrt(T)                      (T on ACT/365)
//! payer    = DF(expiry) * BPV * (F N(d1) - K N(d2))
//! receiver = DF(expiry) * BPV * (K N(-d2) - F N(-d1))
//! ```
//!
//! Delta is the sensitivity to the forward swap rate:
//! `DF(expiry) * BPV * N(d1)` for a payer and `DF(expiry) * BPV * (N(d1) - 1)`
//! for a receiver. Vega, per unit of volatility, is
//! `DF(expiry) * BPV * F n(d1) sqrt(T)` for both.

use ratekit_core::daycounts::{Act365Fixed, DayCount, DayCountConvention};
use ratekit_core::Date;
use ratekit_curves::instruments::FixedLeg;
use ratekit_curves::DiscountCurve;
use ratekit_math::distributions::{normal_cdf, normal_pdf};
use serde::{Deserialize, Serialize};

use super::SwapDirection;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Terms of a European swaption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwaptionSpec {
    /// Forward swap rate of the underlying
    pub forward: f64,
    /// Strike rate
    pub strike: f64,
    /// Valuation date
    pub valuation_date: Date,
    /// Option expiry, also the underlying swap's start
    pub expiry: Date,
    /// Underlying swap maturity
    pub underlying_maturity: Date,
    /// Black volatility
    pub volatility: f64,
    /// Fixed-leg payments per year
    pub frequency: u32,
    /// Payer or receiver
    pub direction: SwapDirection,
}

/// Swaption price and sensitivities per unit notional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwaptionValuation {
    /// Premium
    pub price: f64,
    /// Sensitivity to the forward swap rate
    pub delta: f64,
    /// Sensitivity to the Black volatility
    pub vega: f64,
    /// Discounted annuity `DF(expiry) * BPV`
    pub annuity: f64,
}

/// Black-76 value and sensitivities for a unit annuity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Black76 {
    /// Undiscounted option value
    pub value: f64,
    /// Sensitivity to the forward
    pub delta: f64,
    /// Sensitivity to the volatility
    pub vega: f64,
}

/// Undiscounted Black-76 value, forward delta and vega for a unit annuity.
///
/// # Errors
///
/// Returns `AnalyticsError::InvalidInput` unless forward, strike,
/// volatility and time to expiry are all positive and finite.
pub fn black76(
    forward: f64,
    strike: f64,
    time_to_expiry: f64,
    volatility: f64,
    direction: SwapDirection,
) -> AnalyticsResult<Black76> {
    for (name, value) in [
        ("forward", forward),
        ("strike", strike),
        ("time to expiry", time_to_expiry),
        ("volatility", volatility),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(AnalyticsError::invalid_input(format!(
                "{name} must be positive, got {value}"
            )));
        }
    }

    let sigma_sqrt_t = volatility * time_to_expiry.sqrt();
    let d1 = (forward / strike).ln() / sigma_sqrt_t + 0.5 * sigma_sqrt_t;
    let d2 = d1 - sigma_sqrt_t;

    let vega = forward * normal_pdf(d1) * time_to_expiry.sqrt();
    let (value, delta) = match direction {
        SwapDirection::Payer => (
            forward * normal_cdf(d1) - strike * normal_cdf(d2),
            normal_cdf(d1),
        ),
        SwapDirection::Receiver => (
            strike * normal_cdf(-d2) - forward * normal_cdf(-d1),
            normal_cdf(d1) - 1.0,
        ),
    };

    Ok(Black76 { value, delta, vega })
}

/// Prices a swaption with its forward delta and vega.
///
/// # Errors
///
/// Returns:
/// - `AnalyticsError::ExpiredOption` if the valuation date is not before expiry
/// - `AnalyticsError::InvalidInput` for non-positive forward, strike or volatility
/// - curve errors for dates before the curve anchor
pub fn swaption_price(
    spec: &SwaptionSpec,
    curve: &DiscountCurve,
) -> AnalyticsResult<SwaptionValuation> {
    if spec.valuation_date >= spec.expiry {
        return Err(AnalyticsError::ExpiredOption {
            valuation: spec.valuation_date,
            expiry: spec.expiry,
        });
    }

    let leg = FixedLeg::generate(
        spec.expiry,
        spec.underlying_maturity,
        spec.frequency,
        DayCountConvention::Thirty360E,
    )?;
    let df_expiry = curve.discount_factor(spec.expiry)?;
    let annuity = leg.annuity(curve)?;

    let tau = Act365Fixed.year_fraction(spec.valuation_date, spec.expiry);
    let black = black76(
        spec.forward,
        spec.strike,
        tau,
        spec.volatility,
        spec.direction,
    )?;

    // DF(expiry) * sum tau_i DF(p_i) / DF(expiry)
    let bpv = annuity / df_expiry;
    let scale = df_expiry * bpv;

    Ok(SwaptionValuation {
        price: scale * black.value,
        delta: scale * black.delta,
        vega: scale * black.vega,
        annuity: scale,
    })
}
