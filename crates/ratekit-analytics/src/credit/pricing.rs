//! Defaultable bond dirty prices.
//!
//! Under a hazard model with survival `S` and recovery `R` on notional `N`:
//!
//! ```text
//! P = sum_i CF_i DF(t_i) S(t_i) + R N DF(t_i) (S(t_{i-1}) - S(t_i))
//! ```
//!
//! with `t_0` the reference date and recovery paid at the end of the period
//! in which default occurs. Under a Z-spread the flows are discounted by
//! `DF(t) exp(-z tau)` and nothing is recovered.

use ratekit_core::daycounts::{Act365Fixed, DayCount};
use ratekit_core::Date;
use ratekit_curves::DiscountCurve;

use super::{DefaultableBond, HazardModel, PiecewiseHazard};
use crate::error::{AnalyticsError, AnalyticsResult};

/// Dirty price under an arbitrary hazard model.
///
/// # Errors
///
/// Returns `AnalyticsError::InvalidInput` if `recovery` is outside `[0, 1]`,
/// and curve errors if the bond's flows precede the curve anchor.
pub fn dirty_price_from_hazard(
    bond: &DefaultableBond,
    curve: &DiscountCurve,
    model: &HazardModel,
    recovery: f64,
) -> AnalyticsResult<f64> {
    if !(0.0..=1.0).contains(&recovery) {
        return Err(AnalyticsError::invalid_input(format!(
            "recovery rate must be in [0, 1], got {recovery}"
        )));
    }

    let reference = bond.reference_date();
    let mut survival_prev = 1.0;
    let mut price = 0.0;

    for flow in &bond.cash_flows()? {
        let df = curve.discount_factor(flow.date())?;
        let survival = model.survival_probability(reference, flow.date())?;

        price += flow.amount() * df * survival
            + recovery * bond.notional() * df * (survival_prev - survival);
        survival_prev = survival;
    }

    Ok(price)
}

/// Dirty price under a flat default intensity.
///
/// # Example
///
/// ```rust
/// use ratekit_analytics::credit::{dirty_price_from_intensity, DefaultableBond};
/// use ratekit_core::Date;
/// use ratekit_curves::DiscountCurve;
///
/// let anchor = Date::from_ymd(2023, 2, 2).unwrap();
/// let maturity = Date::from_ymd(2028, 2, 2).unwrap();
/// let curve = DiscountCurve::new(anchor, vec![(maturity, 0.86)]).unwrap();
/// let bond = DefaultableBond::new(anchor, maturity, 0.05, 1, 100.0).unwrap();
///
/// let riskless = dirty_price_from_intensity(&bond, &curve, 0.0, 0.4).unwrap();
/// let risky = dirty_price_from_intensity(&bond, &curve, 0.03, 0.4).unwrap();
/// assert!(risky < riskless);
/// ```
pub fn dirty_price_from_intensity(
    bond: &DefaultableBond,
    curve: &DiscountCurve,
    intensity: f64,
    recovery: f64,
) -> AnalyticsResult<f64> {
    dirty_price_from_hazard(bond, curve, &HazardModel::Flat(intensity), recovery)
}

/// Dirty price with `prior_intensity` up to `prior_breakpoint` and
/// `intensity_after` beyond it.
pub fn dirty_price_from_piecewise_intensity(
    bond: &DefaultableBond,
    curve: &DiscountCurve,
    intensity_after: f64,
    prior_intensity: f64,
    prior_breakpoint: Date,
    recovery: f64,
) -> AnalyticsResult<f64> {
    let model = HazardModel::from(PiecewiseHazard::two_segment(
        prior_intensity,
        prior_breakpoint,
        intensity_after,
    ));
    dirty_price_from_hazard(bond, curve, &model, recovery)
}

/// Dirty price discounting every flow at the curve plus a continuously
/// compounded spread `z` on ACT/365 time from the reference date.
pub fn dirty_price_from_z_spread(
    bond: &DefaultableBond,
    curve: &DiscountCurve,
    z_spread: f64,
) -> AnalyticsResult<f64> {
    let reference = bond.reference_date();

    bond.cash_flows()?
        .iter()
        .map(|flow| -> AnalyticsResult<f64> {
            let tau = Act365Fixed.year_fraction(reference, flow.date());
            let df = curve.discount_factor(flow.date())?;
            Ok(flow.amount() * df * (-z_spread * tau).exp())
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn anchor() -> Date {
        date(2023, 2, 2)
    }

    fn flat_curve(rate: f64) -> DiscountCurve {
        let end = date(2043, 2, 2);
        let t = anchor().days_between(&end) as f64 / 365.0;
        DiscountCurve::new(anchor(), vec![(end, (-rate * t).exp())]).unwrap()
    }

    fn five_year_bond() -> DefaultableBond {
        DefaultableBond::new(anchor(), date(2028, 2, 2), 0.05, 2, 100.0).unwrap()
    }

    #[test]
    fn test_zero_intensity_is_riskless() {
        let curve = flat_curve(0.03);
        let bond = five_year_bond();

        let riskless: f64 = bond
            .cash_flows()
            .unwrap()
            .iter()
            .map(|f| f.amount() * curve.discount_factor(f.date()).unwrap())
            .sum();

        assert_relative_eq!(
            dirty_price_from_intensity(&bond, &curve, 0.0, 0.4).unwrap(),
            riskless,
            max_relative = 1e-14
        );
        assert_relative_eq!(
            dirty_price_from_z_spread(&bond, &curve, 0.0).unwrap(),
            riskless,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_full_recovery_of_notional_raises_price() {
        let curve = flat_curve(0.03);
        let bond = five_year_bond();
        let no_recovery = dirty_price_from_intensity(&bond, &curve, 0.02, 0.0).unwrap();
        let some_recovery = dirty_price_from_intensity(&bond, &curve, 0.02, 0.4).unwrap();
        assert!(some_recovery > no_recovery);
        assert!(dirty_price_from_intensity(&bond, &curve, 0.02, 1.5).is_err());
    }

    #[test]
    fn test_piecewise_with_equal_intensities_is_flat() {
        let curve = flat_curve(0.03);
        let bond = five_year_bond();
        let flat = dirty_price_from_intensity(&bond, &curve, 0.025, 0.4).unwrap();
        let piecewise =
            dirty_price_from_piecewise_intensity(&bond, &curve, 0.025, 0.025, date(2025, 2, 3), 0.4)
                .unwrap();
        assert_relative_eq!(flat, piecewise, max_relative = 1e-13);
    }

    #[test]
    fn test_piecewise_breakpoint_after_maturity_uses_prior_only() {
        let curve = flat_curve(0.03);
        let bond = five_year_bond();
        let prior_only = dirty_price_from_intensity(&bond, &curve, 0.01, 0.4).unwrap();
        let piecewise =
            dirty_price_from_piecewise_intensity(&bond, &curve, 0.08, 0.01, date(2030, 2, 4), 0.4)
                .unwrap();
        assert_relative_eq!(prior_only, piecewise, max_relative = 1e-14);
    }

    #[test]
    fn test_z_spread_lowers_price() {
        let curve = flat_curve(0.03);
        let bond = five_year_bond();
        let base = dirty_price_from_z_spread(&bond, &curve, 0.0).unwrap();
        let wide = dirty_price_from_z_spread(&bond, &curve, 0.01).unwrap();
        assert!(wide < base);
    }
}
