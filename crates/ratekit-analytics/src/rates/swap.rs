//! Vanilla fixed/floating swaps.
//!
//! Payment dates exclude the accrual start: the first period runs from the
//! curve anchor (or the forward start) to the first payment date.

use ratekit_core::daycounts::{DayCount, DayCountConvention, Thirty360E};
use ratekit_core::Date;
use ratekit_curves::instruments::FixedLeg;
use ratekit_curves::DiscountCurve;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Side of a swap (or of the swap underlying a swaption) on the fixed leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapDirection {
    /// Pays fixed, receives floating
    Payer,
    /// Receives fixed, pays floating
    Receiver,
}

impl SwapDirection {
    /// `+1` for a receiver, `-1` for a payer.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            SwapDirection::Receiver => 1.0,
            SwapDirection::Payer => -1.0,
        }
    }
}

fn fixed_leg(
    payment_dates: &[Date],
    curve: &DiscountCurve,
    accrual_start: Option<Date>,
) -> AnalyticsResult<FixedLeg> {
    let start = accrual_start.unwrap_or_else(|| curve.anchor());
    Ok(FixedLeg::new(
        start,
        payment_dates.to_vec(),
        DayCountConvention::Thirty360E,
    )?)
}

/// Basis point value `sum tau_i * DF(p_i)` with 30E/360 accruals from
/// `accrual_start` (the curve anchor when `None`).
pub fn basis_point_value(
    payment_dates: &[Date],
    curve: &DiscountCurve,
    accrual_start: Option<Date>,
) -> AnalyticsResult<f64> {
    Ok(fixed_leg(payment_dates, curve, accrual_start)?.annuity(curve)?)
}

/// Par swap rate `(DF(start) - DF(p_N)) / BPV`.
///
/// With `forward_start` the result is the forward swap rate of a swap
/// accruing from that date; otherwise the swap starts at the curve anchor.
///
/// # Example
///
/// ```rust
/// use ratekit_analytics::rates::{par_rate, swap_mtm, SwapDirection};
/// use ratekit_core::Date;
/// use ratekit_curves::DiscountCurve;
///
/// let anchor = Date::from_ymd(2023, 2, 2).unwrap();
/// let curve = DiscountCurve::new(
///     anchor,
///     vec![(Date::from_ymd(2028, 2, 2).unwrap(), 0.86)],
/// )
/// .unwrap();
/// let dates: Vec<Date> = (2024..=2026)
///     .map(|y| Date::from_ymd(y, 2, 2).unwrap())
///     .collect();
///
/// let par = par_rate(&dates, &curve, None).unwrap();
/// let mtm = swap_mtm(par, &dates, &curve, SwapDirection::Payer).unwrap();
/// assert!(mtm.abs() < 1e-12);
/// ```
pub fn par_rate(
    payment_dates: &[Date],
    curve: &DiscountCurve,
    forward_start: Option<Date>,
) -> AnalyticsResult<f64> {
    Ok(fixed_leg(payment_dates, curve, forward_start)?.par_rate(curve)?)
}

/// Mark-to-market per unit notional of a spot-starting swap paying or
/// receiving `fixed_rate`.
///
/// `sign * (fixed_rate * BPV - (1 - DF(p_N)))`, positive for a receiver when
/// the fixed rate is above par.
pub fn swap_mtm(
    fixed_rate: f64,
    payment_dates: &[Date],
    curve: &DiscountCurve,
    direction: SwapDirection,
) -> AnalyticsResult<f64> {
    let leg = fixed_leg(payment_dates, curve, None)?;
    let bpv = leg.annuity(curve)?;
    let floating = 1.0 - curve.discount_factor(leg.maturity())?;

    Ok(direction.sign() * (fixed_rate * bpv - floating))
}

/// Macaulay-style duration of the fixed leg seen as a coupon bond paying
/// `swap_rate` with principal at the last payment date.
///
/// Times and accruals are 30E/360 from the curve anchor. Used as the proxy
/// for an analytic swap DV01.
pub fn swap_proxy_duration(
    swap_rate: f64,
    payment_dates: &[Date],
    curve: &DiscountCurve,
) -> AnalyticsResult<f64> {
    let leg = fixed_leg(payment_dates, curve, None)?;
    let anchor = curve.anchor();

    let mut price = 0.0;
    let mut weighted = 0.0;
    for (date, tau) in leg.accrual_fractions() {
        let pv = swap_rate * tau * curve.discount_factor(date)?;
        price += pv;
        weighted += pv * Thirty360E.year_fraction(anchor, date);
    }

    let maturity = leg.maturity();
    let principal = curve.discount_factor(maturity)?;
    price += principal;
    weighted += principal * Thirty360E.year_fraction(anchor, maturity);

    if price <= 0.0 {
        return Err(AnalyticsError::invalid_input(format!(
            "proxy bond price {price} is not positive"
        )));
    }
    Ok(weighted / price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn flat_curve(rate: f64) -> DiscountCurve {
        let anchor = date(2023, 2, 2);
        let end = date(2043, 2, 2);
        let t = anchor.days_between(&end) as f64 / 365.0;
        DiscountCurve::new(anchor, vec![(end, (-rate * t).exp())]).unwrap()
    }

    fn annual_dates(years: i32) -> Vec<Date> {
        (1..=years).map(|y| date(2023 + y, 2, 2)).collect()
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(SwapDirection::Receiver.sign(), 1.0);
        assert_eq!(SwapDirection::Payer.sign(), -1.0);
    }

    #[test]
    fn test_mtm_at_par_is_zero() {
        let curve = flat_curve(0.03);
        let dates = annual_dates(5);
        let par = par_rate(&dates, &curve, None).unwrap();

        for direction in [SwapDirection::Payer, SwapDirection::Receiver] {
            assert!(swap_mtm(par, &dates, &curve, direction).unwrap().abs() < 1e-8);
        }
    }

    #[test]
    fn test_mtm_sign_follows_direction() {
        let curve = flat_curve(0.03);
        let dates = annual_dates(5);
        let par = par_rate(&dates, &curve, None).unwrap();
        let bpv = basis_point_value(&dates, &curve, None).unwrap();

        let receiver = swap_mtm(par + 0.01, &dates, &curve, SwapDirection::Receiver).unwrap();
        let payer = swap_mtm(par + 0.01, &dates, &curve, SwapDirection::Payer).unwrap();
        assert_relative_eq!(receiver, 0.01 * bpv, max_relative = 1e-10);
        assert_relative_eq!(payer, -receiver);
    }

    #[test]
    fn test_forward_start_par_rate() {
        let curve = flat_curve(0.03);
        let start = date(2025, 2, 3);
        let dates: Vec<Date> = (2026..=2030).map(|y| date(y, 2, 2)).collect();

        let forward = par_rate(&dates, &curve, Some(start)).unwrap();
        let bpv = basis_point_value(&dates, &curve, Some(start)).unwrap();
        let df_start = curve.discount_factor(start).unwrap();
        let df_end = curve.discount_factor(date(2030, 2, 2)).unwrap();

        assert_relative_eq!(forward * bpv, df_start - df_end, max_relative = 1e-12);
        assert!(forward > 0.029 && forward < 0.032);
    }

    #[test]
    fn test_proxy_duration_bounds() {
        let curve = flat_curve(0.03);
        let dates = annual_dates(10);
        let par = par_rate(&dates, &curve, None).unwrap();
        let duration = swap_proxy_duration(par, &dates, &curve).unwrap();

        assert!(duration > 8.0 && duration < 10.0);

        let zero_coupon = swap_proxy_duration(0.0, &dates, &curve).unwrap();
        assert_relative_eq!(zero_coupon, 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_payment_dates_must_follow_anchor() {
        let curve = flat_curve(0.03);
        assert!(par_rate(&[], &curve, None).is_err());
        assert!(par_rate(&[date(2023, 2, 2)], &curve, None).is_err());
    }
}
