//! Fixed-coupon bond of a defaultable issuer.

use ratekit_core::calendars::generate_schedule;
use ratekit_core::daycounts::{DayCount, Thirty360E};
use ratekit_core::types::{CashFlow, CashFlowKind, CashFlowSchedule};
use ratekit_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Fixed-coupon bond accruing from its reference date.
///
/// Coupons are `coupon_rate * tau * notional` with 30E/360 accruals on the
/// weekend-adjusted schedule from `reference_date` to `maturity`. The last
/// flow also repays notional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultableBond {
    reference_date: Date,
    maturity: Date,
    coupon_rate: f64,
    frequency: u32,
    notional: f64,
}

impl DefaultableBond {
    /// Creates a bond.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidInput` if maturity is not after the
    /// reference date, the frequency is outside `1..=12`, the notional is not
    /// positive, or the coupon rate is not finite.
    pub fn new(
        reference_date: Date,
        maturity: Date,
        coupon_rate: f64,
        frequency: u32,
        notional: f64,
    ) -> AnalyticsResult<Self> {
        if maturity <= reference_date {
            return Err(AnalyticsError::invalid_input(format!(
                "maturity {maturity} must be after the reference date {reference_date}"
            )));
        }
        if !(1..=12).contains(&frequency) {
            return Err(AnalyticsError::invalid_input(format!(
                "coupon frequency must be between 1 and 12, got {frequency}"
            )));
        }
        if !notional.is_finite() || notional <= 0.0 {
            return Err(AnalyticsError::invalid_input(format!(
                "notional must be positive, got {notional}"
            )));
        }
        if !coupon_rate.is_finite() {
            return Err(AnalyticsError::invalid_input("coupon rate is not finite"));
        }

        Ok(Self {
            reference_date,
            maturity,
            coupon_rate,
            frequency,
            notional,
        })
    }

    /// Reference (valuation and accrual start) date.
    #[must_use]
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Maturity date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Annual coupon rate.
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Coupons per year.
    #[must_use]
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Scheduled cash flows, each carrying its accrual start.
    pub fn cash_flows(&self) -> AnalyticsResult<CashFlowSchedule> {
        let dates = generate_schedule(self.reference_date, self.maturity, self.frequency)?;

        let mut flows = Vec::with_capacity(dates.len().saturating_sub(1));
        for period in dates.windows(2) {
            let (start, end) = (period[0], period[1]);
            let coupon = self.coupon_rate * Thirty360E.year_fraction(start, end) * self.notional;

            let flow = if end == self.maturity {
                CashFlow::new(end, coupon + self.notional, CashFlowKind::CouponAndPrincipal)
            } else {
                CashFlow::coupon(end, coupon)
            };
            flows.push(flow.with_accrual_start(start));
        }

        Ok(CashFlowSchedule::new(flows)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_semi_annual_flows() {
        let bond = DefaultableBond::new(date(2023, 2, 2), date(2025, 2, 3), 0.05, 2, 100.0).unwrap();
        let flows = bond.cash_flows().unwrap();

        assert_eq!(flows.len(), 4);
        assert_eq!(flows.maturity(), Some(date(2025, 2, 3)));

        let first = flows.as_slice()[0];
        assert_eq!(first.date(), date(2023, 8, 2));
        assert_eq!(first.accrual_start(), Some(date(2023, 2, 2)));
        assert_relative_eq!(first.amount(), 2.5);

        let last = flows.as_slice()[3];
        assert_eq!(last.kind(), CashFlowKind::CouponAndPrincipal);
        // 30E/360 from 2024-08-02 to 2025-02-03 is 181 days
        assert_relative_eq!(last.amount(), 100.0 + 0.05 * 181.0 / 360.0 * 100.0, max_relative = 1e-14);
    }

    #[test]
    fn test_five_coupons_a_year() {
        let bond = DefaultableBond::new(date(2023, 2, 2), date(2024, 2, 2), 0.05, 5, 100.0).unwrap();
        let flows = bond.cash_flows().unwrap();

        let dates: Vec<Date> = flows.iter().map(CashFlow::date).collect();
        assert_eq!(
            dates,
            vec![
                date(2023, 4, 3),
                date(2023, 6, 2),
                date(2023, 9, 4),
                date(2023, 11, 2),
                date(2024, 2, 2),
            ]
        );
        // 30E/360 accruals telescope to one full year
        assert_relative_eq!(flows.total(), 105.0, max_relative = 1e-14);
    }

    #[test]
    fn test_zero_coupon_has_single_flow() {
        let bond = DefaultableBond::new(date(2023, 2, 2), date(2024, 2, 2), 0.0, 1, 100.0).unwrap();
        let flows = bond.cash_flows().unwrap();
        assert_eq!(flows.len(), 1);
        assert_eq!(flows.total(), 100.0);
    }

    #[test]
    fn test_rejects_bad_terms() {
        let d = date(2023, 2, 2);
        assert!(DefaultableBond::new(d, d, 0.05, 1, 100.0).is_err());
        assert!(DefaultableBond::new(d, date(2026, 2, 2), 0.05, 0, 100.0).is_err());
        assert!(DefaultableBond::new(d, date(2026, 2, 2), 0.05, 1, -1.0).is_err());
    }
}
