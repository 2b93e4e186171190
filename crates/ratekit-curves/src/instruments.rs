//! Fixed leg of a vanilla swap.
//!
//! The fixed leg carries the annuity (basis point value) and par-rate
//! arithmetic shared by the swap bootstrap and swap analytics:
//!
//! ```text
//! annuity  = sum_i tau_i * DF(p_i)
//! par rate = (DF(start) - DF(p_N)) / annuity
//! ```
//!
//! where `tau_i` is the accrual fraction between consecutive payment dates
//! under the leg's day count.

use ratekit_core::calendars::generate_schedule;
use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::Date;

use crate::curve::DiscountCurve;
use crate::error::{CurveError, CurveResult};

/// Fixed leg: an accrual start date followed by payment dates.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLeg {
    accrual_start: Date,
    payment_dates: Vec<Date>,
    day_count: DayCountConvention,
}

impl FixedLeg {
    /// Creates a fixed leg.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidCurve` if there are no payment dates or the
    /// dates are not strictly increasing after `accrual_start`.
    pub fn new(
        accrual_start: Date,
        payment_dates: Vec<Date>,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        if payment_dates.is_empty() {
            return Err(CurveError::invalid_curve("fixed leg has no payment dates"));
        }
        let mut prev = accrual_start;
        for &date in &payment_dates {
            if date <= prev {
                return Err(CurveError::invalid_curve(format!(
                    "fixed leg payment dates must be strictly increasing: {date} follows {prev}"
                )));
            }
            prev = date;
        }

        Ok(Self {
            accrual_start,
            payment_dates,
            day_count,
        })
    }

    /// Creates a fixed leg from a full schedule whose first date is the
    /// accrual start.
    pub fn from_schedule(schedule: &[Date], day_count: DayCountConvention) -> CurveResult<Self> {
        match schedule.split_first() {
            Some((&start, rest)) => Self::new(start, rest.to_vec(), day_count),
            None => Err(CurveError::invalid_curve("empty fixed leg schedule")),
        }
    }

    /// Fixed leg of a swap from `start` to `end` paying `frequency` times a year,
    /// on the weekend-adjusted schedule.
    pub fn generate(
        start: Date,
        end: Date,
        frequency: u32,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        let schedule = generate_schedule(start, end, frequency)?;
        Self::from_schedule(&schedule, day_count)
    }

    /// Accrual start date.
    #[must_use]
    pub fn accrual_start(&self) -> Date {
        self.accrual_start
    }

    /// Payment dates.
    #[must_use]
    pub fn payment_dates(&self) -> &[Date] {
        &self.payment_dates
    }

    /// Final payment date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.payment_dates[self.payment_dates.len() - 1]
    }

    /// Accrual day count.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// `(payment date, accrual fraction)` for each period.
    pub fn accrual_fractions(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        std::iter::once(self.accrual_start)
            .chain(self.payment_dates.iter().copied())
            .zip(self.payment_dates.iter().copied())
            .map(|(start, end)| (end, self.day_count.year_fraction(start, end)))
    }

    /// Annuity `sum tau_i * DF(p_i)`.
    pub fn annuity(&self, curve: &DiscountCurve) -> CurveResult<f64> {
        self.accrual_fractions()
            .map(|(date, tau)| curve.discount_factor(date).map(|df| tau * df))
            .sum()
    }

    /// Rate that sets the leg's value equal to the floating leg's.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidCurve` if the annuity is not positive.
    pub fn par_rate(&self, curve: &DiscountCurve) -> CurveResult<f64> {
        let annuity = self.annuity(curve)?;
        if annuity <= 0.0 {
            return Err(CurveError::invalid_curve(format!(
                "non-positive annuity {annuity} for fixed leg ending {}",
                self.maturity()
            )));
        }

        let df_start = curve.discount_factor(self.accrual_start)?;
        let df_end = curve.discount_factor(self.maturity())?;
        Ok((df_start - df_end) / annuity)
    }
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
        let pillars = [date(2024, 2, 2), date(2030, 2, 4)]
            .into_iter()
            .map(|d| {
                let t = anchor.days_between(&d) as f64 / 365.0;
                (d, (-rate * t).exp())
            })
            .collect();
        DiscountCurve::new(anchor, pillars).unwrap()
    }

    #[test]
    fn test_accrual_fractions_follow_schedule() {
        let leg = FixedLeg::from_schedule(
            &[date(2023, 2, 2), date(2023, 8, 2), date(2024, 2, 2)],
            DayCountConvention::Thirty360E,
        )
        .unwrap();

        let fractions: Vec<_> = leg.accrual_fractions().collect();
        assert_eq!(fractions.len(), 2);
        assert_eq!(fractions[0].0, date(2023, 8, 2));
        assert_relative_eq!(fractions[0].1, 0.5);
        assert_relative_eq!(fractions[1].1, 0.5);
        assert_eq!(leg.maturity(), date(2024, 2, 2));
    }

    #[test]
    fn test_par_rate_prices_leg_to_par() {
        let curve = flat_curve(0.03);
        let leg = FixedLeg::from_schedule(
            &[date(2023, 2, 2), date(2024, 2, 2), date(2025, 2, 3), date(2026, 2, 2)],
            DayCountConvention::Thirty360E,
        )
        .unwrap();

        let par = leg.par_rate(&curve).unwrap();
        let annuity = leg.annuity(&curve).unwrap();
        let df_end = curve.discount_factor(leg.maturity()).unwrap();

        assert_relative_eq!(par * annuity + df_end, 1.0, max_relative = 1e-14);
        assert!(par > 0.029 && par < 0.032);
    }

    #[test]
    fn test_generate_semi_annual() {
        let leg = FixedLeg::generate(
            date(2023, 2, 2),
            date(2025, 2, 3),
            2,
            DayCountConvention::Thirty360E,
        )
        .unwrap();
        assert_eq!(leg.payment_dates().len(), 4);
        assert_eq!(leg.maturity(), date(2025, 2, 3));
    }

    #[test]
    fn test_rejects_bad_schedules() {
        let dc = DayCountConvention::Thirty360E;
        assert!(FixedLeg::from_schedule(&[], dc).is_err());
        assert!(FixedLeg::from_schedule(&[date(2023, 2, 2)], dc).is_err());
        assert!(FixedLeg::new(date(2023, 2, 2), vec![date(2023, 2, 2)], dc).is_err());
    }
}
