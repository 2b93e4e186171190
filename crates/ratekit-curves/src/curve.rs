//! Discount curve.
//!
//! A [`DiscountCurve`] is an immutable set of (date, discount factor) pillars
//! anchored at a settlement date with `DF(anchor) = 1`. Discount factors for
//! other dates come from linear interpolation of continuously-compounded zero
//! rates on ACT/365 Fixed time:
//!
//! ```text
//! t = ACT/365(anchor, date)
//! DF(date) = exp(-t * r(t)),  r linear in t between pillars
//! ```
//!
//! Beyond the first and last pillars the end segments are extended linearly.
//! A curve with a single pillar has a flat zero rate.

use ratekit_core::daycounts::{Act365Fixed, DayCount, DayCountConvention};
use ratekit_core::Date;
use ratekit_math::interpolation::{Extrapolation, Interpolator, LinearInterpolator};

use crate::error::{CurveError, CurveResult};

/// Immutable discount curve interpolated linearly in zero rates.
///
/// # Example
///
/// ```rust
/// use ratekit_core::Date;
/// use ratekit_curves::DiscountCurve;
///
/// let anchor = Date::from_ymd(2023, 2, 2).unwrap();
/// let curve = DiscountCurve::new(
///     anchor,
///     vec![
///         (Date::from_ymd(2024, 2, 2).unwrap(), 0.97),
///         (Date::from_ymd(2025, 2, 3).unwrap(), 0.94),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(curve.discount_factor(anchor).unwrap(), 1.0);
/// let df = curve.discount_factor(Date::from_ymd(2024, 8, 2).unwrap()).unwrap();
/// assert!(df < 0.97 && df > 0.94);
/// assert!(curve.zero_rate(anchor).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountCurve {
    anchor: Date,
    dates: Vec<Date>,
    discount_factors: Vec<f64>,
    zero_rates: LinearInterpolator,
}

impl DiscountCurve {
    /// Creates a curve from pillars strictly after the anchor.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidCurve` if there are no pillars, a pillar is
    /// not after the anchor, dates are not strictly increasing, or a discount
    /// factor is not finite and positive.
    pub fn new(anchor: Date, pillars: Vec<(Date, f64)>) -> CurveResult<Self> {
        if pillars.is_empty() {
            return Err(CurveError::invalid_curve(
                "at least one pillar after the anchor is required",
            ));
        }

        let mut prev = anchor;
        for &(date, df) in &pillars {
            if date <= prev {
                return Err(CurveError::invalid_curve(format!(
                    "pillar dates must be strictly increasing after the anchor {anchor}: {date} follows {prev}"
                )));
            }
            if !df.is_finite() || df <= 0.0 {
                return Err(CurveError::invalid_curve(format!(
                    "discount factor at {date} must be positive, got {df}"
                )));
            }
            prev = date;
        }

        let (times, zeros): (Vec<f64>, Vec<f64>) = pillars
            .iter()
            .map(|&(date, df)| {
                let t = Act365Fixed.year_fraction(anchor, date);
                (t, -df.ln() / t)
            })
            .unzip();
        let zero_rates =
            LinearInterpolator::new(times, zeros)?.with_extrapolation(Extrapolation::Linear);

        let (dates, discount_factors) = pillars.into_iter().unzip();
        Ok(Self {
            anchor,
            dates,
            discount_factors,
            zero_rates,
        })
    }

    /// Creates a curve from paired series whose first entry is the anchor.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidCurve` if the series lengths differ, the
    /// first discount factor is not exactly 1, or the pillars are invalid.
    pub fn from_series(dates: &[Date], discount_factors: &[f64]) -> CurveResult<Self> {
        if dates.len() != discount_factors.len() {
            return Err(CurveError::invalid_curve(format!(
                "mismatched lengths: {} dates, {} discount factors",
                dates.len(),
                discount_factors.len()
            )));
        }
        let (Some(&anchor), Some(&anchor_df)) = (dates.first(), discount_factors.first()) else {
            return Err(CurveError::invalid_curve("empty series"));
        };
        if anchor_df != 1.0 {
            return Err(CurveError::invalid_curve(format!(
                "discount factor at the anchor {anchor} must be 1, got {anchor_df}"
            )));
        }

        let pillars = dates[1..]
            .iter()
            .copied()
            .zip(discount_factors[1..].iter().copied())
            .collect();
        Self::new(anchor, pillars)
    }

    /// Anchor (settlement) date.
    #[must_use]
    pub fn anchor(&self) -> Date {
        self.anchor
    }

    /// Last pillar date.
    #[must_use]
    pub fn last_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Number of pillars, excluding the anchor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false; a curve has at least one pillar.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Pillars after the anchor, in date order, with their exact discount factors.
    pub fn pillars(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.dates
            .iter()
            .copied()
            .zip(self.discount_factors.iter().copied())
    }

    /// All points including `(anchor, 1.0)`.
    pub fn points(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        std::iter::once((self.anchor, 1.0)).chain(self.pillars())
    }

    /// ACT/365 Fixed time from the anchor.
    #[must_use]
    pub fn time(&self, date: Date) -> f64 {
        Act365Fixed.year_fraction(self.anchor, date)
    }

    /// Discount factor at `date`.
    ///
    /// Exactly 1.0 at the anchor.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::DateBeforeAnchor` for dates before the anchor.
    pub fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        self.check_date(date)?;
        if date == self.anchor {
            return Ok(1.0);
        }

        let t = self.time(date);
        let rate = self.zero_rates.value(t)?;
        Ok((-t * rate).exp())
    }

    /// Continuously-compounded zero rate at `date`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::ZeroRateAtAnchor` at the anchor and
    /// `CurveError::DateBeforeAnchor` before it.
    pub fn zero_rate(&self, date: Date) -> CurveResult<f64> {
        self.check_date(date)?;
        if date == self.anchor {
            return Err(CurveError::ZeroRateAtAnchor {
                anchor: self.anchor,
            });
        }

        Ok(self.zero_rates.value(self.time(date))?)
    }

    /// Simple forward rate over `[start, end]` under `day_count`.
    ///
    /// `(DF(start) / DF(end) - 1) / tau(start, end)`
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidPeriod` if the period has no positive
    /// length under `day_count`.
    pub fn forward_rate(
        &self,
        start: Date,
        end: Date,
        day_count: DayCountConvention,
    ) -> CurveResult<f64> {
        let tau = day_count.year_fraction(start, end);
        if tau <= 0.0 {
            return Err(CurveError::InvalidPeriod {
                start,
                end,
                day_count,
            });
        }

        let df_start = self.discount_factor(start)?;
        let df_end = self.discount_factor(end)?;
        Ok((df_start / df_end - 1.0) / tau)
    }

    fn check_date(&self, date: Date) -> CurveResult<()> {
        if date < self.anchor {
            return Err(CurveError::DateBeforeAnchor {
                date,
                anchor: self.anchor,
            });
        }
        Ok(())
    }
}
