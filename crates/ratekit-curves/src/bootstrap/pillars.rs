//! Pillars resolved so far during a bootstrap.

use std::cell::RefCell;

use log::trace;
use ratekit_core::daycounts::{Act365Fixed, DayCount};
use ratekit_core::Date;
use ratekit_math::solvers::{hybrid_numerical, SolverConfig};

use crate::curve::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::quotes::Quote;

/// Zero-rate bracket for the terminal solve.
const ZERO_RATE_BOUNDS: (f64, f64) = (-1.0, 2.0);

/// Initial zero-rate guess when no pillar exists yet.
const DEFAULT_ZERO_GUESS: f64 = 0.02;

/// Growing set of (date, discount factor) pillars after an anchor.
#[derive(Debug, Clone)]
pub(crate) struct PillarSet {
    anchor: Date,
    pillars: Vec<(Date, f64)>,
    curve: Option<DiscountCurve>,
}

impl PillarSet {
    pub(crate) fn new(anchor: Date) -> Self {
        Self {
            anchor,
            pillars: Vec::new(),
            curve: None,
        }
    }

    /// Last resolved date, the anchor if nothing is resolved yet.
    pub(crate) fn last_date(&self) -> Date {
        self.pillars.last().map_or(self.anchor, |&(date, _)| date)
    }

    /// Returns true if later pillars can no longer change `DF(date)`.
    ///
    /// With two or more pillars every date up to the last one sits on a fixed
    /// interpolation segment (or its extension before the first pillar). A
    /// single pillar only fixes its own date.
    pub(crate) fn is_resolved(&self, date: Date) -> bool {
        match self.pillars.as_slice() {
            _ if date == self.anchor => true,
            [] => false,
            [(only, _)] => date == *only,
            _ => date <= self.last_date(),
        }
    }

    /// Discount factor at a resolved date.
    pub(crate) fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        if date == self.anchor {
            return Ok(1.0);
        }
        match &self.curve {
            Some(curve) => curve.discount_factor(date),
            None => Err(CurveError::invalid_curve(format!(
                "no pillar resolved before {date}"
            ))),
        }
    }

    /// Appends a pillar after the last one.
    pub(crate) fn push(&mut self, date: Date, discount_factor: f64, quote: &Quote) -> CurveResult<()> {
        if !discount_factor.is_finite() || discount_factor <= 0.0 {
            return Err(CurveError::calibration_failure(
                quote.to_string(),
                format!("implied discount factor {discount_factor} at {date} is not positive"),
            ));
        }

        self.pillars.push((date, discount_factor));
        self.curve = Some(DiscountCurve::new(self.anchor, self.pillars.clone())?);
        Ok(())
    }

    /// Finished curve.
    pub(crate) fn into_curve(self) -> CurveResult<DiscountCurve> {
        match self.curve {
            Some(curve) => Ok(curve),
            None => Err(CurveError::invalid_curve("no pillars resolved")),
        }
    }

    /// Curve through the current pillars plus a candidate terminal pillar.
    fn candidate(&self, date: Date, discount_factor: f64) -> CurveResult<DiscountCurve> {
        let mut pillars = self.pillars.clone();
        pillars.push((date, discount_factor));
        DiscountCurve::new(self.anchor, pillars)
    }

    /// Solves for the discount factor at `date` that zeroes `residual`.
    ///
    /// The unknown is the zero rate at `date`; `residual` is evaluated on the
    /// curve that includes the candidate pillar. If the solve fails, the
    /// first error raised by `residual` is part of the failure reason.
    pub(crate) fn solve_terminal<R>(
        &self,
        date: Date,
        quote: &Quote,
        solver: &SolverConfig,
        residual: R,
    ) -> CurveResult<f64>
    where
        R: Fn(&DiscountCurve) -> CurveResult<f64>,
    {
        let t = Act365Fixed.year_fraction(self.anchor, date);
        let guess = match &self.curve {
            Some(curve) => curve.zero_rate(self.last_date())?,
            None => DEFAULT_ZERO_GUESS,
        };

        let residual_error = RefCell::new(None);
        let objective = |zero: f64| {
            match self
                .candidate(date, (-zero * t).exp())
                .and_then(|curve| residual(&curve))
            {
                Ok(value) => value,
                Err(err) => {
                    residual_error.borrow_mut().get_or_insert(err);
                    f64::NAN
                }
            }
        };

        let result = hybrid_numerical(objective, guess, Some(ZERO_RATE_BOUNDS), solver)
            .map_err(|e| {
                let reason = match residual_error.borrow_mut().take() {
                    Some(cause) => format!("{e}: {cause}"),
                    None => e.to_string(),
                };
                CurveError::calibration_failure(quote.to_string(), reason)
            })?;
        trace!(
            "{quote}: terminal zero rate {:.10} after {} iterations (residual {:.2e})",
            result.root,
            result.iterations,
            result.residual
        );

        Ok((-result.root * t).exp())
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
    fn test_solve_terminal_hits_target_discount_factor() {
        let anchor = date(2023, 2, 2);
        let maturity = date(2025, 2, 3);
        let quote = Quote::swap(anchor, maturity, 0.03);
        let pillars = PillarSet::new(anchor);

        let df = pillars
            .solve_terminal(maturity, &quote, &SolverConfig::default(), |curve| {
                Ok(curve.discount_factor(maturity)? - 0.94)
            })
            .unwrap();
        assert_relative_eq!(df, 0.94, max_relative = 1e-10);
    }

    #[test]
    fn test_solve_terminal_reports_residual_error() {
        let anchor = date(2023, 2, 2);
        let maturity = date(2025, 2, 3);
        let quote = Quote::swap(anchor, maturity, 0.03);
        let pillars = PillarSet::new(anchor);

        let err = pillars
            .solve_terminal(maturity, &quote, &SolverConfig::default(), |_| {
                Err(CurveError::invalid_curve("payment schedule unavailable"))
            })
            .unwrap_err();

        match err {
            CurveError::CalibrationFailure { instrument, reason } => {
                assert_eq!(instrument, quote.to_string());
                assert!(reason.contains("payment schedule unavailable"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
