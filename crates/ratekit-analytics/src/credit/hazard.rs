//! Hazard rate (default intensity) models.

use ratekit_core::daycounts::{Act365Fixed, DayCount};
use ratekit_core::Date;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Piecewise-constant hazard rate.
///
/// `intensities[k]` applies up to `breakpoints[k]`; the last intensity
/// applies after the last breakpoint, so there is always one more intensity
/// than breakpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseHazard {
    breakpoints: Vec<Date>,
    intensities: Vec<f64>,
}

impl PiecewiseHazard {
    /// Creates a piecewise hazard model.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidInput` if the breakpoints are not
    /// strictly increasing, the lengths do not match, or an intensity is
    /// not finite.
    pub fn new(breakpoints: Vec<Date>, intensities: Vec<f64>) -> AnalyticsResult<Self> {
        if intensities.len() != breakpoints.len() + 1 {
            return Err(AnalyticsError::invalid_input(format!(
                "{} breakpoints need {} intensities, got {}",
                breakpoints.len(),
                breakpoints.len() + 1,
                intensities.len()
            )));
        }
        if breakpoints.windows(2).any(|w| w[1] <= w[0]) {
            return Err(AnalyticsError::invalid_input(
                "hazard breakpoints must be strictly increasing",
            ));
        }
        if let Some(bad) = intensities.iter().find(|l| !l.is_finite()) {
            return Err(AnalyticsError::invalid_input(format!(
                "hazard intensity {bad} is not finite"
            )));
        }

        Ok(Self {
            breakpoints,
            intensities,
        })
    }

    /// `prior` up to `breakpoint`, `after` beyond it.
    #[must_use]
    pub fn two_segment(prior: f64, breakpoint: Date, after: f64) -> Self {
        Self {
            breakpoints: vec![breakpoint],
            intensities: vec![prior, after],
        }
    }

    /// Breakpoint dates.
    #[must_use]
    pub fn breakpoints(&self) -> &[Date] {
        &self.breakpoints
    }

    /// Intensities, one more than breakpoints.
    #[must_use]
    pub fn intensities(&self) -> &[f64] {
        &self.intensities
    }

    fn cumulative(&self, reference: Date, t: f64) -> f64 {
        let mut total = 0.0;
        let mut lower = 0.0;

        for (k, &intensity) in self.intensities.iter().enumerate() {
            let upper = self
                .breakpoints
                .get(k)
                .map_or(f64::INFINITY, |&b| Act365Fixed.year_fraction(reference, b));
            let end = upper.min(t);
            if end > lower {
                total += intensity * (end - lower);
            }
            if upper >= t {
                break;
            }
            lower = lower.max(upper);
        }

        total
    }
}

/// Default intensity model.
#[derive(Debug, Clone, PartialEq)]
pub enum HazardModel {
    /// Single intensity for all maturities
    Flat(f64),
    /// Piecewise-constant intensity
    Piecewise(PiecewiseHazard),
}

impl HazardModel {
    /// Cumulative hazard from `reference` to `date`.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidInput` if `date` is before `reference`.
    pub fn cumulative_hazard(&self, reference: Date, date: Date) -> AnalyticsResult<f64> {
        if date < reference {
            return Err(AnalyticsError::invalid_input(format!(
                "survival date {date} is before the reference date {reference}"
            )));
        }

        let t = Act365Fixed.year_fraction(reference, date);
        Ok(match self {
            HazardModel::Flat(intensity) => intensity * t,
            HazardModel::Piecewise(piecewise) => piecewise.cumulative(reference, t),
        })
    }

    /// Probability of no default between `reference` and `date`.
    pub fn survival_probability(&self, reference: Date, date: Date) -> AnalyticsResult<f64> {
        Ok((-self.cumulative_hazard(reference, date)?).exp())
    }

    /// Probability of default between `reference` and `date`.
    pub fn default_probability(&self, reference: Date, date: Date) -> AnalyticsResult<f64> {
        Ok(1.0 - self.survival_probability(reference, date)?)
    }
}

impl From<PiecewiseHazard> for HazardModel {
    fn from(piecewise: PiecewiseHazard) -> Self {
        HazardModel::Piecewise(piecewise)
    }
}
