//! Calibration of credit parameters to observed dirty prices.
//!
//! Each calibration solves `model_price(x) = observed` for one parameter
//! with Newton-Raphson, falling back to Brent on the configured bracket.
//! Iterations are bounded; running out reports the last iterate and
//! residual as [`AnalyticsError::NonConvergence`].

use log::{debug, info};
use ratekit_core::Date;
use ratekit_curves::DiscountCurve;
use ratekit_math::solvers::{hybrid_numerical, SolverConfig};
use serde::{Deserialize, Serialize};

use super::pricing::{
    dirty_price_from_intensity, dirty_price_from_piecewise_intensity, dirty_price_from_z_spread,
};
use super::DefaultableBond;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Solver settings for credit calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Absolute tolerance on the price residual
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Iteration cap for each solver stage
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Starting value of the parameter
    #[serde(default = "default_initial_guess")]
    pub initial_guess: f64,

    /// Bracket for the Brent fallback; searched around the guess when absent
    #[serde(default = "default_bracket")]
    pub bracket: Option<(f64, f64)>,
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_max_iterations() -> u32 {
    100
}

fn default_initial_guess() -> f64 {
    0.02
}

#[allow(clippy::unnecessary_wraps)]
fn default_bracket() -> Option<(f64, f64)> {
    Some((-0.5, 2.0))
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            initial_guess: default_initial_guess(),
            bracket: default_bracket(),
        }
    }
}

impl CalibrationConfig {
    fn solver(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }
}

/// Calibrated parameter with solver diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationResult {
    /// Calibrated value
    pub value: f64,
    /// Iterations used by the stage that converged
    pub iterations: u32,
    /// Price residual at the solution
    pub residual: f64,
}

/// Calibrates hazard rates and Z-spreads against one discount curve.
///
/// # Example
///
/// ```rust
/// use ratekit_analytics::credit::{dirty_price_from_intensity, CreditCalibrator, DefaultableBond};
/// use ratekit_core::Date;
/// use ratekit_curves::DiscountCurve;
///
/// let anchor = Date::from_ymd(2023, 2, 2).unwrap();
/// let maturity = Date::from_ymd(2028, 2, 2).unwrap();
/// let curve = DiscountCurve::new(anchor, vec![(maturity, 0.86)]).unwrap();
/// let bond = DefaultableBond::new(anchor, maturity, 0.05, 1, 100.0).unwrap();
///
/// let observed = dirty_price_from_intensity(&bond, &curve, 0.025, 0.4).unwrap();
/// let result = CreditCalibrator::new(&curve)
///     .flat_intensity(&bond, observed, 0.4)
///     .unwrap();
/// assert!((result.value - 0.025).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CreditCalibrator<'a> {
    curve: &'a DiscountCurve,
    config: CalibrationConfig,
}

impl<'a> CreditCalibrator<'a> {
    /// Creates a calibrator with default settings.
    #[must_use]
    pub fn new(curve: &'a DiscountCurve) -> Self {
        Self {
            curve,
            config: CalibrationConfig::default(),
        }
    }

    /// Replaces the solver settings.
    #[must_use]
    pub fn with_config(mut self, config: CalibrationConfig) -> Self {
        self.config = config;
        self
    }

    /// Flat intensity reproducing `dirty_price`.
    pub fn flat_intensity(
        &self,
        bond: &DefaultableBond,
        dirty_price: f64,
        recovery: f64,
    ) -> AnalyticsResult<CalibrationResult> {
        self.solve("flat intensity", dirty_price, |intensity| {
            dirty_price_from_intensity(bond, self.curve, intensity, recovery)
        })
    }

    /// Intensity beyond `prior_breakpoint` reproducing `dirty_price`, with
    /// `prior_intensity` applying up to the breakpoint.
    pub fn piecewise_intensity(
        &self,
        bond: &DefaultableBond,
        dirty_price: f64,
        recovery: f64,
        prior_intensity: f64,
        prior_breakpoint: Date,
    ) -> AnalyticsResult<CalibrationResult> {
        self.solve("piecewise intensity", dirty_price, |intensity| {
            dirty_price_from_piecewise_intensity(
                bond,
                self.curve,
                intensity,
                prior_intensity,
                prior_breakpoint,
                recovery,
            )
        })
    }

    /// Z-spread reproducing `dirty_price`.
    pub fn z_spread(
        &self,
        bond: &DefaultableBond,
        dirty_price: f64,
    ) -> AnalyticsResult<CalibrationResult> {
        self.solve("z-spread", dirty_price, |z| {
            dirty_price_from_z_spread(bond, self.curve, z)
        })
    }

    fn solve<P>(&self, target: &str, dirty_price: f64, price: P) -> AnalyticsResult<CalibrationResult>
    where
        P: Fn(f64) -> AnalyticsResult<f64>,
    {
        if !dirty_price.is_finite() || dirty_price <= 0.0 {
            return Err(AnalyticsError::invalid_input(format!(
                "observed dirty price must be positive, got {dirty_price}"
            )));
        }

        let solver = self.config.solver();
        solver.validate()?;

        // Input errors do not depend on the parameter; surface them before solving.
        let guess = self.config.initial_guess;
        price(guess)?;

        let objective = |x: f64| price(x).map_or(f64::NAN, |p| p - dirty_price);
        let result = hybrid_numerical(objective, guess, self.config.bracket, &solver)
            .map_err(|e| AnalyticsError::from_solver(target, e))?;

        debug!(
            "{target}: {:.10} after {} iterations (residual {:.2e})",
            result.root, result.iterations, result.residual
        );
        info!("Calibrated {target} = {:.6} to dirty price {dirty_price:.6}", result.root);

        Ok(CalibrationResult {
            value: result.root,
            iterations: result.iterations,
            residual: result.residual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn anchor() -> Date {
        date(2023, 2, 2)
    }

    fn curve() -> DiscountCurve {
        DiscountCurve::new(
            anchor(),
            vec![(date(2025, 2, 3), 0.94), (date(2033, 2, 2), 0.74)],
        )
        .unwrap()
    }

    fn bond(maturity: Date) -> DefaultableBond {
        DefaultableBond::new(anchor(), maturity, 0.045, 2, 100.0).unwrap()
    }

    #[test]
    fn test_flat_intensity_round_trip() {
        let curve = curve();
        let bond = bond(date(2028, 2, 2));
        let observed = dirty_price_from_intensity(&bond, &curve, 0.031, 0.35).unwrap();

        let result = CreditCalibrator::new(&curve)
            .flat_intensity(&bond, observed, 0.35)
            .unwrap();
        assert_abs_diff_eq!(result.value, 0.031, epsilon = 1e-8);
        assert!(result.residual.abs() < 1e-8);
    }

    #[test]
    fn test_piecewise_intensity_round_trip() {
        let curve = curve();
        let breakpoint = date(2025, 2, 3);
        let bond = bond(date(2030, 2, 4));
        let observed =
            dirty_price_from_piecewise_intensity(&bond, &curve, 0.045, 0.02, breakpoint, 0.4)
                .unwrap();

        let result = CreditCalibrator::new(&curve)
            .piecewise_intensity(&bond, observed, 0.4, 0.02, breakpoint)
            .unwrap();
        assert_abs_diff_eq!(result.value, 0.045, epsilon = 1e-8);
    }

    #[test]
    fn test_z_spread_round_trip() {
        let curve = curve();
        let bond = bond(date(2028, 2, 2));
        let observed = dirty_price_from_z_spread(&bond, &curve, 0.0125).unwrap();

        let result = CreditCalibrator::new(&curve).z_spread(&bond, observed).unwrap();
        assert_abs_diff_eq!(result.value, 0.0125, epsilon = 1e-8);
    }

    #[test]
    fn test_iteration_cap_reports_last_iterate() {
        let curve = curve();
        let bond = bond(date(2028, 2, 2));
        let observed = dirty_price_from_intensity(&bond, &curve, 0.031, 0.35).unwrap();

        let config = CalibrationConfig {
            max_iterations: 1,
            ..CalibrationConfig::default()
        };
        let err = CreditCalibrator::new(&curve)
            .with_config(config)
            .flat_intensity(&bond, observed, 0.35)
            .unwrap_err();

        match err {
            AnalyticsError::NonConvergence {
                target,
                iterations,
                last_iterate,
                residual,
            } => {
                assert_eq!(target, "flat intensity");
                assert_eq!(iterations, 1);
                assert!(last_iterate.is_finite());
                assert!(residual.is_finite());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_input_errors_are_not_masked() {
        let curve = curve();
        let bond = bond(date(2028, 2, 2));
        let calibrator = CreditCalibrator::new(&curve);

        assert!(matches!(
            calibrator.flat_intensity(&bond, 95.0, 1.2),
            Err(AnalyticsError::InvalidInput { .. })
        ));
        assert!(calibrator.z_spread(&bond, -1.0).is_err());
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: CalibrationConfig = serde_json::from_str(r#"{"max_iterations": 25}"#).unwrap();
        assert_eq!(config.max_iterations, 25);
        assert_eq!(config.tolerance, 1e-10);
        assert_eq!(config.bracket, Some((-0.5, 2.0)));
    }
}
