//! Root-finding algorithms.
//!
//! Curve and credit calibration reduce to one-dimensional root finding:
//! a zero rate, an intensity or a spread that reproduces a quoted price.
//! [`hybrid`] is the workhorse; [`newton_raphson`] and [`brent`] are
//! exposed for callers that know which one they need.
//!
//! Objectives may return NaN where they are undefined. Newton steps inside
//! [`hybrid`] are halved away from such points; elsewhere a NaN is reported
//! as [`MathError::NonFiniteObjective`].
//!
//! Iterations are capped by [`SolverConfig::max_iterations`]; running out
//! yields [`MathError::ConvergenceFailed`] with the last iterate and residual.
//!
//! # Example
//!
//! ```rust
//! use ratekit_math::solvers::{hybrid_numerical, SolverConfig};
//!
//! // Flat rate that discounts 100 in 2 years to 94
//! let f = |r: f64| 100.0 * (-2.0 * r).exp() - 94.0;
//!
//! let result = hybrid_numerical(f, 0.02, Some((0.0, 0.2)), &SolverConfig::default()).unwrap();
//! assert!((result.root - (100.0f64 / 94.0).ln() / 2.0).abs() < 1e-10);
//! ```
//!
//! [`MathError::ConvergenceFailed`]: crate::error::MathError::ConvergenceFailed
//! [`MathError::NonFiniteObjective`]: crate::error::MathError::NonFiniteObjective

mod brent;
mod hybrid;
mod newton;

use crate::error::{MathError, MathResult};

pub use brent::brent;
pub use hybrid::{hybrid, hybrid_numerical};
pub use newton::{newton_raphson, newton_raphson_numerical};

/// Default absolute tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Tolerance and iteration cap shared by all solvers.
///
/// A solver stops once `|f(x)|`, its last step or its bracket width falls
/// below `tolerance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Absolute convergence tolerance
    pub tolerance: f64,
    /// Iteration cap
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS)
    }
}

impl SolverConfig {
    /// Creates a configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Rejects non-positive tolerances and a zero iteration cap.
    pub fn validate(&self) -> MathResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(MathError::invalid_input(format!(
                "solver tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(MathError::invalid_input(
                "solver needs at least one iteration",
            ));
        }
        Ok(())
    }
}

/// Root with its diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// Root estimate
    pub root: f64,
    /// Iterations used
    pub iterations: u32,
    /// Objective at the root
    pub residual: f64,
}

impl SolverResult {
    pub(crate) fn new(root: f64, iterations: u32, residual: f64) -> Self {
        Self {
            root,
            iterations,
            residual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(SolverConfig::default().validate().is_ok());
        assert!(SolverConfig::new(0.0, 10).validate().is_err());
        assert!(SolverConfig::new(f64::NAN, 10).validate().is_err());
        assert!(SolverConfig::new(1e-12, 0).validate().is_err());
    }
}
