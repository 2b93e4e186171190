//! Error types for the analytics layer.

use ratekit_core::{CoreError, Date};
use ratekit_curves::CurveError;
use ratekit_math::MathError;
use thiserror::Error;

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Error type for pricing and calibration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Invalid input parameter
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Option valued on or after its expiry
    #[error("option expired: valuation date {valuation} is not before expiry {expiry}")]
    ExpiredOption {
        /// Valuation date.
        valuation: Date,
        /// Option expiry.
        expiry: Date,
    },

    /// Root finding ran out of iterations
    #[error(
        "{target} failed to converge after {iterations} iterations (last iterate {last_iterate}, residual {residual:.2e})"
    )]
    NonConvergence {
        /// What was being solved for.
        target: String,
        /// Number of iterations attempted.
        iterations: u32,
        /// Last iterate.
        last_iterate: f64,
        /// Objective value at the last iterate.
        residual: f64,
    },

    /// Curve construction or evaluation error
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Date or schedule error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Solver or interpolation error
    #[error(transparent)]
    Math(#[from] MathError),
}

impl AnalyticsError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Converts a solver failure for `target`, keeping the last iterate and
    /// residual of a convergence failure.
    #[must_use]
    pub fn from_solver(target: impl Into<String>, err: MathError) -> Self {
        match err {
            MathError::ConvergenceFailed {
                iterations,
                last_iterate,
                residual,
            } => Self::NonConvergence {
                target: target.into(),
                iterations,
                last_iterate,
                residual,
            },
            other => Self::Math(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_failure_keeps_last_iterate() {
        let err = AnalyticsError::from_solver(
            "flat intensity",
            MathError::convergence_failed(20, 0.031, 2.5e-3),
        );
        match err {
            AnalyticsError::NonConvergence {
                target,
                iterations,
                last_iterate,
                residual,
            } => {
                assert_eq!(target, "flat intensity");
                assert_eq!(iterations, 20);
                assert_eq!(last_iterate, 0.031);
                assert_eq!(residual, 2.5e-3);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_other_solver_errors_pass_through() {
        let err = AnalyticsError::from_solver("z-spread", MathError::invalid_input("bad"));
        assert!(matches!(err, AnalyticsError::Math(_)));
    }
}
