//! Numerical errors.

use thiserror::Error;

/// Result alias for the math crate.
pub type MathResult<T> = Result<T, MathError>;

/// Failures of solvers and interpolators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Iteration cap reached without meeting the tolerance.
    #[error(
        "no convergence after {iterations} iterations: x = {last_iterate}, f(x) = {residual:.3e}"
    )]
    ConvergenceFailed {
        /// Iterations performed
        iterations: u32,
        /// Last iterate
        last_iterate: f64,
        /// Objective at the last iterate
        residual: f64,
    },

    /// The objective has the same sign at both ends of the bracket.
    #[error("[{lower}, {upper}] does not bracket a root: f = {f_lower:.3e} and {f_upper:.3e}")]
    InvalidBracket {
        /// Lower end
        lower: f64,
        /// Upper end
        upper: f64,
        /// Objective at the lower end
        f_lower: f64,
        /// Objective at the upper end
        f_upper: f64,
    },

    /// The objective is NaN or infinite at a point the solver had to visit.
    #[error("objective is not finite at x = {x}")]
    NonFiniteObjective {
        /// Offending point
        x: f64,
    },

    /// Newton step impossible because the derivative vanishes.
    #[error("derivative {derivative:.3e} at x = {x} is too flat for a Newton step")]
    FlatDerivative {
        /// Point of evaluation
        x: f64,
        /// Derivative at `x`
        derivative: f64,
    },

    /// Query outside the interpolation range with extrapolation disabled.
    #[error("{x} is outside the interpolation range [{min}, {max}]")]
    OutOfRange {
        /// Query point
        x: f64,
        /// Smallest abscissa
        min: f64,
        /// Largest abscissa
        max: f64,
    },

    /// Malformed input data or settings.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What is wrong
        reason: String,
    },
}

impl MathError {
    /// Iteration cap reached at `last_iterate`.
    #[must_use]
    pub fn convergence_failed(iterations: u32, last_iterate: f64, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            last_iterate,
            residual,
        }
    }

    /// Malformed input.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns true for failures where a different start or bracket might
    /// still succeed.
    #[must_use]
    pub fn is_numerical(&self) -> bool {
        matches!(
            self,
            Self::ConvergenceFailed { .. }
                | Self::InvalidBracket { .. }
                | Self::NonFiniteObjective { .. }
                | Self::FlatDerivative { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convergence_message_carries_iterate() {
        let err = MathError::convergence_failed(12, 0.0315, -4.2e-7);
        let message = err.to_string();
        assert!(message.contains("12 iterations"));
        assert!(message.contains("0.0315"));
    }

    #[test]
    fn test_numerical_classification() {
        assert!(MathError::FlatDerivative { x: 0.0, derivative: 0.0 }.is_numerical());
        assert!(!MathError::invalid_input("empty").is_numerical());
    }
}
