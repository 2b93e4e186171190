//! Error types for curve construction and evaluation.

use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::{CoreError, Date};
use ratekit_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A quote or quote series is malformed.
    #[error("Invalid quote {instrument}: {reason}")]
    InvalidQuote {
        /// Description of the offending quote.
        instrument: String,
        /// What is wrong with it.
        reason: String,
    },

    /// No consistent positive discount factor exists for an instrument.
    #[error("Calibration failed for {instrument}: {reason}")]
    CalibrationFailure {
        /// Description of the offending quote.
        instrument: String,
        /// Description of the failure.
        reason: String,
    },

    /// Curve points are malformed.
    #[error("Invalid curve: {reason}")]
    InvalidCurve {
        /// Description of what's invalid.
        reason: String,
    },

    /// Evaluation requested before the curve's anchor date.
    #[error("Date {date} is before the curve anchor {anchor}")]
    DateBeforeAnchor {
        /// Requested date.
        date: Date,
        /// Curve anchor date.
        anchor: Date,
    },

    /// Accrual period with no positive length.
    #[error("Period {start} -> {end} has non-positive length under {day_count}")]
    InvalidPeriod {
        /// Period start.
        start: Date,
        /// Period end.
        end: Date,
        /// Day count the length was measured with.
        day_count: DayCountConvention,
    },

    /// Zero rate requested at the anchor, where it is undefined.
    #[error("Zero rate is undefined at the curve anchor {anchor}")]
    ZeroRateAtAnchor {
        /// Curve anchor date.
        anchor: Date,
    },

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of the configuration error.
        reason: String,
    },

    /// Date or schedule error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Interpolation or solver error.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates an invalid quote error.
    #[must_use]
    pub fn invalid_quote(instrument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidQuote {
            instrument: instrument.into(),
            reason: reason.into(),
        }
    }

    /// Creates a calibration failure error.
    #[must_use]
    pub fn calibration_failure(instrument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CalibrationFailure {
            instrument: instrument.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid curve error.
    #[must_use]
    pub fn invalid_curve(reason: impl Into<String>) -> Self {
        Self::InvalidCurve {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
