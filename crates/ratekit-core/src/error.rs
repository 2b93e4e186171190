//! Error types for the core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by dates, calendars, schedules and cash flows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Invalid or unparseable calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Invalid schedule request (reversed dates, unsupported frequency).
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of what's invalid.
        reason: String,
    },

    /// Invalid cash flow schedule.
    #[error("Invalid cash flow: {reason}")]
    InvalidCashFlow {
        /// Description of the invalid cash flow.
        reason: String,
    },

    /// Unknown day count convention name.
    #[error("Unknown day count convention: '{name}'")]
    UnknownDayCount {
        /// The name that failed to parse.
        name: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    /// Creates an invalid cash flow error.
    #[must_use]
    pub fn invalid_cashflow(reason: impl Into<String>) -> Self {
        Self::InvalidCashFlow {
            reason: reason.into(),
        }
    }

    /// Creates an unknown day count error.
    #[must_use]
    pub fn unknown_day_count(name: impl Into<String>) -> Self {
        Self::UnknownDayCount { name: name.into() }
    }
}
