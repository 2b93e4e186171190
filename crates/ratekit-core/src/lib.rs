//! # Ratekit Core
//!
//! Foundational types shared by every Ratekit crate:
//!
//! - **Types**: [`Date`], cash flows and cash flow schedules
//! - **Day Count Conventions**: ACT/365 Fixed, ACT/360 and 30E/360 year fractions
//! - **Calendars**: weekend-only business day rules, the business-date offset
//!   and payment schedule generation
//!
//! ## Example
//!
//! ```rust
//! use ratekit_core::prelude::*;
//!
//! let start = Date::from_ymd(2023, 2, 2).unwrap();
//! let end = Date::from_ymd(2026, 2, 2).unwrap();
//!
//! let schedule = generate_schedule(start, end, 2).unwrap();
//! assert_eq!(schedule.first(), Some(&start));
//! assert_eq!(schedule.last(), Some(&end));
//!
//! let yf = DayCountConvention::Thirty360E.year_fraction(start, end);
//! assert!((yf - 3.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::similar_names)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{generate_schedule, offset, Calendar, WeekendCalendar};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{CashFlow, CashFlowKind, CashFlowSchedule, Date};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::Date;
