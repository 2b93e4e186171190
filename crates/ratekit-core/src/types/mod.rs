//! Domain types.

mod cashflow;
mod date;

pub use cashflow::{CashFlow, CashFlowKind, CashFlowSchedule};
pub use date::{days_in_month, Date};
