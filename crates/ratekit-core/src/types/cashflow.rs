//! Dated cash flows and cash flow schedules.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;
use crate::error::{CoreError, CoreResult};

/// Type of cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowKind {
    /// Regular coupon payment
    Coupon,
    /// Combined coupon and principal (final payment)
    CouponAndPrincipal,
}

impl fmt::Display for CashFlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CashFlowKind::Coupon => "Coupon",
            CashFlowKind::CouponAndPrincipal => "Coupon+Principal",
        };
        write!(f, "{name}")
    }
}

/// A single payment on a given date.
///
/// # Example
///
/// ```rust
/// use ratekit_core::types::{CashFlow, CashFlowKind, Date};
///
/// let cf = CashFlow::coupon(Date::from_ymd(2024, 2, 2).unwrap(), 5.0)
///     .with_accrual_start(Date::from_ymd(2023, 2, 2).unwrap());
/// assert_eq!(cf.kind(), CashFlowKind::Coupon);
/// assert_eq!(cf.amount(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    date: Date,
    amount: f64,
    kind: CashFlowKind,
    accrual_start: Option<Date>,
}

impl CashFlow {
    /// Creates a new cash flow.
    #[must_use]
    pub fn new(date: Date, amount: f64, kind: CashFlowKind) -> Self {
        Self {
            date,
            amount,
            kind,
            accrual_start: None,
        }
    }

    /// Creates a coupon cash flow.
    #[must_use]
    pub fn coupon(date: Date, amount: f64) -> Self {
        Self::new(date, amount, CashFlowKind::Coupon)
    }

    /// Sets the start of the accrual period that this payment closes.
    #[must_use]
    pub fn with_accrual_start(mut self, start: Date) -> Self {
        self.accrual_start = Some(start);
        self
    }

    /// Payment date.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Payment amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Type of the payment.
    #[must_use]
    pub fn kind(&self) -> CashFlowKind {
        self.kind
    }

    /// Start of the accrual period, if known.
    #[must_use]
    pub fn accrual_start(&self) -> Option<Date> {
        self.accrual_start
    }

    /// Returns true if the flow repays principal.
    #[must_use]
    pub fn is_principal(&self) -> bool {
        self.kind == CashFlowKind::CouponAndPrincipal
    }
}

impl fmt::Display for CashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {:.6}", self.date, self.kind, self.amount)
    }
}

/// Ordered cash flows with strictly increasing payment dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Creates a schedule from flows already in date order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCashFlow` if dates are not strictly increasing.
    pub fn new(flows: Vec<CashFlow>) -> CoreResult<Self> {
        for pair in flows.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(CoreError::invalid_cashflow(format!(
                    "payment dates must be strictly increasing: {} follows {}",
                    pair[1].date, pair[0].date
                )));
            }
        }
        Ok(Self { flows })
    }

    /// Number of flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Returns true if there are no flows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Iterates over the flows in date order.
    pub fn iter(&self) -> std::slice::Iter<'_, CashFlow> {
        self.flows.iter()
    }

    /// Flows as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CashFlow] {
        &self.flows
    }

    /// Date of the last flow.
    #[must_use]
    pub fn maturity(&self) -> Option<Date> {
        self.flows.last().map(CashFlow::date)
    }

    /// Undiscounted sum of all amounts.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.flows.iter().map(CashFlow::amount).sum()
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}
