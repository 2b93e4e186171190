//! Repricing validation for bootstrapped curves.
//!
//! Every quote that produced a pillar is repriced against the finished curve
//! and its implied rate compared with the quote:
//!
//! - deposits and futures: simple forward rate over the accrual period
//! - swaps: fixed-leg par rate
//!
//! Quotes superseded by an earlier tier produced no pillar and are listed
//! separately.

use std::fmt;

use crate::config::BootstrapConfig;
use crate::curve::DiscountCurve;
use crate::error::CurveResult;
use crate::instruments::FixedLeg;
use crate::quotes::{Quote, QuoteKind};

/// Repricing tolerances on the implied rate, by quote kind.
pub mod tolerances {
    use crate::quotes::QuoteKind;

    /// Deposit rate tolerance
    pub const DEPOSIT: f64 = 1e-10;

    /// Futures rate tolerance
    pub const FUTURE: f64 = 1e-10;

    /// Swap par rate tolerance
    pub const SWAP: f64 = 1e-8;

    /// Tolerance for a quote kind.
    #[must_use]
    pub fn for_kind(kind: QuoteKind) -> f64 {
        match kind {
            QuoteKind::Deposit => DEPOSIT,
            QuoteKind::Future => FUTURE,
            QuoteKind::Swap => SWAP,
        }
    }
}

/// Rate implied for `quote` by `curve` under the bootstrap conventions.
pub fn implied_rate(
    quote: &Quote,
    curve: &DiscountCurve,
    config: &BootstrapConfig,
) -> CurveResult<f64> {
    match quote.kind {
        QuoteKind::Deposit => curve.forward_rate(quote.start, quote.end, config.deposit_day_count),
        QuoteKind::Future => curve.forward_rate(quote.start, quote.end, config.future_day_count),
        QuoteKind::Swap => FixedLeg::generate(
            quote.start,
            quote.end,
            config.swap_frequency,
            config.swap_day_count,
        )?
        .par_rate(curve),
    }
}

/// Result of repricing one quote against the curve.
#[derive(Debug, Clone, PartialEq)]
pub struct RepricingCheck {
    /// Description of the quote
    pub instrument: String,

    /// Quote kind
    pub kind: QuoteKind,

    /// Quoted rate
    pub quoted: f64,

    /// Rate implied by the curve
    pub implied: f64,

    /// `|implied - quoted|`
    pub error: f64,

    /// Tolerance for this quote kind
    pub tolerance: f64,

    /// Whether the error is within tolerance
    pub passed: bool,
}

impl RepricingCheck {
    /// Creates a check with the default tolerance for the quote kind.
    #[must_use]
    pub fn new(quote: &Quote, implied: f64) -> Self {
        let tolerance = tolerances::for_kind(quote.kind);
        let error = (implied - quote.rate).abs();

        Self {
            instrument: quote.to_string(),
            kind: quote.kind,
            quoted: quote.rate,
            implied,
            error,
            tolerance,
            passed: error <= tolerance,
        }
    }

    /// Reprices `quote` against `curve`.
    pub fn from_quote(
        quote: &Quote,
        curve: &DiscountCurve,
        config: &BootstrapConfig,
    ) -> CurveResult<Self> {
        Ok(Self::new(quote, implied_rate(quote, curve, config)?))
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed { "ok" } else { "FAILED" };
        write!(
            f,
            "{status} {} | implied {:.8}% | error {:.2e} (tol {:.0e})",
            self.instrument,
            self.implied * 100.0,
            self.error,
            self.tolerance
        )
    }
}

/// Repricing checks plus the quotes that produced no pillar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
    superseded: Vec<Quote>,
}

impl RepricingReport {
    /// Creates a report.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>, superseded: Vec<Quote>) -> Self {
        Self { checks, superseded }
    }

    /// Returns true if every check passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Individual checks in bootstrap order.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Quotes superseded by an earlier tier.
    #[must_use]
    pub fn superseded(&self) -> &[Quote] {
        &self.superseded
    }

    /// Largest absolute rate error, 0 for an empty report.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.checks.iter().map(|c| c.error).fold(0.0, f64::max)
    }

    /// Checks outside tolerance.
    pub fn failed(&self) -> impl Iterator<Item = &RepricingCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Repricing: {} checks, max error {:.2e}",
            self.checks.len(),
            self.max_error()
        )?;
        for check in &self.checks {
            writeln!(f, "  {check}")?;
        }
        for quote in &self.superseded {
            writeln!(f, "  superseded {quote}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratekit_core::Date;

    fn quote(rate: f64) -> Quote {
        Quote::deposit(
            Date::from_ymd(2023, 2, 2).unwrap(),
            Date::from_ymd(2023, 5, 2).unwrap(),
            rate,
        )
    }

    #[test]
    fn test_check_within_tolerance() {
        let check = RepricingCheck::new(&quote(0.03), 0.03 + 5e-11);
        assert!(check.passed);
        assert_eq!(check.tolerance, tolerances::DEPOSIT);
        assert!(check.to_string().starts_with("ok Deposit"));
    }

    #[test]
    fn test_report_summary() {
        let report = RepricingReport::new(
            vec![
                RepricingCheck::new(&quote(0.03), 0.03),
                RepricingCheck::new(&quote(0.03), 0.0301),
            ],
            vec![quote(0.031)],
        );

        assert!(!report.is_valid());
        assert_eq!(report.failed().count(), 1);
        assert!((report.max_error() - 1e-4).abs() < 1e-12);
        assert_eq!(report.superseded().len(), 1);
        assert!(report.to_string().contains("superseded"));
    }

    #[test]
    fn test_empty_report_is_valid() {
        let report = RepricingReport::default();
        assert!(report.is_valid());
        assert_eq!(report.max_error(), 0.0);
    }
}
