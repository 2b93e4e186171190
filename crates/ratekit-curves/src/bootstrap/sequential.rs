//! Sequential bootstrapper.

use log::{debug, info, warn};

use crate::config::BootstrapConfig;
use crate::curve::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::quotes::{Quote, QuoteKind, QuoteSet};
use crate::repricing::{RepricingCheck, RepricingReport};

use super::pillars::PillarSet;
use super::{deposits, futures, swaps};

/// A bootstrapped curve with its repricing report.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapResult {
    /// The bootstrapped curve
    pub curve: DiscountCurve,
    /// Repricing of every quote that produced a pillar
    pub report: RepricingReport,
}

impl BootstrapResult {
    /// Returns true if every quote repriced within tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    /// Consumes the result, returning the curve.
    #[must_use]
    pub fn into_curve(self) -> DiscountCurve {
        self.curve
    }
}

/// Sequential bootstrapper for discount curves.
///
/// Holds only configuration; every call to [`Bootstrapper::bootstrap`]
/// starts from an empty pillar set, so identical quotes give bit-identical
/// curves.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bootstrapper {
    config: BootstrapConfig,
}

impl Bootstrapper {
    /// Creates a bootstrapper with the given conventions.
    #[must_use]
    pub fn new(config: BootstrapConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Bootstraps a discount curve from `quotes`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the configuration is invalid
    /// - the quote set is empty
    /// - a quote implies a non-positive discount factor or cannot be solved
    ///   (`CurveError::CalibrationFailure` naming the quote)
    pub fn bootstrap(&self, quotes: &QuoteSet) -> CurveResult<DiscountCurve> {
        self.run(quotes).map(|(curve, _)| curve)
    }

    /// Bootstraps and reprices every pillar-producing quote.
    ///
    /// Does not fail when a check is out of tolerance; inspect
    /// [`BootstrapResult::is_valid`].
    pub fn bootstrap_validated(&self, quotes: &QuoteSet) -> CurveResult<BootstrapResult> {
        let (curve, superseded) = self.run(quotes)?;

        let checks = quotes
            .iter()
            .filter(|q| !superseded.contains(q))
            .map(|q| RepricingCheck::from_quote(q, &curve, &self.config))
            .collect::<CurveResult<Vec<_>>>()?;
        let report = RepricingReport::new(checks, superseded);

        if !report.is_valid() {
            warn!(
                "{} quotes outside repricing tolerance (max error {:.2e})",
                report.failed().count(),
                report.max_error()
            );
        }

        Ok(BootstrapResult { curve, report })
    }

    fn run(&self, quotes: &QuoteSet) -> CurveResult<(DiscountCurve, Vec<Quote>)> {
        self.config.validate()?;
        if quotes.is_empty() {
            return Err(CurveError::invalid_curve("no quotes to bootstrap"));
        }

        let mut pillars = PillarSet::new(quotes.settlement());
        let mut superseded = Vec::new();

        for quote in quotes.iter() {
            let last = pillars.last_date();
            if quote.end <= last {
                warn!("{quote} superseded: curve already resolved to {last}");
                superseded.push(*quote);
                continue;
            }

            let df = match quote.kind {
                QuoteKind::Deposit => deposits::resolve(&mut pillars, quote, &self.config)?,
                QuoteKind::Future => futures::resolve(&mut pillars, quote, &self.config)?,
                QuoteKind::Swap => swaps::resolve(&mut pillars, quote, &self.config)?,
            };
            debug!("{quote}: DF({}) = {df:.12}", quote.end);
        }

        let curve = pillars.into_curve()?;
        info!(
            "Bootstrapped {} pillars from {} quotes ({} superseded), settlement {} to {}",
            curve.len(),
            quotes.len(),
            superseded.len(),
            curve.anchor(),
            curve.last_date()
        );

        Ok((curve, superseded))
    }
}

/// Bootstraps `quotes` with the default configuration.
pub fn bootstrap(quotes: &QuoteSet) -> CurveResult<DiscountCurve> {
    Bootstrapper::default().bootstrap(quotes)
}
