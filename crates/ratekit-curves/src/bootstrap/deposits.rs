//! Deposit tier.
//!
//! `DF(end) = 1 / (1 + r * tau)` with `tau` under the deposit day count.

use crate::config::BootstrapConfig;
use crate::error::{CurveError, CurveResult};
use crate::quotes::Quote;

use super::pillars::PillarSet;

/// Resolves a deposit and returns its discount factor.
pub(crate) fn resolve(
    pillars: &mut PillarSet,
    quote: &Quote,
    config: &BootstrapConfig,
) -> CurveResult<f64> {
    let tau = config.deposit_day_count.year_fraction(quote.start, quote.end);
    let growth = 1.0 + quote.rate * tau;
    if growth <= 0.0 {
        return Err(CurveError::calibration_failure(
            quote.to_string(),
            format!("growth factor 1 + r * tau = {growth} is not positive"),
        ));
    }

    let df = pillars.discount_factor(quote.start)? / growth;
    pillars.push(quote.end, df, quote)?;
    Ok(df)
}
