//! Futures tier.
//!
//! `DF(end) = DF(start) / (1 + r * tau(start, end))`. When `DF(start)` still
//! depends on the pillar being resolved, the terminal zero rate is solved so
//! that the final curve reproduces the quoted forward.

use crate::config::BootstrapConfig;
use crate::error::CurveResult;
use crate::quotes::Quote;

use super::pillars::PillarSet;

/// Resolves a future and returns its end-date discount factor.
pub(crate) fn resolve(
    pillars: &mut PillarSet,
    quote: &Quote,
    config: &BootstrapConfig,
) -> CurveResult<f64> {
    let tau = config.future_day_count.year_fraction(quote.start, quote.end);
    let growth = 1.0 + quote.rate * tau;

    let df = if pillars.is_resolved(quote.start) {
        pillars.discount_factor(quote.start)? / growth
    } else {
        let solver = config.solver.to_solver_config();
        pillars.solve_terminal(quote.end, quote, &solver, |curve| {
            Ok(curve.discount_factor(quote.start)? - curve.discount_factor(quote.end)? * growth)
        })?
    };

    pillars.push(quote.end, df, quote)?;
    Ok(df)
}
