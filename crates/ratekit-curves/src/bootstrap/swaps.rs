//! Swap tier.
//!
//! For a spot-starting swap with fixed-leg accruals `tau_i` and payment dates
//! `p_1..p_N`, par pricing gives
//!
//! ```text
//! DF(p_N) = (DF(start) - r * sum_{i<N} tau_i DF(p_i)) / (1 + r * tau_N)
//! ```
//!
//! The closed form applies when every intermediate payment date is already
//! resolved. Otherwise the terminal zero rate is solved so that the final
//! curve reprices the swap at its quote.

use crate::config::BootstrapConfig;
use crate::error::{CurveError, CurveResult};
use crate::instruments::FixedLeg;
use crate::quotes::Quote;

use super::pillars::PillarSet;

/// Resolves a swap and returns its maturity discount factor.
pub(crate) fn resolve(
    pillars: &mut PillarSet,
    quote: &Quote,
    config: &BootstrapConfig,
) -> CurveResult<f64> {
    let leg = FixedLeg::generate(
        quote.start,
        quote.end,
        config.swap_frequency,
        config.swap_day_count,
    )?;
    let periods: Vec<_> = leg.accrual_fractions().collect();
    let Some((&(_, tau_last), known)) = periods.split_last() else {
        return Err(CurveError::calibration_failure(
            quote.to_string(),
            "fixed leg has no periods",
        ));
    };

    let df = if known.iter().all(|&(date, _)| pillars.is_resolved(date)) {
        let df_start = pillars.discount_factor(leg.accrual_start())?;
        let mut known_annuity = 0.0;
        for &(date, tau) in known {
            known_annuity += tau * pillars.discount_factor(date)?;
        }
        (df_start - quote.rate * known_annuity) / (1.0 + quote.rate * tau_last)
    } else {
        let solver = config.solver.to_solver_config();
        pillars.solve_terminal(quote.end, quote, &solver, |curve| {
            let annuity = leg.annuity(curve)?;
            let df_start = curve.discount_factor(leg.accrual_start())?;
            let df_end = curve.discount_factor(leg.maturity())?;
            Ok(quote.rate * annuity - (df_start - df_end))
        })?
    };

    pillars.push(quote.end, df, quote)?;
    Ok(df)
}
