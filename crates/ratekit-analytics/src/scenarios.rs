//! Quote-shock scenarios.
//!
//! A scenario is a full quote set. Each one is re-bootstrapped and revalued
//! independently, so scenarios can run concurrently (with the `parallel`
//! feature) and results never depend on evaluation order.
//!
//! Bucketed shocks spread a shift over key dates with triangular weights in
//! ACT/365 time from settlement: a quote maturing between two bucket dates
//! takes a linear share of each, quotes before the first bucket or after the
//! last take all of it. For every quote the weights sum to one, so the
//! bucket shocks add up to the parallel shock.

use log::{debug, info};
use ratekit_core::daycounts::{Act365Fixed, DayCount};
use ratekit_core::Date;
use ratekit_curves::{Bootstrapper, DiscountCurve, Quote, QuoteSet};

use crate::error::{AnalyticsError, AnalyticsResult};

/// One basis point.
const ONE_BP: f64 = 0.0001;

/// Named set of shocked quotes.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Label carried through to the results
    pub name: String,
    /// Quotes to bootstrap
    pub quotes: QuoteSet,
}

impl Scenario {
    /// Creates a scenario.
    #[must_use]
    pub fn new(name: impl Into<String>, quotes: QuoteSet) -> Self {
        Self {
            name: name.into(),
            quotes,
        }
    }

    /// Every quote shifted by `shift`.
    #[must_use]
    pub fn parallel(base: &QuoteSet, shift: f64) -> Self {
        Self::new(
            format!("parallel {:+.1}bp", shift / ONE_BP),
            base.parallel_shift(shift),
        )
    }
}

fn evaluate_one<T, V>(scenario: &Scenario, bootstrapper: &Bootstrapper, valuation: &V) -> AnalyticsResult<T>
where
    V: Fn(&DiscountCurve) -> AnalyticsResult<T>,
{
    let curve = bootstrapper.bootstrap(&scenario.quotes)?;
    let value = valuation(&curve);
    debug!(
        "Scenario '{}' evaluated ({})",
        scenario.name,
        if value.is_ok() { "ok" } else { "failed" }
    );
    value
}

/// Bootstraps and values each scenario, in parallel across scenarios.
///
/// Results come back in scenario order; a failure in one scenario does not
/// affect the others.
#[cfg(feature = "parallel")]
pub fn evaluate_scenarios<T, V>(
    scenarios: &[Scenario],
    bootstrapper: &Bootstrapper,
    valuation: V,
) -> Vec<(String, AnalyticsResult<T>)>
where
    T: Send,
    V: Fn(&DiscountCurve) -> AnalyticsResult<T> + Sync,
{
    use rayon::prelude::*;

    scenarios
        .par_iter()
        .map(|scenario| {
            (
                scenario.name.clone(),
                evaluate_one(scenario, bootstrapper, &valuation),
            )
        })
        .collect()
}

/// Bootstraps and values each scenario in turn.
///
/// Results come back in scenario order; a failure in one scenario does not
/// affect the others.
#[cfg(not(feature = "parallel"))]
pub fn evaluate_scenarios<T, V>(
    scenarios: &[Scenario],
    bootstrapper: &Bootstrapper,
    valuation: V,
) -> Vec<(String, AnalyticsResult<T>)>
where
    T: Send,
    V: Fn(&DiscountCurve) -> AnalyticsResult<T> + Sync,
{
    scenarios
        .iter()
        .map(|scenario| {
            (
                scenario.name.clone(),
                evaluate_one(scenario, bootstrapper, &valuation),
            )
        })
        .collect()
}

/// Change in value for a one basis point rise in every quote.
pub fn parallel_dv01<V>(
    quotes: &QuoteSet,
    bootstrapper: &Bootstrapper,
    valuation: V,
) -> AnalyticsResult<f64>
where
    V: Fn(&DiscountCurve) -> AnalyticsResult<f64> + Sync,
{
    let scenarios = [
        Scenario::new("base", quotes.clone()),
        Scenario::parallel(quotes, ONE_BP),
    ];
    let mut results = evaluate_scenarios(&scenarios, bootstrapper, valuation).into_iter();

    let (Some((_, base)), Some((_, bumped))) = (results.next(), results.next()) else {
        return Err(AnalyticsError::invalid_input("scenario results missing"));
    };
    let dv01 = bumped? - base?;
    info!("Parallel DV01: {dv01:.6}");
    Ok(dv01)
}

/// Share of a shock at time `t` assigned to each bucket.
fn bucket_weights(bucket_times: &[f64], t: f64) -> Vec<f64> {
    let mut weights = vec![0.0; bucket_times.len()];
    let last = bucket_times.len() - 1;

    if t <= bucket_times[0] {
        weights[0] = 1.0;
    } else if t >= bucket_times[last] {
        weights[last] = 1.0;
    } else {
        let i = bucket_times.partition_point(|&b| b <= t) - 1;
        let (left, right) = (bucket_times[i], bucket_times[i + 1]);
        let w = (right - t) / (right - left);
        weights[i] = w;
        weights[i + 1] = 1.0 - w;
    }
    weights
}

/// One scenario per bucket date, each shifting quotes by `shift` times the
/// quote's triangular weight on that bucket.
///
/// # Errors
///
/// Returns `AnalyticsError::InvalidInput` unless the bucket dates are
/// non-empty, strictly increasing and after settlement.
pub fn bucket_scenarios(
    base: &QuoteSet,
    bucket_dates: &[Date],
    shift: f64,
) -> AnalyticsResult<Vec<Scenario>> {
    let settlement = base.settlement();

    if bucket_dates.is_empty() {
        return Err(AnalyticsError::invalid_input("no bucket dates"));
    }
    if bucket_dates[0] <= settlement {
        return Err(AnalyticsError::invalid_input(format!(
            "bucket date {} must be after settlement {settlement}",
            bucket_dates[0]
        )));
    }
    if let Some(pair) = bucket_dates.windows(2).find(|pair| pair[1] <= pair[0]) {
        return Err(AnalyticsError::invalid_input(format!(
            "bucket dates must be strictly increasing ({} then {})",
            pair[0], pair[1]
        )));
    }

    let bucket_times: Vec<f64> = bucket_dates
        .iter()
        .map(|&date| Act365Fixed.year_fraction(settlement, date))
        .collect();
    let weight = |quote: &Quote, bucket: usize| {
        bucket_weights(&bucket_times, Act365Fixed.year_fraction(settlement, quote.end))[bucket]
    };

    Ok(bucket_dates
        .iter()
        .enumerate()
        .map(|(k, date)| {
            Scenario::new(
                format!("bucket {date} {:+.1}bp", shift / ONE_BP),
                base.map_rates(|q| q.rate + shift * weight(q, k)),
            )
        })
        .collect())
}

/// Change in value for a one basis point bucketed rise at each bucket date.
pub fn bucket_dv01<V>(
    quotes: &QuoteSet,
    bucket_dates: &[Date],
    bootstrapper: &Bootstrapper,
    valuation: V,
) -> AnalyticsResult<Vec<(Date, f64)>>
where
    V: Fn(&DiscountCurve) -> AnalyticsResult<f64> + Sync,
{
    let base = valuation(&bootstrapper.bootstrap(quotes)?)?;
    let scenarios = bucket_scenarios(quotes, bucket_dates, ONE_BP)?;

    bucket_dates
        .iter()
        .zip(evaluate_scenarios(&scenarios, bootstrapper, valuation))
        .map(|(&date, (_, value))| Ok((date, value? - base)))
        .collect()
}
