//! Market quotes for curve construction.
//!
//! A [`QuoteSet`] holds a settlement date and three tiers of quotes:
//! deposits, futures and swaps. Each tier must be in strictly increasing
//! end-date order. Malformed input is rejected, never reordered or repaired.
//!
//! Quote sets are immutable. Scenario shifts build new sets through
//! [`QuoteSet::map_rates`] and [`QuoteSet::parallel_shift`].

use std::fmt;

use ratekit_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Instrument type of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteKind {
    /// Money-market deposit from settlement to maturity
    Deposit,
    /// Interest rate future (or FRA) between two dates
    Future,
    /// Spot-starting fixed/floating swap
    Swap,
}

impl fmt::Display for QuoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuoteKind::Deposit => "Deposit",
            QuoteKind::Future => "Future",
            QuoteKind::Swap => "Swap",
        };
        write!(f, "{name}")
    }
}

/// A mid-market quote: instrument type, accrual dates and annualized rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Instrument type
    pub kind: QuoteKind,
    /// Accrual start date
    pub start: Date,
    /// Maturity (end) date
    pub end: Date,
    /// Mid rate as a decimal (0.03 for 3%)
    pub rate: f64,
}

impl Quote {
    /// Creates a quote.
    #[must_use]
    pub fn new(kind: QuoteKind, start: Date, end: Date, rate: f64) -> Self {
        Self {
            kind,
            start,
            end,
            rate,
        }
    }

    /// Deposit from settlement to maturity.
    #[must_use]
    pub fn deposit(settlement: Date, maturity: Date, rate: f64) -> Self {
        Self::new(QuoteKind::Deposit, settlement, maturity, rate)
    }

    /// Future covering `[start, end]`.
    #[must_use]
    pub fn future(start: Date, end: Date, rate: f64) -> Self {
        Self::new(QuoteKind::Future, start, end, rate)
    }

    /// Spot-starting swap maturing at `maturity`.
    #[must_use]
    pub fn swap(settlement: Date, maturity: Date, rate: f64) -> Self {
        Self::new(QuoteKind::Swap, settlement, maturity, rate)
    }

    /// Builds quotes from paired date and rate series.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidQuote` if the series lengths differ.
    pub fn series(
        kind: QuoteKind,
        starts: &[Date],
        ends: &[Date],
        rates: &[f64],
    ) -> CurveResult<Vec<Quote>> {
        if starts.len() != ends.len() || ends.len() != rates.len() {
            return Err(CurveError::invalid_quote(
                format!("{kind} series"),
                format!(
                    "mismatched lengths: {} starts, {} ends, {} rates",
                    starts.len(),
                    ends.len(),
                    rates.len()
                ),
            ));
        }

        Ok(starts
            .iter()
            .zip(ends)
            .zip(rates)
            .map(|((&start, &end), &rate)| Quote::new(kind, start, end, rate))
            .collect())
    }

    /// Returns a copy with a different rate.
    #[must_use]
    pub fn with_rate(self, rate: f64) -> Self {
        Self { rate, ..self }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} @ {:.4}%",
            self.kind,
            self.start,
            self.end,
            self.rate * 100.0
        )
    }
}

/// Settlement date plus the deposit, futures and swap tiers.
///
/// Deserialization goes through the same validation as [`QuoteSet::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQuoteSet")]
pub struct QuoteSet {
    settlement: Date,
    deposits: Vec<Quote>,
    futures: Vec<Quote>,
    swaps: Vec<Quote>,
}

#[derive(Deserialize)]
struct RawQuoteSet {
    settlement: Date,
    #[serde(default)]
    deposits: Vec<Quote>,
    #[serde(default)]
    futures: Vec<Quote>,
    #[serde(default)]
    swaps: Vec<Quote>,
}

impl TryFrom<RawQuoteSet> for QuoteSet {
    type Error = CurveError;

    fn try_from(raw: RawQuoteSet) -> Result<Self, Self::Error> {
        QuoteSet::new(raw.settlement, raw.deposits, raw.futures, raw.swaps)
    }
}

impl QuoteSet {
    /// Creates a validated quote set.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidQuote` naming the first offending quote if:
    /// - a quote's kind does not match its tier
    /// - a rate is not finite
    /// - a quote does not end after it starts, or starts before settlement
    /// - a deposit or swap does not start at settlement
    /// - end dates within a tier are not strictly increasing
    pub fn new(
        settlement: Date,
        deposits: Vec<Quote>,
        futures: Vec<Quote>,
        swaps: Vec<Quote>,
    ) -> CurveResult<Self> {
        validate_tier(settlement, QuoteKind::Deposit, &deposits)?;
        validate_tier(settlement, QuoteKind::Future, &futures)?;
        validate_tier(settlement, QuoteKind::Swap, &swaps)?;

        Ok(Self {
            settlement,
            deposits,
            futures,
            swaps,
        })
    }

    /// Settlement (curve anchor) date.
    #[must_use]
    pub fn settlement(&self) -> Date {
        self.settlement
    }

    /// Deposit quotes in maturity order.
    #[must_use]
    pub fn deposits(&self) -> &[Quote] {
        &self.deposits
    }

    /// Futures quotes in end-date order.
    #[must_use]
    pub fn futures(&self) -> &[Quote] {
        &self.futures
    }

    /// Swap quotes in maturity order.
    #[must_use]
    pub fn swaps(&self) -> &[Quote] {
        &self.swaps
    }

    /// All quotes, deposits first, then futures, then swaps.
    pub fn iter(&self) -> impl Iterator<Item = &Quote> {
        self.deposits
            .iter()
            .chain(&self.futures)
            .chain(&self.swaps)
    }

    /// Total number of quotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deposits.len() + self.futures.len() + self.swaps.len()
    }

    /// Returns true if there are no quotes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds a new set whose rates are `f(quote)`.
    ///
    /// Dates are unchanged, so the result needs no re-validation.
    #[must_use]
    pub fn map_rates<F>(&self, f: F) -> Self
    where
        F: Fn(&Quote) -> f64,
    {
        let map = |quotes: &[Quote]| -> Vec<Quote> {
            quotes.iter().map(|q| q.with_rate(f(q))).collect()
        };

        Self {
            settlement: self.settlement,
            deposits: map(&self.deposits),
            futures: map(&self.futures),
            swaps: map(&self.swaps),
        }
    }

    /// Shifts every rate by `shift` (0.0001 is one basis point).
    #[must_use]
    pub fn parallel_shift(&self, shift: f64) -> Self {
        self.map_rates(|q| q.rate + shift)
    }
}

fn validate_tier(settlement: Date, kind: QuoteKind, quotes: &[Quote]) -> CurveResult<()> {
    let mut previous_end: Option<Date> = None;

    for quote in quotes {
        let reject = |reason: String| Err(CurveError::invalid_quote(quote.to_string(), reason));

        if quote.kind != kind {
            return reject(format!("{} quote found among {kind} quotes", quote.kind));
        }
        if !quote.rate.is_finite() {
            return reject("rate is not finite".to_string());
        }
        if quote.end <= quote.start {
            return reject("end date must be after start date".to_string());
        }
        if quote.start < settlement {
            return reject(format!("starts before settlement {settlement}"));
        }
        if kind != QuoteKind::Future && quote.start != settlement {
            return reject(format!("{kind} must start at settlement {settlement}"));
        }
        if let Some(prev) = previous_end {
            if quote.end <= prev {
                return reject(format!(
                    "end dates must be strictly increasing within {kind} quotes (previous end {prev})"
                ));
            }
        }
        previous_end = Some(quote.end);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn settle() -> Date {
        date(2023, 2, 2)
    }

    #[test]
    fn test_valid_set() {
        let set = QuoteSet::new(
            settle(),
            vec![
                Quote::deposit(settle(), date(2023, 2, 9), 0.029),
                Quote::deposit(settle(), date(2023, 5, 2), 0.030),
            ],
            vec![Quote::future(date(2023, 3, 15), date(2023, 6, 15), 0.031)],
            vec![Quote::swap(settle(), date(2025, 2, 3), 0.032)],
        )
        .unwrap();

        assert_eq!(set.len(), 4);
        assert_eq!(set.iter().next().unwrap().kind, QuoteKind::Deposit);
        assert_eq!(set.iter().last().unwrap().kind, QuoteKind::Swap);
    }

    #[test]
    fn test_rejects_unordered_tier() {
        let err = QuoteSet::new(
            settle(),
            vec![
                Quote::deposit(settle(), date(2023, 5, 2), 0.030),
                Quote::deposit(settle(), date(2023, 3, 2), 0.029),
            ],
            vec![],
            vec![],
        )
        .unwrap_err();

        match err {
            CurveError::InvalidQuote { instrument, reason } => {
                assert!(instrument.contains("2023-03-02"));
                assert!(reason.contains("strictly increasing"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_rejects_misplaced_or_malformed_quotes() {
        let future_in_deposits = QuoteSet::new(
            settle(),
            vec![Quote::future(settle(), date(2023, 5, 2), 0.03)],
            vec![],
            vec![],
        );
        assert!(future_in_deposits.is_err());

        let forward_swap = QuoteSet::new(
            settle(),
            vec![],
            vec![],
            vec![Quote::swap(date(2023, 3, 2), date(2025, 3, 3), 0.03)],
        );
        assert!(forward_swap.is_err());

        let reversed_future = QuoteSet::new(
            settle(),
            vec![],
            vec![Quote::future(date(2023, 6, 15), date(2023, 3, 15), 0.03)],
            vec![],
        );
        assert!(reversed_future.is_err());

        let nan_rate = QuoteSet::new(
            settle(),
            vec![Quote::deposit(settle(), date(2023, 5, 2), f64::NAN)],
            vec![],
            vec![],
        );
        assert!(nan_rate.is_err());
    }

    #[test]
    fn test_series_length_mismatch() {
        let starts = [settle(), settle()];
        let ends = [date(2023, 5, 2), date(2023, 8, 2)];

        assert!(Quote::series(QuoteKind::Deposit, &starts, &ends, &[0.03]).is_err());
        let quotes = Quote::series(QuoteKind::Deposit, &starts, &ends, &[0.03, 0.031]).unwrap();
        assert_eq!(quotes[1].end, date(2023, 8, 2));
    }

    #[test]
    fn test_transforms_leave_original_untouched() {
        let base = QuoteSet::new(
            settle(),
            vec![Quote::deposit(settle(), date(2023, 5, 2), 0.030)],
            vec![],
            vec![Quote::swap(settle(), date(2025, 2, 3), 0.032)],
        )
        .unwrap();

        let shifted = base.parallel_shift(0.0001);
        assert_relative_eq!(shifted.deposits()[0].rate, 0.0301);
        assert_relative_eq!(shifted.swaps()[0].rate, 0.0321);
        assert_relative_eq!(base.deposits()[0].rate, 0.030);

        let swaps_only = base.map_rates(|q| match q.kind {
            QuoteKind::Swap => q.rate * 2.0,
            _ => q.rate,
        });
        assert_relative_eq!(swaps_only.swaps()[0].rate, 0.064);
        assert_relative_eq!(swaps_only.deposits()[0].rate, 0.030);
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{
            "settlement": "2023-02-02",
            "deposits": [
                {"kind": "deposit", "start": "2023-02-02", "end": "2023-05-02", "rate": 0.03}
            ]
        }"#;
        let set: QuoteSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.deposits().len(), 1);
        assert!(set.swaps().is_empty());

        let bad = r#"{
            "settlement": "2023-02-02",
            "deposits": [
                {"kind": "swap", "start": "2023-02-02", "end": "2023-05-02", "rate": 0.03}
            ]
        }"#;
        assert!(serde_json::from_str::<QuoteSet>(bad).is_err());
    }
}
