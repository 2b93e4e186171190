//! End-to-end bootstrap tests.

use approx::assert_relative_eq;
use proptest::prelude::*;
use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::Date;
use ratekit_curves::prelude::*;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn settle() -> Date {
    date(2023, 2, 2)
}

fn market_quotes() -> QuoteSet {
    let s = settle();
    QuoteSet::new(
        s,
        vec![
            Quote::deposit(s, date(2023, 2, 9), 0.0290),
            Quote::deposit(s, date(2023, 3, 2), 0.0295),
            Quote::deposit(s, date(2023, 5, 2), 0.0300),
        ],
        vec![
            Quote::future(date(2023, 5, 2), date(2023, 8, 2), 0.0310),
            Quote::future(date(2023, 8, 2), date(2023, 11, 2), 0.0315),
        ],
        vec![
            Quote::swap(s, date(2025, 2, 3), 0.0320),
            Quote::swap(s, date(2026, 2, 2), 0.0315),
            Quote::swap(s, date(2028, 2, 2), 0.0310),
            Quote::swap(s, date(2033, 2, 2), 0.0305),
        ],
    )
    .unwrap()
}

#[test]
fn test_settlement_df_is_exactly_one_and_all_positive() {
    let curve = bootstrap(&market_quotes()).unwrap();

    assert_eq!(curve.discount_factor(settle()).unwrap(), 1.0);
    assert_eq!(curve.len(), 9);
    for (_, df) in curve.points() {
        assert!(df > 0.0);
    }
}

#[test]
fn test_single_deposit_discount_factor() {
    let s = settle();
    let quotes = QuoteSet::new(
        s,
        vec![Quote::deposit(s, date(2023, 5, 2), 0.03)],
        vec![],
        vec![],
    )
    .unwrap();

    let curve = bootstrap(&quotes).unwrap();
    let expected = 1.0 / (1.0 + 0.03 * 89.0 / 360.0);
    assert_relative_eq!(
        curve.discount_factor(date(2023, 5, 2)).unwrap(),
        expected,
        max_relative = 1e-14
    );
    assert!((expected - 0.99263).abs() < 1e-4);
}

#[test]
fn test_deposits_and_futures_round_trip() {
    let quotes = market_quotes();
    let curve = bootstrap(&quotes).unwrap();

    for q in quotes.deposits() {
        let implied = curve
            .forward_rate(q.start, q.end, DayCountConvention::Act360)
            .unwrap();
        assert!((implied - q.rate).abs() < 1e-10, "{q}: implied {implied}");
    }
    for q in quotes.futures() {
        let implied = curve
            .forward_rate(q.start, q.end, DayCountConvention::Act360)
            .unwrap();
        assert!((implied - q.rate).abs() < 1e-10, "{q}: implied {implied}");
    }
}

#[test]
fn test_swaps_reprice_at_par() {
    let quotes = market_quotes();
    let curve = bootstrap(&quotes).unwrap();

    for q in quotes.swaps() {
        let leg = FixedLeg::generate(q.start, q.end, 1, DayCountConvention::Thirty360E).unwrap();
        let par = leg.par_rate(&curve).unwrap();
        assert!((par - q.rate).abs() < 1e-8, "{q}: par {par}");
    }
}

#[test]
fn test_validated_report_covers_every_quote() {
    let quotes = market_quotes();
    let result = Bootstrapper::default().bootstrap_validated(&quotes).unwrap();

    assert!(result.is_valid(), "{}", result.report);
    assert_eq!(result.report.checks().len(), quotes.len());
    assert!(result.report.superseded().is_empty());
    assert!(result.report.max_error() < 1e-8);
}

#[test]
fn test_semi_annual_swaps_with_gaps_are_solved() {
    let s = settle();
    let quotes = QuoteSet::new(
        s,
        vec![],
        vec![],
        vec![
            Quote::swap(s, date(2025, 2, 3), 0.0320),
            Quote::swap(s, date(2028, 2, 2), 0.0310),
        ],
    )
    .unwrap();

    let config = BootstrapConfig::from_toml_str("swap_frequency = 2").unwrap();
    let result = Bootstrapper::new(config).bootstrap_validated(&quotes).unwrap();
    assert!(result.is_valid(), "{}", result.report);

    for q in quotes.swaps() {
        let leg = FixedLeg::generate(q.start, q.end, 2, DayCountConvention::Thirty360E).unwrap();
        assert!((leg.par_rate(&result.curve).unwrap() - q.rate).abs() < 1e-8);
    }
}

#[test]
fn test_later_tier_overlap_is_superseded() {
    let s = settle();
    let quotes = QuoteSet::new(
        s,
        vec![Quote::deposit(s, date(2023, 8, 2), 0.030)],
        vec![
            Quote::future(date(2023, 5, 2), date(2023, 8, 2), 0.031),
            Quote::future(date(2023, 8, 2), date(2023, 11, 2), 0.032),
        ],
        vec![Quote::swap(s, date(2025, 2, 3), 0.032)],
    )
    .unwrap();

    let result = Bootstrapper::default().bootstrap_validated(&quotes).unwrap();
    assert_eq!(result.curve.len(), 3);
    assert_eq!(result.report.superseded().len(), 1);
    assert_eq!(result.report.superseded()[0].kind, QuoteKind::Future);
    assert_eq!(result.report.checks().len(), 3);
    assert!(result.is_valid(), "{}", result.report);
}

#[test]
fn test_negative_discount_factor_names_instrument() {
    let s = settle();
    let quotes = QuoteSet::new(
        s,
        vec![Quote::deposit(s, date(2023, 5, 2), 0.03)],
        vec![],
        vec![Quote::swap(s, date(2024, 2, 2), -1.5)],
    )
    .unwrap();

    match bootstrap(&quotes).unwrap_err() {
        CurveError::CalibrationFailure { instrument, .. } => {
            assert!(instrument.starts_with("Swap 2023-02-02 -> 2024-02-02"));
        }
        other => panic!("unexpected error {other:?}"),
    }

    let bad_deposit = QuoteSet::new(
        s,
        vec![Quote::deposit(s, date(2023, 5, 2), -5.0)],
        vec![],
        vec![],
    )
    .unwrap();
    assert!(matches!(
        bootstrap(&bad_deposit),
        Err(CurveError::CalibrationFailure { .. })
    ));
}

#[test]
fn test_empty_quote_set_is_rejected() {
    let quotes = QuoteSet::new(settle(), vec![], vec![], vec![]).unwrap();
    assert!(bootstrap(&quotes).is_err());
}

#[test]
fn test_bootstrap_is_deterministic() {
    let quotes = market_quotes();
    let first: Vec<_> = bootstrap(&quotes).unwrap().pillars().collect();
    let second: Vec<_> = bootstrap(&quotes).unwrap().pillars().collect();
    assert_eq!(first, second);
}

#[test]
fn test_parallel_shift_lowers_discount_factors() {
    let quotes = market_quotes();
    let base = bootstrap(&quotes).unwrap();
    let shifted = bootstrap(&quotes.parallel_shift(0.0001)).unwrap();

    let ten_year = date(2033, 2, 2);
    assert!(shifted.discount_factor(ten_year).unwrap() < base.discount_factor(ten_year).unwrap());
}

proptest! {
    #[test]
    fn prop_zero_rates_bounded_by_pillars(segment in 0usize..8, fraction in 0.0f64..1.0) {
        let curve = bootstrap(&market_quotes()).unwrap();
        let pillars: Vec<_> = curve.pillars().collect();
        let (left, right) = (pillars[segment].0, pillars[segment + 1].0);

        let days = (left.days_between(&right) as f64 * fraction).floor() as i64;
        let date = left.add_days(days);

        let z_left = curve.zero_rate(left).unwrap();
        let z_right = curve.zero_rate(right).unwrap();
        let z = curve.zero_rate(date).unwrap();
        prop_assert!(z >= z_left.min(z_right) - 1e-14);
        prop_assert!(z <= z_left.max(z_right) + 1e-14);
    }
}
