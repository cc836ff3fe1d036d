use fx_dashboard_wasm::domain::market_data::{
    ClosePoint, IndicatorEngine, IndicatorSettings, NEUTRAL_RSI, compute_bollinger, compute_rsi,
    compute_sma,
};
use chrono::{Duration, NaiveDate};
use quickcheck_macros::quickcheck;

fn to_prices(raw: &[u32]) -> Vec<f64> {
    raw.iter().map(|x| f64::from(x % 100_000 + 1) / 100.0).collect()
}

#[test]
fn rsi_flat_fills_the_warm_up() {
    let rsi = compute_rsi(&[1.0, 2.0, 3.0, 2.0, 3.0], 2);
    assert_eq!(rsi, vec![100.0, 100.0, 100.0, 50.0, 50.0]);
}

#[test]
fn rsi_on_short_history_is_neutral() {
    assert_eq!(compute_rsi(&[1.0, 2.0, 3.0], 3), vec![NEUTRAL_RSI; 3]);
    assert!(compute_rsi(&[], 14).is_empty());
}

#[test]
fn sma_excludes_current_point() {
    assert_eq!(compute_sma(&[1.0, 2.0, 3.0, 4.0], 2), vec![1.0, 2.0, 1.5, 2.5]);
}

#[test]
fn bollinger_uses_population_std_dev() {
    let bands = compute_bollinger(&[1.0, 3.0, 5.0], 2, 2.0);
    assert_eq!(bands.upper[2], 4.0);
    assert_eq!(bands.lower[2], 0.0);
    assert_eq!(bands.upper[0], 1.01);
    assert_eq!(bands.lower[1], 3.0 * 0.99);
}

#[test]
fn enrich_zips_indicators_with_dates() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let closes: Vec<ClosePoint> = (0..60)
        .map(|i| ClosePoint::new(start + Duration::days(i), 100.0 + (i % 7) as f64))
        .collect();
    let series = IndicatorEngine::new(IndicatorSettings::default()).enrich(&closes);

    assert_eq!(series.len(), closes.len());
    assert_eq!(series[0].date, start);
    assert_eq!(series[59].value, closes[59].close);
    // warm-up: moving averages echo the close
    assert_eq!(series[10].ma20, series[10].value);
    assert_eq!(series[30].ma50, series[30].value);
    assert_ne!(series[55].ma50, series[55].value);
}

#[quickcheck]
fn sma_prefix_equals_prices(raw: Vec<u32>, window: u8) -> bool {
    let prices = to_prices(&raw);
    let window = usize::from(window % 40);
    let sma = compute_sma(&prices, window);
    sma.len() == prices.len() && (0..window.min(prices.len())).all(|i| sma[i] == prices[i])
}

#[quickcheck]
fn bollinger_upper_never_below_lower(raw: Vec<u32>, period: u8) -> bool {
    let prices = to_prices(&raw);
    let bands = compute_bollinger(&prices, usize::from(period % 30) + 1, 2.0);
    bands.upper.iter().zip(&bands.lower).all(|(u, l)| u >= l)
}

#[quickcheck]
fn rsi_stays_in_range(raw: Vec<u32>, period: u8) -> bool {
    let prices = to_prices(&raw);
    let period = usize::from(period % 20) + 1;
    let rsi = compute_rsi(&prices, period);
    rsi.len() == prices.len() && rsi.iter().all(|v| (0.0..=100.0).contains(v))
}

#[quickcheck]
fn series_math_is_deterministic(raw: Vec<u32>) -> bool {
    let prices = to_prices(&raw);
    let bits = |v: Vec<f64>| v.into_iter().map(f64::to_bits).collect::<Vec<_>>();
    bits(compute_rsi(&prices, 14)) == bits(compute_rsi(&prices, 14))
        && bits(compute_sma(&prices, 20)) == bits(compute_sma(&prices, 20))
        && compute_bollinger(&prices, 20, 2.0) == compute_bollinger(&prices, 20, 2.0)
}
