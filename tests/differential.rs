use chrono::NaiveDate;
use fx_dashboard_wasm::domain::rates::{
    DifferentialPoint, OverlapFallback, RatePoint, compute_differential, latest_differential,
};
use fx_dashboard_wasm::infrastructure::sample_data::sample_rate_tables;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn single_currency_has_no_differential() {
    let usd = &sample_rate_tables()["USD"];
    assert!(compute_differential(usd, &[], OverlapFallback::Empty).is_empty());
}

#[test]
fn sample_tables_produce_carry_forward_history() {
    let tables = sample_rate_tables();
    let diff = compute_differential(&tables["USD"], &tables["JPY"], OverlapFallback::Empty);

    // USD starts 2023-01-31, JPY 2023-01-18: first shared knowledge is 2023-01-31
    assert_eq!(diff.first(), Some(&DifferentialPoint { date: date("2023-01-31"), diff: 4.6 }));
    assert_eq!(diff.len(), 27);
    assert!(diff.windows(2).all(|w| w[0].date < w[1].date));

    let on = |d: &str| diff.iter().find(|p| p.date == date(d)).map(|p| p.diff);
    // JPY-only date carries the last USD rate forward
    assert_eq!(on("2023-03-10"), Some(4.6));
    assert_eq!(on("2024-01-23"), Some(5.5));
    assert_eq!(on("2024-07-31"), Some(4.5));
    assert_eq!(latest_differential(&diff), 4.0);
}

#[test]
fn fallback_policy_does_not_affect_overlapping_histories() {
    let base = [RatePoint::new(date("2024-01-01"), 5.5)];
    let quote = [RatePoint::new(date("2024-02-01"), 0.25)];
    let anchor = date("2024-10-22");

    let plain = compute_differential(&base, &quote, OverlapFallback::Empty);
    let with_fallback = compute_differential(&base, &quote, OverlapFallback::FlatSeries { anchor });
    assert_eq!(plain, vec![DifferentialPoint { date: date("2024-02-01"), diff: 5.25 }]);
    assert_eq!(plain, with_fallback);
}
