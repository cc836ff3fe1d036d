use chrono::{Duration, NaiveDate};
use fx_dashboard_wasm::application::{DashboardData, DashboardService};
use fx_dashboard_wasm::config::{DashboardConfig, StorageKeys};
use fx_dashboard_wasm::domain::chart::Timeframe;
use fx_dashboard_wasm::domain::errors::AppError;
use fx_dashboard_wasm::domain::market_data::{ClosePoint, CurrencyPair, IndicatorEngine};
use fx_dashboard_wasm::infrastructure::sample_data::sample_rate_tables;
use fx_dashboard_wasm::infrastructure::storage::{
    DashboardSnapshot, MemorySnapshotStore, SnapshotStore,
};

fn computed_data() -> DashboardData {
    let start = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
    let closes: Vec<ClosePoint> = (0..80)
        .map(|i| {
            let wave = ((i as f64) / 5.0).sin() * 4.0;
            ClosePoint::new(start + Duration::days(i * 3), 150.0 + wave + i as f64 * 0.05)
        })
        .collect();
    DashboardData::from_closes(
        CurrencyPair::usd_jpy(),
        closes,
        sample_rate_tables(),
        &IndicatorEngine::default(),
    )
    .unwrap()
}

#[test]
fn store_round_trip_preserves_snapshot() {
    let mut store = MemorySnapshotStore::new(StorageKeys::default());
    let mut snapshot = computed_data().to_snapshot();
    snapshot.last_update = Some("2024-10-23T09:00:00.000Z".to_string());

    store.save(&snapshot).unwrap();
    assert!(store.raw("fxDashboardHistoricalData").unwrap().contains("\"USD/JPY\""));
    assert!(store.raw("fxDashboardHistoricalData").unwrap().contains("bollUpper"));
    assert_eq!(store.raw("fxDashboardLastUpdate"), Some("2024-10-23T09:00:00.000Z"));
    assert_eq!(store.load().unwrap(), Some(snapshot));

    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn replayed_snapshot_matches_fresh_computation() {
    let fresh = computed_data();
    let json = fresh.to_snapshot().to_json().unwrap();
    let replayed = DashboardSnapshot::from_json(&json).unwrap();
    let replayed = DashboardData::from_snapshot(&replayed, &CurrencyPair::usd_jpy()).unwrap();

    let mut a = DashboardService::new(DashboardConfig::default());
    let mut b = DashboardService::new(DashboardConfig::default());
    a.load(fresh.clone()).unwrap();
    b.load(replayed).unwrap();

    for date in a.available_dates() {
        assert_eq!(a.view(date, Timeframe::ThreeMonths), b.view(date, Timeframe::ThreeMonths));
    }
}

#[test]
fn snapshot_without_pair_is_not_replayed() {
    let snapshot = DashboardSnapshot::default();
    assert!(snapshot.is_empty());
    assert!(DashboardData::from_snapshot(&snapshot, &CurrencyPair::usd_jpy()).is_none());
}

#[test]
fn malformed_snapshot_json_is_a_cache_error() {
    let err = DashboardSnapshot::from_json("{\"historicalData\": 3}").unwrap_err();
    assert!(matches!(err, AppError::CacheError(_)));
}
