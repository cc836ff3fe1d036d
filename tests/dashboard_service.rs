use chrono::NaiveDate;
use fx_dashboard_wasm::application::{DashboardData, DashboardService};
use fx_dashboard_wasm::config::DashboardConfig;
use fx_dashboard_wasm::domain::chart::Timeframe;
use fx_dashboard_wasm::domain::errors::AppError;
use fx_dashboard_wasm::domain::market_data::{ClosePoint, CurrencyPair, IndicatorEngine};
use fx_dashboard_wasm::domain::rates::RatePoint;
use fx_dashboard_wasm::domain::signals::AlertKind;
use fx_dashboard_wasm::infrastructure::sample_data;
use std::collections::HashMap;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn demo_service() -> DashboardService {
    let mut service = DashboardService::new(DashboardConfig::default());
    service.load(DashboardData::demo()).unwrap();
    service
}

#[test]
fn demo_timeline_spans_the_sample() {
    let service = demo_service();
    let dates = service.available_dates();
    assert_eq!(dates.len(), 43);
    assert_eq!(dates[0], date("2024-01-03"));
    assert_eq!(service.latest_date(), Some(date("2024-10-23")));
    assert_eq!(service.differential().len(), 27);
}

#[test]
fn view_on_august_sell_off() {
    let service = demo_service();
    let view = service.view(date("2024-08-21"), Timeframe::OneMonth).unwrap();

    assert_eq!(view.pair, CurrencyPair::usd_jpy());
    assert_eq!(view.snapshot.as_ref().unwrap().value, 142.76);
    assert_eq!(view.snapshot.as_ref().unwrap().differential, 4.5);

    let base = view.base_rate.unwrap();
    assert_eq!(base.rate, 5.0);
    assert_eq!(base.last_update, date("2024-07-31"));
    let quote = view.quote_rate.unwrap();
    assert_eq!(quote.rate, 0.5);

    assert_eq!(view.visible_prices.len(), 5);
    assert_eq!(view.visible_differential.len(), 1);

    let kinds: Vec<AlertKind> = view.alerts.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![AlertKind::Oversold, AlertKind::RateDifferentialNarrowing]);
}

#[test]
fn differential_history_stops_at_the_view_date() {
    let service = demo_service();
    assert_eq!(service.differential_until(date("2023-01-30")).len(), 0);
    assert_eq!(service.differential_until(date("2024-08-21")).last().unwrap().diff, 4.5);

    // 2024-10-16 still sees the September narrowing; 2024-10-23 adds a flat point
    let before = service.view(date("2024-10-16"), Timeframe::OneDay).unwrap();
    assert_eq!(before.alerts.len(), 1);
    assert_eq!(before.alerts[0].description, "Differential narrowed from 4.25 to 4");
    let last = service.view(date("2024-10-23"), Timeframe::OneDay).unwrap();
    assert!(last.alerts.is_empty());
}

#[test]
fn view_between_observations_has_no_snapshot() {
    let service = demo_service();
    let view = service.view(date("2024-08-22"), Timeframe::OneWeek).unwrap();
    assert!(view.snapshot.is_none());
    assert!(view.alerts.is_empty());
    assert_eq!(view.base_rate.unwrap().rate, 5.0);
    assert_eq!(view.visible_prices.len(), 1);
}

#[test]
fn raw_closes_are_validated_before_enrichment() {
    let pair = CurrencyPair::usd_jpy();
    let closes = vec![
        ClosePoint::new(date("2024-01-03"), 143.32),
        ClosePoint::new(date("2024-01-10"), -1.0),
    ];
    let err = DashboardData::from_closes(pair, closes, HashMap::new(), &IndicatorEngine::default())
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[test]
fn overlapping_rates_ignore_fallback_setting() {
    let pair = CurrencyPair::usd_jpy();
    let closes = vec![
        ClosePoint::new(date("2024-10-21"), 150.0),
        ClosePoint::new(date("2024-10-22"), 151.0),
    ];
    let rates = HashMap::from([
        ("USD".to_string(), vec![RatePoint::new(date("2024-01-01"), 5.5)]),
        ("JPY".to_string(), vec![RatePoint::new(date("2024-02-01"), 0.25)]),
    ]);
    let data =
        DashboardData::from_closes(pair, closes, rates, &IndicatorEngine::default()).unwrap();

    // the histories overlap from 2024-02-01, so no fallback is needed
    let mut service = DashboardService::new(DashboardConfig {
        differential_fallback: true,
        ..DashboardConfig::default()
    });
    service.load(data).unwrap();
    assert_eq!(service.differential().len(), 1);
    assert_eq!(service.differential()[0].diff, 5.25);
}

#[test]
fn custom_indicator_settings_reach_the_engine() {
    let config = DashboardConfig::from_json(r#"{"indicators":{"rsiPeriod":3}}"#).unwrap();
    let service = DashboardService::new(config);
    assert_eq!(service.engine().settings().rsi_period, 3);
    assert_eq!(service.config().default_timeframe, Timeframe::OneDay);
}

fn live_config() -> DashboardConfig {
    DashboardConfig { demo_mode: false, ..DashboardConfig::default() }
}

fn demo_closes() -> Vec<ClosePoint> {
    DashboardData::demo().prices.iter().map(|p| ClosePoint::new(p.date, p.value)).collect()
}

#[test]
fn missing_quote_rates_use_the_sample_table() {
    let pair = CurrencyPair::usd_jpy();
    let usd = sample_data::sample_rates(pair.base()).unwrap().to_vec();
    let rates = HashMap::from([("USD".to_string(), usd)]);
    let data =
        DashboardData::from_closes(pair, demo_closes(), rates, &IndicatorEngine::default())
            .unwrap();

    let mut service = DashboardService::new(live_config());
    service.load(data).unwrap();
    assert_eq!(service.differential().len(), 27);

    let last = service.latest_date().unwrap();
    let view = service.view(last, Timeframe::OneYear).unwrap();
    let quote = view.quote_rate.unwrap();
    assert_eq!(quote.currency.value(), "JPY");
    assert!(!view.visible_differential.is_empty());
    assert!(view.quote_rate_is_sample);
    // USD matches the bundled dates, so it still counts as sample data
    assert!(view.base_rate_is_sample);
}

#[test]
fn sample_flags_follow_demo_mode_and_loaded_tables() {
    let pair = CurrencyPair::usd_jpy();
    let rates = HashMap::from([(
        "USD".to_string(),
        vec![RatePoint::new(date("2023-01-15"), 4.5), RatePoint::new(date("2024-09-18"), 5.0)],
    )]);
    let data = DashboardData::from_closes(
        pair.clone(),
        demo_closes(),
        rates,
        &IndicatorEngine::default(),
    )
    .unwrap();

    let mut live = DashboardService::new(live_config());
    live.load(data.clone()).unwrap();
    let view = live.view(date("2024-10-23"), Timeframe::OneDay).unwrap();
    assert!(!view.base_rate_is_sample);
    assert!(view.quote_rate_is_sample);
    assert_eq!(view.base_rate.unwrap().rate, 5.0);
    assert!(live.is_sample_currency(&"EUR".parse().unwrap()));

    let mut demo = DashboardService::new(DashboardConfig::default());
    demo.load(data).unwrap();
    let view = demo.view(date("2024-10-23"), Timeframe::OneDay).unwrap();
    assert!(view.base_rate_is_sample);
    assert!(view.quote_rate_is_sample);
}
