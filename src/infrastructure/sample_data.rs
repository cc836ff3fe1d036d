//! Bundled demo dataset: weekly USD/JPY closes with precomputed indicators
//! and the matching policy-rate histories.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::domain::market_data::{CurrencyCode, CurrencyPair, PricePoint};
use crate::domain::rates::RatePoint;

/// `(date, value, rsi, ma20, ma50, boll_upper, boll_lower)`
type Row = (&'static str, f64, f64, f64, f64, f64, f64);

const USD_JPY_ROWS: &[Row] = &[
    ("2024-01-03", 143.32, 62.0, 141.85, 142.37, 145.8, 141.2),
    ("2024-01-10", 145.78, 68.0, 142.32, 142.45, 146.2, 141.4),
    ("2024-01-17", 147.95, 75.0, 143.15, 142.68, 147.1, 141.7),
    ("2024-01-24", 148.21, 78.0, 144.25, 143.02, 147.8, 142.1),
    ("2024-01-31", 146.82, 65.0, 145.12, 143.35, 148.2, 142.5),
    ("2024-02-07", 149.35, 72.0, 146.45, 143.78, 149.5, 143.2),
    ("2024-02-14", 150.77, 80.0, 147.58, 144.32, 150.8, 143.8),
    ("2024-02-21", 149.84, 73.0, 148.21, 144.88, 151.2, 144.3),
    ("2024-02-28", 150.52, 75.0, 148.95, 145.45, 151.8, 144.9),
    ("2024-03-06", 149.12, 65.0, 149.32, 146.12, 152.4, 145.7),
    ("2024-03-13", 148.34, 58.0, 149.53, 146.68, 152.8, 146.2),
    ("2024-03-20", 151.56, 72.0, 149.78, 147.25, 153.1, 146.6),
    ("2024-03-27", 151.82, 74.0, 150.12, 147.85, 153.5, 147.0),
    ("2024-04-03", 151.68, 73.0, 150.48, 148.32, 153.9, 147.5),
    ("2024-04-10", 153.42, 78.0, 150.95, 148.85, 154.2, 147.9),
    ("2024-04-17", 154.89, 82.0, 151.45, 149.34, 154.6, 148.2),
    ("2024-04-24", 155.11, 83.0, 152.21, 149.78, 155.1, 148.6),
    ("2024-05-01", 153.76, 68.0, 152.58, 150.21, 155.5, 149.0),
    ("2024-05-08", 155.42, 75.0, 153.12, 150.68, 156.0, 149.5),
    ("2024-05-15", 156.31, 79.0, 153.78, 151.12, 156.4, 150.0),
    ("2024-05-22", 156.85, 81.0, 154.32, 151.58, 156.9, 150.6),
    ("2024-05-29", 155.63, 65.0, 154.78, 152.05, 157.4, 151.2),
    ("2024-06-05", 156.22, 68.0, 155.21, 152.45, 157.8, 151.8),
    ("2024-06-12", 157.45, 75.0, 155.68, 152.95, 158.2, 152.3),
    ("2024-06-19", 158.32, 79.0, 156.12, 153.48, 158.6, 152.8),
    ("2024-06-26", 159.51, 83.0, 156.78, 153.98, 159.0, 153.2),
    ("2024-07-03", 158.94, 75.0, 157.15, 154.45, 159.4, 153.6),
    ("2024-07-10", 157.82, 65.0, 157.42, 154.92, 159.8, 154.0),
    ("2024-07-17", 159.21, 72.0, 157.85, 155.32, 160.2, 154.5),
    ("2024-07-24", 158.75, 68.0, 158.12, 155.78, 160.6, 155.0),
    ("2024-07-31", 153.24, 35.0, 158.08, 156.12, 160.2, 155.2),
    ("2024-08-07", 147.81, 25.0, 156.85, 156.05, 159.5, 155.0),
    ("2024-08-14", 146.38, 22.0, 155.42, 155.82, 158.3, 154.8),
    ("2024-08-21", 142.76, 18.0, 153.78, 155.45, 156.8, 154.5),
    ("2024-08-28", 144.35, 32.0, 152.15, 155.12, 155.4, 154.1),
    ("2024-09-04", 145.92, 42.0, 150.78, 154.68, 154.2, 153.6),
    ("2024-09-11", 142.15, 35.0, 149.13, 154.12, 153.1, 153.0),
    ("2024-09-18", 143.87, 44.0, 147.82, 153.45, 152.3, 152.5),
    ("2024-09-25", 144.92, 48.0, 146.95, 152.78, 151.8, 152.0),
    ("2024-10-02", 146.23, 55.0, 146.38, 152.15, 151.4, 151.5),
    ("2024-10-09", 148.45, 62.0, 146.12, 151.58, 151.0, 151.0),
    ("2024-10-16", 147.92, 58.0, 145.95, 150.89, 150.6, 150.5),
    ("2024-10-23", 150.35, 65.0, 146.23, 150.25, 150.2, 150.0),
];

const USD_RATE_ROWS: &[(&str, f64)] = &[
    ("2023-01-31", 4.50),
    ("2023-03-22", 4.75),
    ("2023-05-03", 5.00),
    ("2023-06-14", 5.25),
    ("2023-07-26", 5.50),
    ("2023-09-20", 5.50),
    ("2023-11-01", 5.50),
    ("2023-12-13", 5.50),
    ("2024-01-31", 5.50),
    ("2024-03-20", 5.50),
    ("2024-05-01", 5.25),
    ("2024-06-12", 5.25),
    ("2024-07-31", 5.00),
    ("2024-09-18", 4.75),
    ("2024-10-23", 4.75),
];

const JPY_RATE_ROWS: &[(&str, f64)] = &[
    ("2023-01-18", -0.10),
    ("2023-03-10", -0.10),
    ("2023-04-28", -0.10),
    ("2023-06-16", -0.10),
    ("2023-07-28", -0.10),
    ("2023-09-22", -0.10),
    ("2023-10-31", -0.10),
    ("2023-12-19", -0.10),
    ("2024-01-23", 0.00),
    ("2024-03-19", 0.10),
    ("2024-04-26", 0.25),
    ("2024-06-14", 0.25),
    ("2024-07-31", 0.50),
    ("2024-09-20", 0.75),
    ("2024-10-23", 0.75),
];

static USD_JPY_HISTORY: Lazy<Vec<PricePoint>> = Lazy::new(|| {
    USD_JPY_ROWS
        .iter()
        .filter_map(|&(date, value, rsi, ma20, ma50, boll_upper, boll_lower)| {
            Some(PricePoint { date: parse(date)?, value, rsi, ma20, ma50, boll_upper, boll_lower })
        })
        .collect()
});

static SAMPLE_RATES: Lazy<HashMap<String, Vec<RatePoint>>> = Lazy::new(|| {
    [("USD", USD_RATE_ROWS), ("JPY", JPY_RATE_ROWS)]
        .into_iter()
        .map(|(currency, rows)| {
            let rates = rows
                .iter()
                .filter_map(|&(date, rate)| Some(RatePoint::new(parse(date)?, rate)))
                .collect();
            (currency.to_string(), rates)
        })
        .collect()
});

fn parse(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Enriched demo history for `pair`, empty for pairs without sample data
pub fn sample_history(pair: &CurrencyPair) -> Vec<PricePoint> {
    if *pair == CurrencyPair::usd_jpy() { USD_JPY_HISTORY.clone() } else { Vec::new() }
}

/// Demo policy rates for one currency
pub fn sample_rates(currency: &CurrencyCode) -> Option<&'static [RatePoint]> {
    SAMPLE_RATES.get(currency.value()).map(Vec::as_slice)
}

/// Every bundled rate table keyed by currency code
pub fn sample_rate_tables() -> HashMap<String, Vec<RatePoint>> {
    SAMPLE_RATES.clone()
}

/// Whether `rates` carries exactly the dates of the bundled table for
/// `currency`. JPY always counts as sample-backed since no live source
/// publishes it.
pub fn is_sample_rates(currency: &CurrencyCode, rates: &[RatePoint]) -> bool {
    if currency.value() == "JPY" {
        return true;
    }
    match sample_rates(currency) {
        Some(sample) => {
            sample.len() == rates.len() && sample.iter().zip(rates).all(|(a, b)| a.date == b.date)
        }
        None => false,
    }
}
