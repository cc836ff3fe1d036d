use chrono::NaiveDate;

use super::{Alert, AlertKind, AlertLevel, Direction};
use crate::domain::market_data::{CurrencyPair, PricePoint, index_of_date};
use crate::domain::rates::DifferentialPoint;

pub const OVERSOLD_THRESHOLD: f64 = 30.0;
pub const OVERBOUGHT_THRESHOLD: f64 = 70.0;

/// Shortest series the detector looks at
pub const MIN_SERIES_LEN: usize = 5;

/// Scan the end of an enriched series for inflection patterns.
///
/// Every rule is checked against the last point on its own, so several
/// alerts can fire together. Output order follows the rule order below.
/// Series shorter than [`MIN_SERIES_LEN`] produce nothing.
pub fn detect_inflections(
    pair: &CurrencyPair,
    series: &[PricePoint],
    diff_history: &[DifferentialPoint],
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if series.len() < MIN_SERIES_LEN {
        return alerts;
    }

    let last_index = series.len() - 1;
    let last = &series[last_index];
    let prev = &series[last_index - 1];

    // Higher highs in price against lower highs in RSI
    if last_index >= 5 {
        let mid = &series[last_index - 2];
        let first = &series[last_index - 4];
        if last.value > mid.value
            && mid.value > first.value
            && last.rsi < mid.rsi
            && mid.rsi < first.rsi
        {
            alerts.push(Alert::new(
                pair,
                AlertKind::RsiDivergence,
                AlertLevel::Strong,
                Direction::Bearish,
                format!(
                    "Price making higher highs ({:.2} -> {:.2} -> {:.2}) while RSI making lower highs ({:.1} -> {:.1} -> {:.1})",
                    first.value, mid.value, last.value, first.rsi, mid.rsi, last.rsi
                ),
            ));
        }
    }

    if last.rsi < OVERSOLD_THRESHOLD {
        alerts.push(Alert::new(
            pair,
            AlertKind::Oversold,
            AlertLevel::Medium,
            Direction::Bullish,
            format!(
                "RSI at {:.1}, below oversold threshold ({})",
                last.rsi, OVERSOLD_THRESHOLD
            ),
        ));
    }

    if last.rsi > OVERBOUGHT_THRESHOLD {
        alerts.push(Alert::new(
            pair,
            AlertKind::Overbought,
            AlertLevel::Medium,
            Direction::Bearish,
            format!(
                "RSI at {:.1}, above overbought threshold ({})",
                last.rsi, OVERBOUGHT_THRESHOLD
            ),
        ));
    }

    if last.ma20 > last.ma50 && prev.ma20 <= prev.ma50 {
        alerts.push(Alert::new(
            pair,
            AlertKind::GoldenCross,
            AlertLevel::Medium,
            Direction::Bullish,
            format!("20-day MA ({:.2}) crossed above 50-day MA ({:.2})", last.ma20, last.ma50),
        ));
    }

    if last.ma20 < last.ma50 && prev.ma20 >= prev.ma50 {
        alerts.push(Alert::new(
            pair,
            AlertKind::DeathCross,
            AlertLevel::Strong,
            Direction::Bearish,
            format!("20-day MA ({:.2}) crossed below 50-day MA ({:.2})", last.ma20, last.ma50),
        ));
    }

    if diff_history.len() > 2 {
        let last_diff = diff_history[diff_history.len() - 1].diff;
        let prev_diff = diff_history[diff_history.len() - 2].diff;
        if last_diff.abs() < prev_diff.abs() {
            let direction = if last_diff > 0.0 { Direction::Bearish } else { Direction::Bullish };
            alerts.push(Alert::new(
                pair,
                AlertKind::RateDifferentialNarrowing,
                AlertLevel::Medium,
                direction,
                format!("Differential narrowed from {} to {}", prev_diff, last_diff),
            ));
        }
    }

    alerts
}

/// Run the detector as if `date` were the latest observation.
///
/// Only the part of `series` up to and including `date` is scanned. A date
/// missing from the series yields no alerts.
pub fn detect_inflections_at(
    pair: &CurrencyPair,
    series: &[PricePoint],
    diff_history: &[DifferentialPoint],
    date: NaiveDate,
) -> Vec<Alert> {
    match index_of_date(series, date) {
        Some(index) => detect_inflections(pair, &series[..=index], diff_history),
        None => Vec::new(),
    }
}
