//! Point-in-time queries against sorted series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::market_data::{CurrencyCode, CurrencyPair, PricePoint, index_of_date};
use crate::domain::rates::{DifferentialPoint, RatePoint, latest_differential};

/// Close on a date plus its move from the previous observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointValue {
    pub value: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// Rate in force on a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    pub currency: CurrencyCode,
    pub rate: f64,
    pub change: f64,
    /// Publication date of `rate`, on or before the query date
    pub last_update: NaiveDate,
}

/// Header figures for a pair on the selected date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairSnapshot {
    pub pair: CurrencyPair,
    pub date: NaiveDate,
    pub value: f64,
    pub change: f64,
    pub change_percent: f64,
    pub differential: f64,
}

/// Exact-date lookup. `None` when no point is dated `date`.
pub fn value_at(series: &[PricePoint], date: NaiveDate) -> Option<PointValue> {
    let index = index_of_date(series, date)?;
    let value = series[index].value;

    let (change, change_percent) = match index.checked_sub(1).map(|i| series[i].value) {
        Some(previous) if previous != 0.0 => {
            let change = value - previous;
            (change, change / previous * 100.0)
        }
        Some(previous) => (value - previous, 0.0),
        None => (0.0, 0.0),
    };

    Some(PointValue { value, change, change_percent })
}

/// As-of lookup: the latest entry published on or before `date`.
///
/// `change` is measured against the entry just before the match in series
/// order, 0 for the first entry.
pub fn rate_at(rates: &[RatePoint], currency: &CurrencyCode, date: NaiveDate) -> Option<RateQuote> {
    let as_of = rates.iter().map(|r| r.date).filter(|d| *d <= date).max()?;
    let index = rates.iter().position(|r| r.date == as_of)?;
    let current = rates[index];
    let change = index.checked_sub(1).map_or(0.0, |i| current.rate - rates[i].rate);

    Some(RateQuote {
        currency: currency.clone(),
        rate: current.rate,
        change,
        last_update: current.date,
    })
}

/// `value_at` for the pair combined with the most recent differential value
pub fn pair_snapshot(
    pair: &CurrencyPair,
    series: &[PricePoint],
    diff_history: &[DifferentialPoint],
    date: NaiveDate,
) -> Option<PairSnapshot> {
    let point = value_at(series, date)?;
    Some(PairSnapshot {
        pair: pair.clone(),
        date,
        value: point.value,
        change: point.change,
        change_percent: point.change_percent,
        differential: latest_differential(diff_history),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn price(d: &str, value: f64) -> PricePoint {
        PricePoint {
            date: date(d),
            value,
            rsi: 50.0,
            ma20: value,
            ma50: value,
            boll_upper: value * 1.01,
            boll_lower: value * 0.99,
        }
    }

    #[test]
    fn first_point_has_no_change() {
        let series = [price("2024-01-03", 143.32), price("2024-01-10", 145.78)];
        let first = value_at(&series, date("2024-01-03")).unwrap();
        assert_eq!(first.change, 0.0);
        assert_eq!(first.change_percent, 0.0);
        assert!(value_at(&series, date("2024-01-04")).is_none());
    }

    #[test]
    fn rate_at_uses_as_of_semantics() {
        let usd: CurrencyCode = "USD".parse().unwrap();
        let rates = [
            RatePoint::new(date("2024-01-01"), 5.25),
            RatePoint::new(date("2024-03-01"), 5.5),
        ];

        let quote = rate_at(&rates, &usd, date("2024-02-15")).unwrap();
        assert_eq!(quote.rate, 5.25);
        assert_eq!(quote.change, 0.0);
        assert_eq!(quote.last_update, date("2024-01-01"));

        let quote = rate_at(&rates, &usd, date("2024-03-01")).unwrap();
        assert_eq!(quote.rate, 5.5);
        assert_eq!(quote.change, 0.25);

        assert!(rate_at(&rates, &usd, date("2023-12-31")).is_none());
        assert!(rate_at(&[], &usd, date("2024-03-01")).is_none());
    }
}
