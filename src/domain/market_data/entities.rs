use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw daily close as delivered by the price collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl ClosePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Domain entity - one enriched observation of a pair.
///
/// Produced in bulk by the indicator engine and replaced wholesale on
/// refresh; nothing patches an existing point. Field names serialize in
/// camelCase so cached snapshots keep the `bollUpper`/`bollLower` keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub value: f64,
    pub rsi: f64,
    pub ma20: f64,
    pub ma50: f64,
    pub boll_upper: f64,
    pub boll_lower: f64,
}

/// Position of the first point dated exactly `date`
pub fn index_of_date(series: &[PricePoint], date: NaiveDate) -> Option<usize> {
    series.iter().position(|p| p.date == date)
}
