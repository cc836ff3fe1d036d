use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One published policy rate (percent) for a currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub date: NaiveDate,
    pub rate: f64,
}

impl RatePoint {
    pub fn new(date: NaiveDate, rate: f64) -> Self {
        Self { date, rate }
    }
}

/// Base minus quote rate on a date, rounded to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifferentialPoint {
    pub date: NaiveDate,
    pub diff: f64,
}

impl DifferentialPoint {
    pub fn new(date: NaiveDate, diff: f64) -> Self {
        Self { date, diff: round2(diff) }
    }
}

/// Round half away from zero to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
