use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter};

use crate::domain::market_data::CurrencyPair;

/// Pattern that raised an alert
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter, AsRefStr, Serialize, Deserialize,
)]
pub enum AlertKind {
    #[strum(serialize = "RSI Divergence")]
    #[serde(rename = "RSI Divergence")]
    RsiDivergence,

    #[strum(serialize = "Oversold Condition")]
    #[serde(rename = "Oversold Condition")]
    Oversold,

    #[strum(serialize = "Overbought Condition")]
    #[serde(rename = "Overbought Condition")]
    Overbought,

    #[strum(serialize = "Golden Cross")]
    #[serde(rename = "Golden Cross")]
    GoldenCross,

    #[strum(serialize = "Death Cross")]
    #[serde(rename = "Death Cross")]
    DeathCross,

    #[strum(serialize = "Rate Differential Narrowing")]
    #[serde(rename = "Rate Differential Narrowing")]
    RateDifferentialNarrowing,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, StrumDisplay, AsRefStr, Serialize, Deserialize,
)]
pub enum AlertLevel {
    Weak,
    Medium,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, AsRefStr, Serialize, Deserialize)]
pub enum Direction {
    Bullish,
    Bearish,
}

/// Inflection-point alert. Recomputed on every query and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub pair: CurrencyPair,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub level: AlertLevel,
    pub direction: Direction,
    pub description: String,
}

impl Alert {
    pub fn new(
        pair: &CurrencyPair,
        kind: AlertKind,
        level: AlertLevel,
        direction: Direction,
        description: String,
    ) -> Self {
        Self { pair: pair.clone(), kind, level, direction, description }
    }
}

impl std::fmt::Display for Alert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {} {}] {}: {}",
            self.pair, self.level, self.direction, self.kind, self.description
        )
    }
}
