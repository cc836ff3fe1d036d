use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - dashboard timeframe button
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    StrumDisplay,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum Timeframe {
    #[default]
    #[strum(serialize = "1D")]
    #[serde(rename = "1D")]
    OneDay,

    #[strum(serialize = "1W")]
    #[serde(rename = "1W")]
    OneWeek,

    #[strum(serialize = "1M")]
    #[serde(rename = "1M")]
    OneMonth,

    #[strum(serialize = "3M")]
    #[serde(rename = "3M")]
    ThreeMonths,

    #[strum(serialize = "6M")]
    #[serde(rename = "6M")]
    SixMonths,

    #[strum(serialize = "1Y")]
    #[serde(rename = "1Y")]
    OneYear,
}

impl Timeframe {
    /// Parse a button code; anything unknown falls back to `1D`
    pub fn from_code(code: &str) -> Self {
        code.trim().parse().unwrap_or_default()
    }

    pub fn code(&self) -> &str {
        self.as_ref()
    }

    pub fn lookback_days(&self) -> i64 {
        match self {
            Self::OneDay => 1,
            Self::OneWeek => 7,
            Self::OneMonth => 30,
            Self::ThreeMonths => 90,
            Self::SixMonths => 180,
            Self::OneYear => 365,
        }
    }
}
