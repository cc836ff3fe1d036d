//! Dashboard configuration.
//!
//! Every field has a default, so a partial JSON document only overrides what
//! it names. The dashboard never mutates its config after construction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::chart::Timeframe;
use crate::domain::errors::AppError;
use crate::domain::market_data::{CurrencyPair, IndicatorSettings};
use crate::domain::rates::OverlapFallback;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageKeys {
    pub historical_data: String,
    pub interest_rates: String,
    pub last_update_time: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            historical_data: "fxDashboardHistoricalData".to_string(),
            interest_rates: "fxDashboardInterestRates".to_string(),
            last_update_time: "fxDashboardLastUpdate".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    pub currency_pairs: Vec<CurrencyPair>,
    pub default_pair: CurrencyPair,
    pub default_timeframe: Timeframe,
    /// Serve the bundled sample data instead of fetched data
    pub demo_mode: bool,
    pub indicators: IndicatorSettings,
    /// Synthesize a flat differential when two rate histories never overlap
    pub differential_fallback: bool,
    pub storage_keys: StorageKeys,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let usd_jpy = CurrencyPair::usd_jpy();
        Self {
            currency_pairs: vec![usd_jpy.clone()],
            default_pair: usd_jpy,
            default_timeframe: Timeframe::OneDay,
            demo_mode: true,
            indicators: IndicatorSettings::default(),
            differential_fallback: false,
            storage_keys: StorageKeys::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AppError::ConfigError(format!("invalid dashboard config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.currency_pairs.is_empty() {
            return Err(AppError::ConfigError("currencyPairs must not be empty".to_string()));
        }
        if !self.currency_pairs.contains(&self.default_pair) {
            return Err(AppError::ConfigError(format!(
                "defaultPair {} is not one of currencyPairs",
                self.default_pair
            )));
        }
        let ind = &self.indicators;
        if ind.rsi_period == 0 || ind.ma_short == 0 || ind.ma_long == 0 || ind.bollinger_period == 0 {
            return Err(AppError::ConfigError("indicator periods must be positive".to_string()));
        }
        if !ind.bollinger_multiplier.is_finite() || ind.bollinger_multiplier < 0.0 {
            return Err(AppError::ConfigError(format!(
                "bollingerMultiplier must be a non-negative number, got {}",
                ind.bollinger_multiplier
            )));
        }
        Ok(())
    }

    /// Overlap policy for the differential engine, anchored at `anchor`
    pub fn overlap_fallback(&self, anchor: NaiveDate) -> OverlapFallback {
        if self.differential_fallback {
            OverlapFallback::FlatSeries { anchor }
        } else {
            OverlapFallback::Empty
        }
    }
}
