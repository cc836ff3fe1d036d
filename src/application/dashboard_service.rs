use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::DashboardConfig;
use crate::domain::{
    chart::{Timeframe, visible_differential, visible_prices},
    errors::{AppError, ValidationResult},
    logging::LogComponent,
    lookup::{PairSnapshot, RateQuote, pair_snapshot, rate_at},
    market_data::{
        ClosePoint, CurrencyCode, CurrencyPair, IndicatorEngine, PricePoint,
        services::DataValidationService,
    },
    rates::{DifferentialPoint, RatePoint, compute_differential},
    signals::{Alert, detect_inflections_at},
};
use crate::infrastructure::{sample_data, storage::DashboardSnapshot};
use crate::{log_debug, log_info, log_warn};

/// Inputs for one pair: its enriched history and the rate tables of both
/// currencies, keyed by upper-case code
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub pair: CurrencyPair,
    pub prices: Vec<PricePoint>,
    pub rates: HashMap<String, Vec<RatePoint>>,
    pub last_update: Option<String>,
}

impl DashboardData {
    /// Enrich a raw close history. Closes are sorted and de-duplicated
    /// before validation.
    pub fn from_closes(
        pair: CurrencyPair,
        closes: Vec<ClosePoint>,
        rates: HashMap<String, Vec<RatePoint>>,
        engine: &IndicatorEngine,
    ) -> ValidationResult<Self> {
        let validator = DataValidationService::new();
        let closes = validator.normalize_closes(closes);
        validator.validate_close_sequence(&closes)?;
        Ok(Self { pair, prices: engine.enrich(&closes), rates, last_update: None })
    }

    /// Bundled USD/JPY sample with its precomputed indicators
    pub fn demo() -> Self {
        let pair = CurrencyPair::usd_jpy();
        Self {
            prices: sample_data::sample_history(&pair),
            rates: sample_data::sample_rate_tables(),
            pair,
            last_update: None,
        }
    }

    /// Replay a cached snapshot for `pair`. `None` when the snapshot holds
    /// no history for it.
    pub fn from_snapshot(snapshot: &DashboardSnapshot, pair: &CurrencyPair) -> Option<Self> {
        let prices = snapshot.historical_data.get(pair).filter(|p| !p.is_empty())?.clone();
        let rates = snapshot
            .interest_rates
            .iter()
            .map(|(code, rates)| (code.to_ascii_uppercase(), rates.clone()))
            .collect();
        Some(Self { pair: pair.clone(), prices, rates, last_update: snapshot.last_update.clone() })
    }

    pub fn to_snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            historical_data: HashMap::from([(self.pair.clone(), self.prices.clone())]),
            interest_rates: self.rates.clone(),
            last_update: self.last_update.clone(),
        }
    }

    /// Loaded rates for `currency`, non-empty when present
    pub fn loaded_rates(&self, currency: &CurrencyCode) -> Option<&[RatePoint]> {
        self.rates.get(currency.value()).filter(|r| !r.is_empty()).map(Vec::as_slice)
    }

    /// Rates used for `currency`: the loaded table, else the bundled sample
    /// table, else nothing
    pub fn rates_for(&self, currency: &CurrencyCode) -> &[RatePoint] {
        self.loaded_rates(currency)
            .or_else(|| sample_data::sample_rates(currency))
            .unwrap_or(&[])
    }
}

/// Everything the dashboard renders for one timeline position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub pair: CurrencyPair,
    pub date: NaiveDate,
    pub timeframe: Timeframe,
    pub snapshot: Option<PairSnapshot>,
    pub base_rate: Option<RateQuote>,
    pub quote_rate: Option<RateQuote>,
    /// Base rate comes from the bundled demo tables
    pub base_rate_is_sample: bool,
    pub quote_rate_is_sample: bool,
    pub visible_prices: Vec<PricePoint>,
    pub visible_differential: Vec<DifferentialPoint>,
    pub alerts: Vec<Alert>,
}

/// Application service that owns the loaded data and answers view queries
pub struct DashboardService {
    config: DashboardConfig,
    engine: IndicatorEngine,
    validator: DataValidationService,
    data: Option<DashboardData>,
    differential: Vec<DifferentialPoint>,
}

impl DashboardService {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            engine: IndicatorEngine::new(config.indicators.clone()),
            validator: DataValidationService::new(),
            config,
            data: None,
            differential: Vec::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn engine(&self) -> &IndicatorEngine {
        &self.engine
    }

    pub fn data(&self) -> Option<&DashboardData> {
        self.data.as_ref()
    }

    /// Full differential history of the loaded pair
    pub fn differential(&self) -> &[DifferentialPoint] {
        &self.differential
    }

    /// Replace the loaded data wholesale and rebuild the differential.
    pub fn load(&mut self, data: DashboardData) -> ValidationResult<()> {
        if !self.config.currency_pairs.contains(&data.pair) {
            return Err(AppError::ValidationError(format!(
                "{} is not a configured currency pair",
                data.pair
            )));
        }
        self.validator.validate_price_sequence(&data.prices)?;
        for rates in data.rates.values() {
            self.validator.validate_rate_sequence(rates)?;
        }

        let crossed = self.validator.crossed_bands(&data.prices);
        if !crossed.is_empty() {
            log_warn!(
                LogComponent::Application("Dashboard"),
                "{} points of {} have the upper band below the lower band, first on {}",
                crossed.len(),
                data.pair,
                crossed[0]
            );
        }

        for currency in [data.pair.base(), data.pair.quote()] {
            if data.loaded_rates(currency).is_some() {
                continue;
            }
            match sample_data::sample_rates(currency) {
                Some(sample) => {
                    log_warn!(
                        LogComponent::Application("Dashboard"),
                        "no {} rates loaded, using {} sample rate points",
                        currency,
                        sample.len()
                    );
                }
                None => {
                    log_warn!(
                        LogComponent::Application("Dashboard"),
                        "no {} rates loaded and no sample table, differential will be empty",
                        currency
                    );
                }
            }
        }

        let base = data.rates_for(data.pair.base());
        let quote = data.rates_for(data.pair.quote());
        let anchor = data
            .prices
            .last()
            .map(|p| p.date)
            .or_else(|| base.iter().chain(quote).map(|r| r.date).max());
        let fallback = match anchor {
            Some(anchor) => self.config.overlap_fallback(anchor),
            None => Default::default(),
        };
        self.differential = compute_differential(base, quote, fallback);

        log_info!(
            LogComponent::Application("Dashboard"),
            "loaded {}: {} price points, {} differential points",
            data.pair,
            data.prices.len(),
            self.differential.len()
        );
        self.data = Some(data);
        Ok(())
    }

    /// Timeline positions, ascending
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        self.data.as_ref().map(|d| d.prices.iter().map(|p| p.date).collect()).unwrap_or_default()
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.data.as_ref().and_then(|d| d.prices.last()).map(|p| p.date)
    }

    /// Differential history as known on `date`
    pub fn differential_until(&self, date: NaiveDate) -> &[DifferentialPoint] {
        let end = self.differential.partition_point(|p| p.date <= date);
        &self.differential[..end]
    }

    /// Whether the rates shown for `currency` come from the bundled demo
    /// tables. Always true in demo mode and when nothing was loaded for it.
    pub fn is_sample_currency(&self, currency: &CurrencyCode) -> bool {
        if self.config.demo_mode {
            return true;
        }
        match self.data.as_ref().and_then(|d| d.loaded_rates(currency)) {
            Some(rates) => sample_data::is_sample_rates(currency, rates),
            None => true,
        }
    }

    /// Render state for `date`. `None` until data is loaded.
    pub fn view(&self, date: NaiveDate, timeframe: Timeframe) -> Option<DashboardView> {
        let data = self.data.as_ref()?;
        let diff_history = self.differential_until(date);

        let alerts = detect_inflections_at(&data.pair, &data.prices, diff_history, date);
        log_debug!(
            LogComponent::Application("Dashboard"),
            "view {} at {} ({}): {} alerts",
            data.pair,
            date,
            timeframe,
            alerts.len()
        );

        Some(DashboardView {
            pair: data.pair.clone(),
            date,
            timeframe,
            snapshot: pair_snapshot(&data.pair, &data.prices, diff_history, date),
            base_rate: rate_at(data.rates_for(data.pair.base()), data.pair.base(), date),
            quote_rate: rate_at(data.rates_for(data.pair.quote()), data.pair.quote(), date),
            base_rate_is_sample: self.is_sample_currency(data.pair.base()),
            quote_rate_is_sample: self.is_sample_currency(data.pair.quote()),
            visible_prices: visible_prices(&data.prices, date, timeframe).to_vec(),
            visible_differential: visible_differential(&self.differential, date, timeframe)
                .to_vec(),
            alerts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_requires_loaded_data() {
        let service = DashboardService::new(DashboardConfig::default());
        let date = NaiveDate::from_ymd_opt(2024, 8, 21).unwrap();
        assert!(service.view(date, Timeframe::OneDay).is_none());
        assert!(service.available_dates().is_empty());
    }

    #[test]
    fn rejects_unconfigured_pair() {
        let mut service = DashboardService::new(DashboardConfig::default());
        let mut data = DashboardData::demo();
        data.pair = "EUR/USD".parse().unwrap();
        assert!(matches!(service.load(data), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn missing_tables_fall_back_to_samples() {
        let mut data = DashboardData::demo();
        data.rates.insert("JPY".to_string(), Vec::new());
        data.rates.remove("USD");
        let usd = data.pair.base().clone();
        let jpy = data.pair.quote().clone();
        assert!(data.loaded_rates(&jpy).is_none());
        assert_eq!(data.rates_for(&usd), sample_data::sample_rates(&usd).unwrap());
        assert_eq!(data.rates_for(&jpy), sample_data::sample_rates(&jpy).unwrap());

        let eur: CurrencyCode = "EUR".parse().unwrap();
        assert!(data.rates_for(&eur).is_empty());
    }
}
