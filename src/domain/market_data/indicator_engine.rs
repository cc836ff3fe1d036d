//! RSI, SMA and Bollinger computation over a full close history.
//!
//! Every function recomputes from scratch and returns one value per input
//! price. The warm-up policies below (flat-filled RSI, raw-price SMA, ±1 %
//! Bollinger envelope) are not textbook indicators. The alert thresholds in
//! `domain::signals` were tuned against them, so they must stay as they are.

use serde::{Deserialize, Serialize};

use super::{ClosePoint, PricePoint};
use crate::domain::logging::LogComponent;
use crate::log_debug;

pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_MULTIPLIER: f64 = 2.0;

/// RSI reported when the history is too short to hold a single full window
pub const NEUTRAL_RSI: f64 = 50.0;

/// Relative Strength Index with simple (non-smoothed) averages.
///
/// For `i >= period` the value uses the `period` deltas ending at `i`.
/// Indices below `period` repeat the value at `period`. A history of
/// `period` points or fewer has no such value and is reported as
/// [`NEUTRAL_RSI`] throughout.
pub fn compute_rsi(prices: &[f64], period: usize) -> Vec<f64> {
    if prices.is_empty() {
        return Vec::new();
    }
    if period == 0 || prices.len() <= period {
        return vec![NEUTRAL_RSI; prices.len()];
    }

    let mut rsi = vec![0.0; prices.len()];
    for i in period..prices.len() {
        let (gain_sum, loss_sum) = prices[i - period..=i].windows(2).fold(
            (0.0_f64, 0.0_f64),
            |(gain, loss), pair| {
                let change = pair[1] - pair[0];
                if change > 0.0 { (gain + change, loss) } else { (gain, loss + change.abs()) }
            },
        );

        let avg_gain = gain_sum / period as f64;
        let avg_loss = loss_sum / period as f64;
        rsi[i] = if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        };
    }

    let seed = rsi[period];
    rsi[..period].fill(seed);
    rsi
}

/// Simple moving average over the `window` points *before* `i`.
///
/// The current point is excluded. Indices below `window` report the raw
/// price instead of a gap.
pub fn compute_sma(prices: &[f64], window: usize) -> Vec<f64> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &price)| {
            if window == 0 || i < window {
                price
            } else {
                mean(&prices[i - window..i])
            }
        })
        .collect()
}

/// Upper and lower Bollinger envelopes, index-aligned with the input
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Bollinger Bands from the mean and population standard deviation of the
/// `period` points before `i`. Indices below `period` get a ±1 % envelope
/// around the price.
pub fn compute_bollinger(prices: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    let mut bands = BollingerBands {
        upper: Vec::with_capacity(prices.len()),
        lower: Vec::with_capacity(prices.len()),
    };

    for (i, &price) in prices.iter().enumerate() {
        if period == 0 || i < period {
            bands.upper.push(price * 1.01);
            bands.lower.push(price * 0.99);
            continue;
        }

        let window = &prices[i - period..i];
        let ma = mean(window);
        let variance = window.iter().map(|v| (v - ma).powi(2)).sum::<f64>() / period as f64;
        let std_dev = variance.sqrt();

        bands.upper.push(ma + multiplier * std_dev);
        bands.lower.push(ma - multiplier * std_dev);
    }

    bands
}

#[inline]
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Lookback windows used when enriching a raw close history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndicatorSettings {
    pub rsi_period: usize,
    pub ma_short: usize,
    pub ma_long: usize,
    pub bollinger_period: usize,
    pub bollinger_multiplier: f64,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            rsi_period: DEFAULT_RSI_PERIOD,
            ma_short: 20,
            ma_long: 50,
            bollinger_period: DEFAULT_BOLLINGER_PERIOD,
            bollinger_multiplier: DEFAULT_BOLLINGER_MULTIPLIER,
        }
    }
}

/// Turns `{date, close}` histories into [`PricePoint`] series
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    settings: IndicatorSettings,
}

impl IndicatorEngine {
    pub fn new(settings: IndicatorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &IndicatorSettings {
        &self.settings
    }

    /// Compute every indicator and zip the results with the input dates.
    pub fn enrich(&self, history: &[ClosePoint]) -> Vec<PricePoint> {
        let prices: Vec<f64> = history.iter().map(|c| c.close).collect();
        let s = &self.settings;

        let rsi = compute_rsi(&prices, s.rsi_period);
        let ma20 = compute_sma(&prices, s.ma_short);
        let ma50 = compute_sma(&prices, s.ma_long);
        let bands = compute_bollinger(&prices, s.bollinger_period, s.bollinger_multiplier);

        log_debug!(
            LogComponent::Domain("IndicatorEngine"),
            "enriched {} closes (rsi={}, ma={}/{}, boll={}x{})",
            prices.len(),
            s.rsi_period,
            s.ma_short,
            s.ma_long,
            s.bollinger_period,
            s.bollinger_multiplier
        );

        history
            .iter()
            .enumerate()
            .map(|(i, c)| PricePoint {
                date: c.date,
                value: c.close,
                rsi: rsi[i],
                ma20: ma20[i],
                ma50: ma50[i],
                boll_upper: bands.upper[i],
                boll_lower: bands.lower[i],
            })
            .collect()
    }
}
