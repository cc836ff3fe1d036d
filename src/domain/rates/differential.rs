use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{DifferentialPoint, RatePoint, round2};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_warn};

/// Number of trailing monthly points added after the anchor by
/// [`OverlapFallback::FlatSeries`]
pub const FLAT_FALLBACK_MONTHS: u32 = 12;

/// What to return when both rate histories are non-empty but never produce
/// a date on which both sides are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum OverlapFallback {
    /// Hand back the empty series and let the caller render "no data"
    #[default]
    Empty,
    /// Fabricate a flat 13-point monthly series ending at `anchor`, valued at
    /// the difference between the two most recent rates
    FlatSeries { anchor: NaiveDate },
}

/// Carry-forward differential between a base and a quote rate history.
///
/// Dates from both sides are merged; on each date the last published rate of
/// each side is carried forward (step function, no interpolation). A point
/// is emitted only once both sides have published at least once.
pub fn compute_differential(
    base: &[RatePoint],
    quote: &[RatePoint],
    fallback: OverlapFallback,
) -> Vec<DifferentialPoint> {
    if base.is_empty() || quote.is_empty() {
        log_debug!(
            LogComponent::Domain("Differential"),
            "missing rate data (base={}, quote={}), no differential",
            base.len(),
            quote.len()
        );
        return Vec::new();
    }

    let dates: BTreeSet<NaiveDate> = base.iter().chain(quote).map(|r| r.date).collect();

    let mut last_base: Option<f64> = None;
    let mut last_quote: Option<f64> = None;
    let mut result = Vec::with_capacity(dates.len());

    for date in dates {
        if let Some(r) = rate_on(base, date) {
            last_base = Some(r);
        }
        if let Some(r) = rate_on(quote, date) {
            last_quote = Some(r);
        }
        if let (Some(b), Some(q)) = (last_base, last_quote) {
            result.push(DifferentialPoint::new(date, b - q));
        }
    }

    log_debug!(
        LogComponent::Domain("Differential"),
        "{} base + {} quote rates -> {} differential points",
        base.len(),
        quote.len(),
        result.len()
    );

    // Only reachable if the merge itself is broken: with both sides
    // non-empty the last merged date always has both rates known.
    if result.is_empty() {
        return overlap_fallback(base, quote, fallback);
    }
    result
}

/// First entry published exactly on `date`
fn rate_on(rates: &[RatePoint], date: NaiveDate) -> Option<f64> {
    rates.iter().find(|r| r.date == date).map(|r| r.rate)
}

/// Result for two non-empty histories that produced no shared point
pub fn overlap_fallback(
    base: &[RatePoint],
    quote: &[RatePoint],
    fallback: OverlapFallback,
) -> Vec<DifferentialPoint> {
    // Callers guarantee both sides are non-empty
    let (Some(latest_base), Some(latest_quote)) = (base.last(), quote.last()) else {
        return Vec::new();
    };

    match fallback {
        OverlapFallback::Empty => {
            log_warn!(
                LogComponent::Domain("Differential"),
                "rate histories never overlap (base={}, quote={}), returning empty differential",
                base.len(),
                quote.len()
            );
            Vec::new()
        }
        OverlapFallback::FlatSeries { anchor } => {
            let diff = round2(latest_base.rate - latest_quote.rate);
            log_warn!(
                LogComponent::Domain("Differential"),
                "rate histories never overlap, synthesizing flat differential {} ending {}",
                diff,
                anchor
            );
            let mut points: Vec<DifferentialPoint> = (0..=FLAT_FALLBACK_MONTHS)
                .rev()
                .filter_map(|back| anchor.checked_sub_months(Months::new(back)))
                .map(|date| DifferentialPoint { date, diff })
                .collect();
            points.sort_by_key(|p| p.date);
            points
        }
    }
}

/// Most recent differential value, 0 when there is none
pub fn latest_differential(history: &[DifferentialPoint]) -> f64 {
    history.last().map_or(0.0, |p| p.diff)
}
