use chrono::NaiveDate;

use super::{ClosePoint, PricePoint};
use crate::domain::errors::{AppError, ValidationResult};
use crate::domain::rates::RatePoint;

/// Domain service that checks collaborator input before it reaches the
/// indicator pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct DataValidationService;

impl DataValidationService {
    pub fn new() -> Self {
        Self
    }

    /// A close must be a positive finite number
    pub fn validate_close(&self, point: &ClosePoint) -> ValidationResult<()> {
        if !point.close.is_finite() {
            return Err(AppError::ValidationError(format!(
                "Close on {} is not a finite number",
                point.date
            )));
        }
        if point.close <= 0.0 {
            return Err(AppError::ValidationError(format!(
                "Close on {} must be positive, got {}",
                point.date, point.close
            )));
        }
        Ok(())
    }

    /// Price history must be strictly ascending with valid closes
    pub fn validate_close_sequence(&self, history: &[ClosePoint]) -> ValidationResult<()> {
        for point in history {
            self.validate_close(point)?;
        }
        for (i, pair) in history.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(AppError::ValidationError(format!(
                    "Closes are not in strictly ascending date order at index {}: {} after {}",
                    i + 1,
                    pair[1].date,
                    pair[0].date
                )));
            }
        }
        Ok(())
    }

    /// Same ordering and value rules for an already enriched series (e.g.
    /// from cache). Band order is not enforced here, see [`Self::crossed_bands`].
    pub fn validate_price_sequence(&self, series: &[PricePoint]) -> ValidationResult<()> {
        if let Some(bad) = series.iter().find(|p| !p.value.is_finite() || p.value <= 0.0) {
            return Err(AppError::ValidationError(format!(
                "Price on {} must be a positive finite number, got {}",
                bad.date, bad.value
            )));
        }
        for (i, pair) in series.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(AppError::ValidationError(format!(
                    "Price points are not in strictly ascending date order at index {}",
                    i + 1
                )));
            }
        }
        Ok(())
    }

    /// Dates whose upper Bollinger band sits below the lower one. Replayed
    /// series can carry these and are shown as-is.
    pub fn crossed_bands(&self, series: &[PricePoint]) -> Vec<NaiveDate> {
        series.iter().filter(|p| p.boll_upper < p.boll_lower).map(|p| p.date).collect()
    }

    /// Rate histories may be sparse but must be date-ordered and finite
    pub fn validate_rate_sequence(&self, rates: &[RatePoint]) -> ValidationResult<()> {
        if let Some(bad) = rates.iter().find(|r| !r.rate.is_finite()) {
            return Err(AppError::ValidationError(format!(
                "Rate on {} is not a finite number",
                bad.date
            )));
        }
        for (i, pair) in rates.windows(2).enumerate() {
            if pair[1].date < pair[0].date {
                return Err(AppError::ValidationError(format!(
                    "Rates are not in ascending date order at index {}",
                    i + 1
                )));
            }
        }
        Ok(())
    }

    /// Sort a collaborator's closes chronologically. When a date repeats,
    /// the later entry wins.
    pub fn normalize_closes(&self, mut history: Vec<ClosePoint>) -> Vec<ClosePoint> {
        history.sort_by_key(|c| c.date);
        let mut normalized: Vec<ClosePoint> = Vec::with_capacity(history.len());
        for point in history {
            match normalized.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => normalized.push(point),
            }
        }
        normalized
    }
}
