use chrono::{Duration, Months, NaiveDate};

use super::Timeframe;
use crate::domain::market_data::PricePoint;
use crate::domain::rates::DifferentialPoint;

/// Months of differential history always kept in view
pub const DIFFERENTIAL_CONTEXT_MONTHS: u32 = 12;

/// A series handed to the window selector, tagged by kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartSeries<'a> {
    Price(&'a [PricePoint]),
    Differential(&'a [DifferentialPoint]),
}

impl ChartSeries<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::Price(points) => points.len(),
            Self::Differential(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First date shown for a price series
pub fn price_cutoff(anchor: NaiveDate, timeframe: Timeframe) -> NaiveDate {
    anchor
        .checked_sub_signed(Duration::days(timeframe.lookback_days()))
        .unwrap_or(NaiveDate::MIN)
}

/// First date shown for a differential series: the later of the timeframe
/// cutoff and twelve calendar months before `anchor`
pub fn differential_cutoff(anchor: NaiveDate, timeframe: Timeframe) -> NaiveDate {
    let context = anchor
        .checked_sub_months(Months::new(DIFFERENTIAL_CONTEXT_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    price_cutoff(anchor, timeframe).max(context)
}

/// Slice `series` to the points visible at `anchor` for `timeframe`.
///
/// Both bounds are inclusive. The input is assumed ascending, so the
/// result borrows a contiguous sub-slice of it.
pub fn visible_window<'a>(
    series: ChartSeries<'a>,
    anchor: NaiveDate,
    timeframe: Timeframe,
) -> ChartSeries<'a> {
    match series {
        ChartSeries::Price(points) => {
            let from = price_cutoff(anchor, timeframe);
            ChartSeries::Price(slice_between(points, |p| p.date, from, anchor))
        }
        ChartSeries::Differential(points) => {
            let from = differential_cutoff(anchor, timeframe);
            ChartSeries::Differential(slice_between(points, |p| p.date, from, anchor))
        }
    }
}

pub fn visible_prices(
    series: &[PricePoint],
    anchor: NaiveDate,
    timeframe: Timeframe,
) -> &[PricePoint] {
    match visible_window(ChartSeries::Price(series), anchor, timeframe) {
        ChartSeries::Price(points) => points,
        ChartSeries::Differential(_) => &[],
    }
}

pub fn visible_differential(
    series: &[DifferentialPoint],
    anchor: NaiveDate,
    timeframe: Timeframe,
) -> &[DifferentialPoint] {
    match visible_window(ChartSeries::Differential(series), anchor, timeframe) {
        ChartSeries::Differential(points) => points,
        ChartSeries::Price(_) => &[],
    }
}

fn slice_between<T>(
    points: &[T],
    date_of: impl Fn(&T) -> NaiveDate,
    from: NaiveDate,
    to: NaiveDate,
) -> &[T] {
    let start = points.partition_point(|p| date_of(p) < from);
    let end = points.partition_point(|p| date_of(p) <= to);
    if start >= end { &[] } else { &points[start..end] }
}
