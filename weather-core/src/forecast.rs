//! Downsampling of the provider's multi-day series to one entry per day.

use crate::model::{ForecastDay, RawForecastEntry};

/// Sampling interval of the OpenWeather `/forecast` series.
pub const PROVIDER_INTERVAL_HOURS: u32 = 3;

/// Number of days the dashboard shows.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Elements per 24 hours at `PROVIDER_INTERVAL_HOURS`. Changing the
/// provider interval changes this stride.
pub const DAILY_STRIDE: usize = daily_stride(PROVIDER_INTERVAL_HOURS);

/// Number of series elements spanning one day for a given sampling interval.
///
/// Intervals of zero or longer than a day degrade to a stride of 1.
pub const fn daily_stride(interval_hours: u32) -> usize {
    if interval_hours == 0 || interval_hours >= 24 {
        1
    } else {
        (24 / interval_hours) as usize
    }
}

/// Reduce the 3-hourly series to at most five daily entries
/// (indices 0, 8, 16, 24, 32).
///
/// The series must already be in chronological order; it is not sorted here.
pub fn reduce_to_daily(series: &[RawForecastEntry]) -> Vec<ForecastDay> {
    reduce_with_interval(series, PROVIDER_INTERVAL_HOURS, MAX_FORECAST_DAYS)
}

pub fn reduce_with_interval(
    series: &[RawForecastEntry],
    interval_hours: u32,
    max_days: usize,
) -> Vec<ForecastDay> {
    series
        .iter()
        .step_by(daily_stride(interval_hours))
        .take(max_days)
        .map(ForecastDay::from)
        .collect()
}
