//! Temporal feature computations.
//!
//! Every entry consumes one band's per-pixel time series (shape
//! `(pixel, time)`) plus resolved intervals, and reduces it to one scalar
//! per pixel. The exception is `raw`, which keeps one value per covered
//! time step.
//!
//! Statistics accumulate in f64 with two-pass mean/variance so that long
//! series with large offsets do not lose precision; `std` is the population
//! standard deviation of the covered slice.

use ndarray::{ArrayView1, ArrayView2};

use crate::error::{FeatureError, Result};
use crate::interval::ResolvedInterval;

/// Raw band values: one output column per covered time step, tagged with
/// the absolute step index.
pub fn raw(series: ArrayView2<'_, f64>, interval: ResolvedInterval) -> Vec<(usize, Vec<f64>)> {
    interval
        .steps()
        .map(|t| (t, series.column(t).to_vec()))
        .collect()
}

/// Temporal mean of the covered slice, per pixel.
pub fn mean(series: ArrayView2<'_, f64>, interval: ResolvedInterval) -> Vec<f64> {
    series
        .outer_iter()
        .map(|pixel| slice_mean(pixel, interval))
        .collect()
}

/// Temporal population standard deviation of the covered slice, per pixel.
pub fn std(series: ArrayView2<'_, f64>, interval: ResolvedInterval) -> Vec<f64> {
    series
        .outer_iter()
        .map(|pixel| {
            let mean = slice_mean(pixel, interval);
            let ss: f64 = interval
                .steps()
                .map(|t| {
                    let d = pixel[t] - mean;
                    d * d
                })
                .sum();
            (ss / interval.len() as f64).sqrt()
        })
        .collect()
}

/// Mean lagged difference over the covered interval, per pixel.
///
/// For every step `t` in the interval with `t >= lag`, the contribution is
/// `value[t] - value[t - lag]`; the lagged partner may precede the interval.
/// Fails with [`FeatureError::InsufficientHistory`] when no step qualifies.
pub fn deseasonalized_diff(
    series: ArrayView2<'_, f64>,
    interval: ResolvedInterval,
    lag: usize,
) -> Result<Vec<f64>> {
    let steps: Vec<usize> = interval.steps().filter(|&t| t >= lag).collect();
    mean_lagged_diff(series, &steps, lag, interval)
}

/// Mean lagged difference restricted to steps of one calendar month.
///
/// Assumes a fixed 12-step-per-year cadence with step 0 = month 0, so a
/// step `t` belongs to month `t % 12`.
pub fn deseasonalized_diff_specific_month(
    series: ArrayView2<'_, f64>,
    interval: ResolvedInterval,
    lag: usize,
    month: u32,
) -> Result<Vec<f64>> {
    let steps: Vec<usize> = interval
        .steps()
        .filter(|&t| t >= lag && (t % 12) as u32 == month)
        .collect();
    mean_lagged_diff(series, &steps, lag, interval)
}

/// Mean of interval one minus mean of interval two, per pixel.
///
/// Both intervals are resolved independently by the dispatcher; overlap is
/// allowed and identical intervals yield an all-zero column.
pub fn difference_in_mean_between_intervals(
    series: ArrayView2<'_, f64>,
    interval_one: ResolvedInterval,
    interval_two: ResolvedInterval,
) -> Vec<f64> {
    series
        .outer_iter()
        .map(|pixel| slice_mean(pixel, interval_one) - slice_mean(pixel, interval_two))
        .collect()
}

fn mean_lagged_diff(
    series: ArrayView2<'_, f64>,
    steps: &[usize],
    lag: usize,
    interval: ResolvedInterval,
) -> Result<Vec<f64>> {
    if steps.is_empty() {
        return Err(FeatureError::InsufficientHistory {
            lag,
            lo: interval.lo,
            hi: interval.hi,
        });
    }

    let n = steps.len() as f64;
    Ok(series
        .outer_iter()
        .map(|pixel| {
            let sum: f64 = steps.iter().map(|&t| pixel[t] - pixel[t - lag]).sum();
            sum / n
        })
        .collect())
}

fn slice_mean(pixel: ArrayView1<'_, f64>, interval: ResolvedInterval) -> f64 {
    let sum: f64 = interval.steps().map(|t| pixel[t]).sum();
    sum / interval.len() as f64
}
