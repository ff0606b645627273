//! Sync latency percentiles

use api_types::{LatencyPercentiles, LatencyPoint};
use warehouse::SyncLatencyRecord;

/// Value at quantile `q` of an ascending slice, interpolating linearly
/// between the two nearest order statistics (rank `q * (n - 1)`).
pub fn percentile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = q.clamp(0.0, 1.0) * last as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Numeric latencies of `records`, ascending. Missing values are skipped.
pub fn sorted_latencies(records: &[SyncLatencyRecord]) -> Vec<f64> {
    let mut values: Vec<f64> = records.iter().filter_map(|r| r.latency_seconds).collect();
    values.sort_by(f64::total_cmp);
    values
}

/// p50/p75/p95/p99 of the numeric latencies, `None` when there are none.
pub fn latency_percentiles(records: &[SyncLatencyRecord]) -> Option<LatencyPercentiles> {
    percentiles_of(&sorted_latencies(records))
}

fn percentiles_of(sorted: &[f64]) -> Option<LatencyPercentiles> {
    Some(LatencyPercentiles {
        p50: round2(percentile(sorted, 0.50)?),
        p75: round2(percentile(sorted, 0.75)?),
        p95: round2(percentile(sorted, 0.95)?),
        p99: round2(percentile(sorted, 0.99)?),
    })
}

/// Latency over time, in record order.
pub fn latency_series(records: &[SyncLatencyRecord]) -> Vec<LatencyPoint> {
    records
        .iter()
        .map(|r| LatencyPoint { time_stamp: r.time_stamp.clone(), latency_seconds: r.latency_seconds })
        .collect()
}
