// Summary statistics over a series
use super::telemetry::Series;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
}

/// Min, max and mean of the series values; `None` when there is nothing to summarize
pub fn summarize(series: &Series) -> Option<SummaryStats> {
    if series.is_empty() {
        return None;
    }

    let count = series.len();
    let min = series.values().fold(f64::INFINITY, f64::min);
    let max = series.values().fold(f64::NEG_INFINITY, f64::max);
    // Running mean stays finite where a plain sum of large readings would overflow
    let mean = series
        .values()
        .enumerate()
        .fold(0.0, |mean, (i, v)| mean + (v - mean) / (i + 1) as f64);

    Some(SummaryStats {
        min,
        max,
        mean,
        count,
    })
}
