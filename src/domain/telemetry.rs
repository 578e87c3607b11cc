// Telemetry data domain models
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Trailing window in minutes, "now minus range_minutes up to now"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub range_minutes: u32,
}

impl TimeWindow {
    #[cfg(test)]
    pub fn new(range_minutes: u32) -> Option<Self> {
        (range_minutes > 0).then_some(Self { range_minutes })
    }

    /// Window chosen from the dashboard control, bounded to what the UI offers
    pub fn from_control(minutes: Option<u32>) -> Self {
        let range_minutes = minutes
            .unwrap_or(DEFAULT_WINDOW_MINUTES)
            .clamp(MIN_CONTROL_MINUTES, MAX_CONTROL_MINUTES);
        Self { range_minutes }
    }
}

pub const DEFAULT_WINDOW_MINUTES: u32 = 60;
pub const MIN_CONTROL_MINUTES: u32 = 10;
pub const MAX_CONTROL_MINUTES: u32 = 180;

/// One row for a single field as the store returned it, not yet validated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub time: Option<String>,
    pub value: Option<String>,
}

impl RawRow {
    #[cfg(test)]
    pub fn new(time: Option<&str>, value: Option<&str>) -> Self {
        Self {
            time: time.map(str::to_string),
            value: value.map(str::to_string),
        }
    }
}

/// One row of three axis fields pivoted on a shared timestamp
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PivotedRow {
    pub time: Option<String>,
    pub values: [Option<String>; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub time: DateTime<Utc>,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time: DateTime<Utc>, value: f64) -> Self {
        Self { time, value }
    }
}

/// Ascending, timestamp-unique sequence of points
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<TimeSeriesPoint>,
}

/// Series whose values were computed from several source series
pub type DerivedSeries = Series;

impl Series {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from points already sorted ascending with unique timestamps
    pub(crate) fn from_sorted(points: Vec<TimeSeriesPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].time < w[1].time));
        Self { points }
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn last(&self) -> Option<&TimeSeriesPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Downsample using bucket averaging so that at most `max_points` remain
    pub fn downsample(self, max_points: usize) -> Self {
        if max_points == 0 || self.points.len() <= max_points {
            return self;
        }

        let bucket_size = (self.points.len() as f64 / max_points as f64).ceil() as usize;
        let mut downsampled = Vec::with_capacity(max_points);

        for chunk in self.points.chunks(bucket_size) {
            // Use middle point's timestamp and average value
            let mid_idx = chunk.len() / 2;
            let avg_value = chunk.iter().map(|p| p.value).sum::<f64>() / chunk.len() as f64;
            downsampled.push(TimeSeriesPoint::new(chunk[mid_idx].time, avg_value));
        }

        Self::from_sorted(downsampled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(sec: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(sec, 0).unwrap()
    }

    #[test]
    fn test_time_window_rejects_zero() {
        assert!(TimeWindow::new(0).is_none());
        assert_eq!(TimeWindow::new(600).unwrap().range_minutes, 600);
    }

    #[test]
    fn test_control_window_is_clamped() {
        assert_eq!(TimeWindow::from_control(None).range_minutes, 60);
        assert_eq!(TimeWindow::from_control(Some(1)).range_minutes, 10);
        assert_eq!(TimeWindow::from_control(Some(500)).range_minutes, 180);
        assert_eq!(TimeWindow::from_control(Some(45)).range_minutes, 45);
    }

    #[test]
    fn test_downsample_caps_length() {
        let points = (0..1000).map(|i| TimeSeriesPoint::new(at(i), 1.0)).collect();
        let series = Series::from_sorted(points).downsample(100);

        assert_eq!(series.len(), 100);
        assert!(series.values().all(|v| v == 1.0));
        assert!(series.points().windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn test_downsample_averages_buckets() {
        let points = vec![
            TimeSeriesPoint::new(at(0), 1.0),
            TimeSeriesPoint::new(at(1), 3.0),
            TimeSeriesPoint::new(at(2), 5.0),
            TimeSeriesPoint::new(at(3), 7.0),
        ];
        let series = Series::from_sorted(points).downsample(2);

        assert_eq!(
            series.points(),
            &[
                TimeSeriesPoint::new(at(1), 2.0),
                TimeSeriesPoint::new(at(3), 6.0)
            ]
        );
    }

    #[test]
    fn test_downsample_leaves_short_series() {
        let series = Series::from_sorted(vec![TimeSeriesPoint::new(at(0), 4.0)]);
        assert_eq!(series.clone().downsample(10), series);
    }
}
