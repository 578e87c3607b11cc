// Dashboard domain model
use super::advisory::Advisory;
use super::statistics::SummaryStats;
use super::telemetry::{Series, TimeWindow};
use serde::Serialize;

/// Outcome of fetching one configured series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesStatus {
    Ok,
    /// The query succeeded but the window holds no points
    NoData,
    /// The data source failed or timed out; shown as "no data"
    Unavailable,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesPanel {
    pub id: String,
    pub label: String,
    pub unit: Option<String>,
    pub status: SeriesStatus,
    pub stats: Option<SummaryStats>,
    pub points: Series,
}

impl SeriesPanel {
    pub fn new(
        id: String,
        label: String,
        unit: Option<String>,
        status: SeriesStatus,
        points: Series,
    ) -> Self {
        let stats = super::statistics::summarize(&points);
        Self {
            id,
            label,
            unit,
            status,
            stats,
            points,
        }
    }
}

/// External dashboard embedded next to the live charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddedPanel {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub window: TimeWindow,
    pub series: Vec<SeriesPanel>,
    pub advisories: Vec<Advisory>,
    pub panels: Vec<EmbeddedPanel>,
}

impl Dashboard {
    pub fn new(
        title: String,
        window: TimeWindow,
        series: Vec<SeriesPanel>,
        advisories: Vec<Advisory>,
        panels: Vec<EmbeddedPanel>,
    ) -> Self {
        Self {
            title,
            window,
            series,
            advisories,
            panels,
        }
    }
}
