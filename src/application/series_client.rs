// Time-series client - bounded, normalized reads from the repository
use crate::application::error::DataSourceError;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::derived::DerivedFormula;
use crate::domain::normalizer::{normalize, normalize_pivoted};
use crate::domain::telemetry::{DerivedSeries, Series, TimeWindow};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct TimeSeriesClient {
    repository: Arc<dyn TelemetryRepository>,
    timeout: Duration,
    max_points: usize,
}

impl TimeSeriesClient {
    pub fn new(repository: Arc<dyn TelemetryRepository>, timeout: Duration, max_points: usize) -> Self {
        Self {
            repository,
            timeout,
            max_points,
        }
    }

    /// Fetch one field as a normalized series capped at `max_points`
    pub async fn fetch(
        &self,
        measurement: &str,
        field: &str,
        window: TimeWindow,
    ) -> Result<Series, DataSourceError> {
        let rows = self
            .with_timeout(self.repository.query_field(measurement, field, window))
            .await?;

        let series = normalize(rows);
        tracing::debug!(
            "Fetched {} points for {}.{} over {}m",
            series.len(),
            measurement,
            field,
            window.range_minutes
        );
        Ok(series.downsample(self.max_points))
    }

    /// Fetch three axis fields together and combine them with `formula`
    pub async fn fetch_multi_field(
        &self,
        measurement: &str,
        fields: &[String; 3],
        formula: DerivedFormula,
        window: TimeWindow,
    ) -> Result<DerivedSeries, DataSourceError> {
        let rows = self
            .with_timeout(self.repository.query_fields(measurement, fields, window))
            .await?;

        let [ax, ay, az] = normalize_pivoted(rows);
        let derived = formula.apply(&ax, &ay, &az);
        tracing::debug!(
            "Derived {} points for {} from {:?}",
            derived.len(),
            measurement,
            fields
        );
        Ok(derived.downsample(self.max_points))
    }

    async fn with_timeout<T>(
        &self,
        query: impl Future<Output = Result<T, DataSourceError>>,
    ) -> Result<T, DataSourceError> {
        tokio::time::timeout(self.timeout, query)
            .await
            .map_err(|_| DataSourceError::Timeout(self.timeout))?
    }
}
