// In-memory repository used by the service tests
use crate::application::error::DataSourceError;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::telemetry::{PivotedRow, RawRow, TimeWindow};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct FakeRepository {
    fields: HashMap<(String, String), Vec<RawRow>>,
    pivoted: HashMap<String, Vec<PivotedRow>>,
    failing: HashSet<String>,
    delay: Option<Duration>,
    windows: Mutex<Vec<u32>>,
}

impl FakeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, measurement: &str, field: &str, rows: &[(&str, &str)]) -> Self {
        let rows = rows
            .iter()
            .map(|(t, v)| RawRow::new(Some(t), Some(v)))
            .collect();
        self.fields
            .insert((measurement.to_string(), field.to_string()), rows);
        self
    }

    pub fn with_pivoted(mut self, measurement: &str, rows: &[(&str, [Option<&str>; 3])]) -> Self {
        let rows = rows
            .iter()
            .map(|(t, values)| PivotedRow {
                time: Some(t.to_string()),
                values: values.map(|v| v.map(str::to_string)),
            })
            .collect();
        self.pivoted.insert(measurement.to_string(), rows);
        self
    }

    /// Every query against `measurement` fails
    pub fn failing(mut self, measurement: &str) -> Self {
        self.failing.insert(measurement.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Window sizes seen by the repository, in call order
    pub fn windows(&self) -> Vec<u32> {
        self.windows.lock().unwrap().clone()
    }

    async fn enter(&self, measurement: &str, window: TimeWindow) -> Result<(), DataSourceError> {
        self.windows.lock().unwrap().push(window.range_minutes);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(measurement) {
            return Err(DataSourceError::Query(format!("{measurement} is offline")));
        }
        Ok(())
    }
}

#[async_trait]
impl TelemetryRepository for FakeRepository {
    async fn query_field(
        &self,
        measurement: &str,
        field: &str,
        window: TimeWindow,
    ) -> Result<Vec<RawRow>, DataSourceError> {
        self.enter(measurement, window).await?;
        Ok(self
            .fields
            .get(&(measurement.to_string(), field.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn query_fields(
        &self,
        measurement: &str,
        _fields: &[String; 3],
        window: TimeWindow,
    ) -> Result<Vec<PivotedRow>, DataSourceError> {
        self.enter(measurement, window).await?;
        Ok(self.pivoted.get(measurement).cloned().unwrap_or_default())
    }
}
