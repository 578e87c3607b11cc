// InfluxDB repository implementation
use crate::application::error::DataSourceError;
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::telemetry::{PivotedRow, RawRow, TimeWindow};
use crate::infrastructure::config::InfluxSettings;
use crate::infrastructure::flux;
use async_trait::async_trait;
use influxdb2::Client;
use influxdb2::api::query::FluxRecord;
use influxdb2::models::Query;
use influxdb2_structmap::value::Value;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Flux reader over the InfluxDB 2 query API.
///
/// All queries share one client. At most `max_connections` run at once;
/// each holds a permit until its result is decoded or it fails.
pub struct InfluxRepository {
    client: Client,
    permits: Arc<Semaphore>,
    bucket: String,
}

impl fmt::Debug for InfluxRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfluxRepository")
            .field("bucket", &self.bucket)
            .field("available_permits", &self.permits.available_permits())
            .finish_non_exhaustive()
    }
}

impl InfluxRepository {
    pub fn new(settings: &InfluxSettings, max_connections: usize) -> Self {
        let max_connections = max_connections.max(1);
        let client = Client::new(
            settings.url.trim_end_matches('/'),
            &settings.org,
            &settings.token,
        );

        Self {
            client,
            permits: Arc::new(Semaphore::new(max_connections)),
            bucket: settings.bucket.clone(),
        }
    }

    async fn execute_query(&self, query: String) -> Result<Vec<FluxRecord>, DataSourceError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| DataSourceError::Query("connection pool closed".to_string()))?;

        tracing::debug!("Executing Flux query: {}", query);
        let records = self.client.query_raw(Some(Query::new(query))).await?;
        Ok(records)
    }
}

/// Cell as text for the normalizer; absent or untyped cells become `None`
fn cell(record: &FluxRecord, column: &str) -> Option<String> {
    match record.values.get(column)? {
        Value::TimeRFC(time) => Some(time.to_rfc3339()),
        Value::Double(value) => Some(value.into_inner().to_string()),
        Value::Long(value) => Some(value.to_string()),
        Value::UnsignedLong(value) => Some(value.to_string()),
        Value::String(value) if !value.is_empty() => Some(value.clone()),
        _ => None,
    }
}

#[async_trait]
impl TelemetryRepository for InfluxRepository {
    async fn query_field(
        &self,
        measurement: &str,
        field: &str,
        window: TimeWindow,
    ) -> Result<Vec<RawRow>, DataSourceError> {
        let query = flux::field_query(&self.bucket, measurement, field, window);
        let records = self.execute_query(query).await?;

        Ok(records
            .iter()
            .map(|record| RawRow {
                time: cell(record, "_time"),
                value: cell(record, "_value"),
            })
            .collect())
    }

    async fn query_fields(
        &self,
        measurement: &str,
        fields: &[String; 3],
        window: TimeWindow,
    ) -> Result<Vec<PivotedRow>, DataSourceError> {
        let query = flux::pivot_query(&self.bucket, measurement, fields, window);
        let records = self.execute_query(query).await?;

        Ok(records
            .iter()
            .map(|record| PivotedRow {
                time: cell(record, "_time"),
                values: std::array::from_fn(|i| cell(record, &fields[i])),
            })
            .collect())
    }
}
