// Repository trait for telemetry data access
use crate::application::error::DataSourceError;
use crate::domain::telemetry::{PivotedRow, RawRow, TimeWindow};
use async_trait::async_trait;

#[async_trait]
pub trait TelemetryRepository: Send + Sync {
    /// Rows of one field of one measurement inside the window, ascending by time
    async fn query_field(
        &self,
        measurement: &str,
        field: &str,
        window: TimeWindow,
    ) -> Result<Vec<RawRow>, DataSourceError>;

    /// Rows of three fields pivoted on their shared timestamp, ascending by time
    async fn query_fields(
        &self,
        measurement: &str,
        fields: &[String; 3],
        window: TimeWindow,
    ) -> Result<Vec<PivotedRow>, DataSourceError>;
}
