// Errors raised while reading from the time-series store
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("failed to reach the data source: {0}")]
    Connection(#[source] influxdb2::RequestError),

    #[error("query failed: {0}")]
    Query(String),

    #[error("could not decode query result: {0}")]
    Decode(String),

    #[error("query timed out after {0:?}")]
    Timeout(Duration),
}

impl From<influxdb2::RequestError> for DataSourceError {
    fn from(err: influxdb2::RequestError) -> Self {
        match err {
            influxdb2::RequestError::ReqwestProcessing { .. } => DataSourceError::Connection(err),
            influxdb2::RequestError::Http { .. } => DataSourceError::Query(err.to_string()),
            other => DataSourceError::Decode(other.to_string()),
        }
    }
}
