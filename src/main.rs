// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::series_client::TimeSeriesClient;
use crate::infrastructure::config::{load_dashboard_config, load_influx_config};
use crate::infrastructure::influx_repository::InfluxRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration once; it stays immutable for the life of the process
    let influx_config = load_influx_config()?;
    let dashboard_config = Arc::new(load_dashboard_config()?);

    // Create repository (infrastructure layer)
    let repository = Arc::new(InfluxRepository::new(
        &influx_config.influx,
        influx_config.client.max_connections,
    ));

    // Create services (application layer)
    let client = TimeSeriesClient::new(
        repository,
        Duration::from_secs(influx_config.client.timeout_secs),
        influx_config.client.max_points,
    );
    let dashboard_service = DashboardService::new(client, dashboard_config.clone());

    let state = Arc::new(AppState { dashboard_service });
    let router = build_router(state);

    let addr: SocketAddr = influx_config.server.listen.parse()?;
    tracing::info!(
        "Starting koru-telemetry on {} ({} series, bucket {})",
        addr,
        dashboard_config.series.len(),
        influx_config.influx.bucket
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
