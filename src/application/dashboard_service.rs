// Dashboard service - Use case for building dashboards
use crate::application::error::DataSourceError;
use crate::application::series_client::TimeSeriesClient;
use crate::domain::advisory::evaluate;
use crate::domain::dashboard::{Dashboard, EmbeddedPanel, SeriesPanel, SeriesStatus};
use crate::domain::telemetry::{Series, TimeWindow};
use crate::infrastructure::config::{DashboardConfig, SeriesConfig, SeriesSource};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct DashboardService {
    client: TimeSeriesClient,
    dashboard_config: Arc<DashboardConfig>,
}

impl DashboardService {
    pub fn new(client: TimeSeriesClient, dashboard_config: Arc<DashboardConfig>) -> Self {
        Self {
            client,
            dashboard_config,
        }
    }

    /// Fetch every configured series concurrently and derive stats and advisories.
    ///
    /// A failing series degrades to an empty panel marked unavailable; it never
    /// fails the dashboard.
    pub async fn get_dashboard(&self, window: TimeWindow) -> Dashboard {
        let start_time = Instant::now();

        let series = join_all(
            self.dashboard_config
                .series
                .iter()
                .map(|series_config| self.fetch_panel(series_config, window)),
        )
        .await;

        let latest: Vec<(&str, &Series)> = series
            .iter()
            .map(|panel| (panel.id.as_str(), &panel.points))
            .collect();
        let advisories = evaluate(&latest, &self.dashboard_config.advisories);

        let panels = self
            .dashboard_config
            .panels
            .iter()
            .map(|p| EmbeddedPanel {
                title: p.title.clone(),
                url: p.url.clone(),
            })
            .collect();

        tracing::info!(
            "Built dashboard for {}m window: {} series, {} advisories in {}ms",
            window.range_minutes,
            series.len(),
            advisories.len(),
            start_time.elapsed().as_millis()
        );

        Dashboard::new(
            self.dashboard_config.title.clone(),
            window,
            series,
            advisories,
            panels,
        )
    }

    /// Single configured series, or `None` when the id is unknown
    pub async fn get_series(&self, id: &str, window: TimeWindow) -> Option<SeriesPanel> {
        let series_config = self.dashboard_config.series.iter().find(|s| s.id == id)?;
        Some(self.fetch_panel(series_config, window).await)
    }

    async fn fetch_panel(&self, series_config: &SeriesConfig, window: TimeWindow) -> SeriesPanel {
        let (status, points) = match self.fetch_series(series_config, window).await {
            Ok(points) if points.is_empty() => (SeriesStatus::NoData, points),
            Ok(points) => (SeriesStatus::Ok, points),
            Err(e) => {
                tracing::warn!("Error fetching series {}: {}", series_config.id, e);
                (SeriesStatus::Unavailable, Series::empty())
            }
        };

        SeriesPanel::new(
            series_config.id.clone(),
            series_config.label.clone(),
            series_config.unit.clone(),
            status,
            points,
        )
    }

    async fn fetch_series(
        &self,
        series_config: &SeriesConfig,
        window: TimeWindow,
    ) -> Result<Series, DataSourceError> {
        match &series_config.source {
            SeriesSource::Field { field } => {
                self.client
                    .fetch(&series_config.measurement, field, window)
                    .await
            }
            SeriesSource::Derived {
                derived_from,
                formula,
            } => {
                self.client
                    .fetch_multi_field(&series_config.measurement, derived_from, *formula, window)
                    .await
            }
        }
    }
}
