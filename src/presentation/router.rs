// Route table and middleware
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_dashboard, get_series, health_check};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/series/:id", get(get_series))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::DashboardService;
    use crate::application::fakes::FakeRepository;
    use crate::application::series_client::TimeSeriesClient;
    use crate::domain::advisory::AdvisoryRule;
    use crate::infrastructure::config::{DashboardConfig, SeriesConfig, SeriesSource};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use std::time::Duration;
    use tower::ServiceExt;

    fn router(repository: FakeRepository) -> Router {
        let dashboard_config = DashboardConfig {
            title: "Koru".to_string(),
            series: vec![SeriesConfig {
                id: "humidity".to_string(),
                label: "Humidity".to_string(),
                unit: Some("%".to_string()),
                measurement: "clima".to_string(),
                source: SeriesSource::Field {
                    field: "humidity".to_string(),
                },
            }],
            advisories: vec![AdvisoryRule::humidity_low(40.0)],
            panels: Vec::new(),
        };
        let client = TimeSeriesClient::new(Arc::new(repository), Duration::from_secs(1), 500);
        let dashboard_service = DashboardService::new(client, Arc::new(dashboard_config));
        build_router(Arc::new(AppState { dashboard_service }))
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = router(FakeRepository::new())
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_json() {
        let repo = FakeRepository::new().with_field(
            "clima",
            "humidity",
            &[("2024-05-01T10:00:00Z", "30"), ("2024-05-01T10:01:00Z", "35")],
        );

        let (status, body) = get_json(router(repo), "/dashboard?minutes=500").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["window"]["range_minutes"], 180);
        assert_eq!(body["series"][0]["status"], "ok");
        assert_eq!(body["series"][0]["stats"]["max"], 35.0);
        assert_eq!(body["series"][0]["points"][1]["value"], 35.0);
        assert_eq!(body["series"][0]["points"][0]["time"], "2024-05-01T10:00:00Z");
        assert_eq!(body["advisories"][0]["severity"], "warning");
    }

    #[tokio::test]
    async fn test_series_endpoint() {
        let (status, body) = get_json(router(FakeRepository::new()), "/series/humidity").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "no_data");
        assert!(body["stats"].is_null());

        let (status, _) = get_json(router(FakeRepository::new()), "/series/pressure").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
