// HTTP request handlers
use crate::domain::telemetry::TimeWindow;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RangeQuery {
    pub minutes: Option<u32>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Whole dashboard for the selected window
pub async fn get_dashboard(
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let window = TimeWindow::from_control(query.minutes);
    Json(state.dashboard_service.get_dashboard(window).await)
}

/// One configured series for the selected window
pub async fn get_series(
    Path(id): Path<String>,
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let window = TimeWindow::from_control(query.minutes);
    match state.dashboard_service.get_series(&id, window).await {
        Some(panel) => Json(panel).into_response(),
        None => (StatusCode::NOT_FOUND, format!("unknown series `{id}`")).into_response(),
    }
}
