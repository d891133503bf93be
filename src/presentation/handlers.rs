// HTTP request handlers
use crate::application::error::DashboardError;
use crate::application::view_state::ChartCommand;
use crate::domain::chart::{BrushRange, ChartView, LegendEntry, Tooltip};
use crate::domain::experiment::Mode;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct TooltipQuery {
    pub date: String,
}

#[derive(Deserialize)]
pub struct ModeRequest {
    pub mode: Mode,
}

#[derive(Serialize)]
pub struct ModeResponse {
    pub mode: Mode,
    pub label: &'static str,
}

impl From<Mode> for ModeResponse {
    fn from(mode: Mode) -> Self {
        Self {
            mode,
            label: mode.label(),
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::NotLoaded => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::UnknownVariant(_) | DashboardError::UnknownDate(_) => {
                StatusCode::NOT_FOUND
            }
            DashboardError::InvalidDataset(_) | DashboardError::Load(_) => {
                tracing::error!("Dashboard error: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Readiness: 200 once the dataset has loaded, 503 before
pub async fn ready_check(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    if state.dashboard_service.is_loaded().await {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "loading")
    }
}

/// Legend entries and checkbox state, in dataset order
pub async fn list_variants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LegendEntry>>, DashboardError> {
    Ok(Json(state.dashboard_service.variants().await?))
}

pub async fn toggle_variant(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LegendEntry>>, DashboardError> {
    Ok(Json(state.dashboard_service.toggle_variant(&name).await?))
}

pub async fn get_mode(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ModeResponse>, DashboardError> {
    let mode = state.dashboard_service.mode().await?;
    Ok(Json(mode.into()))
}

pub async fn set_mode(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ModeRequest>,
) -> Result<Json<ModeResponse>, DashboardError> {
    let mode = state.dashboard_service.set_mode(request.mode).await?;
    Ok(Json(mode.into()))
}

pub async fn chart_view(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartView>, DashboardError> {
    Ok(Json(state.dashboard_service.chart_view().await?))
}

pub async fn tooltip(
    Query(query): Query<TooltipQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Tooltip>, DashboardError> {
    Ok(Json(state.dashboard_service.tooltip(&query.date).await?))
}

pub async fn apply_zoom(
    State(state): State<Arc<AppState>>,
    Json(range): Json<BrushRange>,
) -> Result<Json<Option<BrushRange>>, DashboardError> {
    let command = ChartCommand::Zoom {
        start_index: range.start_index,
        end_index: range.end_index,
    };
    Ok(Json(state.dashboard_service.apply(command).await?))
}

pub async fn reset_zoom(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Option<BrushRange>>, DashboardError> {
    Ok(Json(state.dashboard_service.apply(ChartCommand::ResetZoom).await?))
}
