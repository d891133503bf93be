// Presentation layer - HTTP routes over the dashboard use cases
pub mod app_state;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    apply_zoom, chart_view, get_mode, health_check, list_variants, ready_check, reset_zoom,
    set_mode, tooltip, toggle_variant,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/readyz", get(ready_check))
        .route("/api/variants", get(list_variants))
        .route("/api/variants/:name/toggle", post(toggle_variant))
        .route("/api/mode", get(get_mode).put(set_mode))
        .route("/api/chart", get(chart_view))
        .route("/api/tooltip", get(tooltip))
        .route("/api/zoom", put(apply_zoom))
        .route("/api/zoom/reset", post(reset_zoom))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
