// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::dataset_repository;
use crate::presentation::app_state::AppState;
use crate::presentation::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create repository (infrastructure layer)
    let repository = dataset_repository(&config.dataset);

    // Create services (application layer); the dataset loads in the background
    let dashboard_service = DashboardService::new(repository);
    dashboard_service.spawn_load();

    let state = Arc::new(AppState { dashboard_service });

    // Build router (presentation layer)
    let router = router(state);

    // Start server
    let addr = config.server.bind_address();
    tracing::info!("Starting abtest-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(&addr).await?, router).await?;

    Ok(())
}
