// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::hotspot_service::HotspotService;
use crate::application::rotation_service::RotationService;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_repository::HttpMarketRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpMarketRepository::new(
        &config.backend.base_url,
        Duration::from_secs(config.backend.timeout_secs),
    )?);

    // Create services (application layer)
    let limits = config.pagination.limits();
    let dashboard_service = DashboardService::new(repository.clone(), config.mock.clone(), limits);
    let hotspot_service = HotspotService::new(repository.clone(), config.mock.clone(), limits);
    let rotation_service = RotationService::new(config.rotation.clone());

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        hotspot_service,
        rotation_service,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid server.bind address: {}", config.server.bind))?;
    tracing::info!(
        "Starting market-dashboard on {} (backend {}, mock fallback {})",
        addr,
        config.backend.base_url,
        if config.mock.enabled { "on" } else { "off" }
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
