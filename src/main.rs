// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::chart_service::CasesChartService;
use crate::application::scatter_service::ScatterService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::jurisdiction_catalog::JurisdictionCatalog;
use crate::infrastructure::memory_repository::InMemoryCaseRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{cases_chart, deaths_chart, health_check};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Load reference data and samples (infrastructure layer)
    let catalog = Arc::new(JurisdictionCatalog::load(&config.data.jurisdictions_path)?);
    let repository = Arc::new(InMemoryCaseRepository::load(&config.data.records_path, catalog.as_ref())?);

    // Create services (application layer)
    let chart_service = CasesChartService::new(repository.clone(), catalog, config.charts.clone());
    let scatter_service = ScatterService::new(repository);

    // Create application state
    let state = Arc::new(AppState {
        chart_service,
        scatter_service,
    });

    // Build router (presentation layer)
    // Compression is applied in the response builders, not by a layer
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/charts/cases", get(cases_chart))
        .route("/charts/deaths/:axis", get(deaths_chart))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address {:?}", config.server.bind_address))?;
    tracing::info!("Starting case-charts service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
