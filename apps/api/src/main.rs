use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use career_planner::config::Config;
use career_planner::planner::CareerEngine;
use career_planner::reference::ReferenceData;
use career_planner::routes::build_router;
use career_planner::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Planner v{}", env!("CARGO_PKG_VERSION"));

    // Reference tables are validated here; a broken table aborts startup.
    let data = match &config.data_dir {
        Some(dir) => ReferenceData::load_dir(dir)
            .with_context(|| format!("Failed to load reference data from {}", dir.display()))?,
        None => ReferenceData::builtin().context("Embedded reference data is invalid")?,
    };

    let engine = CareerEngine::new(Arc::new(data), config.planner_settings());
    let state = AppState::new(engine, config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
