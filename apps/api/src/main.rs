mod catalog;
mod config;
mod errors;
mod guidance;
mod llm_client;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::guidance::workflows::GuidanceSettings;
use crate::llm_client::{GuidanceClient, HuggingFaceClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing model credential)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Advisor API v{}", env!("CARGO_PKG_VERSION"));

    // Load the college catalog (read-only for the life of the process)
    let catalog = Catalog::load(&config.catalog_path)
        .with_context(|| format!("Failed to load catalog from {}", config.catalog_path))?;

    // Initialize the guidance client once; handlers receive it through AppState
    let guidance: Arc<dyn GuidanceClient> = Arc::new(
        HuggingFaceClient::new(
            &config.hf_api_base,
            config.hf_model.clone(),
            config.hf_api_token.clone(),
            config.guidance_timeout,
        )
        .context("Failed to build guidance HTTP client")?,
    );
    info!(
        "Guidance client initialized (model: {}, timeout: {:?}, concurrent: {})",
        guidance.model(),
        config.guidance_timeout,
        config.guidance_concurrent
    );

    // Build app state
    let state = AppState {
        catalog: Arc::new(catalog),
        guidance,
        settings: GuidanceSettings {
            timeout: config.guidance_timeout,
            concurrent: config.guidance_concurrent,
        },
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
