mod auth;
mod config;
mod dashboard;
mod errors;
mod notify;
mod processing;
mod routes;
mod session;
mod state;
mod store;
mod wizard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::notify::TracingNotifier;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::open_store;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume2website API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the session store (memory, file or redis)
    let store = open_store(&config.store).await?;

    info!(
        "Processing timing: {:?} total, {:?} tick, {:?} navigate delay",
        config.processing.duration, config.processing.tick, config.processing.navigate_delay
    );

    let state = AppState::new(store, config.clone(), Arc::new(TracingNotifier));

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
