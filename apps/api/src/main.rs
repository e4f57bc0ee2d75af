mod config;
mod errors;
mod generation;
mod history;
mod llm_client;
mod models;
mod routes;
mod settings;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::progress::ProgressTracker;
use crate::generation::runner::BatchRunner;
use crate::history::store::SlotStore;
use crate::history::History;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::settings::SettingsService;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting contentgen v{}", env!("CARGO_PKG_VERSION"));

    // Open the data directory and read both slots once
    let store = SlotStore::open(&config.data_dir)?;
    info!("Data directory: {}", store.dir().display());

    let settings = SettingsService::load(store.clone(), config.gemini_api_key.as_deref()).await?;
    let history = History::load(store, config.history_limit)?;
    info!(
        "Loaded {} history entries (limit: {:?})",
        history.len().await,
        config.history_limit
    );

    // Initialize LLM client
    let llm = GeminiClient::new(
        &config.gemini_api_base,
        &config.gemini_model,
        Duration::from_secs(config.http_timeout_secs),
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    let progress = ProgressTracker::new(Duration::from_millis(config.progress_tick_ms));
    let runner = BatchRunner::new(Arc::new(llm), progress, history.clone());

    // Build app state
    let state = AppState {
        config: config.clone(),
        settings,
        history,
        runner,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("127.0.0.1:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
