//! Trackie API Server
//!
//! Run with: cargo run --bin trackie
//!
//! # Configuration
//!
//! Read from `TRACKIE_CONFIG`, `~/.config/trackie/config.toml` or
//! `./trackie.toml`, then overridden by environment variables:
//! - `TRACKIE_BACKEND_URL`: Supabase project URL (empty: in-memory demo data)
//! - `TRACKIE_ANON_KEY`: Supabase anon key
//! - `TRACKIE_ACCESS_TOKEN`: Session token of the signed-in user
//! - `TRACKIE_API_HOST` / `TRACKIE_API_PORT`: Bind address
//! - `TRACKIE_LOG_LEVEL` / `TRACKIE_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Overrides the log filter entirely

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trackie::api::{serve, AppState};
use trackie::backend::{ActivityStore, InMemoryBackend, SupabaseBackend};
use trackie::config::{Config, LoggingConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    init_logging(&config.logging);

    tracing::info!("Starting Trackie API server v{}", env!("CARGO_PKG_VERSION"));

    let state = if config.backend.is_configured() {
        let backend = Arc::new(SupabaseBackend::new(config.backend.supabase())?);
        tracing::info!(
            url = %backend.config().url,
            table = %backend.config().table,
            "Using Supabase backend"
        );

        if let Some(token) = &config.backend.access_token {
            backend.set_session(token.clone()).await;
        } else {
            tracing::info!("No access token configured, profile endpoints will report no user");
        }

        match backend.health_check().await {
            Ok(()) => tracing::info!("Backend connection verified"),
            Err(e) => tracing::warn!("Backend not reachable: {} (leaderboard will be unavailable)", e),
        }

        AppState::new(backend, config.api.clone())
    } else {
        tracing::warn!("No backend URL configured, serving in-memory demo data");
        let backend = Arc::new(InMemoryBackend::demo());
        backend.sign_in("demo-1").await;
        AppState::new(backend, config.api.clone())
    };

    serve(state, &config.api).await?;

    tracing::info!("Trackie API server stopped");
    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter_directive().into());

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
