use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jackbridge_core::{load_config, validate_config, InMemoryRegistry, JackettPlugin};

use jackbridge_server::api::create_router;
use jackbridge_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("JACKBRIDGE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Jackett host: {}", config.jackett.host);
    info!("Bridge enabled: {}", config.jackett.enabled);

    // Compute config hash for startup diagnostics
    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(version = VERSION, config_hash = &config_hash[..16], "Starting jackbridge");

    // Registry and plugin wiring
    let registry = Arc::new(InMemoryRegistry::new());
    let plugin = Arc::new(
        JackettPlugin::new(config.jackett.clone(), registry.clone())
            .context("Failed to create Jackett plugin")?,
    );

    // Periodic sync service: first pass at startup, then every interval.
    // Runs whenever connection details are present so a saved configuration
    // takes effect ahead of the enabled switch.
    let configured = !config.jackett.host.is_empty() && !config.jackett.api_key.is_empty();
    if configured {
        let sync_plugin = plugin.clone();
        let interval_hours = config.jackett.sync_interval_hours.max(1);
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(interval_hours * 3600));
            loop {
                interval.tick().await;
                match sync_plugin.sync().await {
                    Ok(report) => {
                        info!(registered = report.registered, "Periodic sync finished")
                    }
                    Err(e) => warn!(error = %e, "Periodic sync failed"),
                }
            }
        });
    } else {
        info!("Jackett connection not configured; sync service not started");
    }

    // Build and serve the API
    let state = Arc::new(AppState::new(config.clone(), plugin.clone(), registry));
    let router = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Clean teardown: remove everything this instance registered
    plugin.shutdown().await;
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
