//! # irhubd: irhub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the virtual bridge (transport + discovery) and the state store
//! - Set up every configured remote and serve the HTTP API
//! - On SIGINT/SIGTERM stop serving, cancel pending actions and save restore
//!   snapshots
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use irhub_adapter_http_axum::state::AppState;
use irhub_adapter_storage_sqlite_sqlx::{Config as StorageConfig, SqliteStateStore};
use irhub_adapter_virtual::{RecordingTransport, StaticDiscovery};
use irhub_app::event_bus::InProcessEventBus;
use irhub_app::sensor_hub::SensorHub;
use irhub_app::services::RemoteService;
use irhub_domain::catalog::CommandCatalog;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = StorageConfig {
        database_url: config.database_url().to_string(),
        max_connections: config.database.max_connections,
        busy_timeout: Duration::from_millis(config.database.busy_timeout_ms),
    }
    .build()
    .await?;
    let store = SqliteStateStore::new(db.pool().clone());

    // Virtual bridge
    let mut transport = RecordingTransport::new();
    if config.transport.latency_ms > 0 {
        transport = transport.with_latency(Duration::from_millis(config.transport.latency_ms));
    }
    let (devices, options) = config.remotes()?;
    let discovery = StaticDiscovery::new(devices);

    // Services
    let service = Arc::new(RemoteService::new(
        Arc::new(CommandCatalog::builtin()),
        transport,
        store,
        Arc::new(SensorHub::new(config.events.capacity)),
        Arc::new(InProcessEventBus::new(config.events.capacity)),
        options,
    ));
    let count = service.setup(&discovery).await?;
    tracing::info!(remotes = count, "remotes set up");

    // HTTP
    let app = irhub_adapter_http_axum::router::build(AppState::from_arc(Arc::clone(&service)));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "irhubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    service.shutdown().await;
    tracing::info!("irhubd stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown requested");
}
