//! GovMap API - Governance Mapping Service
//!
//! Records the boards, committees and forums of an organisation, scores them,
//! and serves the analyses built on those scores: reform opportunities,
//! cost-value placement, innovation posture, stakeholder networks.
//!
//! The governance map is held in memory. When `GOVMAP_DATA_FILE` is set it
//! is loaded from that file on startup and rewritten after every change.

mod analysis;
mod config;
mod error;
mod models;
mod registry;
mod routes;
mod state;
mod storage;
mod transfer;

use crate::config::Settings;
use crate::registry::{sample, GovernanceRecordStore, ImportBatch, ImportMode};
use crate::routes::create_router;
use crate::state::AppState;
use crate::storage::DataFile;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    init_tracing();

    info!("🚀 Starting GovMap - Governance Mapping Service...");

    // Load configuration
    let settings = Settings::load()?;
    info!("📋 Configuration loaded successfully");

    let data_file = settings.storage.data_file.as_ref().map(DataFile::new);
    let store = load_store(&settings, data_file.as_ref())?;
    info!(
        "✅ Governance map ready: {} bodies, {} processes",
        store.bodies().len(),
        store.processes().len()
    );

    if data_file.is_none() {
        warn!("⚠️  GOVMAP_DATA_FILE not set, changes will be lost on shutdown");
    }

    let state = Arc::new(AppState::new(store, data_file));

    // Build the router
    let app = create_router(state, &settings);

    // Create socket address
    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📚 API Endpoints:");
    info!("   ─── Records ───");
    info!("   GET|POST       /api/bodies                 - List (filter, sort) or add bodies");
    info!("   GET|PUT|DELETE /api/bodies/{{name}}          - Read, replace or remove a body");
    info!("   GET            /api/bodies/{{name}}/escalation - Escalation route upwards");
    info!("   GET|POST       /api/processes              - List or add processes");
    info!("   GET|PUT|DELETE /api/processes/{{name}}       - Read, replace or remove a process");
    info!("   GET|PUT        /api/diagnostic-notes       - Diagnostic notes");
    info!("   GET|PUT        /api/five-forces            - Five Forces profile");
    info!("");
    info!("   ─── Analysis ───");
    info!("   GET /api/analysis/summary            - Efficiency overview");
    info!("   GET /api/analysis/reform             - Reform opportunities");
    info!("   GET /api/analysis/quadrants          - Cost-value placement");
    info!("   GET /api/analysis/duplication-matrix - Duplication by level and posture");
    info!("   GET /api/analysis/network            - Shared-stakeholder network");
    info!("   GET /api/analysis/group-by?field=    - Frequency tables");
    info!("");
    info!("   ─── Import / Export ───");
    info!("   GET  /api/export/{{bodies.csv,processes.csv,bodies.json,package.json}}");
    info!("   GET  /api/export/{{report.md,notes.md}}");
    info!("   POST /api/import/json?mode=replace|append");
    info!("   POST /api/import/csv?kind=bodies|processes&mode=replace|append");
    info!("");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,govmap_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Build the starting store from the data file, falling back to the sample map
fn load_store(
    settings: &Settings,
    data_file: Option<&DataFile>,
) -> anyhow::Result<GovernanceRecordStore> {
    let mut store = GovernanceRecordStore::new();

    if let Some(file) = data_file {
        if let Some(batch) = file.load()? {
            store.import_bulk(batch, ImportMode::Replace)?;
        }
    }

    if store.is_empty() && settings.storage.seed_sample {
        info!("🌱 Seeding the sample governance map");
        store.import_bulk(
            ImportBatch {
                bodies: Some(sample::governance_bodies()),
                processes: Some(sample::processes()),
                ..Default::default()
            },
            ImportMode::Replace,
        )?;
    }

    Ok(store)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}
