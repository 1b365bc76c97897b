//! Route definitions and router setup
//!
//! Configures all API routes and middleware.

mod analysis;
mod bodies;
mod notes;
mod processes;
mod transfer;

use crate::config::Settings;
use crate::error::AppError;
use crate::state::SharedState;
use axum::{
    extract::FromRequest,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::Level;

/// JSON body extractor whose rejections use the `AppError` envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Create the application router with all routes and middleware
pub fn create_router(state: SharedState, settings: &Settings) -> Router {
    // Build CORS layer
    let cors = build_cors_layer(settings);

    // Build tracing/logging layer
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Build middleware stack
    let middleware = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(trace_layer)
        .layer(CompressionLayer::new())
        .layer(cors)
        .propagate_x_request_id();

    // Build the router
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Governance bodies
        .route("/api/bodies", get(bodies::list_bodies).post(bodies::create_body))
        .route(
            "/api/bodies/{name}",
            get(bodies::get_body)
                .put(bodies::update_body)
                .delete(bodies::delete_body),
        )
        .route("/api/bodies/{name}/escalation", get(bodies::escalation_route))

        // Processes
        .route(
            "/api/processes",
            get(processes::list_processes).post(processes::create_process),
        )
        .route(
            "/api/processes/{name}",
            get(processes::get_process)
                .put(processes::update_process)
                .delete(processes::delete_process),
        )

        // Diagnostic notes and Five Forces
        .route(
            "/api/diagnostic-notes",
            get(notes::get_diagnostic_notes).put(notes::put_diagnostic_notes),
        )
        .route(
            "/api/five-forces",
            get(notes::get_five_forces).put(notes::put_five_forces),
        )

        // Analysis
        .route("/api/analysis/summary", get(analysis::summary))
        .route("/api/analysis/reform", get(analysis::reform))
        .route("/api/analysis/quadrants", get(analysis::quadrants))
        .route("/api/analysis/duplication-matrix", get(analysis::duplication))
        .route("/api/analysis/posture", get(analysis::posture))
        .route("/api/analysis/rogers", get(analysis::rogers))
        .route("/api/analysis/tacit", get(analysis::tacit))
        .route("/api/analysis/outcomes", get(analysis::outcomes))
        .route("/api/analysis/rag", get(analysis::rag))
        .route("/api/analysis/stakeholders", get(analysis::stakeholders))
        .route("/api/analysis/network", get(analysis::network))
        .route("/api/analysis/processes", get(analysis::processes))
        .route("/api/analysis/group-by", get(analysis::group))
        .route("/api/analysis/tags", get(analysis::tags))

        // Exports
        .route("/api/export/bodies.csv", get(transfer::bodies_csv))
        .route("/api/export/processes.csv", get(transfer::processes_csv))
        .route("/api/export/bodies.json", get(transfer::bodies_json))
        .route("/api/export/package.json", get(transfer::package_json))
        .route("/api/export/report.md", get(transfer::report_markdown))
        .route("/api/export/notes.md", get(transfer::notes_markdown_export))

        // Imports
        .route("/api/import/json", post(transfer::import_json))
        .route("/api/import/csv", post(transfer::import_csv))

        // Apply middleware and state
        .layer(middleware)
        .with_state(state)
}

/// Build CORS layer from settings
fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let origins: Vec<_> = settings
        .cors
        .allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

/// Health check endpoint
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "success": true,
        "message": "Server is running fine.",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
