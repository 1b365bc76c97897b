//! Import and export route handlers

use crate::error::{not_found_error, ApiResult};
use crate::models::SuccessResponse;
use crate::registry::{ImportBatch, ImportMode, ImportOutcome};
use crate::state::SharedState;
use crate::transfer::{
    export_bodies, export_package, governance_report, import_package, notes_markdown,
    read_bodies, read_processes, write_bodies, write_processes,
};
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

const CSV: &str = "text/csv; charset=utf-8";
const JSON: &str = "application/json";
const MARKDOWN: &str = "text/markdown; charset=utf-8";

#[derive(Debug, Default, Deserialize)]
pub struct ImportQuery {
    #[serde(default)]
    pub mode: ImportMode,
}

/// Which collection a CSV upload holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvKind {
    #[default]
    Bodies,
    Processes,
}

#[derive(Debug, Default, Deserialize)]
pub struct CsvImportQuery {
    #[serde(default)]
    pub kind: CsvKind,
    #[serde(default)]
    pub mode: ImportMode,
}

fn download(content_type: &'static str, filename: &str, contents: String) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}_{}\"",
        Utc::now().format("%Y%m%d"),
        filename
    );
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        contents,
    )
        .into_response()
}

// ==================== Exports ====================

pub async fn bodies_csv(State(state): State<SharedState>) -> ApiResult<Response> {
    let store = state.read().await;
    let text = write_bodies(store.bodies())?;
    debug!("Exported {} bodies as CSV", store.bodies().len());
    Ok(download(CSV, "governance_bodies.csv", text))
}

pub async fn processes_csv(State(state): State<SharedState>) -> ApiResult<Response> {
    let store = state.read().await;
    let text = write_processes(store.processes())?;
    Ok(download(CSV, "processes.csv", text))
}

pub async fn bodies_json(State(state): State<SharedState>) -> ApiResult<Response> {
    let store = state.read().await;
    let text = export_bodies(store.bodies())?;
    Ok(download(JSON, "governance_bodies.json", text))
}

/// Full governance map package
pub async fn package_json(State(state): State<SharedState>) -> ApiResult<Response> {
    let store = state.read().await;
    let text = export_package(&store, Utc::now())?;
    info!(
        "📦 Exported package: {} bodies, {} processes",
        store.bodies().len(),
        store.processes().len()
    );
    Ok(download(JSON, "governance_map.json", text))
}

pub async fn report_markdown(State(state): State<SharedState>) -> ApiResult<Response> {
    let store = state.read().await;
    let text = governance_report(&store, Utc::now());
    Ok(download(MARKDOWN, "governance_report.md", text))
}

pub async fn notes_markdown_export(State(state): State<SharedState>) -> ApiResult<Response> {
    let store = state.read().await;
    let text = notes_markdown(&store, Utc::now())
        .ok_or_else(|| not_found_error("No diagnostic notes have been recorded"))?;
    Ok(download(MARKDOWN, "diagnostic_notes.md", text))
}

// ==================== Imports ====================

/// Import a JSON package or a bare array of bodies
pub async fn import_json(
    State(state): State<SharedState>,
    Query(params): Query<ImportQuery>,
    payload: String,
) -> ApiResult<Json<SuccessResponse<ImportOutcome>>> {
    debug!("Importing JSON package ({} bytes, {:?})", payload.len(), params.mode);
    let batch = import_package(&payload)?;

    let outcome = state
        .mutate(|store| store.import_bulk(batch, params.mode))
        .await?;

    Ok(Json(SuccessResponse::with_data(
        format!("Imported {} governance bodies.", outcome.total_bodies),
        outcome,
    )))
}

pub async fn import_csv(
    State(state): State<SharedState>,
    Query(params): Query<CsvImportQuery>,
    payload: String,
) -> ApiResult<Json<SuccessResponse<ImportOutcome>>> {
    debug!("Importing {:?} CSV ({} bytes, {:?})", params.kind, payload.len(), params.mode);
    let batch = match params.kind {
        CsvKind::Bodies => ImportBatch {
            bodies: Some(read_bodies(&payload)?),
            ..Default::default()
        },
        CsvKind::Processes => ImportBatch {
            processes: Some(read_processes(&payload)?),
            ..Default::default()
        },
    };

    let outcome = state
        .mutate(|store| store.import_bulk(batch, params.mode))
        .await?;

    let message = match params.kind {
        CsvKind::Bodies => format!("Imported {} governance bodies.", outcome.total_bodies),
        CsvKind::Processes => format!("Imported {} processes.", outcome.total_processes),
    };
    Ok(Json(SuccessResponse::with_data(message, outcome)))
}
