//! Diagnostic notes and Five Forces route handlers

use crate::error::ApiResult;
use crate::models::{DiagnosticNotes, FiveForcesProfile, SuccessResponse};
use crate::routes::ApiJson;
use crate::state::SharedState;
use axum::{extract::State, Json};
use tracing::info;
use validator::Validate;

pub async fn get_diagnostic_notes(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<DiagnosticNotes>>> {
    let notes = state.read().await.diagnostic_notes().clone();
    Ok(Json(SuccessResponse::with_data("Diagnostic notes fetched successfully.", notes)))
}

/// Overwrite all four notes sections
pub async fn put_diagnostic_notes(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<DiagnosticNotes>,
) -> ApiResult<Json<SuccessResponse<DiagnosticNotes>>> {
    let notes = state
        .mutate(|store| {
            store.set_diagnostic_notes(payload);
            Ok(store.diagnostic_notes().clone())
        })
        .await?;

    info!("Diagnostic notes saved");
    Ok(Json(SuccessResponse::with_data("Diagnostic notes saved successfully.", notes)))
}

pub async fn get_five_forces(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<FiveForcesProfile>>> {
    let profile = state.read().await.five_forces().clone();
    Ok(Json(SuccessResponse::with_data("Five Forces profile fetched successfully.", profile)))
}

pub async fn put_five_forces(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<FiveForcesProfile>,
) -> ApiResult<Json<SuccessResponse<FiveForcesProfile>>> {
    payload.validate()?;

    let profile = state
        .mutate(|store| {
            store.set_five_forces(payload)?;
            Ok(store.five_forces().clone())
        })
        .await?;

    info!("Five Forces profile saved");
    Ok(Json(SuccessResponse::with_data("Five Forces profile saved successfully.", profile)))
}
