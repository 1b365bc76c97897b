//! Process route handlers

use crate::error::ApiResult;
use crate::models::{MessageResponse, ProcessRecord, SuccessResponse};
use crate::routes::ApiJson;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};
use validator::Validate;

pub async fn list_processes(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<Vec<ProcessRecord>>>> {
    let store = state.read().await;
    debug!("Listing {} processes", store.processes().len());
    Ok(Json(SuccessResponse::with_data(
        "Processes fetched successfully.",
        store.processes().to_vec(),
    )))
}

pub async fn get_process(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> ApiResult<Json<SuccessResponse<ProcessRecord>>> {
    let store = state.read().await;
    let process = store.get_process(&name)?.clone();
    Ok(Json(SuccessResponse::with_data("Process fetched successfully.", process)))
}

pub async fn create_process(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<ProcessRecord>,
) -> ApiResult<(StatusCode, Json<SuccessResponse<ProcessRecord>>)> {
    payload.validate()?;

    let process = state
        .mutate(|store| store.add_process(payload).map(Clone::clone))
        .await?;

    info!("Process '{}' created", process.name);
    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::with_data(
            format!("Process '{}' created successfully.", process.name),
            process,
        )),
    ))
}

pub async fn update_process(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    ApiJson(payload): ApiJson<ProcessRecord>,
) -> ApiResult<Json<SuccessResponse<ProcessRecord>>> {
    payload.validate()?;

    let process = state
        .mutate(|store| store.update_process(&name, payload).map(Clone::clone))
        .await?;

    Ok(Json(SuccessResponse::with_data(
        format!("Process '{}' updated successfully.", process.name),
        process,
    )))
}

pub async fn delete_process(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let removed = state.mutate(|store| store.delete_process(&name)).await?;
    Ok(Json(MessageResponse::new(format!(
        "Process '{}' deleted successfully.",
        removed.name
    ))))
}
