//! Governance body route handlers

use crate::analysis::network::{EscalationStep, NetworkAnalyzer};
use crate::error::{ApiResult, AppError};
use crate::models::{GovernanceBody, MessageResponse, SuccessResponse};
use crate::registry::{sort_view, BodyFilter, SortKey};
use crate::routes::ApiJson;
use crate::state::SharedState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use std::str::FromStr;
use tracing::{debug, info};
use validator::Validate;

/// List filters; set-valued parameters are comma separated
#[derive(Debug, Default, Deserialize)]
pub struct BodyListQuery {
    pub level: Option<String>,
    pub posture: Option<String>,
    pub min_duplication_risk: Option<u8>,
    pub rag: Option<String>,
    pub recommendation: Option<String>,
    pub sort: Option<SortKey>,
    #[serde(default)]
    pub descending: bool,
}

fn parse_set<T>(param: &str, raw: Option<&str>) -> Result<HashSet<T>, AppError>
where
    T: FromStr<Err = String> + Eq + Hash,
{
    raw.into_iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|e| AppError::BadRequest(format!("Invalid '{}' filter: {}", param, e)))
        })
        .collect()
}

impl BodyListQuery {
    pub fn to_filter(&self) -> Result<BodyFilter, AppError> {
        Ok(BodyFilter {
            levels: parse_set("level", self.level.as_deref())?,
            postures: parse_set("posture", self.posture.as_deref())?,
            min_duplication_risk: self.min_duplication_risk,
            rag_statuses: parse_set("rag", self.rag.as_deref())?,
            recommendations: parse_set("recommendation", self.recommendation.as_deref())?,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyListResponse {
    pub bodies: Vec<GovernanceBody>,
    pub matched: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationResponse {
    pub body: String,
    pub route: Vec<EscalationStep>,
}

/// List bodies, filtered and optionally sorted
pub async fn list_bodies(
    State(state): State<SharedState>,
    Query(params): Query<BodyListQuery>,
) -> ApiResult<Json<SuccessResponse<BodyListResponse>>> {
    let filter = params.to_filter()?;
    let store = state.read().await;

    let mut view: Vec<&GovernanceBody> = store.list_bodies(&filter).collect();
    if let Some(key) = params.sort {
        sort_view(&mut view, key, params.descending);
    }

    debug!("Listed {} of {} governance bodies", view.len(), store.bodies().len());

    Ok(Json(SuccessResponse::with_data(
        "Governance bodies fetched successfully.",
        BodyListResponse {
            matched: view.len(),
            total: store.bodies().len(),
            bodies: view.into_iter().cloned().collect(),
        },
    )))
}

pub async fn get_body(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> ApiResult<Json<SuccessResponse<GovernanceBody>>> {
    let store = state.read().await;
    let body = store.get_body(&name)?.clone();
    Ok(Json(SuccessResponse::with_data("Governance body fetched successfully.", body)))
}

pub async fn create_body(
    State(state): State<SharedState>,
    ApiJson(payload): ApiJson<GovernanceBody>,
) -> ApiResult<(StatusCode, Json<SuccessResponse<GovernanceBody>>)> {
    payload.validate()?;
    debug!("Creating governance body: {}", payload.name);

    let body = state
        .mutate(|store| store.add_body(payload).map(Clone::clone))
        .await?;

    info!("Governance body '{}' created", body.name);
    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::with_data(
            format!("Governance body '{}' created successfully.", body.name),
            body,
        )),
    ))
}

/// Replace a body; the payload may carry a new name
pub async fn update_body(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    ApiJson(payload): ApiJson<GovernanceBody>,
) -> ApiResult<Json<SuccessResponse<GovernanceBody>>> {
    payload.validate()?;
    debug!("Updating governance body: {}", name);

    let body = state
        .mutate(|store| store.update_body(&name, payload).map(Clone::clone))
        .await?;

    Ok(Json(SuccessResponse::with_data(
        format!("Governance body '{}' updated successfully.", body.name),
        body,
    )))
}

pub async fn delete_body(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    debug!("Deleting governance body: {}", name);
    let removed = state.mutate(|store| store.delete_body(&name)).await?;

    Ok(Json(MessageResponse::new(format!(
        "Governance body '{}' deleted successfully.",
        removed.name
    ))))
}

/// Bodies reachable upwards through escalation links
pub async fn escalation_route(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> ApiResult<Json<SuccessResponse<EscalationResponse>>> {
    let store = state.read().await;
    let body = store.get_body(&name)?;
    let route = NetworkAnalyzer::escalation_route(store.bodies(), &body.name);

    Ok(Json(SuccessResponse::with_data(
        "Escalation route fetched successfully.",
        EscalationResponse {
            body: body.name.clone(),
            route,
        },
    )))
}
