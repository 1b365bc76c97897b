//! Analysis route handlers
//!
//! Read-only views computed from the current store snapshot.

use crate::analysis::{
    group_by, group_by2,
    insights::{
        cost_value_quadrants, duplication_matrix, efficiency_overview, outcome_report,
        posture_balance, process_summary, rag_breakdown, reform_opportunities, rogers_readiness,
        stakeholder_grid, tacit_report, DuplicationCell, EfficiencyOverview, OutcomeReport,
        PostureBalance, ProcessSummary, QuadrantPlacement, RagBreakdown, ReformOpportunities,
        RogersReadiness, StakeholderPosition, TacitReport,
    },
    aggregate::tag_counts,
    CategoryField, GroupCount, GroupCount2, NetworkAnalyzer, NodeCentrality, StakeholderGraph,
    TagField,
};
use crate::error::ApiResult;
use crate::models::SuccessResponse;
use crate::state::SharedState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct GroupByQuery {
    pub field: CategoryField,
    pub by: Option<CategoryField>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GroupTable {
    Single(Vec<GroupCount>),
    Crossed(Vec<GroupCount2>),
}

#[derive(Debug, Deserialize)]
pub struct TagQuery {
    pub field: TagField,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkResponse {
    pub graph: StakeholderGraph,
    pub centrality: Vec<NodeCentrality>,
}

pub async fn summary(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<EfficiencyOverview>>> {
    let store = state.read().await;
    let overview = efficiency_overview(store.bodies(), store.processes());
    Ok(Json(SuccessResponse::with_data("Efficiency summary computed.", overview)))
}

pub async fn reform(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<ReformOpportunities>>> {
    let store = state.read().await;
    Ok(Json(SuccessResponse::with_data(
        "Reform opportunities computed.",
        reform_opportunities(store.bodies()),
    )))
}

pub async fn quadrants(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<Vec<QuadrantPlacement>>>> {
    let store = state.read().await;
    Ok(Json(SuccessResponse::with_data(
        "Cost-value placement computed.",
        cost_value_quadrants(store.bodies()),
    )))
}

pub async fn duplication(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<Vec<DuplicationCell>>>> {
    let store = state.read().await;
    Ok(Json(SuccessResponse::with_data(
        "Duplication matrix computed.",
        duplication_matrix(store.bodies()),
    )))
}

pub async fn posture(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<PostureBalance>>> {
    let store = state.read().await;
    Ok(Json(SuccessResponse::with_data(
        "Innovation posture balance computed.",
        posture_balance(store.bodies()),
    )))
}

pub async fn rogers(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<RogersReadiness>>> {
    let store = state.read().await;
    Ok(Json(SuccessResponse::with_data(
        "Adoption readiness computed.",
        rogers_readiness(store.bodies()),
    )))
}

pub async fn tacit(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<TacitReport>>> {
    let store = state.read().await;
    Ok(Json(SuccessResponse::with_data(
        "Tacit knowledge report computed.",
        tacit_report(store.bodies(), store.processes()),
    )))
}

pub async fn outcomes(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<OutcomeReport>>> {
    let store = state.read().await;
    Ok(Json(SuccessResponse::with_data(
        "Outcome focus computed.",
        outcome_report(store.bodies()),
    )))
}

pub async fn rag(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<RagBreakdown>>> {
    let store = state.read().await;
    Ok(Json(SuccessResponse::with_data(
        "RAG breakdown computed.",
        rag_breakdown(store.bodies()),
    )))
}

pub async fn stakeholders(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<Vec<StakeholderPosition>>>> {
    let store = state.read().await;
    Ok(Json(SuccessResponse::with_data(
        "Stakeholder grid computed.",
        stakeholder_grid(store.bodies()),
    )))
}

/// Shared-stakeholder graph with degree centrality per node
pub async fn network(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<NetworkResponse>>> {
    let store = state.read().await;
    let graph = NetworkAnalyzer::cross_reference(store.bodies());
    let centrality = NetworkAnalyzer::degree_centrality(&graph);
    debug!(
        "Stakeholder network: {} nodes, {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );

    Ok(Json(SuccessResponse::with_data(
        "Stakeholder network computed.",
        NetworkResponse { graph, centrality },
    )))
}

pub async fn processes(
    State(state): State<SharedState>,
) -> ApiResult<Json<SuccessResponse<ProcessSummary>>> {
    let store = state.read().await;
    Ok(Json(SuccessResponse::with_data(
        "Process summary computed.",
        process_summary(store.processes()),
    )))
}

/// Frequency table over one column, or crossed with a second
pub async fn group(
    State(state): State<SharedState>,
    Query(params): Query<GroupByQuery>,
) -> ApiResult<Json<SuccessResponse<GroupTable>>> {
    let store = state.read().await;
    let table = match params.by {
        Some(by) => GroupTable::Crossed(group_by2(store.bodies(), params.field, by)),
        None => GroupTable::Single(group_by(store.bodies(), params.field)),
    };
    Ok(Json(SuccessResponse::with_data("Grouping computed.", table)))
}

pub async fn tags(
    State(state): State<SharedState>,
    Query(params): Query<TagQuery>,
) -> ApiResult<Json<SuccessResponse<Vec<GroupCount>>>> {
    let store = state.read().await;
    Ok(Json(SuccessResponse::with_data(
        "Tag frequencies computed.",
        tag_counts(store.bodies(), params.field),
    )))
}
