//! Aggregate primitives over a snapshot of governance bodies
//!
//! Everything here is pure and total: malformed or missing values are
//! skipped, never raised.

use crate::models::GovernanceBody;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Integer score columns that can be averaged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    #[serde(alias = "Efficiency_Score")]
    EfficiencyScore,
    #[serde(alias = "Value_Added")]
    ValueAdded,
    #[serde(alias = "Duplication_Risk")]
    DuplicationRisk,
    #[serde(alias = "FW_Fairer_Communities")]
    FwFairerCommunities,
    #[serde(alias = "FW_Fairer_Housing")]
    FwFairerHousing,
    #[serde(alias = "FW_Fairer_Economy")]
    FwFairerEconomy,
    #[serde(alias = "FW_Fairer_Environment")]
    FwFairerEnvironment,
    #[serde(alias = "FW_Fairer_Council")]
    FwFairerCouncil,
}

impl NumericField {
    pub fn value(&self, body: &GovernanceBody) -> Option<u8> {
        match self {
            NumericField::EfficiencyScore => Some(body.efficiency_score),
            NumericField::ValueAdded => Some(body.value_added),
            NumericField::DuplicationRisk => Some(body.duplication_risk),
            NumericField::FwFairerCommunities => body.fw_fairer_communities,
            NumericField::FwFairerHousing => body.fw_fairer_housing,
            NumericField::FwFairerEconomy => body.fw_fairer_economy,
            NumericField::FwFairerEnvironment => body.fw_fairer_environment,
            NumericField::FwFairerCouncil => body.fw_fairer_council,
        }
    }
}

/// Single-valued columns usable as group-by keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    #[serde(alias = "Type")]
    Type,
    #[serde(alias = "Level")]
    Level,
    #[serde(alias = "Process_Type")]
    ProcessType,
    #[serde(alias = "Innovation_Posture")]
    InnovationPosture,
    #[serde(alias = "Rogers_Category")]
    RogersCategory,
    #[serde(alias = "Cost_Impact")]
    CostImpact,
    #[serde(alias = "Stakeholder_Power")]
    StakeholderPower,
    #[serde(alias = "Stakeholder_Interest")]
    StakeholderInterest,
    #[serde(alias = "Decision_Speed")]
    DecisionSpeed,
    #[serde(alias = "RAG_Status")]
    RagStatus,
    #[serde(alias = "RAG_Recommendation")]
    RagRecommendation,
    #[serde(alias = "Meeting_Cadence")]
    MeetingCadence,
    #[serde(alias = "Efficiency_Score")]
    EfficiencyScore,
    #[serde(alias = "Value_Added")]
    ValueAdded,
    #[serde(alias = "Duplication_Risk")]
    DuplicationRisk,
}

impl CategoryField {
    /// The grouping key for `body`, or `None` when the column is unset
    pub fn value(&self, body: &GovernanceBody) -> Option<String> {
        let key = match self {
            CategoryField::Type => body.body_type.trim().to_string(),
            CategoryField::Level => body.level.to_string(),
            CategoryField::ProcessType => body.process_type.to_string(),
            CategoryField::InnovationPosture => body.innovation_posture.to_string(),
            CategoryField::RogersCategory => body.rogers_category.to_string(),
            CategoryField::CostImpact => body.cost_impact.to_string(),
            CategoryField::StakeholderPower => body.stakeholder_power?.to_string(),
            CategoryField::StakeholderInterest => body.stakeholder_interest?.to_string(),
            CategoryField::DecisionSpeed => body.decision_speed?.to_string(),
            CategoryField::RagStatus => body.rag_status?.to_string(),
            CategoryField::RagRecommendation => body.rag_recommendation?.to_string(),
            CategoryField::MeetingCadence => body.meeting_cadence.trim().to_string(),
            CategoryField::EfficiencyScore => body.efficiency_score.to_string(),
            CategoryField::ValueAdded => body.value_added.to_string(),
            CategoryField::DuplicationRisk => body.duplication_risk.to_string(),
        };
        (!key.is_empty()).then_some(key)
    }
}

/// Multi-value tag columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagField {
    #[serde(alias = "Outcome_Focus")]
    OutcomeFocus,
    #[serde(alias = "Lifecycle_Stage")]
    LifecycleStage,
    #[serde(alias = "Fairer_Westminster_Alignment")]
    FairerWestminsterAlignment,
    #[serde(alias = "Primary_Stakeholders")]
    PrimaryStakeholders,
    #[serde(alias = "Networks")]
    Networks,
}

impl TagField {
    pub fn tags<'a>(&self, body: &'a GovernanceBody) -> impl Iterator<Item = &'a str> {
        match self {
            TagField::OutcomeFocus => body.outcome_focus.iter(),
            TagField::LifecycleStage => body.lifecycle_stage.iter(),
            TagField::FairerWestminsterAlignment => body.fairer_westminster_alignment.iter(),
            TagField::PrimaryStakeholders => body.primary_stakeholders.iter(),
            TagField::Networks => body.networks.iter(),
        }
    }
}

/// One row of a frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

/// One cell of a two-dimensional frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCount2 {
    pub key: String,
    pub sub_key: String,
    pub count: usize,
}

/// One (record, tag) pair from a multi-value column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRow {
    pub body: String,
    pub tag: String,
}

/// Arithmetic mean of a score column; `None` when nothing is scored
pub fn mean(bodies: &[GovernanceBody], field: NumericField) -> Option<f64> {
    let (sum, count) = bodies
        .iter()
        .filter_map(|b| field.value(b))
        .fold((0u64, 0usize), |(sum, count), v| (sum + u64::from(v), count + 1));

    if count == 0 {
        return None;
    }
    Some(sum as f64 / count as f64)
}

/// Render a mean for display, substituting "N/A" for an empty input
pub fn format_mean(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

pub fn count_where<F>(bodies: &[GovernanceBody], predicate: F) -> usize
where
    F: Fn(&GovernanceBody) -> bool,
{
    bodies.iter().filter(|b| predicate(b)).count()
}

/// Frequency table over one column, most frequent first, ties by key
pub fn group_by(bodies: &[GovernanceBody], field: CategoryField) -> Vec<GroupCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for key in bodies.iter().filter_map(|b| field.value(b)) {
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut table: Vec<GroupCount> = counts
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect();
    table.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    table
}

/// Two-dimensional frequency table, ordered by key then sub-key
pub fn group_by2(
    bodies: &[GovernanceBody],
    field: CategoryField,
    by: CategoryField,
) -> Vec<GroupCount2> {
    let mut counts: HashMap<(String, String), usize> = HashMap::new();
    for body in bodies {
        if let (Some(key), Some(sub_key)) = (field.value(body), by.value(body)) {
            *counts.entry((key, sub_key)).or_insert(0) += 1;
        }
    }

    let mut table: Vec<GroupCount2> = counts
        .into_iter()
        .map(|((key, sub_key), count)| GroupCount2 { key, sub_key, count })
        .collect();
    table.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.sub_key.cmp(&b.sub_key)));
    table
}

/// One row per (body, tag) pair, in body order then tag order
pub fn explode_multivalue(bodies: &[GovernanceBody], field: TagField) -> Vec<TagRow> {
    bodies
        .iter()
        .flat_map(|b| {
            field.tags(b).map(move |tag| TagRow {
                body: b.name.clone(),
                tag: tag.to_string(),
            })
        })
        .collect()
}

/// Tag frequencies for a multi-value column, most frequent first
pub fn tag_counts(bodies: &[GovernanceBody], field: TagField) -> Vec<GroupCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for row in explode_multivalue(bodies, field) {
        *counts.entry(row.tag).or_insert(0) += 1;
    }

    let mut table: Vec<GroupCount> = counts
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect();
    table.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostImpact, DocumentationLevel, TagList};
    use crate::registry::sample;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mean_efficiency_of_sample() {
        let bodies = sample::governance_bodies();
        let scores: Vec<u8> = bodies.iter().map(|b| b.efficiency_score).collect();
        assert_eq!(scores, vec![4, 2, 3, 3, 4, 3, 4, 2]);
        assert_eq!(mean(&bodies, NumericField::EfficiencyScore), Some(3.125));
        assert_eq!(mean(&bodies, NumericField::ValueAdded), Some(3.375));
    }

    #[test]
    fn test_mean_of_empty_is_none() {
        assert_eq!(mean(&[], NumericField::DuplicationRisk), None);
        assert_eq!(format_mean(mean(&[], NumericField::EfficiencyScore)), "N/A");
        assert_eq!(format_mean(Some(2.5)), "2.50");
    }

    #[test]
    fn test_mean_skips_unscored_principles() {
        let bodies = sample::governance_bodies();
        // Only Cabinet (4) scored the economy principle
        assert_eq!(mean(&bodies, NumericField::FwFairerEconomy), Some(4.0));
    }

    #[test]
    fn test_count_where_matches_filtered_cardinality() {
        let bodies = sample::governance_bodies();
        let high_duplication = |b: &GovernanceBody| b.duplication_risk >= 3;
        assert_eq!(count_where(&bodies, high_duplication), 2);
        assert_eq!(
            count_where(&bodies, high_duplication),
            bodies.iter().filter(|b| high_duplication(b)).count()
        );
        assert_eq!(count_where(&bodies, |b| b.cost_impact.is_high()), 4);
        assert_eq!(count_where(&bodies, |b| b.process_type.relies_on_tacit()), 5);
        assert_eq!(
            count_where(&bodies, |b| b.process_type == DocumentationLevel::Tacit
                && b.cost_impact == CostImpact::High),
            1
        );
    }

    #[test]
    fn test_group_by_orders_by_count() {
        let bodies = sample::governance_bodies();
        let table = group_by(&bodies, CategoryField::Level);
        assert_eq!(
            table,
            vec![
                GroupCount { key: "Tactical".into(), count: 3 },
                GroupCount { key: "Community".into(), count: 2 },
                GroupCount { key: "Strategic".into(), count: 2 },
                GroupCount { key: "Operational".into(), count: 1 },
            ]
        );
        assert_eq!(table.iter().map(|g| g.count).sum::<usize>(), bodies.len());
    }

    #[test]
    fn test_group_by_skips_unset() {
        let mut bodies = sample::governance_bodies();
        bodies[0].rag_status = None;
        let total: usize = group_by(&bodies, CategoryField::RagStatus)
            .iter()
            .map(|g| g.count)
            .sum();
        assert_eq!(total, 7);
    }

    #[test]
    fn test_group_by2() {
        let bodies = sample::governance_bodies();
        let table = group_by2(&bodies, CategoryField::InnovationPosture, CategoryField::Level);
        let explore_community = table
            .iter()
            .find(|g| g.key == "Explore" && g.sub_key == "Community")
            .unwrap();
        assert_eq!(explore_community.count, 2);
        assert_eq!(table.iter().map(|g| g.count).sum::<usize>(), 8);
    }

    #[test]
    fn test_explode_multivalue_and_rejoin() {
        let mut bodies = sample::governance_bodies();
        bodies.truncate(1);
        bodies[0].outcome_focus = TagList::new(["Housing, Affordability and Quality", "Community Safety"]);
        let rows = explode_multivalue(&bodies, TagField::OutcomeFocus);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tag, "Housing, Affordability and Quality");

        let rejoined: TagList = rows.into_iter().map(|r| r.tag).collect();
        assert_eq!(rejoined, bodies[0].outcome_focus);
    }

    #[test]
    fn test_tag_counts() {
        let bodies = sample::governance_bodies();
        let counts = tag_counts(&bodies, TagField::OutcomeFocus);
        assert_eq!(counts[0].key, "Service Efficiency and Cost Reduction");
        assert_eq!(counts[0].count, 3);
    }
}
