//! View filtering and ordering over governance bodies
//!
//! Filters are a pure conjunction of independent constraints; an empty set
//! leaves that dimension unconstrained.

use crate::models::{GovernanceBody, InnovationPosture, Level, RagRecommendation, RagStatus};
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BodyFilter {
    pub levels: HashSet<Level>,
    pub postures: HashSet<InnovationPosture>,
    pub min_duplication_risk: Option<u8>,
    pub rag_statuses: HashSet<RagStatus>,
    pub recommendations: HashSet<RagRecommendation>,
}

impl BodyFilter {
    pub fn matches(&self, body: &GovernanceBody) -> bool {
        (self.levels.is_empty() || self.levels.contains(&body.level))
            && (self.postures.is_empty() || self.postures.contains(&body.innovation_posture))
            && self
                .min_duplication_risk
                .map_or(true, |min| body.duplication_risk >= min)
            && (self.rag_statuses.is_empty()
                || body.rag_status.map_or(false, |s| self.rag_statuses.contains(&s)))
            && (self.recommendations.is_empty()
                || body
                    .rag_recommendation
                    .map_or(false, |r| self.recommendations.contains(&r)))
    }

    /// Lazily filter a sequence, preserving its order
    pub fn apply<'a, I>(&'a self, bodies: I) -> impl Iterator<Item = &'a GovernanceBody> + 'a
    where
        I: IntoIterator<Item = &'a GovernanceBody>,
        I::IntoIter: 'a,
    {
        bodies.into_iter().filter(move |b| self.matches(b))
    }
}

/// Column a view can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    EfficiencyScore,
    ValueAdded,
    DuplicationRisk,
    CostImpact,
}

/// Order a view; ties keep their incoming order
pub fn sort_view(view: &mut [&GovernanceBody], key: SortKey, descending: bool) {
    view.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

fn compare(a: &GovernanceBody, b: &GovernanceBody, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::EfficiencyScore => a.efficiency_score.cmp(&b.efficiency_score),
        SortKey::ValueAdded => a.value_added.cmp(&b.value_added),
        SortKey::DuplicationRisk => a.duplication_risk.cmp(&b.duplication_risk),
        SortKey::CostImpact => a.cost_impact.cmp(&b.cost_impact),
    }
}
