//! Governance insights
//!
//! Reform opportunities, cost-value placement and the other derived views
//! shown to analysts. Each function takes a snapshot and returns a
//! serializable report.

use super::aggregate::{
    count_where, group_by, mean, tag_counts, CategoryField, GroupCount, NumericField, TagField,
};
use crate::models::{
    CostImpact, DocumentationLevel, GovernanceBody, InnovationPosture, Level, ProcessRecord,
    RogersCategory, StakeholderInterest, StakeholderPower,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bodies scoring below this are under target efficiency
pub const EFFICIENCY_TARGET: u8 = 3;

/// Duplication risk at or above this is flagged
pub const DUPLICATION_THRESHOLD: u8 = 3;

/// Efficiency or value at or below this is considered low
pub const LOW_SCORE: u8 = 2;

const NOT_OUTCOME_FOCUSED: &str = "Not Outcome-Focused";

/// Headline figures stored alongside an exported package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencySummary {
    pub avg_efficiency: f64,
    pub high_cost_bodies: usize,
    pub duplication_risk: usize,
    pub total_bodies: usize,
}

/// `None` for an empty map
pub fn efficiency_summary(bodies: &[GovernanceBody]) -> Option<EfficiencySummary> {
    Some(EfficiencySummary {
        avg_efficiency: mean(bodies, NumericField::EfficiencyScore)?,
        high_cost_bodies: count_where(bodies, |b| b.cost_impact.is_high()),
        duplication_risk: count_where(bodies, |b| b.duplication_risk >= DUPLICATION_THRESHOLD),
        total_bodies: bodies.len(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyOverview {
    pub total_bodies: usize,
    pub total_processes: usize,
    pub avg_efficiency: Option<f64>,
    pub avg_value_added: Option<f64>,
    pub avg_duplication_risk: Option<f64>,
    pub high_cost_bodies: usize,
    pub duplication_risk_bodies: usize,
    pub below_target: usize,
}

pub fn efficiency_overview(
    bodies: &[GovernanceBody],
    processes: &[ProcessRecord],
) -> EfficiencyOverview {
    EfficiencyOverview {
        total_bodies: bodies.len(),
        total_processes: processes.len(),
        avg_efficiency: mean(bodies, NumericField::EfficiencyScore),
        avg_value_added: mean(bodies, NumericField::ValueAdded),
        avg_duplication_risk: mean(bodies, NumericField::DuplicationRisk),
        high_cost_bodies: count_where(bodies, |b| b.cost_impact.is_high()),
        duplication_risk_bodies: count_where(bodies, |b| {
            b.duplication_risk >= DUPLICATION_THRESHOLD
        }),
        below_target: count_where(bodies, |b| b.efficiency_score < EFFICIENCY_TARGET),
    }
}

// ============================================
// Reform opportunities
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReformCandidate {
    pub name: String,
    pub level: Level,
    pub process_type: DocumentationLevel,
    pub cost_impact: CostImpact,
    pub efficiency_score: u8,
    pub value_added: u8,
    pub duplication_risk: u8,
    pub recommendation: String,
}

impl ReformCandidate {
    fn new(body: &GovernanceBody, recommendation: &str) -> Self {
        Self {
            name: body.name.clone(),
            level: body.level,
            process_type: body.process_type,
            cost_impact: body.cost_impact,
            efficiency_score: body.efficiency_score,
            value_added: body.value_added,
            duplication_risk: body.duplication_risk,
            recommendation: recommendation.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReformOpportunities {
    pub high_cost_low_value: Vec<ReformCandidate>,
    /// Highest risk first
    pub high_duplication: Vec<ReformCandidate>,
    /// Least efficient first
    pub inefficient: Vec<ReformCandidate>,
}

pub fn reform_opportunities(bodies: &[GovernanceBody]) -> ReformOpportunities {
    let high_cost_low_value = bodies
        .iter()
        .filter(|b| b.cost_impact.is_high() && b.value_added <= LOW_SCORE)
        .map(|b| {
            ReformCandidate::new(
                b,
                "Consider eliminating this body or consolidating its functions into existing structures.",
            )
        })
        .collect();

    let mut duplicated: Vec<&GovernanceBody> = bodies
        .iter()
        .filter(|b| b.duplication_risk >= DUPLICATION_THRESHOLD)
        .collect();
    duplicated.sort_by(|a, b| b.duplication_risk.cmp(&a.duplication_risk));
    let high_duplication = duplicated
        .into_iter()
        .map(|b| {
            ReformCandidate::new(
                b,
                "Review against other bodies with similar mandates. Consider merging or clarifying boundaries.",
            )
        })
        .collect();

    let mut slow: Vec<&GovernanceBody> = bodies
        .iter()
        .filter(|b| b.efficiency_score <= LOW_SCORE)
        .collect();
    slow.sort_by_key(|b| b.efficiency_score);
    let inefficient = slow
        .into_iter()
        .map(|b| {
            let recommendation = if b.process_type.relies_on_tacit() {
                "This body relies on tacit processes. Document procedures to improve efficiency and consistency."
            } else {
                "Review meeting structure, decision-making processes and information flows for improvement opportunities."
            };
            ReformCandidate::new(b, recommendation)
        })
        .collect();

    ReformOpportunities {
        high_cost_low_value,
        high_duplication,
        inefficient,
    }
}

// ============================================
// Cost-value quadrants
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    /// Low cost, high value
    Keep,
    /// High cost, high value
    Optimise,
    /// Low cost, low value
    Review,
    /// High cost, low value
    Eliminate,
}

impl Quadrant {
    /// Cost splits at 2.5 on the 1-4 scale, value at 3 on the 1-5 scale
    pub fn classify(cost: CostImpact, value_added: u8) -> Self {
        let high_cost = f64::from(cost.numeric()) > 2.5;
        let high_value = value_added >= 3;
        match (high_cost, high_value) {
            (false, true) => Quadrant::Keep,
            (true, true) => Quadrant::Optimise,
            (false, false) => Quadrant::Review,
            (true, false) => Quadrant::Eliminate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuadrantPlacement {
    pub name: String,
    pub cost: u8,
    pub value_added: u8,
    pub duplication_risk: u8,
    pub innovation_posture: InnovationPosture,
    pub quadrant: Quadrant,
}

pub fn cost_value_quadrants(bodies: &[GovernanceBody]) -> Vec<QuadrantPlacement> {
    bodies
        .iter()
        .map(|b| QuadrantPlacement {
            name: b.name.clone(),
            cost: b.cost_impact.numeric(),
            value_added: b.value_added,
            duplication_risk: b.duplication_risk,
            innovation_posture: b.innovation_posture,
            quadrant: Quadrant::classify(b.cost_impact, b.value_added),
        })
        .collect()
}

// ============================================
// Duplication matrix
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicationCell {
    pub level: Level,
    pub innovation_posture: InnovationPosture,
    pub mean_duplication_risk: f64,
    pub count: usize,
}

/// Mean duplication risk per (level, posture) pair that has bodies
pub fn duplication_matrix(bodies: &[GovernanceBody]) -> Vec<DuplicationCell> {
    let mut cells: BTreeMap<(Level, InnovationPosture), (u32, usize)> = BTreeMap::new();
    for body in bodies {
        let cell = cells
            .entry((body.level, body.innovation_posture))
            .or_insert((0, 0));
        cell.0 += u32::from(body.duplication_risk);
        cell.1 += 1;
    }

    cells
        .into_iter()
        .map(|((level, innovation_posture), (sum, count))| DuplicationCell {
            level,
            innovation_posture,
            mean_duplication_risk: f64::from(sum) / count as f64,
            count,
        })
        .collect()
}

// ============================================
// Innovation posture balance
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostureAssessment {
    /// Exploitation outnumbers exploration more than three to one
    ExploitWeighted,
    /// More exploration than exploitation
    ExploreHeavy,
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostureBalance {
    pub exploit: usize,
    pub explore: usize,
    pub ambidextrous: usize,
    pub assessment: PostureAssessment,
}

pub fn posture_balance(bodies: &[GovernanceBody]) -> PostureBalance {
    let exploit = count_where(bodies, |b| b.innovation_posture == InnovationPosture::Exploit);
    let explore = count_where(bodies, |b| b.innovation_posture == InnovationPosture::Explore);
    let ambidextrous = count_where(bodies, |b| {
        b.innovation_posture == InnovationPosture::Ambidextrous
    });

    let assessment = if exploit > explore * 3 {
        PostureAssessment::ExploitWeighted
    } else if explore > exploit {
        PostureAssessment::ExploreHeavy
    } else {
        PostureAssessment::Balanced
    };

    PostureBalance {
        exploit,
        explore,
        ambidextrous,
        assessment,
    }
}

// ============================================
// Rogers adoption readiness
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdopterCount {
    pub category: RogersCategory,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RogersReadiness {
    /// Present categories in adoption order
    pub categories: Vec<AdopterCount>,
    /// Innovators plus early adopters, the bodies able to pilot reform
    pub early_capacity: usize,
}

pub fn rogers_readiness(bodies: &[GovernanceBody]) -> RogersReadiness {
    let categories = RogersCategory::ALL
        .iter()
        .map(|&category| AdopterCount {
            category,
            count: count_where(bodies, |b| b.rogers_category == category),
        })
        .filter(|c| c.count > 0)
        .collect();

    RogersReadiness {
        categories,
        early_capacity: count_where(bodies, |b| {
            matches!(
                b.rogers_category,
                RogersCategory::Innovators | RogersCategory::EarlyAdopters
            )
        }),
    }
}

// ============================================
// Tacit knowledge
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TacitItem {
    pub name: String,
    pub knowledge: String,
    pub efficiency: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TacitReport {
    pub bodies: Vec<TacitItem>,
    pub processes: Vec<TacitItem>,
    /// Body documentation levels across the whole map
    pub documentation: Vec<GroupCount>,
}

impl TacitReport {
    pub fn needs_codification(&self) -> bool {
        !self.bodies.is_empty() || !self.processes.is_empty()
    }
}

pub fn tacit_report(bodies: &[GovernanceBody], processes: &[ProcessRecord]) -> TacitReport {
    TacitReport {
        bodies: bodies
            .iter()
            .filter(|b| b.process_type.relies_on_tacit())
            .map(|b| TacitItem {
                name: b.name.clone(),
                knowledge: b.process_type.to_string(),
                efficiency: b.efficiency_score,
            })
            .collect(),
        processes: processes
            .iter()
            .filter(|p| p.process_type.is_tacit())
            .map(|p| TacitItem {
                name: p.name.clone(),
                knowledge: p.process_type.to_string(),
                efficiency: p.efficiency_rating,
            })
            .collect(),
        documentation: group_by(bodies, CategoryField::ProcessType),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSummary {
    pub total: usize,
    pub tacit: usize,
    pub inefficient: usize,
}

pub fn process_summary(processes: &[ProcessRecord]) -> ProcessSummary {
    ProcessSummary {
        total: processes.len(),
        tacit: processes.iter().filter(|p| p.process_type.is_tacit()).count(),
        inefficient: processes
            .iter()
            .filter(|p| p.efficiency_rating <= LOW_SCORE)
            .count(),
    }
}

// ============================================
// Outcomes, RAG and stakeholders
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeReport {
    pub focus_counts: Vec<GroupCount>,
    pub not_outcome_focused: Vec<String>,
}

pub fn outcome_report(bodies: &[GovernanceBody]) -> OutcomeReport {
    OutcomeReport {
        focus_counts: tag_counts(bodies, TagField::OutcomeFocus),
        not_outcome_focused: bodies
            .iter()
            .filter(|b| b.outcome_focus.iter().any(|t| t.starts_with(NOT_OUTCOME_FOCUSED)))
            .map(|b| b.name.clone())
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RagBreakdown {
    pub statuses: Vec<GroupCount>,
    pub recommendations: Vec<GroupCount>,
    pub unrated: usize,
}

pub fn rag_breakdown(bodies: &[GovernanceBody]) -> RagBreakdown {
    RagBreakdown {
        statuses: group_by(bodies, CategoryField::RagStatus),
        recommendations: group_by(bodies, CategoryField::RagRecommendation),
        unrated: count_where(bodies, |b| b.rag_status.is_none()),
    }
}

/// Power/interest engagement strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engagement {
    ManageClosely,
    KeepSatisfied,
    KeepInformed,
    Monitor,
}

impl Engagement {
    pub fn classify(power: StakeholderPower, interest: StakeholderInterest) -> Self {
        let high_power = power == StakeholderPower::High;
        let high_interest = interest >= StakeholderInterest::High;
        match (high_power, high_interest) {
            (true, true) => Engagement::ManageClosely,
            (true, false) => Engagement::KeepSatisfied,
            (false, true) => Engagement::KeepInformed,
            (false, false) => Engagement::Monitor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeholderPosition {
    pub name: String,
    pub power: StakeholderPower,
    pub interest: StakeholderInterest,
    pub engagement: Engagement,
}

/// Bodies without both a power and an interest rating are left off the grid
pub fn stakeholder_grid(bodies: &[GovernanceBody]) -> Vec<StakeholderPosition> {
    bodies
        .iter()
        .filter_map(|b| {
            let power = b.stakeholder_power?;
            let interest = b.stakeholder_interest?;
            Some(StakeholderPosition {
                name: b.name.clone(),
                power,
                interest,
                engagement: Engagement::classify(power, interest),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::sample;
    use pretty_assertions::assert_eq;

    fn names(candidates: &[ReformCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_efficiency_summary() {
        let bodies = sample::governance_bodies();
        assert_eq!(
            efficiency_summary(&bodies),
            Some(EfficiencySummary {
                avg_efficiency: 3.125,
                high_cost_bodies: 4,
                duplication_risk: 2,
                total_bodies: 8,
            })
        );
        assert_eq!(efficiency_summary(&[]), None);
    }

    #[test]
    fn test_overview_of_empty_map() {
        let overview = efficiency_overview(&[], &[]);
        assert_eq!(overview.avg_efficiency, None);
        assert_eq!(overview.below_target, 0);
    }

    #[test]
    fn test_overview_counts_below_target() {
        let overview = efficiency_overview(&sample::governance_bodies(), &sample::processes());
        assert_eq!(overview.below_target, 2);
        assert_eq!(overview.total_processes, 2);
        assert_eq!(overview.avg_value_added, Some(3.375));
    }

    #[test]
    fn test_reform_opportunities() {
        let reform = reform_opportunities(&sample::governance_bodies());
        assert_eq!(names(&reform.high_cost_low_value), vec!["Commercial Gateway Review Board"]);
        assert_eq!(
            names(&reform.high_duplication),
            vec!["Procuring Board", "Commercial Gateway Review Board"]
        );
        assert_eq!(
            names(&reform.inefficient),
            vec!["Commercial Gateway Review Board", "Place-Based Prevention Network"]
        );
        assert!(reform.inefficient[1].recommendation.contains("tacit"));
    }

    #[test]
    fn test_explicit_inefficient_body_gets_process_review() {
        let mut bodies = sample::governance_bodies();
        bodies[7].process_type = DocumentationLevel::Explicit;
        let reform = reform_opportunities(&bodies);
        assert!(reform.inefficient[1].recommendation.starts_with("Review meeting structure"));
    }

    #[test]
    fn test_quadrants() {
        assert_eq!(Quadrant::classify(CostImpact::Low, 4), Quadrant::Keep);
        assert_eq!(Quadrant::classify(CostImpact::High, 3), Quadrant::Optimise);
        assert_eq!(Quadrant::classify(CostImpact::Medium, 2), Quadrant::Review);
        assert_eq!(Quadrant::classify(CostImpact::VeryHigh, 1), Quadrant::Eliminate);

        let placements = cost_value_quadrants(&sample::governance_bodies());
        let eliminate: Vec<_> = placements
            .iter()
            .filter(|p| p.quadrant == Quadrant::Eliminate)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(eliminate, vec!["Commercial Gateway Review Board"]);
    }

    #[test]
    fn test_duplication_matrix() {
        let matrix = duplication_matrix(&sample::governance_bodies());
        assert_eq!(matrix.len(), 5);
        assert_eq!(matrix.iter().map(|c| c.count).sum::<usize>(), 8);

        let tactical_exploit = matrix
            .iter()
            .find(|c| c.level == Level::Tactical && c.innovation_posture == InnovationPosture::Exploit)
            .unwrap();
        assert_eq!(tactical_exploit.count, 2);
        assert_eq!(tactical_exploit.mean_duplication_risk, 4.5);
        assert_eq!(matrix[0].level, Level::Strategic);
    }

    #[test]
    fn test_posture_balance() {
        let mut bodies = sample::governance_bodies();
        let balance = posture_balance(&bodies);
        assert_eq!((balance.exploit, balance.explore, balance.ambidextrous), (2, 3, 3));
        assert_eq!(balance.assessment, PostureAssessment::ExploreHeavy);

        for body in bodies.iter_mut() {
            body.innovation_posture = InnovationPosture::Exploit;
        }
        assert_eq!(posture_balance(&bodies).assessment, PostureAssessment::ExploitWeighted);

        assert_eq!(posture_balance(&[]).assessment, PostureAssessment::Balanced);
    }

    #[test]
    fn test_rogers_readiness_in_adoption_order() {
        let readiness = rogers_readiness(&sample::governance_bodies());
        let order: Vec<_> = readiness.categories.iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            vec![
                RogersCategory::Innovators,
                RogersCategory::EarlyAdopters,
                RogersCategory::EarlyMajority,
                RogersCategory::LateMajority,
            ]
        );
        assert_eq!(readiness.early_capacity, 3);
    }

    #[test]
    fn test_tacit_report() {
        let report = tacit_report(&sample::governance_bodies(), &sample::processes());
        assert_eq!(report.bodies.len(), 5);
        assert_eq!(report.processes.len(), 1);
        assert_eq!(report.processes[0].name, "Commercial Procurement");
        assert!(report.needs_codification());

        assert!(!tacit_report(&[], &[]).needs_codification());
    }

    #[test]
    fn test_process_summary() {
        assert_eq!(
            process_summary(&sample::processes()),
            ProcessSummary { total: 2, tacit: 1, inefficient: 1 }
        );
    }

    #[test]
    fn test_outcome_report() {
        let report = outcome_report(&sample::governance_bodies());
        assert_eq!(report.not_outcome_focused, vec!["Place-Based Prevention Network".to_string()]);
        assert_eq!(report.focus_counts[0].count, 3);
    }

    #[test]
    fn test_rag_breakdown() {
        let rag = rag_breakdown(&sample::governance_bodies());
        assert_eq!(rag.statuses[0], GroupCount { key: "Green".into(), count: 4 });
        assert_eq!(rag.recommendations[0], GroupCount { key: "Keep".into(), count: 5 });
        assert_eq!(rag.unrated, 0);
    }

    #[test]
    fn test_stakeholder_grid() {
        let mut bodies = sample::governance_bodies();
        bodies[1].stakeholder_power = None;
        let grid = stakeholder_grid(&bodies);
        assert_eq!(grid.len(), 7);

        let managed: Vec<_> = grid
            .iter()
            .filter(|p| p.engagement == Engagement::ManageClosely)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(managed, vec!["Cabinet", "Executive Leadership Team"]);
    }
}
