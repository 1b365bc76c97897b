//! Built-in sample governance map
//!
//! Used to seed an empty store on request and as the fixture for tests.
//! Efficiency scores are 4,2,3,3,4,3,4,2 and duplication risks 1,4,5,2,1,2,1,2.

use crate::models::*;

fn body(name: &str, body_type: &str, level: Level) -> GovernanceBody {
    GovernanceBody {
        name: name.to_string(),
        body_type: body_type.to_string(),
        level,
        mandate: String::new(),
        outcome_focus: TagList::new(["Service Efficiency and Cost Reduction"]),
        process_type: DocumentationLevel::Explicit,
        lifecycle_stage: TagList::new(["Selection/Prioritisation"]),
        innovation_posture: InnovationPosture::Exploit,
        rogers_category: RogersCategory::EarlyMajority,
        structure_type: "Centralised, Formal".to_string(),
        decision_rights: "Recommend".to_string(),
        inputs: String::new(),
        outputs: String::new(),
        escalation_to: TagList::default(),
        escalation_from: TagList::default(),
        networks: TagList::default(),
        meeting_cadence: "Monthly".to_string(),
        efficiency_score: 3,
        cost_impact: CostImpact::Medium,
        value_added: 3,
        duplication_risk: 1,
        primary_stakeholders: TagList::default(),
        stakeholder_power: None,
        stakeholder_interest: None,
        decision_speed: None,
        governance_touchpoints: TagList::default(),
        rag_status: None,
        rag_recommendation: None,
        fairer_westminster_alignment: TagList::default(),
        fw_fairer_communities: None,
        fw_fairer_housing: None,
        fw_fairer_economy: None,
        fw_fairer_environment: None,
        fw_fairer_council: None,
    }
}

/// Eight bodies spanning every level
pub fn governance_bodies() -> Vec<GovernanceBody> {
    let mut cabinet = body("Cabinet", "Cabinet", Level::Strategic);
    cabinet.mandate = "Executive decision-making for the council".to_string();
    cabinet.outcome_focus = TagList::new([
        "Fairer Westminster (Reducing Inequality)",
        "Inclusive Economic Growth",
    ]);
    cabinet.lifecycle_stage = TagList::new(["Selection/Prioritisation", "Deployment/Implementation"]);
    cabinet.innovation_posture = InnovationPosture::Ambidextrous;
    cabinet.decision_rights = "Approve key decisions and budget".to_string();
    cabinet.escalation_from = TagList::new(["Executive Leadership Team"]);
    cabinet.meeting_cadence = "Fortnightly".to_string();
    cabinet.efficiency_score = 4;
    cabinet.cost_impact = CostImpact::VeryHigh;
    cabinet.value_added = 5;
    cabinet.duplication_risk = 1;
    cabinet.primary_stakeholders = TagList::new(["Leader", "Chief Executive", "Cabinet Members"]);
    cabinet.stakeholder_power = Some(StakeholderPower::High);
    cabinet.stakeholder_interest = Some(StakeholderInterest::VeryHigh);
    cabinet.decision_speed = Some(DecisionSpeed::Medium);
    cabinet.rag_status = Some(RagStatus::Green);
    cabinet.rag_recommendation = Some(RagRecommendation::Keep);
    cabinet.fairer_westminster_alignment = TagList::new(["Fairer Council", "Fairer Economy"]);
    cabinet.fw_fairer_council = Some(5);
    cabinet.fw_fairer_economy = Some(4);

    let mut gateway = body("Commercial Gateway Review Board", "Board", Level::Tactical);
    gateway.mandate = "Review procurement business cases before tender".to_string();
    gateway.process_type = DocumentationLevel::Mixed;
    gateway.rogers_category = RogersCategory::LateMajority;
    gateway.decision_rights = "Approve contracts up to 500k".to_string();
    gateway.escalation_to = TagList::new(["Procuring Board"]);
    gateway.meeting_cadence = "Weekly".to_string();
    gateway.efficiency_score = 2;
    gateway.cost_impact = CostImpact::High;
    gateway.value_added = 2;
    gateway.duplication_risk = 4;
    gateway.primary_stakeholders =
        TagList::new(["Director of Commercial", "Finance Business Partners", "Legal Services"]);
    gateway.stakeholder_power = Some(StakeholderPower::Medium);
    gateway.stakeholder_interest = Some(StakeholderInterest::High);
    gateway.decision_speed = Some(DecisionSpeed::Slow);
    gateway.rag_status = Some(RagStatus::Amber);
    gateway.rag_recommendation = Some(RagRecommendation::Merge);

    let mut procuring = body("Procuring Board", "Board", Level::Tactical);
    procuring.mandate = "Oversee the procurement pipeline".to_string();
    procuring.process_type = DocumentationLevel::Tacit;
    procuring.rogers_category = RogersCategory::LateMajority;
    procuring.escalation_to = TagList::new(["Executive Leadership Team"]);
    procuring.escalation_from = TagList::new(["Commercial Gateway Review Board"]);
    procuring.efficiency_score = 3;
    procuring.cost_impact = CostImpact::High;
    procuring.value_added = 3;
    procuring.duplication_risk = 5;
    procuring.primary_stakeholders = TagList::new(["Director of Commercial", "Finance Business Partners"]);
    procuring.stakeholder_power = Some(StakeholderPower::Medium);
    procuring.stakeholder_interest = Some(StakeholderInterest::Medium);
    procuring.decision_speed = Some(DecisionSpeed::Slow);
    procuring.rag_status = Some(RagStatus::Red);
    procuring.rag_recommendation = Some(RagRecommendation::Merge);

    let mut elt = body("Executive Leadership Team", "Board", Level::Strategic);
    elt.innovation_posture = InnovationPosture::Ambidextrous;
    elt.decision_rights = "Approve operational policy; recommend to Cabinet".to_string();
    elt.escalation_to = TagList::new(["Cabinet"]);
    elt.escalation_from = TagList::new(["Procuring Board"]);
    elt.meeting_cadence = "Weekly".to_string();
    elt.efficiency_score = 3;
    elt.cost_impact = CostImpact::VeryHigh;
    elt.value_added = 4;
    elt.duplication_risk = 2;
    elt.primary_stakeholders = TagList::new(["Chief Executive", "Executive Directors"]);
    elt.stakeholder_power = Some(StakeholderPower::High);
    elt.stakeholder_interest = Some(StakeholderInterest::High);
    elt.decision_speed = Some(DecisionSpeed::Fast);
    elt.rag_status = Some(RagStatus::Green);
    elt.rag_recommendation = Some(RagRecommendation::Keep);

    let mut forum = body("Service Innovation Forum", "Forum", Level::Operational);
    forum.outcome_focus = TagList::new(["Digital Transformation", "Public Health and Wellbeing"]);
    forum.lifecycle_stage = TagList::new(["Idea Generation", "Development"]);
    forum.process_type = DocumentationLevel::Tacit;
    forum.innovation_posture = InnovationPosture::Explore;
    forum.rogers_category = RogersCategory::Innovators;
    forum.structure_type = "Distributed, Informal".to_string();
    forum.efficiency_score = 4;
    forum.value_added = 4;
    forum.duplication_risk = 1;
    forum.primary_stakeholders = TagList::new(["Service Managers", "Digital Team"]);
    forum.stakeholder_power = Some(StakeholderPower::Low);
    forum.stakeholder_interest = Some(StakeholderInterest::High);
    forum.decision_speed = Some(DecisionSpeed::Fast);
    forum.rag_status = Some(RagStatus::Green);
    forum.rag_recommendation = Some(RagRecommendation::Keep);

    let mut church_street = body("Church Street Board", "Place-Based Board", Level::Community);
    church_street.outcome_focus = TagList::new(["Place-Based Outcomes", "Housing Affordability and Quality"]);
    church_street.lifecycle_stage = TagList::new(["Deployment/Implementation", "Post-Implementation Learning"]);
    church_street.process_type = DocumentationLevel::Mixed;
    church_street.innovation_posture = InnovationPosture::Explore;
    church_street.rogers_category = RogersCategory::EarlyAdopters;
    church_street.efficiency_score = 3;
    church_street.cost_impact = CostImpact::Low;
    church_street.value_added = 4;
    church_street.duplication_risk = 2;
    church_street.primary_stakeholders =
        TagList::new(["Residents", "Ward Councillors", "Service Managers"]);
    church_street.stakeholder_power = Some(StakeholderPower::Medium);
    church_street.stakeholder_interest = Some(StakeholderInterest::VeryHigh);
    church_street.rag_status = Some(RagStatus::Amber);
    church_street.rag_recommendation = Some(RagRecommendation::Keep);
    church_street.fairer_westminster_alignment = TagList::new(["Fairer Communities", "Fairer Housing"]);
    church_street.fw_fairer_communities = Some(5);
    church_street.fw_fairer_housing = Some(4);

    let mut digital = body("Digital Programme Board", "Programme Board", Level::Tactical);
    digital.outcome_focus = TagList::new(["Digital Transformation"]);
    digital.lifecycle_stage = TagList::new(["Development", "Deployment/Implementation"]);
    digital.innovation_posture = InnovationPosture::Ambidextrous;
    digital.rogers_category = RogersCategory::EarlyAdopters;
    digital.efficiency_score = 4;
    digital.value_added = 3;
    digital.duplication_risk = 1;
    digital.primary_stakeholders = TagList::new(["Digital Team", "Executive Directors"]);
    digital.stakeholder_power = Some(StakeholderPower::Medium);
    digital.stakeholder_interest = Some(StakeholderInterest::Medium);
    digital.rag_status = Some(RagStatus::Green);
    digital.rag_recommendation = Some(RagRecommendation::Keep);

    let mut network = body("Place-Based Prevention Network", "Network", Level::Community);
    network.outcome_focus = TagList::new(["Not Outcome-Focused (Input/Activity Focused)"]);
    network.lifecycle_stage = TagList::new(["Idea Generation"]);
    network.process_type = DocumentationLevel::Tacit;
    network.innovation_posture = InnovationPosture::Explore;
    network.structure_type = "Distributed, Informal".to_string();
    network.decision_rights = "Note only".to_string();
    network.meeting_cadence = "Quarterly".to_string();
    network.efficiency_score = 2;
    network.cost_impact = CostImpact::Low;
    network.value_added = 2;
    network.duplication_risk = 2;
    network.primary_stakeholders = TagList::new(["Residents", "Voluntary Sector Partners"]);
    network.stakeholder_power = Some(StakeholderPower::Low);
    network.stakeholder_interest = Some(StakeholderInterest::Medium);
    network.rag_status = Some(RagStatus::Amber);
    network.rag_recommendation = Some(RagRecommendation::Close);

    vec![cabinet, gateway, procuring, elt, forum, church_street, digital, network]
}

/// Two diagnostic processes touching the sample bodies
pub fn processes() -> Vec<ProcessRecord> {
    vec![
        ProcessRecord {
            name: "Commercial Procurement".to_string(),
            process_type: ProcessKnowledge::MainlyTacit,
            purpose: "Award contracts that deliver value for money".to_string(),
            current_state: CurrentState::EffectiveButInefficient,
            lifecycle_stage: TagList::new(["Selection/Prioritisation", "Deployment"]),
            governance_touchpoints: TagList::new(["Commercial Gateway Review Board", "Procuring Board"]),
            timeline_position: "Continuous".to_string(),
            rogers_stage: RogersCategory::LateMajority,
            efficiency_rating: 2,
            cost_driver: CostDriver::HighCost,
        },
        ProcessRecord {
            name: "Place-Based Prevention Planning".to_string(),
            process_type: ProcessKnowledge::PartiallyExplicit,
            purpose: "Plan early-help interventions with communities".to_string(),
            current_state: CurrentState::UnderReview,
            lifecycle_stage: TagList::new(["Idea Generation", "Development"]),
            governance_touchpoints: TagList::new(["Place-Based Prevention Network", "Church Street Board"]),
            timeline_position: "Annual Budget Cycle".to_string(),
            rogers_stage: RogersCategory::EarlyAdopters,
            efficiency_rating: 3,
            cost_driver: CostDriver::MediumCost,
        },
    ]
}
