//! Governance body record and its classification scales

use super::{score, TagList};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

labelled_enum! {
    /// Organisational level a body operates at
    Level {
        Strategic => "Strategic" | "Strategic (Cabinet/Corporate)",
        Tactical => "Tactical" | "Tactical (Service/Programme)",
        Operational => "Operational" | "Operational (Delivery/Project)",
        Community => "Community" | "Community (Place-Based)",
    }
}

labelled_enum! {
    /// How well a body's own processes are documented
    DocumentationLevel {
        Explicit => "Explicit" | "Explicit (Documented Processes)",
        Mixed => "Mixed" | "Mixed (Some Documented, Some Tacit)",
        Tacit => "Tacit" | "Tacit (Undocumented/Experience-Based)",
    }
}

impl DocumentationLevel {
    /// Mixed bodies still depend partly on undocumented knowledge
    pub fn relies_on_tacit(&self) -> bool {
        matches!(self, DocumentationLevel::Tacit | DocumentationLevel::Mixed)
    }
}

labelled_enum! {
    InnovationPosture {
        Exploit => "Exploit" | "Exploit (Efficiency/Cost Reduction)",
        Explore => "Explore" | "Explore (Transformation/Innovation)",
        Ambidextrous => "Ambidextrous" | "Ambidextrous (Both)",
    }
}

labelled_enum! {
    /// Rogers diffusion-of-innovation adopter categories, in adoption order
    RogersCategory {
        Innovators => "Innovators",
        EarlyAdopters => "Early Adopters",
        EarlyMajority => "Early Majority",
        LateMajority => "Late Majority",
        Laggards => "Laggards",
        MultipleCategories => "Multiple Categories",
    }
}

labelled_enum! {
    CostImpact {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        VeryHigh => "Very High",
    }
}

impl CostImpact {
    /// Position on the cost axis (1-4)
    pub fn numeric(&self) -> u8 {
        match self {
            CostImpact::Low => 1,
            CostImpact::Medium => 2,
            CostImpact::High => 3,
            CostImpact::VeryHigh => 4,
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, CostImpact::High | CostImpact::VeryHigh)
    }
}

labelled_enum! {
    StakeholderPower {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

labelled_enum! {
    StakeholderInterest {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        VeryHigh => "Very High",
    }
}

labelled_enum! {
    DecisionSpeed {
        Fast => "Fast",
        Medium => "Medium",
        Slow => "Slow",
    }
}

labelled_enum! {
    RagStatus {
        Green => "Green",
        Amber => "Amber",
        Red => "Red",
    }
}

labelled_enum! {
    RagRecommendation {
        Keep => "Keep",
        Merge => "Merge",
        Close => "Close",
    }
}

/// A board, committee, forum or network being mapped.
///
/// Field order is the column declaration order used by every export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GovernanceBody {
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    #[serde(rename = "Name")]
    pub name: String,

    #[validate(custom(function = "not_blank", message = "Type is required"))]
    #[serde(rename = "Type")]
    pub body_type: String,

    #[serde(rename = "Level")]
    pub level: Level,

    #[serde(rename = "Mandate", default)]
    pub mandate: String,

    #[validate(custom(function = "not_empty_tags", message = "At least one outcome focus is required"))]
    #[serde(rename = "Outcome_Focus", default)]
    pub outcome_focus: TagList,

    #[serde(rename = "Process_Type")]
    pub process_type: DocumentationLevel,

    #[validate(custom(function = "not_empty_tags", message = "At least one lifecycle stage is required"))]
    #[serde(rename = "Lifecycle_Stage", default)]
    pub lifecycle_stage: TagList,

    #[serde(rename = "Innovation_Posture")]
    pub innovation_posture: InnovationPosture,

    #[serde(rename = "Rogers_Category")]
    pub rogers_category: RogersCategory,

    #[serde(rename = "Structure_Type", default)]
    pub structure_type: String,

    #[validate(custom(function = "not_blank", message = "Decision rights are required"))]
    #[serde(rename = "Decision_Rights")]
    pub decision_rights: String,

    #[serde(rename = "Inputs", default)]
    pub inputs: String,

    #[serde(rename = "Outputs", default)]
    pub outputs: String,

    /// Names of bodies this one escalates to
    #[serde(rename = "Escalation_To", default)]
    pub escalation_to: TagList,

    /// Names of bodies that escalate to this one
    #[serde(rename = "Escalation_From", default)]
    pub escalation_from: TagList,

    /// Networks relied upon; free text, not body references
    #[serde(rename = "Networks", default)]
    pub networks: TagList,

    #[serde(rename = "Meeting_Cadence", default)]
    pub meeting_cadence: String,

    #[validate(range(min = 1, max = 5, message = "Efficiency score must be between 1 and 5"))]
    #[serde(rename = "Efficiency_Score", deserialize_with = "score::whole")]
    pub efficiency_score: u8,

    #[serde(rename = "Cost_Impact")]
    pub cost_impact: CostImpact,

    #[validate(range(min = 1, max = 5, message = "Value added must be between 1 and 5"))]
    #[serde(rename = "Value_Added", deserialize_with = "score::whole")]
    pub value_added: u8,

    #[validate(range(min = 1, max = 5, message = "Duplication risk must be between 1 and 5"))]
    #[serde(rename = "Duplication_Risk", deserialize_with = "score::whole")]
    pub duplication_risk: u8,

    #[serde(rename = "Primary_Stakeholders", default)]
    pub primary_stakeholders: TagList,

    #[serde(rename = "Stakeholder_Power", default)]
    pub stakeholder_power: Option<StakeholderPower>,

    #[serde(rename = "Stakeholder_Interest", default)]
    pub stakeholder_interest: Option<StakeholderInterest>,

    #[serde(rename = "Decision_Speed", default)]
    pub decision_speed: Option<DecisionSpeed>,

    /// Names of other bodies this one routinely interacts with
    #[serde(rename = "Governance_Touchpoints", default)]
    pub governance_touchpoints: TagList,

    #[serde(rename = "RAG_Status", default)]
    pub rag_status: Option<RagStatus>,

    #[serde(rename = "RAG_Recommendation", default)]
    pub rag_recommendation: Option<RagRecommendation>,

    #[serde(rename = "Fairer_Westminster_Alignment", default)]
    pub fairer_westminster_alignment: TagList,

    #[validate(range(min = 1, max = 5, message = "Principle scores must be between 1 and 5"))]
    #[serde(rename = "FW_Fairer_Communities", default, deserialize_with = "score::optional")]
    pub fw_fairer_communities: Option<u8>,

    #[validate(range(min = 1, max = 5, message = "Principle scores must be between 1 and 5"))]
    #[serde(rename = "FW_Fairer_Housing", default, deserialize_with = "score::optional")]
    pub fw_fairer_housing: Option<u8>,

    #[validate(range(min = 1, max = 5, message = "Principle scores must be between 1 and 5"))]
    #[serde(rename = "FW_Fairer_Economy", default, deserialize_with = "score::optional")]
    pub fw_fairer_economy: Option<u8>,

    #[validate(range(min = 1, max = 5, message = "Principle scores must be between 1 and 5"))]
    #[serde(rename = "FW_Fairer_Environment", default, deserialize_with = "score::optional")]
    pub fw_fairer_environment: Option<u8>,

    #[validate(range(min = 1, max = 5, message = "Principle scores must be between 1 and 5"))]
    #[serde(rename = "FW_Fairer_Council", default, deserialize_with = "score::optional")]
    pub fw_fairer_council: Option<u8>,
}

/// Column headers in declaration order
pub const BODY_COLUMNS: &[&str] = &[
    "Name",
    "Type",
    "Level",
    "Mandate",
    "Outcome_Focus",
    "Process_Type",
    "Lifecycle_Stage",
    "Innovation_Posture",
    "Rogers_Category",
    "Structure_Type",
    "Decision_Rights",
    "Inputs",
    "Outputs",
    "Escalation_To",
    "Escalation_From",
    "Networks",
    "Meeting_Cadence",
    "Efficiency_Score",
    "Cost_Impact",
    "Value_Added",
    "Duplication_Risk",
    "Primary_Stakeholders",
    "Stakeholder_Power",
    "Stakeholder_Interest",
    "Decision_Speed",
    "Governance_Touchpoints",
    "RAG_Status",
    "RAG_Recommendation",
    "Fairer_Westminster_Alignment",
    "FW_Fairer_Communities",
    "FW_Fairer_Housing",
    "FW_Fairer_Economy",
    "FW_Fairer_Environment",
    "FW_Fairer_Council",
];

impl GovernanceBody {
    /// Names of other bodies this record points at
    pub fn referenced_bodies(&self) -> impl Iterator<Item = &str> {
        self.escalation_to
            .iter()
            .chain(self.escalation_from.iter())
            .chain(self.governance_touchpoints.iter())
    }

    pub fn references(&self, name: &str) -> bool {
        self.referenced_bodies().any(|r| r == name)
    }

    /// Point every reference to `from` at `to` instead
    pub fn rename_references(&mut self, from: &str, to: &str) {
        self.escalation_to.rename(from, to);
        self.escalation_from.rename(from, to);
        self.governance_touchpoints.rename(from, to);
    }

    /// Per-principle Fairer Westminster scores that have been recorded
    pub fn principle_scores(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        [
            ("Fairer Communities", self.fw_fairer_communities),
            ("Fairer Housing", self.fw_fairer_housing),
            ("Fairer Economy", self.fw_fairer_economy),
            ("Fairer Environment", self.fw_fairer_environment),
            ("Fairer Council", self.fw_fairer_council),
        ]
        .into_iter()
        .filter_map(|(label, score)| score.map(|s| (label, s)))
    }
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub(crate) fn not_empty_tags(tags: &TagList) -> Result<(), ValidationError> {
    if tags.is_empty() {
        return Err(ValidationError::new("empty"));
    }
    Ok(())
}
