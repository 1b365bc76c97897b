//! Operational process records identified during diagnostic work

use super::body::{not_blank, not_empty_tags, RogersCategory};
use super::{score, TagList};
use serde::{Deserialize, Serialize};
use validator::Validate;

labelled_enum! {
    /// Documentation maturity of an operational process
    ProcessKnowledge {
        Explicit => "Explicit" | "Explicit (Fully Documented)",
        PartiallyExplicit => "Partially Explicit" | "Partially Explicit (Some Documentation)",
        MainlyTacit => "Mainly Tacit" | "Mainly Tacit (Minimal Documentation)",
        EntirelyTacit => "Entirely Tacit" | "Entirely Tacit (No Documentation)",
    }
}

impl ProcessKnowledge {
    pub fn is_tacit(&self) -> bool {
        matches!(self, ProcessKnowledge::MainlyTacit | ProcessKnowledge::EntirelyTacit)
    }
}

labelled_enum! {
    CurrentState {
        EfficientAndEffective => "Efficient and Effective",
        EffectiveButInefficient => "Effective but Inefficient",
        InefficientAndIneffective => "Inefficient and Ineffective",
        UnderReview => "Under Review" | "Under Review (Diagnostic)",
        RequiresRedesign => "Requires Redesign",
        Unknown => "Unknown",
    }
}

labelled_enum! {
    CostDriver {
        LowCost => "Low Cost",
        MediumCost => "Medium Cost",
        HighCost => "High Cost",
        VeryHighCost => "Very High Cost",
        Unknown => "Unknown",
    }
}

/// An operational process and the governance bodies that touch it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProcessRecord {
    #[validate(custom(function = "not_blank", message = "Process name is required"))]
    #[serde(rename = "Process_Name")]
    pub name: String,

    #[serde(rename = "Process_Type")]
    pub process_type: ProcessKnowledge,

    #[validate(custom(function = "not_blank", message = "Purpose is required"))]
    #[serde(rename = "Purpose")]
    pub purpose: String,

    #[serde(rename = "Current_State")]
    pub current_state: CurrentState,

    #[validate(custom(function = "not_empty_tags", message = "At least one lifecycle stage is required"))]
    #[serde(rename = "Lifecycle_Stage", default)]
    pub lifecycle_stage: TagList,

    /// Names of governance bodies that govern this process
    #[serde(rename = "Governance_Touchpoints", default)]
    pub governance_touchpoints: TagList,

    #[serde(rename = "Timeline_Position", default)]
    pub timeline_position: String,

    #[serde(rename = "Rogers_Stage")]
    pub rogers_stage: RogersCategory,

    #[validate(range(min = 1, max = 5, message = "Efficiency rating must be between 1 and 5"))]
    #[serde(rename = "Efficiency_Rating", deserialize_with = "score::whole")]
    pub efficiency_rating: u8,

    #[serde(rename = "Cost_Driver", default = "default_cost_driver")]
    pub cost_driver: CostDriver,
}

fn default_cost_driver() -> CostDriver {
    CostDriver::Unknown
}

/// Column headers in declaration order
pub const PROCESS_COLUMNS: &[&str] = &[
    "Process_Name",
    "Process_Type",
    "Purpose",
    "Current_State",
    "Lifecycle_Stage",
    "Governance_Touchpoints",
    "Timeline_Position",
    "Rogers_Stage",
    "Efficiency_Rating",
    "Cost_Driver",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tacit_classification() {
        assert!(ProcessKnowledge::MainlyTacit.is_tacit());
        assert!(ProcessKnowledge::EntirelyTacit.is_tacit());
        assert!(!ProcessKnowledge::PartiallyExplicit.is_tacit());
    }

    #[test]
    fn test_deserialize_long_form_labels() {
        let json = r#"{
            "Process_Name": "Commercial Procurement",
            "Process_Type": "Mainly Tacit (Minimal Documentation)",
            "Purpose": "Buy things well",
            "Current_State": "Under Review (Diagnostic)",
            "Lifecycle_Stage": "Development, Deployment",
            "Governance_Touchpoints": "",
            "Timeline_Position": "Continuous",
            "Rogers_Stage": "Early Majority",
            "Efficiency_Rating": 2
        }"#;
        let process: ProcessRecord = serde_json::from_str(json).unwrap();
        assert_eq!(process.current_state, CurrentState::UnderReview);
        assert_eq!(process.cost_driver, CostDriver::Unknown);
        assert_eq!(process.lifecycle_stage.len(), 2);
        assert!(process.governance_touchpoints.is_empty());
        assert!(process.validate().is_ok());
    }
}
