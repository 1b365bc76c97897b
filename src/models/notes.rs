//! Diagnostic narrative notes and the Five Forces profile

use super::score;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Free-text findings from the process diagnostic, last write wins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticNotes {
    #[serde(default)]
    pub commercial: String,
    #[serde(default)]
    pub place_based_prevention: String,
    #[serde(default)]
    pub data_gathering: String,
    #[serde(default)]
    pub general_observations: String,
}

impl DiagnosticNotes {
    pub fn is_empty(&self) -> bool {
        self.sections().iter().all(|(_, text)| text.trim().is_empty())
    }

    /// Headings and bodies in report order
    pub fn sections(&self) -> [(&'static str, &str); 4] {
        [
            ("Commercial Processes", self.commercial.as_str()),
            ("Place-Based Prevention", self.place_based_prevention.as_str()),
            ("Data Gathering Progress", self.data_gathering.as_str()),
            ("General Observations", self.general_observations.as_str()),
        ]
    }
}

/// Porter's five competitive forces, each rated 1 (weak) to 5 (intense)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct FiveForcesProfile {
    #[validate(range(min = 1, max = 5, message = "Rivalry must be between 1 and 5"))]
    #[serde(deserialize_with = "score::whole")]
    pub rivalry: u8,
    #[validate(range(min = 1, max = 5, message = "Threat of new entrants must be between 1 and 5"))]
    #[serde(deserialize_with = "score::whole")]
    pub threat_of_new_entrants: u8,
    #[validate(range(min = 1, max = 5, message = "Threat of substitutes must be between 1 and 5"))]
    #[serde(deserialize_with = "score::whole")]
    pub threat_of_substitutes: u8,
    #[validate(range(min = 1, max = 5, message = "Supplier power must be between 1 and 5"))]
    #[serde(deserialize_with = "score::whole")]
    pub supplier_power: u8,
    #[validate(range(min = 1, max = 5, message = "Buyer power must be between 1 and 5"))]
    #[serde(deserialize_with = "score::whole")]
    pub buyer_power: u8,
}

impl Default for FiveForcesProfile {
    fn default() -> Self {
        Self {
            rivalry: 3,
            threat_of_new_entrants: 3,
            threat_of_substitutes: 3,
            supplier_power: 3,
            buyer_power: 3,
        }
    }
}

impl FiveForcesProfile {
    /// Dimension labels with their intensity, in a fixed order
    pub fn dimensions(&self) -> [(&'static str, u8); 5] {
        [
            ("Competitive Rivalry", self.rivalry),
            ("Threat of New Entrants", self.threat_of_new_entrants),
            ("Threat of Substitutes", self.threat_of_substitutes),
            ("Supplier Power", self.supplier_power),
            ("Buyer Power", self.buyer_power),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_emptiness_ignores_whitespace() {
        let mut notes = DiagnosticNotes::default();
        assert!(notes.is_empty());
        notes.general_observations = "  \n".to_string();
        assert!(notes.is_empty());
        notes.commercial = "Procurement sign-off takes 6 weeks".to_string();
        assert!(!notes.is_empty());
    }

    #[test]
    fn test_partial_notes_deserialize() {
        let notes: DiagnosticNotes = serde_json::from_str(r#"{"commercial": "x"}"#).unwrap();
        assert_eq!(notes.commercial, "x");
        assert_eq!(notes.data_gathering, "");
    }

    #[test]
    fn test_five_forces_range() {
        let mut forces = FiveForcesProfile::default();
        assert!(forces.validate().is_ok());
        forces.buyer_power = 9;
        assert!(forces.validate().is_err());
    }
}
