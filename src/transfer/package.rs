//! JSON governance map package
//!
//! A package carries every collection plus metadata. On import each
//! top-level key is optional and an absent key leaves that part of the
//! store unchanged. Older package versions are upgraded by
//! [`schema::migrate`](super::schema::migrate) before they are read.

use super::schema::{migrate, SCHEMA_VERSION};
use crate::analysis::{efficiency_summary, EfficiencySummary};
use crate::error::{validation_error, AppError};
use crate::models::{DiagnosticNotes, FiveForcesProfile, GovernanceBody, ProcessRecord};
use crate::registry::{GovernanceRecordStore, ImportBatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageMetadata {
    pub export_date: String,
    pub tool_version: String,
    pub schema_version: u64,
    pub total_bodies: usize,
    pub total_processes: usize,
    /// SHA-256 over the four record collections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutgoingPackage<'a> {
    metadata: PackageMetadata,
    governance_bodies: &'a [GovernanceBody],
    processes: &'a [ProcessRecord],
    diagnostic_notes: &'a DiagnosticNotes,
    five_forces: &'a FiveForcesProfile,
    efficiency_summary: Option<EfficiencySummary>,
}

#[derive(Debug, Deserialize)]
struct IncomingPackage {
    #[serde(default)]
    metadata: PackageMetadata,
    governance_bodies: Option<Vec<GovernanceBody>>,
    processes: Option<Vec<ProcessRecord>>,
    diagnostic_notes: Option<DiagnosticNotes>,
    five_forces: Option<FiveForcesProfile>,
}

/// Content checksum; an absent part hashes as JSON `null`
pub fn content_checksum(
    bodies: Option<&[GovernanceBody]>,
    processes: Option<&[ProcessRecord]>,
    notes: Option<&DiagnosticNotes>,
    five_forces: Option<&FiveForcesProfile>,
) -> Result<String, AppError> {
    let mut hasher = Sha256::new();
    let parts = [
        serde_json::to_vec(&bodies),
        serde_json::to_vec(&processes),
        serde_json::to_vec(&notes),
        serde_json::to_vec(&five_forces),
    ];
    for part in parts {
        let bytes =
            part.map_err(|e| AppError::Internal(format!("Failed to encode package: {}", e)))?;
        hasher.update(&bytes);
        hasher.update(b"\n");
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Serialize the whole store as a pretty-printed package
pub fn export_package(
    store: &GovernanceRecordStore,
    exported_at: DateTime<Utc>,
) -> Result<String, AppError> {
    let checksum = content_checksum(
        Some(store.bodies()),
        Some(store.processes()),
        Some(store.diagnostic_notes()),
        Some(store.five_forces()),
    )?;

    let package = OutgoingPackage {
        metadata: PackageMetadata {
            export_date: exported_at.to_rfc3339(),
            tool_version: TOOL_VERSION.to_string(),
            schema_version: SCHEMA_VERSION,
            total_bodies: store.bodies().len(),
            total_processes: store.processes().len(),
            checksum: Some(checksum),
        },
        governance_bodies: store.bodies(),
        processes: store.processes(),
        diagnostic_notes: store.diagnostic_notes(),
        five_forces: store.five_forces(),
        efficiency_summary: efficiency_summary(store.bodies()),
    };

    serde_json::to_string_pretty(&package)
        .map_err(|e| AppError::Internal(format!("Failed to encode package: {}", e)))
}

/// Bodies alone, as a JSON array in column order
pub fn export_bodies(bodies: &[GovernanceBody]) -> Result<String, AppError> {
    serde_json::to_string_pretty(bodies)
        .map_err(|e| AppError::Internal(format!("Failed to encode bodies: {}", e)))
}

/// Parse a package (any supported version) into an import batch.
///
/// Structural problems are `Deserialization` errors; a checksum that no
/// longer matches the content is a `Validation` error.
pub fn import_package(text: &str) -> Result<ImportBatch, AppError> {
    let mut document: serde_json::Value = serde_json::from_str(text)?;
    let from_version = migrate(&mut document)?;
    let package: IncomingPackage = serde_json::from_value(document)?;

    if let Some(expected) = &package.metadata.checksum {
        let actual = content_checksum(
            package.governance_bodies.as_deref(),
            package.processes.as_deref(),
            package.diagnostic_notes.as_ref(),
            package.five_forces.as_ref(),
        )?;
        if &actual != expected {
            warn!("Package checksum mismatch: expected {}, found {}", expected, actual);
            return Err(validation_error(
                "Package checksum does not match its content; the file was modified after export",
            ));
        }
    }

    debug!(
        "Read package (schema v{}): bodies={:?} processes={:?}",
        from_version,
        package.governance_bodies.as_ref().map(Vec::len),
        package.processes.as_ref().map(Vec::len)
    );

    Ok(ImportBatch {
        bodies: package.governance_bodies,
        processes: package.processes,
        diagnostic_notes: package.diagnostic_notes,
        five_forces: package.five_forces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{sample, ImportMode};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn sample_store() -> GovernanceRecordStore {
        let mut store = GovernanceRecordStore::new();
        store
            .import_bulk(
                ImportBatch {
                    bodies: Some(sample::governance_bodies()),
                    processes: Some(sample::processes()),
                    diagnostic_notes: Some(DiagnosticNotes {
                        commercial: "Gateway and Procuring boards overlap".to_string(),
                        ..Default::default()
                    }),
                    five_forces: None,
                },
                ImportMode::Replace,
            )
            .unwrap();
        store
    }

    fn exported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_package_round_trip() {
        let store = sample_store();
        let text = export_package(&store, exported_at()).unwrap();

        let mut restored = GovernanceRecordStore::new();
        restored
            .import_bulk(import_package(&text).unwrap(), ImportMode::Replace)
            .unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn test_package_shape() {
        let text = export_package(&sample_store(), exported_at()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["metadata"]["schema_version"], 5);
        assert_eq!(value["metadata"]["total_bodies"], 8);
        assert_eq!(value["metadata"]["total_processes"], 2);
        assert_eq!(value["metadata"]["export_date"], "2026-03-02T09:30:00+00:00");
        assert_eq!(value["efficiency_summary"]["avg_efficiency"], 3.125);
        assert_eq!(value["efficiency_summary"]["high_cost_bodies"], 4);
        assert_eq!(value["governance_bodies"][0]["Outcome_Focus"][0], "Fairer Westminster (Reducing Inequality)");
    }

    #[test]
    fn test_empty_store_has_null_summary() {
        let text = export_package(&GovernanceRecordStore::new(), exported_at()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert!(value["efficiency_summary"].is_null());
    }

    #[test]
    fn test_tampered_package_is_rejected() {
        let text = export_package(&sample_store(), exported_at()).unwrap();
        let tampered = text.replacen("\"Efficiency_Score\": 4", "\"Efficiency_Score\": 5", 1);
        assert_ne!(tampered, text);
        assert!(matches!(import_package(&tampered), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_missing_keys_mean_no_change() {
        let batch = import_package(r#"{"metadata": {"schema_version": 5}, "processes": []}"#).unwrap();
        assert!(batch.bodies.is_none());
        assert_eq!(batch.processes, Some(vec![]));
        assert!(batch.diagnostic_notes.is_none());
        assert!(batch.five_forces.is_none());
    }

    #[test]
    fn test_bodies_array_round_trip() {
        let bodies = sample::governance_bodies();
        let text = export_bodies(&bodies).unwrap();
        let batch = import_package(&text).unwrap();
        assert_eq!(batch.bodies, Some(bodies));
    }

    #[test]
    fn test_legacy_package_is_upgraded() {
        let legacy = json!({
            "metadata": {"export_date": "2025-01-10T12:00:00", "tool_version": "2.0.0",
                         "total_bodies": 1, "total_processes": 0},
            "governance_bodies": [{
                "Name": "Audit Committee",
                "Type": "Committee",
                "Level": "Strategic (Cabinet/Corporate)",
                "Mandate": null,
                "Outcome_Focus": "Service Efficiency and Cost Reduction",
                "Process_Type": "Explicit (Documented Processes)",
                "Lifecycle_Stage": "Evaluation, Selection/Prioritisation",
                "Innovation_Posture": "Exploit (Efficiency/Cost Reduction)",
                "Rogers_Category": "Late Majority",
                "Decision_Rights": "Scrutiny",
                "Efficiency_Score": 4.0,
                "Cost_Impact": "Medium",
                "Value_Added": 3.0,
                "Duplication_Risk": 2.0
            }],
            "processes": [],
            "diagnostic_notes": {"commercial": "", "place_based_prevention": "",
                                 "data_gathering": "Interviews booked", "general_observations": ""},
            "efficiency_summary": {"avg_efficiency": 4.0, "high_cost_bodies": 0,
                                   "duplication_risk": 0, "total_bodies": 1}
        });

        let batch = import_package(&legacy.to_string()).unwrap();
        let bodies = batch.bodies.unwrap();
        assert_eq!(bodies[0].efficiency_score, 4);
        assert_eq!(bodies[0].lifecycle_stage.len(), 2);
        assert_eq!(bodies[0].mandate, "");
        assert_eq!(batch.diagnostic_notes.unwrap().data_gathering, "Interviews booked");
    }

    #[test]
    fn test_malformed_json_is_a_deserialization_error() {
        assert!(matches!(import_package("{not json"), Err(AppError::Deserialization(_))));
        assert!(matches!(
            import_package(r#"{"governance_bodies": [{"Name": 7}]}"#),
            Err(AppError::Deserialization(_))
        ));
    }
}
