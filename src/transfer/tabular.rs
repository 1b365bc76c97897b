//! CSV import and export
//!
//! One header row in column declaration order, one row per record. Tag
//! lists are written as a single escaped cell (see [`TagList::encode`]).
//! On read, columns are looked up by header name so files with reordered
//! or missing optional columns still load.

use crate::error::{validation_error, AppError};
use crate::models::{
    score::clamp_score, CostDriver, GovernanceBody, ProcessRecord, TagList, BODY_COLUMNS,
    PROCESS_COLUMNS,
};
use std::collections::HashMap;
use std::str::FromStr;

// ============================================
// Writing
// ============================================

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn body_cells(body: &GovernanceBody) -> Vec<String> {
    vec![
        body.name.clone(),
        body.body_type.clone(),
        body.level.to_string(),
        body.mandate.clone(),
        body.outcome_focus.encode(),
        body.process_type.to_string(),
        body.lifecycle_stage.encode(),
        body.innovation_posture.to_string(),
        body.rogers_category.to_string(),
        body.structure_type.clone(),
        body.decision_rights.clone(),
        body.inputs.clone(),
        body.outputs.clone(),
        body.escalation_to.encode(),
        body.escalation_from.encode(),
        body.networks.encode(),
        body.meeting_cadence.clone(),
        body.efficiency_score.to_string(),
        body.cost_impact.to_string(),
        body.value_added.to_string(),
        body.duplication_risk.to_string(),
        body.primary_stakeholders.encode(),
        optional(body.stakeholder_power),
        optional(body.stakeholder_interest),
        optional(body.decision_speed),
        body.governance_touchpoints.encode(),
        optional(body.rag_status),
        optional(body.rag_recommendation),
        body.fairer_westminster_alignment.encode(),
        optional(body.fw_fairer_communities),
        optional(body.fw_fairer_housing),
        optional(body.fw_fairer_economy),
        optional(body.fw_fairer_environment),
        optional(body.fw_fairer_council),
    ]
}

fn process_cells(process: &ProcessRecord) -> Vec<String> {
    vec![
        process.name.clone(),
        process.process_type.to_string(),
        process.purpose.clone(),
        process.current_state.to_string(),
        process.lifecycle_stage.encode(),
        process.governance_touchpoints.encode(),
        process.timeline_position.clone(),
        process.rogers_stage.to_string(),
        process.efficiency_rating.to_string(),
        process.cost_driver.to_string(),
    ]
}

fn write_table<I>(columns: &[&str], rows: I) -> Result<String, AppError>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV output: {}", e)))?;
    String::from_utf8(bytes)
        .map_err(|e| AppError::Internal(format!("CSV output was not UTF-8: {}", e)))
}

pub fn write_bodies(bodies: &[GovernanceBody]) -> Result<String, AppError> {
    write_table(BODY_COLUMNS, bodies.iter().map(body_cells))
}

pub fn write_processes(processes: &[ProcessRecord]) -> Result<String, AppError> {
    write_table(PROCESS_COLUMNS, processes.iter().map(process_cells))
}

// ============================================
// Reading
// ============================================

/// A data row with its header lookup
struct Row<'a> {
    line: u64,
    record: &'a csv::StringRecord,
    columns: &'a HashMap<String, usize>,
}

impl<'a> Row<'a> {
    /// Cell exactly as written
    fn cell(&self, column: &str) -> Option<&'a str> {
        self.columns.get(column).and_then(|&idx| self.record.get(idx))
    }

    /// Cell with surrounding whitespace removed, for labels and scores
    fn trimmed(&self, column: &str) -> Option<&'a str> {
        self.cell(column).map(str::trim)
    }

    fn error(&self, column: &str, detail: impl std::fmt::Display) -> AppError {
        AppError::Deserialization(format!("line {}, column {}: {}", self.line, column, detail))
    }

    /// Free text, kept verbatim; an absent column reads as empty
    fn text(&self, column: &str) -> String {
        self.cell(column).unwrap_or_default().to_string()
    }

    fn tags(&self, column: &str) -> TagList {
        self.trimmed(column).map(TagList::decode).unwrap_or_default()
    }

    fn label<T>(&self, column: &str) -> Result<T, AppError>
    where
        T: FromStr<Err = String>,
    {
        match self.trimmed(column) {
            Some(value) if !value.is_empty() => value.parse().map_err(|e| self.error(column, e)),
            _ => Err(validation_error(format!(
                "line {}: {} is required",
                self.line, column
            ))),
        }
    }

    fn optional_label<T>(&self, column: &str) -> Result<Option<T>, AppError>
    where
        T: FromStr<Err = String>,
    {
        match self.trimmed(column) {
            Some(value) if !value.is_empty() => {
                value.parse().map(Some).map_err(|e| self.error(column, e))
            }
            _ => Ok(None),
        }
    }

    fn score(&self, column: &str) -> Result<u8, AppError> {
        self.optional_score(column)?.ok_or_else(|| {
            validation_error(format!("line {}: {} is required", self.line, column))
        })
    }

    /// Integer score; spreadsheet-style "4.0" is accepted, "4.5" is not.
    /// Whole numbers outside the score scale are left for validation.
    fn optional_score(&self, column: &str) -> Result<Option<u8>, AppError> {
        let Some(value) = self.trimmed(column).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        if let Ok(score) = value.parse::<i64>() {
            return Ok(Some(clamp_score(score)));
        }
        match value.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 => Ok(Some(clamp_score(f as i64))),
            _ => Err(self.error(column, format!("'{}' is not a whole-number score", value))),
        }
    }
}

fn read_table<T, F>(text: &str, required: &[&str], mut parse: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(&Row<'_>) -> Result<T, AppError>,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let columns: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(idx, h)| (h.trim().to_string(), idx))
        .collect();

    if let Some(missing) = required.iter().find(|c| !columns.contains_key(**c)) {
        return Err(AppError::Deserialization(format!(
            "CSV is missing required column '{}'",
            missing
        )));
    }

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = Row {
            // header is line 1
            line: record.position().map_or(idx as u64 + 2, |p| p.line()),
            record: &record,
            columns: &columns,
        };
        records.push(parse(&row)?);
    }
    Ok(records)
}

const REQUIRED_BODY_COLUMNS: &[&str] = &[
    "Name",
    "Type",
    "Level",
    "Process_Type",
    "Innovation_Posture",
    "Rogers_Category",
    "Decision_Rights",
    "Efficiency_Score",
    "Cost_Impact",
    "Value_Added",
    "Duplication_Risk",
];

const REQUIRED_PROCESS_COLUMNS: &[&str] = &[
    "Process_Name",
    "Process_Type",
    "Purpose",
    "Current_State",
    "Rogers_Stage",
    "Efficiency_Rating",
];

fn parse_body(row: &Row<'_>) -> Result<GovernanceBody, AppError> {
    Ok(GovernanceBody {
        name: row.text("Name"),
        body_type: row.text("Type"),
        level: row.label("Level")?,
        mandate: row.text("Mandate"),
        outcome_focus: row.tags("Outcome_Focus"),
        process_type: row.label("Process_Type")?,
        lifecycle_stage: row.tags("Lifecycle_Stage"),
        innovation_posture: row.label("Innovation_Posture")?,
        rogers_category: row.label("Rogers_Category")?,
        structure_type: row.text("Structure_Type"),
        decision_rights: row.text("Decision_Rights"),
        inputs: row.text("Inputs"),
        outputs: row.text("Outputs"),
        escalation_to: row.tags("Escalation_To"),
        escalation_from: row.tags("Escalation_From"),
        networks: row.tags("Networks"),
        meeting_cadence: row.text("Meeting_Cadence"),
        efficiency_score: row.score("Efficiency_Score")?,
        cost_impact: row.label("Cost_Impact")?,
        value_added: row.score("Value_Added")?,
        duplication_risk: row.score("Duplication_Risk")?,
        primary_stakeholders: row.tags("Primary_Stakeholders"),
        stakeholder_power: row.optional_label("Stakeholder_Power")?,
        stakeholder_interest: row.optional_label("Stakeholder_Interest")?,
        decision_speed: row.optional_label("Decision_Speed")?,
        governance_touchpoints: row.tags("Governance_Touchpoints"),
        rag_status: row.optional_label("RAG_Status")?,
        rag_recommendation: row.optional_label("RAG_Recommendation")?,
        fairer_westminster_alignment: row.tags("Fairer_Westminster_Alignment"),
        fw_fairer_communities: row.optional_score("FW_Fairer_Communities")?,
        fw_fairer_housing: row.optional_score("FW_Fairer_Housing")?,
        fw_fairer_economy: row.optional_score("FW_Fairer_Economy")?,
        fw_fairer_environment: row.optional_score("FW_Fairer_Environment")?,
        fw_fairer_council: row.optional_score("FW_Fairer_Council")?,
    })
}

fn parse_process(row: &Row<'_>) -> Result<ProcessRecord, AppError> {
    Ok(ProcessRecord {
        name: row.text("Process_Name"),
        process_type: row.label("Process_Type")?,
        purpose: row.text("Purpose"),
        current_state: row.label("Current_State")?,
        lifecycle_stage: row.tags("Lifecycle_Stage"),
        governance_touchpoints: row.tags("Governance_Touchpoints"),
        timeline_position: row.text("Timeline_Position"),
        rogers_stage: row.label("Rogers_Stage")?,
        efficiency_rating: row.score("Efficiency_Rating")?,
        cost_driver: row
            .optional_label("Cost_Driver")?
            .unwrap_or(CostDriver::Unknown),
    })
}

/// Parse a bodies CSV. Rows are only parsed here; field rules and
/// references are checked when the result is imported into a store.
pub fn read_bodies(text: &str) -> Result<Vec<GovernanceBody>, AppError> {
    read_table(text, REQUIRED_BODY_COLUMNS, parse_body)
}

pub fn read_processes(text: &str) -> Result<Vec<ProcessRecord>, AppError> {
    read_table(text, REQUIRED_PROCESS_COLUMNS, parse_process)
}
