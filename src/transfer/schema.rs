//! Package schema versions and upgrades
//!
//! | version | shape |
//! |---|---|
//! | 1 | bare array of governance bodies |
//! | 2 | package object; spreadsheet-style cells (float scores, nulls, comma-joined tags) |
//! | 3 | tag columns as arrays |
//! | 4 | adds `five_forces` |
//! | 5 | adds `metadata.checksum` and `schema_version` |
//!
//! Versions 3 to 5 only add optional keys, so upgrading through them is a
//! matter of stamping the version.

use crate::error::AppError;
use crate::models::TagList;
use serde_json::{Map, Value};
use tracing::debug;

pub const SCHEMA_VERSION: u64 = 5;

const BODY_TAG_COLUMNS: &[&str] = &[
    "Outcome_Focus",
    "Lifecycle_Stage",
    "Escalation_To",
    "Escalation_From",
    "Networks",
    "Primary_Stakeholders",
    "Governance_Touchpoints",
    "Fairer_Westminster_Alignment",
];

const BODY_SCORE_COLUMNS: &[&str] = &[
    "Efficiency_Score",
    "Value_Added",
    "Duplication_Risk",
    "FW_Fairer_Communities",
    "FW_Fairer_Housing",
    "FW_Fairer_Economy",
    "FW_Fairer_Environment",
    "FW_Fairer_Council",
];

const PROCESS_TAG_COLUMNS: &[&str] = &["Lifecycle_Stage", "Governance_Touchpoints"];

const PROCESS_SCORE_COLUMNS: &[&str] = &["Efficiency_Rating"];

/// Version a document was written with.
///
/// Packages without `schema_version` are dated from the major part of
/// `tool_version`; a bare array predates packages altogether.
pub fn detect_version(document: &Value) -> Result<u64, AppError> {
    let metadata = match document {
        Value::Array(_) => return Ok(1),
        Value::Object(map) => map.get("metadata"),
        _ => {
            return Err(AppError::Deserialization(
                "Expected a governance map package object or an array of bodies".to_string(),
            ))
        }
    };

    let Some(metadata) = metadata else {
        return Ok(2);
    };

    if let Some(version) = metadata.get("schema_version").and_then(Value::as_u64) {
        return Ok(version);
    }

    let major = metadata
        .get("tool_version")
        .and_then(Value::as_str)
        .and_then(|v| v.split('.').next())
        .and_then(|major| major.parse::<u64>().ok())
        .unwrap_or(2);
    Ok(major.clamp(2, SCHEMA_VERSION))
}

/// Upgrade a document in place to the current schema, returning the version
/// it started at.
pub fn migrate(document: &mut Value) -> Result<u64, AppError> {
    let from = detect_version(document)?;
    if from > SCHEMA_VERSION {
        return Err(AppError::Deserialization(format!(
            "Package schema version {} is newer than the supported version {}",
            from, SCHEMA_VERSION
        )));
    }

    let mut version = from;
    while version < SCHEMA_VERSION {
        match version {
            1 => wrap_bare_array(document),
            2 => normalize_cells(document),
            _ => {}
        }
        version += 1;
    }

    stamp_version(document);
    if from < SCHEMA_VERSION {
        debug!("Migrated package from schema v{} to v{}", from, SCHEMA_VERSION);
    }
    Ok(from)
}

fn wrap_bare_array(document: &mut Value) {
    let bodies = std::mem::take(document);
    let mut map = Map::new();
    map.insert("governance_bodies".to_string(), bodies);
    *document = Value::Object(map);
}

fn normalize_cells(document: &mut Value) {
    for_each_record(document, "governance_bodies", |record| {
        normalize_record(record, BODY_TAG_COLUMNS, BODY_SCORE_COLUMNS)
    });
    for_each_record(document, "processes", |record| {
        normalize_record(record, PROCESS_TAG_COLUMNS, PROCESS_SCORE_COLUMNS)
    });
}

fn for_each_record<F>(document: &mut Value, key: &str, mut f: F)
where
    F: FnMut(&mut Map<String, Value>),
{
    if let Some(Value::Array(records)) = document.get_mut(key) {
        for record in records.iter_mut() {
            if let Value::Object(map) = record {
                f(map);
            }
        }
    }
}

fn normalize_record(record: &mut Map<String, Value>, tags: &[&str], scores: &[&str]) {
    // Empty spreadsheet cells were exported as null; let field defaults apply
    record.retain(|_, v| !v.is_null());

    for column in tags {
        let list: Option<Vec<Value>> = match record.get(*column) {
            Some(Value::String(cell)) => Some(
                TagList::decode(cell)
                    .iter()
                    .map(|t| Value::String(t.to_string()))
                    .collect(),
            ),
            _ => None,
        };
        if let Some(list) = list {
            record.insert(column.to_string(), Value::Array(list));
        }
    }

    for column in scores {
        let whole = match record.get(*column) {
            Some(Value::Number(n)) if n.as_u64().is_none() => n.as_f64().filter(|f| f.fract() == 0.0),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.fract() == 0.0),
            _ => None,
        };
        if let Some(score) = whole.filter(|f| *f >= 0.0) {
            record.insert(column.to_string(), Value::from(score as u64));
        }
    }
}

fn stamp_version(document: &mut Value) {
    let Value::Object(map) = document else {
        return;
    };
    let metadata = map
        .entry("metadata")
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(metadata) = metadata {
        metadata.insert("schema_version".to_string(), Value::from(SCHEMA_VERSION));
    }
}
