//! Governance record store
//!
//! Owns the ordered collections of bodies and processes plus the diagnostic
//! notes and Five Forces profile. Every mutation is validated against the
//! whole candidate collection before it is committed, so a failed call
//! leaves the store untouched.

use crate::error::{conflict_error, not_found_error, validation_error, AppError};
use crate::models::{DiagnosticNotes, FiveForcesProfile, GovernanceBody, ProcessRecord};
use crate::registry::filter::BodyFilter;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};
use validator::Validate;

/// How an import combines with the current contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Discard the current collection and use the imported one
    #[default]
    Replace,
    /// Keep the current collection and add the imported records after it
    Append,
}

/// Everything an import may carry; `None` leaves that part unchanged
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    pub bodies: Option<Vec<GovernanceBody>>,
    pub processes: Option<Vec<ProcessRecord>>,
    pub diagnostic_notes: Option<DiagnosticNotes>,
    pub five_forces: Option<FiveForcesProfile>,
}

/// Counts reported back after a successful import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub total_bodies: usize,
    pub total_processes: usize,
    pub notes_replaced: bool,
    pub five_forces_replaced: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GovernanceRecordStore {
    bodies: Vec<GovernanceBody>,
    processes: Vec<ProcessRecord>,
    notes: DiagnosticNotes,
    five_forces: FiveForcesProfile,
}

impl GovernanceRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bodies(&self) -> &[GovernanceBody] {
        &self.bodies
    }

    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    pub fn diagnostic_notes(&self) -> &DiagnosticNotes {
        &self.notes
    }

    pub fn five_forces(&self) -> &FiveForcesProfile {
        &self.five_forces
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty() && self.processes.is_empty()
    }

    pub fn body_names(&self) -> Vec<&str> {
        self.bodies.iter().map(|b| b.name.as_str()).collect()
    }

    // ==================== Governance bodies ====================

    pub fn get_body(&self, name: &str) -> Result<&GovernanceBody, AppError> {
        self.bodies
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| not_found_error(format!("Governance body '{}' not found", name)))
    }

    /// Insertion-ordered view of the bodies matching `filter`
    pub fn list_bodies<'a>(
        &'a self,
        filter: &'a BodyFilter,
    ) -> impl Iterator<Item = &'a GovernanceBody> + 'a {
        filter.apply(&self.bodies)
    }

    /// Append a new body
    pub fn add_body(&mut self, body: GovernanceBody) -> Result<&GovernanceBody, AppError> {
        let body = normalize_body(body);
        if self.bodies.iter().any(|b| b.name == body.name) {
            return Err(conflict_error(format!(
                "A governance body named '{}' already exists",
                body.name
            )));
        }

        let mut bodies = self.bodies.clone();
        bodies.push(body);
        check_integrity(&bodies, &self.processes)?;
        self.bodies = bodies;

        let added = &self.bodies[self.bodies.len() - 1];
        info!("Added governance body '{}'", added.name);
        Ok(added)
    }

    /// Replace the body called `name` wholesale.
    ///
    /// A rename is allowed when the new name is free; references held by
    /// other bodies and processes follow the rename.
    pub fn update_body(
        &mut self,
        name: &str,
        body: GovernanceBody,
    ) -> Result<&GovernanceBody, AppError> {
        let body = normalize_body(body);
        let index = self.body_index(name)?;
        let renamed = body.name != name;

        if renamed && self.bodies.iter().any(|b| b.name == body.name) {
            return Err(conflict_error(format!(
                "A governance body named '{}' already exists",
                body.name
            )));
        }

        let new_name = body.name.clone();
        let mut bodies = self.bodies.clone();
        let mut processes = self.processes.clone();
        bodies[index] = body;
        if renamed {
            for other in bodies.iter_mut() {
                other.rename_references(name, &new_name);
            }
            for process in processes.iter_mut() {
                process.governance_touchpoints.rename(name, &new_name);
            }
        }

        check_integrity(&bodies, &processes)?;
        self.bodies = bodies;
        self.processes = processes;

        if renamed {
            info!("Updated governance body '{}' (renamed to '{}')", name, new_name);
        } else {
            info!("Updated governance body '{}'", name);
        }
        Ok(&self.bodies[index])
    }

    /// Remove the body called `name`.
    ///
    /// Refused while any other body or process still references it.
    pub fn delete_body(&mut self, name: &str) -> Result<GovernanceBody, AppError> {
        let index = self.body_index(name)?;

        let referrers: Vec<&str> = self
            .bodies
            .iter()
            .filter(|b| b.name != name && b.references(name))
            .map(|b| b.name.as_str())
            .chain(
                self.processes
                    .iter()
                    .filter(|p| p.governance_touchpoints.contains(name))
                    .map(|p| p.name.as_str()),
            )
            .collect();

        if !referrers.is_empty() {
            return Err(conflict_error(format!(
                "Governance body '{}' is still referenced by: {}",
                name,
                referrers.join(", ")
            )));
        }

        let removed = self.bodies.remove(index);
        info!("Deleted governance body '{}'", removed.name);
        Ok(removed)
    }

    fn body_index(&self, name: &str) -> Result<usize, AppError> {
        self.bodies
            .iter()
            .position(|b| b.name == name)
            .ok_or_else(|| not_found_error(format!("Governance body '{}' not found", name)))
    }

    // ==================== Processes ====================

    pub fn get_process(&self, name: &str) -> Result<&ProcessRecord, AppError> {
        self.processes
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| not_found_error(format!("Process '{}' not found", name)))
    }

    pub fn add_process(&mut self, process: ProcessRecord) -> Result<&ProcessRecord, AppError> {
        let process = normalize_process(process);
        if self.processes.iter().any(|p| p.name == process.name) {
            return Err(conflict_error(format!(
                "A process named '{}' already exists",
                process.name
            )));
        }

        let mut processes = self.processes.clone();
        processes.push(process);
        check_integrity(&self.bodies, &processes)?;
        self.processes = processes;

        let added = &self.processes[self.processes.len() - 1];
        info!("Added process '{}'", added.name);
        Ok(added)
    }

    pub fn update_process(
        &mut self,
        name: &str,
        process: ProcessRecord,
    ) -> Result<&ProcessRecord, AppError> {
        let process = normalize_process(process);
        let index = self
            .processes
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| not_found_error(format!("Process '{}' not found", name)))?;

        if process.name != name && self.processes.iter().any(|p| p.name == process.name) {
            return Err(conflict_error(format!(
                "A process named '{}' already exists",
                process.name
            )));
        }

        let mut processes = self.processes.clone();
        processes[index] = process;
        check_integrity(&self.bodies, &processes)?;
        self.processes = processes;

        info!("Updated process '{}'", name);
        Ok(&self.processes[index])
    }

    pub fn delete_process(&mut self, name: &str) -> Result<ProcessRecord, AppError> {
        let index = self
            .processes
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| not_found_error(format!("Process '{}' not found", name)))?;

        let removed = self.processes.remove(index);
        info!("Deleted process '{}'", removed.name);
        Ok(removed)
    }

    // ==================== Notes & Five Forces ====================

    pub fn set_diagnostic_notes(&mut self, notes: DiagnosticNotes) {
        debug!("Diagnostic notes overwritten");
        self.notes = notes;
    }

    pub fn set_five_forces(&mut self, profile: FiveForcesProfile) -> Result<(), AppError> {
        profile.validate()?;
        self.five_forces = profile;
        debug!("Five Forces profile updated");
        Ok(())
    }

    // ==================== Bulk ====================

    /// Apply an import atomically: either every part is accepted or the
    /// store is left exactly as it was.
    pub fn import_bulk(
        &mut self,
        batch: ImportBatch,
        mode: ImportMode,
    ) -> Result<ImportOutcome, AppError> {
        let bodies: Vec<GovernanceBody> = merge(&self.bodies, batch.bodies, mode)
            .into_iter()
            .map(normalize_body)
            .collect();
        let processes: Vec<ProcessRecord> = merge(&self.processes, batch.processes, mode)
            .into_iter()
            .map(normalize_process)
            .collect();

        check_integrity(&bodies, &processes)?;
        if let Some(forces) = &batch.five_forces {
            forces.validate()?;
        }

        let outcome = ImportOutcome {
            total_bodies: bodies.len(),
            total_processes: processes.len(),
            notes_replaced: batch.diagnostic_notes.is_some(),
            five_forces_replaced: batch.five_forces.is_some(),
        };

        self.bodies = bodies;
        self.processes = processes;
        if let Some(notes) = batch.diagnostic_notes {
            self.notes = notes;
        }
        if let Some(forces) = batch.five_forces {
            self.five_forces = forces;
        }

        info!(
            "Imported governance map ({:?}): {} bodies, {} processes",
            mode, outcome.total_bodies, outcome.total_processes
        );
        Ok(outcome)
    }
}

fn merge<T: Clone>(current: &[T], incoming: Option<Vec<T>>, mode: ImportMode) -> Vec<T> {
    match (incoming, mode) {
        (None, _) => current.to_vec(),
        (Some(records), ImportMode::Replace) => records,
        (Some(records), ImportMode::Append) => {
            let mut all = current.to_vec();
            all.extend(records);
            all
        }
    }
}

fn normalize_body(mut body: GovernanceBody) -> GovernanceBody {
    body.name = body.name.trim().to_string();
    body
}

fn normalize_process(mut process: ProcessRecord) -> ProcessRecord {
    process.name = process.name.trim().to_string();
    process
}

/// Check a candidate state: field rules, unique names, and that every body
/// reference resolves to a body in the same candidate.
pub fn check_integrity(
    bodies: &[GovernanceBody],
    processes: &[ProcessRecord],
) -> Result<(), AppError> {
    let mut names = HashSet::new();
    for body in bodies {
        body.validate()
            .map_err(|e| validation_error(format!("Governance body '{}': {}", body.name, e)))?;
        if !names.insert(body.name.as_str()) {
            return Err(conflict_error(format!(
                "A governance body named '{}' already exists",
                body.name
            )));
        }
    }

    for body in bodies {
        for reference in body.referenced_bodies() {
            if reference == body.name {
                return Err(validation_error(format!(
                    "Governance body '{}' cannot reference itself",
                    body.name
                )));
            }
            if !names.contains(reference) {
                return Err(validation_error(format!(
                    "Governance body '{}' references unknown body '{}'",
                    body.name, reference
                )));
            }
        }
    }

    let mut process_names = HashSet::new();
    for process in processes {
        process
            .validate()
            .map_err(|e| validation_error(format!("Process '{}': {}", process.name, e)))?;
        if !process_names.insert(process.name.as_str()) {
            return Err(conflict_error(format!(
                "A process named '{}' already exists",
                process.name
            )));
        }
        if let Some(unknown) = process
            .governance_touchpoints
            .iter()
            .find(|t| !names.contains(t))
        {
            return Err(validation_error(format!(
                "Process '{}' references unknown body '{}'",
                process.name, unknown
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Level, TagList};
    use crate::registry::filter::{sort_view, SortKey};
    use crate::registry::sample;
    use pretty_assertions::assert_eq;
    use tokio_test::{assert_err, assert_ok};

    fn seeded() -> GovernanceRecordStore {
        let mut store = GovernanceRecordStore::new();
        let batch = ImportBatch {
            bodies: Some(sample::governance_bodies()),
            processes: Some(sample::processes()),
            ..Default::default()
        };
        assert_ok!(store.import_bulk(batch, ImportMode::Replace));
        store
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut store = GovernanceRecordStore::new();
        for body in sample::governance_bodies().into_iter().rev() {
            let mut body = body;
            body.escalation_to = TagList::default();
            body.escalation_from = TagList::default();
            assert_ok!(store.add_body(body));
        }
        assert_eq!(store.bodies().len(), 8);
        assert_eq!(store.bodies()[0].name, "Place-Based Prevention Network");
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut store = GovernanceRecordStore::new();
        let mut body = sample::governance_bodies().remove(4);
        body.name = "  ".to_string();
        let err = store.add_body(body).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.bodies().is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate_name() {
        let mut store = seeded();
        let duplicate = sample::governance_bodies().remove(4);
        let err = store.add_body(duplicate).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.bodies().len(), 8);
    }

    #[test]
    fn test_add_rejects_dangling_reference() {
        let mut store = seeded();
        let mut body = sample::governance_bodies().remove(4);
        body.name = "Youth Forum".to_string();
        body.escalation_to = TagList::new(["Full Council"]);
        let err = store.add_body(body).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("Full Council")));
    }

    #[test]
    fn test_add_rejects_out_of_range_score() {
        let mut store = GovernanceRecordStore::new();
        let mut body = sample::governance_bodies().remove(4);
        body.duplication_risk = 0;
        assert_err!(store.add_body(body));
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let mut store = seeded();
        let mut body = store.get_body("Service Innovation Forum").unwrap().clone();
        body.efficiency_score = 5;
        body.mandate = String::new();
        let updated = store.update_body("Service Innovation Forum", body.clone()).unwrap();
        assert_eq!(updated, &body);
        assert_eq!(store.bodies()[4].efficiency_score, 5);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let mut store = seeded();
        let body = sample::governance_bodies().remove(0);
        let err = store.update_body("Nope", body).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_rename_rewrites_references() {
        let mut store = seeded();
        let mut body = store.get_body("Procuring Board").unwrap().clone();
        body.name = "Strategic Procurement Board".to_string();
        assert_ok!(store.update_body("Procuring Board", body));

        let gateway = store.get_body("Commercial Gateway Review Board").unwrap();
        assert!(gateway.escalation_to.contains("Strategic Procurement Board"));
        let elt = store.get_body("Executive Leadership Team").unwrap();
        assert!(elt.escalation_from.contains("Strategic Procurement Board"));
        let procurement = store.get_process("Commercial Procurement").unwrap();
        assert!(procurement.governance_touchpoints.contains("Strategic Procurement Board"));
    }

    #[test]
    fn test_rename_onto_existing_name_conflicts() {
        let mut store = seeded();
        let mut body = store.get_body("Procuring Board").unwrap().clone();
        body.name = "Cabinet".to_string();
        let err = store.update_body("Procuring Board", body).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_delete_referenced_body_is_blocked() {
        let mut store = seeded();
        let err = store.delete_body("Procuring Board").unwrap_err();
        match err {
            AppError::Conflict(msg) => {
                assert!(msg.contains("Commercial Gateway Review Board"));
                assert!(msg.contains("Commercial Procurement"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.bodies().len(), 8);
    }

    #[test]
    fn test_delete_by_name_from_filtered_reordered_view() {
        let mut store = seeded();

        // The view on screen: non-strategic bodies, most efficient first

        let filter = BodyFilter {
            levels: [Level::Operational, Level::Tactical, Level::Community]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        let mut view: Vec<&GovernanceBody> = store.list_bodies(&filter).collect();
        sort_view(&mut view, SortKey::EfficiencyScore, true);
        let row = 1;
        let target = view[row].name.clone();
        // Positions in the view and the store disagree
        let store_position = store.bodies().iter().position(|b| b.name == target).unwrap();
        assert_ne!(store_position, row);

        let removed = store.delete_body(&target).unwrap();
        assert_eq!(removed.name, target);
        assert_eq!(store.bodies().len(), 7);
        assert!(store.get_body(&target).is_err());
        assert_eq!(
            store.bodies().iter().filter(|b| b.name == target).count(),
            0
        );
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let mut store = seeded();
        assert!(matches!(store.delete_body("Ghost Board"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_process_lifecycle() {
        let mut store = seeded();
        let mut process = sample::processes().remove(0);
        process.name = "Contract Management".to_string();
        assert_ok!(store.add_process(process.clone()));
        assert!(matches!(store.add_process(process.clone()), Err(AppError::Conflict(_))));

        process.efficiency_rating = 4;
        assert_ok!(store.update_process("Contract Management", process));
        assert_eq!(store.get_process("Contract Management").unwrap().efficiency_rating, 4);

        assert_ok!(store.delete_process("Contract Management"));
        assert_eq!(store.processes().len(), 2);
    }

    #[test]
    fn test_process_touchpoint_must_exist() {
        let mut store = seeded();
        let mut process = sample::processes().remove(0);
        process.name = "Budget Setting".to_string();
        process.governance_touchpoints = TagList::new(["Budget Board"]);
        assert!(matches!(store.add_process(process), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_import_is_atomic() {
        let mut store = seeded();
        let before = store.clone();

        let mut bodies = sample::governance_bodies();
        bodies[3].value_added = 9;
        let batch = ImportBatch {
            bodies: Some(bodies),
            diagnostic_notes: Some(DiagnosticNotes {
                commercial: "should not land".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_err!(store.import_bulk(batch, ImportMode::Replace));
        assert_eq!(store, before);
    }

    #[test]
    fn test_import_missing_parts_leave_state() {
        let mut store = seeded();
        let notes = DiagnosticNotes {
            data_gathering: "Interviews 60% complete".to_string(),
            ..Default::default()
        };
        let batch = ImportBatch {
            diagnostic_notes: Some(notes.clone()),
            ..Default::default()
        };
        let outcome = store.import_bulk(batch, ImportMode::Replace).unwrap();
        assert_eq!(outcome.total_bodies, 8);
        assert!(outcome.notes_replaced);
        assert_eq!(store.diagnostic_notes(), &notes);
        assert_eq!(store.processes().len(), 2);
    }

    #[test]
    fn test_import_append_rejects_duplicates() {
        let mut store = seeded();
        let batch = ImportBatch {
            bodies: Some(vec![sample::governance_bodies().remove(0)]),
            ..Default::default()
        };
        assert!(matches!(
            store.import_bulk(batch, ImportMode::Append),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_import_replace_bodies_must_keep_process_touchpoints() {
        let mut store = seeded();
        let bodies: Vec<_> = sample::governance_bodies()
            .into_iter()
            .filter(|b| b.name == "Service Innovation Forum")
            .collect();
        let batch = ImportBatch {
            bodies: Some(bodies),
            ..Default::default()
        };
        assert!(matches!(
            store.import_bulk(batch, ImportMode::Replace),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_five_forces_validation() {
        let mut store = GovernanceRecordStore::new();
        let mut forces = FiveForcesProfile::default();
        forces.rivalry = 0;
        assert_err!(store.set_five_forces(forces));
        assert_eq!(store.five_forces(), &FiveForcesProfile::default());
    }
}
