//! Data file persistence
//!
//! The store can be backed by one file on disk. A `.csv` path holds the
//! governance bodies only; any other path holds the full JSON package.
//! Every save rewrites the whole file through a temporary file in the same
//! directory, then renames it over the target. Nothing coordinates writers
//! across processes: two services sharing a file are last-writer-wins.

use crate::error::AppError;
use crate::registry::{GovernanceRecordStore, ImportBatch};
use crate::transfer::{export_package, import_package, read_bodies, write_bodies};
use chrono::Utc;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// Bodies-only CSV
    Csv,
    /// Complete JSON package
    Package,
}

#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
    format: DataFormat,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => DataFormat::Csv,
            _ => DataFormat::Package,
        };
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> DataFormat {
        self.format
    }

    /// Read the file as an import batch; `None` when it does not exist yet
    pub fn load(&self) -> Result<Option<ImportBatch>, AppError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Data file {} not found, starting empty", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        let batch = match self.format {
            DataFormat::Csv => ImportBatch {
                bodies: Some(read_bodies(&text)?),
                ..Default::default()
            },
            DataFormat::Package => import_package(&text)?,
        };
        info!("📂 Loaded data file {}", self.path.display());
        Ok(Some(batch))
    }

    /// File contents for the current store
    pub fn render(&self, store: &GovernanceRecordStore) -> Result<String, AppError> {
        match self.format {
            DataFormat::Csv => write_bodies(store.bodies()),
            DataFormat::Package => export_package(store, Utc::now()),
        }
    }

    /// Rewrite the file from `store`
    pub async fn save(&self, store: &GovernanceRecordStore) -> Result<(), AppError> {
        let contents = self.render(store)?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomic(&path, contents.as_bytes()))
            .await
            .map_err(|e| AppError::Internal(format!("Storage task failed: {}", e)))??;

        debug!("💾 Saved data file {}", self.path.display());
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| {
        AppError::Storage(format!("Failed to replace {}: {}", path.display(), e.error))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiagnosticNotes;
    use crate::registry::{sample, ImportMode};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;
    use tokio_test::{assert_err, assert_ok};

    fn sample_store() -> GovernanceRecordStore {
        let mut store = GovernanceRecordStore::new();
        store
            .import_bulk(
                ImportBatch {
                    bodies: Some(sample::governance_bodies()),
                    processes: Some(sample::processes()),
                    diagnostic_notes: Some(DiagnosticNotes {
                        data_gathering: "Survey closes Friday".to_string(),
                        ..Default::default()
                    }),
                    five_forces: None,
                },
                ImportMode::Replace,
            )
            .unwrap();
        store
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DataFile::new("map.csv").format(), DataFormat::Csv);
        assert_eq!(DataFile::new("MAP.CSV").format(), DataFormat::Csv);
        assert_eq!(DataFile::new("map.json").format(), DataFormat::Package);
        assert_eq!(DataFile::new("map").format(), DataFormat::Package);
    }

    #[test]
    fn test_missing_file_loads_as_none() {
        let dir = tempdir().unwrap();
        let file = DataFile::new(dir.path().join("absent.json"));
        assert!(assert_ok!(file.load()).is_none());
    }

    #[tokio::test]
    async fn test_package_file_round_trip() {
        let dir = tempdir().unwrap();
        let file = DataFile::new(dir.path().join("map.json"));
        let store = sample_store();
        assert_ok!(file.save(&store).await);

        let mut restored = GovernanceRecordStore::new();
        restored
            .import_bulk(file.load().unwrap().unwrap(), ImportMode::Replace)
            .unwrap();
        assert_eq!(restored, store);
    }

    #[tokio::test]
    async fn test_csv_file_keeps_bodies_only() {
        let dir = tempdir().unwrap();
        let file = DataFile::new(dir.path().join("bodies.csv"));
        let store = sample_store();
        assert_ok!(file.save(&store).await);

        let batch = file.load().unwrap().unwrap();
        assert_eq!(batch.bodies.as_deref(), Some(store.bodies()));
        assert!(batch.processes.is_none());
        assert!(batch.diagnostic_notes.is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let file = DataFile::new(dir.path().join("map.json"));
        assert_ok!(file.save(&sample_store()).await);
        assert_ok!(file.save(&GovernanceRecordStore::new()).await);

        let batch = file.load().unwrap().unwrap();
        assert_eq!(batch.bodies, Some(vec![]));
        // Only the data file remains; the temporary file was renamed away
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("map.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_err!(DataFile::new(&path).load());
    }
}
