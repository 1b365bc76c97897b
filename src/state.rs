//! Application state management
//!
//! Contains shared state accessible across all handlers. The governance map
//! lives in one record store behind a `RwLock`; writes are serialized and,
//! when a data file is configured, persisted before they become visible.

use crate::error::AppError;
use crate::registry::GovernanceRecordStore;
use crate::storage::DataFile;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::error;

/// Application state shared across all handlers
pub struct AppState {
    store: RwLock<GovernanceRecordStore>,

    /// Optional backing file, rewritten after every successful change
    data_file: Option<DataFile>,
}

impl AppState {
    pub fn new(store: GovernanceRecordStore, data_file: Option<DataFile>) -> Self {
        Self {
            store: RwLock::new(store),
            data_file,
        }
    }

    /// In-memory state with no backing file
    #[cfg(test)]
    pub fn in_memory(store: GovernanceRecordStore) -> Self {
        Self::new(store, None)
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, GovernanceRecordStore> {
        self.store.read().await
    }

    /// Apply a change under the write lock.
    ///
    /// The change runs against a copy of the store. The copy replaces the
    /// live store only when the change succeeded and, with a data file,
    /// has been written to disk; otherwise nothing is changed.
    pub async fn mutate<F, T>(&self, change: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut GovernanceRecordStore) -> Result<T, AppError>,
    {
        let mut guard = self.store.write().await;
        let mut candidate = guard.clone();
        let output = change(&mut candidate)?;

        if let Some(file) = &self.data_file {
            if let Err(e) = file.save(&candidate).await {
                error!("❌ Failed to persist governance map to {}: {}", file.path().display(), e);
                return Err(e);
            }
        }

        *guard = candidate;
        Ok(output)
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
