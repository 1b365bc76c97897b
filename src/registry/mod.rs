//! Governance registry
//!
//! The record store and the views over it.

pub mod filter;
pub mod sample;
mod store;

pub use filter::{sort_view, BodyFilter, SortKey};
pub use store::{check_integrity, GovernanceRecordStore, ImportBatch, ImportMode, ImportOutcome};
