//! Analysis over governance map snapshots
//!
//! - `aggregate`: means, counts and frequency tables
//! - `insights`: reform opportunities and the derived analyst views
//! - `network`: stakeholder cross-referencing and centrality

pub mod aggregate;
pub mod insights;
pub mod network;

pub use aggregate::{
    count_where, explode_multivalue, format_mean, group_by, group_by2, mean, CategoryField,
    GroupCount, GroupCount2, NumericField, TagField, TagRow,
};
pub use insights::{efficiency_summary, EfficiencySummary};
pub use network::{NetworkAnalyzer, NodeCentrality, StakeholderGraph};
