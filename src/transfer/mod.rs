//! Import and export formats
//!
//! - `tabular`: CSV files of bodies or processes
//! - `package`: the JSON governance map package
//! - `schema`: package version detection and upgrades
//! - `report`: Markdown notes and governance report

pub mod package;
pub mod report;
pub mod schema;
pub mod tabular;

pub use package::{export_bodies, export_package, import_package};
pub use report::{governance_report, notes_markdown};
pub use tabular::{read_bodies, read_processes, write_bodies, write_processes};
