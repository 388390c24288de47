//! Core data types for declared dependencies and audit results.
//!
//! - [`Dependency`] / [`DependencySet`] - what the manifest declares
//! - [`OutdatedEntry`] - a dependency behind the registry's latest tag
//! - [`VulnerabilityEntry`] - a dependency matching the vulnerability table
//! - [`ScanFindings`] - the three result lists, for display
//! - [`Report`] - the findings plus a timestamp, as persisted
//!
//! # Example
//!
//! ```
//! use depaudit::{DependencySet, Report, ScanFindings};
//!
//! let mut deps = DependencySet::new();
//! deps.insert("chalk", "^4.0.0");
//!
//! let report = Report::new(ScanFindings::default());
//! assert!(report.outdated.is_empty());
//! assert_eq!(deps.get("chalk"), Some("^4.0.0"));
//! ```

mod dependency;
mod report;

pub use dependency::*;
pub use report::*;
