//! The three dependency checks.
//!
//! | Check | Input | Failure mode |
//! |-------|-------|--------------|
//! | [`OutdatedChecker`] | a [`Registry`](crate::registry::Registry) | per-dependency skip |
//! | [`UnusedChecker`] | a [`SourceCorpus`](crate::corpus::SourceCorpus) | none once the corpus is read |
//! | [`VulnerabilityChecker`] | a [`VulnerabilityTable`] | none |
//!
//! All three are heuristics built on text containment. They share no state
//! and can run in any order or concurrently.

mod outdated;
mod unused;
mod vulnerability;

pub use outdated::{is_outdated, OutdatedChecker, DEFAULT_MAX_CONCURRENT};
pub use unused::{reference_tokens, UnusedChecker};
pub use vulnerability::{
    declared_version, VulnerabilityChecker, VulnerabilityRule, VulnerabilityTable,
    VulnerableRange,
};
