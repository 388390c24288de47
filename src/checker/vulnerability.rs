//! Matching declared dependencies against a fixed vulnerability table.
//!
//! The built-in table is a handful of well-known advisories kept for
//! demonstration; it is not a vulnerability feed.

use crate::model::{DependencySet, VulnerabilityEntry};
use semver::Version;
use serde::{Deserialize, Serialize};

/// Which declared ranges a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VulnerableRange {
    /// The declared range contains this text.
    Contains(String),
    /// The version written in the declared range is lower than this one.
    Below(Version),
}

impl VulnerableRange {
    /// Parses `<1.2.3` as [`VulnerableRange::Below`]; anything else is
    /// matched as text.
    pub fn parse(range: &str) -> Self {
        let range = range.trim();
        range
            .strip_prefix('<')
            .and_then(|bound| Version::parse(bound.trim()).ok())
            .map(VulnerableRange::Below)
            .unwrap_or_else(|| VulnerableRange::Contains(range.to_string()))
    }

    pub fn matches(&self, declared: &str) -> bool {
        match self {
            VulnerableRange::Contains(text) => declared.contains(text.as_str()),
            VulnerableRange::Below(bound) => declared_version(declared)
                .map(|version| version < *bound)
                .unwrap_or(false),
        }
    }
}

/// The concrete version a range string is written around, e.g. `4.17.20`
/// for `^4.17.20`. Compound ranges and tags yield `None`.
pub fn declared_version(declared: &str) -> Option<Version> {
    let trimmed = declared
        .trim()
        .trim_start_matches(['^', '~', '=', 'v'])
        .trim();
    Version::parse(trimmed).ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityRule {
    pub package: String,
    pub range: VulnerableRange,
    pub issue: String,
}

impl VulnerabilityRule {
    pub fn new(package: impl Into<String>, range: &str, issue: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            range: VulnerableRange::parse(range),
            issue: issue.into(),
        }
    }
}

/// The set of rules a [`VulnerabilityChecker`] matches against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VulnerabilityTable {
    rules: Vec<VulnerabilityRule>,
}

impl VulnerabilityTable {
    pub fn new(rules: Vec<VulnerabilityRule>) -> Self {
        Self { rules }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            VulnerabilityRule::new(
                "lodash",
                "<4.17.21",
                "Command injection via template (CVE-2021-23337)",
            ),
            VulnerabilityRule::new(
                "minimist",
                "<1.2.6",
                "Prototype pollution (CVE-2021-44906)",
            ),
            VulnerabilityRule::new(
                "node-fetch",
                "<2.6.7",
                "Exposure of sensitive headers on redirect (CVE-2022-0235)",
            ),
            VulnerabilityRule::new(
                "axios",
                "<0.21.1",
                "Server-side request forgery (CVE-2020-28168)",
            ),
            VulnerabilityRule::new(
                "event-stream",
                "3.3.6",
                "Malicious flatmap-stream dependency",
            ),
        ])
    }

    fn rule_for(&self, package: &str) -> Option<&VulnerabilityRule> {
        self.rules.iter().find(|r| r.package == package)
    }
}

pub struct VulnerabilityChecker {
    table: VulnerabilityTable,
}

impl VulnerabilityChecker {
    pub fn new(table: VulnerabilityTable) -> Self {
        Self { table }
    }

    /// Returns one entry per dependency matching its table rule, in declaration order.
    pub fn check(&self, deps: &DependencySet) -> Vec<VulnerabilityEntry> {
        deps.iter()
            .filter_map(|dep| {
                let rule = self.table.rule_for(&dep.name)?;
                rule.range
                    .matches(&dep.version_range)
                    .then(|| VulnerabilityEntry {
                        name: dep.name.clone(),
                        version: dep.version_range.clone(),
                        issue: rule.issue.clone(),
                    })
            })
            .collect()
    }
}

impl Default for VulnerabilityChecker {
    fn default() -> Self {
        Self::new(VulnerabilityTable::builtin())
    }
}
