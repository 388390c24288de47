//! Configuration file handling.
//!
//! The configuration file is optional and stored at:
//! - Linux: `~/.config/depaudit/config.toml`
//! - macOS: `~/Library/Application Support/depaudit/config.toml`
//! - Windows: `%APPDATA%\depaudit\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! manifest_file = "package.json"
//! report_file = "dependency-report.json"
//! registry_url = "https://registry.npmjs.org"
//! request_timeout_secs = 10
//! max_concurrent_requests = 8
//! cache_ttl_hours = 24
//!
//! [sources]
//! extensions = ["js", "jsx", "mjs", "cjs", "ts", "tsx"]
//! exclude_dirs = ["node_modules"]
//!
//! [ignore]
//! unused = ["@types/*", "typescript"]
//! outdated = ["react"]
//! vulnerabilities = []
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::checker::DEFAULT_MAX_CONCURRENT;
use crate::corpus::SourceOptions;
use crate::registry::DEFAULT_REGISTRY_URL;

/// Application configuration.
///
/// Every field has a default, so a partial file (or none at all) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manifest to audit, relative to the working directory.
    pub manifest_file: PathBuf,

    /// Where `report` writes its JSON artifact, relative to the working directory.
    pub report_file: PathBuf,

    /// Base URL of the npm-compatible registry.
    pub registry_url: String,

    /// Upper bound on each registry request, in seconds.
    pub request_timeout_secs: u64,

    /// Registry lookups allowed in flight at once.
    pub max_concurrent_requests: usize,

    /// How long registry answers are cached, in hours. `0` disables the cache.
    pub cache_ttl_hours: u64,

    /// Which files the unused check reads.
    pub sources: SourceOptions,

    /// Packages left out of individual checks.
    pub ignore: IgnoreConfig,
}

/// Package-name patterns excluded from each check.
///
/// Patterns match exactly unless they contain `*`, e.g. `@types/*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    pub outdated: Vec<String>,
    pub unused: Vec<String>,
    pub vulnerabilities: Vec<String>,
}

impl IgnoreConfig {
    pub fn should_ignore_outdated(&self, package: &str) -> bool {
        matches_any(&self.outdated, package)
    }

    pub fn should_ignore_unused(&self, package: &str) -> bool {
        matches_any(&self.unused, package)
    }

    pub fn should_ignore_vulnerability(&self, package: &str) -> bool {
        matches_any(&self.vulnerabilities, package)
    }
}

fn matches_any(patterns: &[String], package: &str) -> bool {
    patterns.iter().any(|pattern| {
        if pattern.contains('*') {
            glob_match(pattern, package)
        } else {
            pattern == package
        }
    })
}

/// Simple glob matching (supports * as wildcard).
fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();

    if parts.len() == 1 {
        return pattern == text;
    }

    let first = parts[0];
    let last = parts[parts.len() - 1];

    if text.len() < first.len() + last.len() || !text.starts_with(first) || !text.ends_with(last)
    {
        return false;
    }

    let mut remaining = &text[first.len()..text.len() - last.len()];
    for part in &parts[1..parts.len() - 1] {
        match remaining.find(part) {
            Some(pos) => remaining = &remaining[pos + part.len()..],
            None => return false,
        }
    }

    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_file: PathBuf::from("package.json"),
            report_file: PathBuf::from("dependency-report.json"),
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            request_timeout_secs: 10,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT,
            cache_ttl_hours: 24,
            sources: SourceOptions::default(),
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads the config file, or defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("depaudit")
            .join("config.toml")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match_exact() {
        assert!(glob_match("lodash", "lodash"));
        assert!(!glob_match("lodash", "underscore"));
    }

    #[test]
    fn test_glob_match_prefix_and_suffix() {
        assert!(glob_match("lodash*", "lodash.debounce"));
        assert!(glob_match("*-loader", "babel-loader"));
        assert!(!glob_match("*-loader", "webpack"));
    }

    #[test]
    fn test_glob_match_scoped() {
        assert!(glob_match("@types/*", "@types/node"));
        assert!(!glob_match("@types/*", "@babel/core"));
    }

    #[test]
    fn test_glob_match_overlapping_ends() {
        // Prefix and suffix may not share characters.
        assert!(!glob_match("ab*ba", "aba"));
        assert!(glob_match("ab*ba", "abba"));
        assert!(glob_match("*eslint*", "@typescript-eslint/parser"));
    }

    #[test]
    fn test_ignore_config() {
        let ignore = IgnoreConfig {
            outdated: vec!["react".to_string()],
            unused: vec!["@types/*".to_string(), "typescript".to_string()],
            vulnerabilities: vec![],
        };

        assert!(ignore.should_ignore_outdated("react"));
        assert!(!ignore.should_ignore_outdated("react-dom"));
        assert!(ignore.should_ignore_unused("@types/node"));
        assert!(ignore.should_ignore_unused("typescript"));
        assert!(!ignore.should_ignore_unused("jest"));
        assert!(!ignore.should_ignore_vulnerability("lodash"));
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.manifest_file, PathBuf::from("package.json"));
        assert_eq!(config.report_file, PathBuf::from("dependency-report.json"));
        assert_eq!(config.registry_url, "https://registry.npmjs.org");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.cache_ttl_hours, 24);
        assert!(config.sources.exclude_dirs.contains(&"node_modules".to_string()));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::parse(
            r#"
            report_file = "audit.json"
            cache_ttl_hours = 0

            [ignore]
            unused = ["@types/*"]
            "#,
        )
        .unwrap();

        assert_eq!(config.report_file, PathBuf::from("audit.json"));
        assert_eq!(config.cache_ttl_hours, 0);
        assert_eq!(config.manifest_file, PathBuf::from("package.json"));
        assert_eq!(config.ignore.unused, vec!["@types/*"]);
        assert_eq!(config.sources, SourceOptions::default());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(Config::parse("request_timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_zero_timeout_is_raised() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
