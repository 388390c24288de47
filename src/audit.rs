//! Running the checks together and persisting the result.
//!
//! [`Auditor::scan`] starts all three checks at once and waits for every one
//! of them. If any check failed fatally (only reading the source corpus can)
//! the whole scan fails and nothing is persisted; there is no partial report.
//! Registry failures never reach this level, see [`OutdatedChecker`].

use crate::checker::{OutdatedChecker, UnusedChecker, VulnerabilityChecker, VulnerabilityTable};
use crate::config::{Config, IgnoreConfig};
use crate::corpus::{SourceCorpus, SourceOptions};
use crate::error::{AuditError, CorpusError, ManifestError};
use crate::manifest::{read_manifest, Manifest};
use crate::model::{DependencySet, OutdatedEntry, Report, ScanFindings, VulnerabilityEntry};
use crate::output::write_report;
use crate::registry::Registry;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Where an audit reads from and writes to.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Project root; source files are collected below it.
    pub root: PathBuf,
    pub manifest_path: PathBuf,
    pub report_path: PathBuf,
    pub sources: SourceOptions,
    pub ignore: IgnoreConfig,
    pub max_concurrent_requests: usize,
}

impl AuditOptions {
    /// Resolves the configured relative paths against `root`.
    pub fn from_config(config: &Config, root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            manifest_path: root.join(&config.manifest_file),
            report_path: root.join(&config.report_file),
            sources: config.sources.clone(),
            ignore: config.ignore.clone(),
            max_concurrent_requests: config.max_concurrent_requests,
        }
    }
}

pub struct Auditor {
    registry: Arc<dyn Registry>,
    vulnerabilities: VulnerabilityChecker,
    options: AuditOptions,
}

impl Auditor {
    pub fn new(
        registry: Arc<dyn Registry>,
        table: VulnerabilityTable,
        options: AuditOptions,
    ) -> Self {
        Self {
            registry,
            vulnerabilities: VulnerabilityChecker::new(table),
            options,
        }
    }

    pub fn options(&self) -> &AuditOptions {
        &self.options
    }

    pub fn read_manifest(&self) -> Result<Manifest, ManifestError> {
        read_manifest(&self.options.manifest_path)
    }

    pub async fn outdated(&self, deps: &DependencySet) -> Vec<OutdatedEntry> {
        let ignore = &self.options.ignore;
        let deps = deps.without(|name| ignore.should_ignore_outdated(name));

        OutdatedChecker::new(Arc::clone(&self.registry))
            .with_max_concurrent(self.options.max_concurrent_requests)
            .check(&deps)
            .await
    }

    pub async fn unused(&self, deps: &DependencySet) -> Result<Vec<String>, CorpusError> {
        let ignore = &self.options.ignore;
        let deps = deps.without(|name| ignore.should_ignore_unused(name));

        let corpus = self.collect_corpus().await?;
        debug!(files = corpus.len(), "searching source corpus");
        Ok(UnusedChecker::new().check(&deps, &corpus))
    }

    pub fn vulnerabilities(&self, deps: &DependencySet) -> Vec<VulnerabilityEntry> {
        let ignore = &self.options.ignore;
        let deps = deps.without(|name| ignore.should_ignore_vulnerability(name));

        self.vulnerabilities.check(&deps)
    }

    /// Runs all three checks.
    pub async fn scan(&self, deps: &DependencySet) -> Result<ScanFindings, AuditError> {
        let (outdated, unused) = tokio::join!(self.outdated(deps), self.unused(deps));
        let vulnerabilities = self.vulnerabilities(deps);

        Ok(ScanFindings {
            outdated,
            unused: unused?,
            vulnerabilities,
        })
    }

    /// Runs all three checks and writes the timestamped report, replacing
    /// any previous one.
    pub async fn save_report(&self, deps: &DependencySet) -> Result<Report, AuditError> {
        let report = Report::new(self.scan(deps).await?);
        write_report(&self.options.report_path, &report)?;

        info!(path = %self.options.report_path.display(), "report saved");
        Ok(report)
    }

    async fn collect_corpus(&self) -> Result<SourceCorpus, CorpusError> {
        let root = self.options.root.clone();
        let sources = self.options.sources.clone();

        tokio::task::spawn_blocking(move || SourceCorpus::collect(&root, &sources))
            .await
            .map_err(|e| CorpusError::Interrupted(e.to_string()))?
    }
}
