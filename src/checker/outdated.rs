use crate::model::{Dependency, DependencySet, OutdatedEntry};
use crate::registry::Registry;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::warn;

/// Default number of registry lookups in flight at once.
pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Compares declared ranges against the registry's latest tag.
pub struct OutdatedChecker {
    registry: Arc<dyn Registry>,
    max_concurrent: usize,
}

impl OutdatedChecker {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self {
            registry,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Returns the outdated dependencies in declaration order.
    ///
    /// A dependency whose lookup fails is logged and left out; the rest of
    /// the batch is unaffected.
    pub async fn check(&self, deps: &DependencySet) -> Vec<OutdatedEntry> {
        stream::iter(deps)
            .map(|dep| self.check_dependency(dep))
            .buffered(self.max_concurrent)
            .filter_map(|entry| async move { entry })
            .collect()
            .await
    }

    async fn check_dependency(&self, dep: &Dependency) -> Option<OutdatedEntry> {
        let latest = match self.registry.latest_version(&dep.name).await {
            Ok(latest) => latest,
            Err(e) => {
                warn!(
                    package = %dep.name,
                    registry = self.registry.name(),
                    error = %e,
                    "skipping outdated check"
                );
                return None;
            }
        };

        is_outdated(&dep.version_range, &latest).then(|| OutdatedEntry {
            name: dep.name.clone(),
            installed: dep.version_range.clone(),
            latest,
        })
    }
}

/// Whether `declared` should be reported against `latest`.
///
/// This is a textual test, not range resolution: a range is current when it
/// equals the latest version or contains it, so `^2.1.0` is current against
/// `2.1.0` but `^4.0.0` is outdated against `4.1.2` even though it would
/// resolve to it.
pub fn is_outdated(declared: &str, latest: &str) -> bool {
    declared != latest && !declared.contains(latest)
}
