//! Package registry clients.
//!
//! The outdated check only needs one thing from a registry: the version
//! currently tagged `latest` for a package name. [`Registry`] is that seam;
//! [`NpmRegistry`] is the HTTP implementation.

mod npm;

pub use npm::{NpmRegistry, DEFAULT_REGISTRY_URL};

use crate::error::RegistryError;
use async_trait::async_trait;

#[async_trait]
pub trait Registry: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the latest published version of `package`.
    async fn latest_version(&self, package: &str) -> Result<String, RegistryError>;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    /// In-memory registry; names without a version answer `NotFound`.
    #[derive(Default)]
    pub(crate) struct StaticRegistry {
        versions: HashMap<String, String>,
        delays: HashMap<String, Duration>,
    }

    impl StaticRegistry {
        pub(crate) fn with(mut self, package: &str, latest: &str) -> Self {
            self.versions.insert(package.to_string(), latest.to_string());
            self
        }

        pub(crate) fn delayed(mut self, package: &str, delay: Duration) -> Self {
            self.delays.insert(package.to_string(), delay);
            self
        }
    }

    #[async_trait]
    impl Registry for StaticRegistry {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn latest_version(&self, package: &str) -> Result<String, RegistryError> {
            if let Some(delay) = self.delays.get(package) {
                tokio::time::sleep(*delay).await;
            }
            self.versions
                .get(package)
                .cloned()
                .ok_or(RegistryError::NotFound)
        }
    }
}
