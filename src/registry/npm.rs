use crate::cache::Cache;
use crate::error::RegistryError;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

pub struct NpmRegistry {
    client: reqwest::Client,
    base_url: String,
    cache: Option<Cache>,
}

#[derive(Deserialize)]
struct NpmPackageInfo {
    #[serde(rename = "dist-tags")]
    dist_tags: Option<DistTags>,
}

#[derive(Deserialize)]
struct DistTags {
    latest: Option<String>,
}

impl NpmRegistry {
    /// Builds a client against `base_url` where every request is bounded by `timeout`.
    pub fn with_options(base_url: &str, timeout: Duration) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("depaudit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: None,
        })
    }

    pub fn with_cache(mut self, cache: Cache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Scoped names keep their `@` but encode the slash: `@babel%2Fcore`.
    fn package_url(&self, package: &str) -> String {
        format!("{}/{}", self.base_url, package.replace('/', "%2F"))
    }

    fn cache_key(package: &str) -> String {
        format!("npm_latest_{}", package)
    }

    async fn fetch_latest(&self, package: &str) -> Result<String, RegistryError> {
        let url = self.package_url(package);
        debug!(%url, "querying registry");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(RegistryError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => return Err(RegistryError::RateLimited),
            status => return Err(RegistryError::Status(status.as_u16())),
        }

        let info: NpmPackageInfo = response.json().await?;
        info.dist_tags
            .and_then(|tags| tags.latest)
            .ok_or(RegistryError::MissingLatest)
    }
}

#[async_trait]
impl super::Registry for NpmRegistry {
    fn name(&self) -> &'static str {
        "npm"
    }

    async fn latest_version(&self, package: &str) -> Result<String, RegistryError> {
        let cache_key = Self::cache_key(package);

        if let Some(version) = self.cache.as_ref().and_then(|c| c.get::<String>(&cache_key)) {
            debug!(package, %version, "registry cache hit");
            return Ok(version);
        }

        let version = self.fetch_latest(package).await?;

        if let Some(cache) = &self.cache {
            let _ = cache.set(&cache_key, &version);
        }

        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::OutdatedChecker;
    use crate::model::DependencySet;
    use crate::registry::Registry;
    use std::sync::Arc;
    use std::time::Instant;
    use tokio::net::TcpListener;

    /// Accepts connections and never answers them.
    async fn silent_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_package_url_plain_and_scoped() {
        let registry =
            NpmRegistry::with_options("https://registry.example.com/", Duration::from_secs(1))
                .unwrap();

        assert_eq!(
            registry.package_url("left-pad"),
            "https://registry.example.com/left-pad"
        );
        assert_eq!(
            registry.package_url("@babel/core"),
            "https://registry.example.com/@babel%2Fcore"
        );
    }

    #[test]
    fn test_dist_tags_parsing() {
        let info: NpmPackageInfo = serde_json::from_str(
            r#"{ "name": "chalk", "dist-tags": { "latest": "5.3.0", "next": "6.0.0-beta" } }"#,
        )
        .unwrap();
        assert_eq!(
            info.dist_tags.and_then(|t| t.latest).as_deref(),
            Some("5.3.0")
        );
    }

    #[tokio::test]
    async fn test_cached_version_skips_network() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::in_dir(dir.path(), Duration::from_secs(3600));
        cache
            .set(&NpmRegistry::cache_key("chalk"), &"4.1.2".to_string())
            .unwrap();

        // Nothing listens on port 9, so a network call would fail.
        let registry = NpmRegistry::with_options("http://127.0.0.1:9", Duration::from_secs(1))
            .unwrap()
            .with_cache(cache);

        assert_eq!(registry.latest_version("chalk").await.unwrap(), "4.1.2");
    }

    #[tokio::test]
    async fn test_unreachable_registry_is_an_error() {
        let registry =
            NpmRegistry::with_options("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();

        let err = registry.latest_version("chalk").await.unwrap_err();
        assert!(matches!(err, RegistryError::Http(_)));
        assert_eq!(registry.name(), "npm");
    }

    #[tokio::test]
    async fn test_stalled_registry_times_out() {
        let url = silent_server().await;
        let registry = NpmRegistry::with_options(&url, Duration::from_millis(200)).unwrap();

        let started = Instant::now();
        let result = tokio::time::timeout(Duration::from_secs(5), registry.latest_version("chalk"))
            .await
            .expect("request outlived its timeout");

        assert!(matches!(result, Err(RegistryError::Http(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_stalled_registry_skips_dependency() {
        let url = silent_server().await;
        let registry = NpmRegistry::with_options(&url, Duration::from_millis(200)).unwrap();
        let deps: DependencySet = [("chalk", "^4.0.0"), ("left-pad", "1.0.0")]
            .into_iter()
            .collect();

        let outdated = tokio::time::timeout(
            Duration::from_secs(5),
            OutdatedChecker::new(Arc::new(registry)).check(&deps),
        )
        .await
        .expect("outdated check outlived the request timeout");

        assert!(outdated.is_empty());
    }
}
