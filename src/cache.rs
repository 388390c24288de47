//! File-based caching for registry lookups.
//!
//! Each entry is a JSON file in the cache directory and expires after the
//! configured TTL. The cache lives in the platform cache directory:
//! - Linux: `~/.cache/depaudit/`
//! - macOS: `~/Library/Caches/depaudit/`
//! - Windows: `%LOCALAPPDATA%\depaudit\`
//!
//! # Example
//!
//! ```no_run
//! use depaudit::Cache;
//!
//! let cache = Cache::new();
//! cache.set("npm_latest_chalk", &"5.3.0".to_string()).unwrap();
//!
//! let value: Option<String> = cache.get("npm_latest_chalk");
//! assert_eq!(value, Some("5.3.0".to_string()));
//! ```

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Default cache TTL in hours.
const CACHE_TTL_HOURS: u64 = 24;

/// Returns the directory registry responses are cached in.
pub fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("depaudit")
}

/// A file-based cache with TTL support.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
    ttl: Duration,
}

impl Cache {
    /// Creates a cache in [`cache_dir`] with the default 24-hour TTL.
    pub fn new() -> Self {
        Self::with_ttl_hours(CACHE_TTL_HOURS)
    }

    pub fn with_ttl_hours(hours: u64) -> Self {
        Self::in_dir(cache_dir(), Duration::from_secs(hours * 3600))
    }

    /// Creates a cache rooted at an explicit directory.
    pub fn in_dir(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }

    /// Retrieves a value, or `None` if the key is missing, expired, or unreadable.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.entry_path(key);

        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;
        let expired = SystemTime::now()
            .duration_since(modified)
            .map(|elapsed| elapsed > self.ttl)
            .unwrap_or(false);

        if expired {
            let _ = fs::remove_file(&path);
            return None;
        }

        let content = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Stores a value as JSON, creating the cache directory if needed.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.entry_path(key), serde_json::to_vec(value)?)?;
        Ok(())
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes a key as a file name. ASCII letters, digits and `-` pass through;
/// every other byte, `_` included, becomes `_` plus two hex digits, so
/// distinct keys never share a file.
fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            let _ = write!(stem, "_{:02x}", byte);
        }
    }
    stem
}
