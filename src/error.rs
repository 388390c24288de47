//! Error types for each failure scope.
//!
//! | Error | Scope |
//! |-------|-------|
//! | [`ManifestError`] | fatal to every command |
//! | [`RegistryError`] | one dependency; logged and skipped |
//! | [`CorpusError`] | fatal to the unused check |
//! | [`PersistenceError`] | fatal to the report command |

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("{} not found. Run this command from the project root.", path.display())]
    NotFound { path: PathBuf },

    #[error("{} could not be read. Check the file permissions.", path.display())]
    Unreadable { path: PathBuf },

    #[error("{} is not valid JSON (line {line}, column {column}).", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("{} is invalid: {reason}.", path.display())]
    Invalid { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("package not found in registry")]
    NotFound,

    #[error("registry rate limit reached")]
    RateLimited,

    #[error("registry responded with status {0}")]
    Status(u16),

    #[error("registry metadata has no latest tag")]
    MissingLatest,

    #[error("registry request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to walk source tree under {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read source file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source scan was interrupted: {0}")]
    Interrupted(String),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal errors an audit run can end with.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
