pub mod audit;
pub mod cache;
pub mod checker;
pub mod config;
pub mod corpus;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod model;
pub mod output;
pub mod registry;

pub use audit::{AuditOptions, Auditor};
pub use cache::Cache;
pub use config::Config;
pub use error::{AuditError, CorpusError, ManifestError, PersistenceError, RegistryError};
pub use model::{
    Dependency, DependencySet, OutdatedEntry, Report, ScanFindings, VulnerabilityEntry,
};
pub use registry::{NpmRegistry, Registry};
