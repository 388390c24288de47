//! Reading the declared dependency set from `package.json`.
//!
//! Production (`dependencies`) and development (`devDependencies`) groups
//! are merged into one [`DependencySet`]. The production group is read
//! first; when a name appears in both groups the development range wins and
//! the entry keeps its production position.

use crate::error::ManifestError;
use crate::model::DependencySet;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Dependency groups merged into the declared set, in merge order.
pub const DEPENDENCY_GROUPS: [&str; 2] = ["dependencies", "devDependencies"];

/// The parts of a manifest the auditor cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub name: Option<String>,
    pub dependencies: DependencySet,
}

/// Reads and parses the manifest at `path`.
pub fn read_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ManifestError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ManifestError::Unreadable {
            path: path.to_path_buf(),
        },
    })?;

    parse_manifest(&content, path)
}

/// Parses manifest text. `path` is only used in error messages.
pub fn parse_manifest(content: &str, path: &Path) -> Result<Manifest, ManifestError> {
    let json: Value = serde_json::from_str(content).map_err(|e| ManifestError::Syntax {
        path: path.to_path_buf(),
        line: e.line(),
        column: e.column(),
    })?;

    let root = json.as_object().ok_or_else(|| ManifestError::Invalid {
        path: path.to_path_buf(),
        reason: "top level must be a JSON object".to_string(),
    })?;

    let mut dependencies = DependencySet::new();

    for group in DEPENDENCY_GROUPS {
        let entries = match root.get(group) {
            None | Some(Value::Null) => continue,
            Some(Value::Object(entries)) => entries,
            Some(_) => {
                return Err(ManifestError::Invalid {
                    path: path.to_path_buf(),
                    reason: format!("\"{}\" must be an object", group),
                })
            }
        };

        for (name, version) in entries {
            let version = version.as_str().ok_or_else(|| ManifestError::Invalid {
                path: path.to_path_buf(),
                reason: format!("version of \"{}\" in \"{}\" must be a string", name, group),
            })?;
            dependencies.insert(name.as_str(), version);
        }
    }

    let name = root
        .get("name")
        .and_then(|n| n.as_str())
        .map(|n| n.to_string());

    Ok(Manifest { name, dependencies })
}
