use crate::error::PersistenceError;
use crate::model::Report;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes `report` as pretty-printed JSON, replacing any file at `path`.
///
/// The JSON goes to a temporary file in the same directory which is then
/// renamed over `path`, so an interrupted run never leaves a partial report.
pub fn write_report(path: &Path, report: &Report) -> Result<(), PersistenceError> {
    let json = serde_json::to_string_pretty(report)?;
    let write_err = |source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(json.as_bytes()).map_err(write_err)?;
    tmp.write_all(b"\n").map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}

#[cfg(test)]
pub(crate) fn read_report(path: &Path) -> Result<Report, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
