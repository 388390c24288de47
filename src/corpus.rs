//! Collecting the source files the unused check searches.
//!
//! [`SourceCorpus::collect`] walks the project root and reads every file
//! whose extension is in [`SourceOptions::extensions`], skipping any
//! directory named in [`SourceOptions::exclude_dirs`] (`node_modules` by
//! default). Symlinked files are read through their link. Bytes that are
//! not UTF-8 are replaced rather than rejected, so a Latin-1 comment does not
//! hide the imports around it. Acquisition is all-or-nothing: one file that
//! cannot be read fails the whole collection.

use crate::error::CorpusError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Which files count as source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// File extensions, without the leading dot.
    pub extensions: Vec<String>,

    /// Directory names skipped wherever they appear in the tree.
    pub exclude_dirs: Vec<String>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            extensions: ["js", "jsx", "mjs", "cjs", "ts", "tsx"]
                .into_iter()
                .map(String::from)
                .collect(),
            exclude_dirs: vec!["node_modules".to_string()],
        }
    }
}

impl SourceOptions {
    fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }

    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_dir()
            && entry.depth() > 0
            && entry
                .file_name()
                .to_str()
                .map(|name| self.exclude_dirs.iter().any(|d| d == name))
                .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

/// The text of every source file in a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceCorpus {
    files: Vec<SourceFile>,
}

impl SourceCorpus {
    pub fn new(files: Vec<SourceFile>) -> Self {
        Self { files }
    }

    /// Builds a corpus from in-memory `(path, content)` pairs.
    pub fn from_texts<P, C>(texts: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<PathBuf>,
        C: Into<String>,
    {
        Self::new(
            texts
                .into_iter()
                .map(|(path, content)| SourceFile {
                    path: path.into(),
                    content: content.into(),
                })
                .collect(),
        )
    }

    /// Walks `root` and reads every matching file, sorted by path.
    pub fn collect(root: &Path, options: &SourceOptions) -> Result<Self, CorpusError> {
        let mut files = Vec::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !options.is_excluded_dir(entry));

        for entry in walker {
            let entry = entry.map_err(|source| CorpusError::Walk {
                root: root.to_path_buf(),
                source,
            })?;

            if entry.file_type().is_dir() || !options.is_source_file(entry.path()) {
                continue;
            }

            let path = entry.into_path();
            let bytes = fs::read(&path).map_err(|source| CorpusError::Read {
                path: path.clone(),
                source,
            })?;
            let content = String::from_utf8_lossy(&bytes).into_owned();
            files.push(SourceFile { path, content });
        }

        debug!(root = %root.display(), files = files.len(), "collected source corpus");
        Ok(Self { files })
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
