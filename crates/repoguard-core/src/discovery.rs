//! File and document discovery under a repository root

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::{GuardError, Result};

/// Extension identifying markdown documents
pub const MARKDOWN_EXTENSION: &str = "md";

/// A markdown file discovered under the repository root.
///
/// Identity is the absolute path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Document {
    path: PathBuf,
    name: String,
    stem: String,
}

impl Document {
    /// Build a document from an absolute file path
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_string_lossy().to_string();
        let stem = path.file_stem()?.to_string_lossy().to_string();
        Some(Self { path, name, stem })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Filename including the extension
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filename without the final extension
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Directory containing the document
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }
}

/// Canonicalize a repository root, failing when it does not exist
pub fn resolve_root(root: &Path) -> Result<PathBuf> {
    let resolved = root.canonicalize().map_err(|_| GuardError::RootNotFound {
        path: root.to_path_buf(),
    })?;
    if !resolved.is_dir() {
        return Err(GuardError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    Ok(resolved)
}

/// Walks a repository tree, pruning skip-directories
#[derive(Debug, Clone)]
pub struct Walker {
    root: PathBuf,
    skip_dirs: BTreeSet<String>,
}

impl Walker {
    pub fn new(root: impl Into<PathBuf>, skip_dirs: BTreeSet<String>) -> Self {
        Self {
            root: root.into(),
            skip_dirs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_skipped(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self
                .skip_dirs
                .contains(entry.file_name().to_string_lossy().as_ref())
    }

    /// All files whose extension matches one of `extensions`, case-insensitively.
    ///
    /// Results are sorted by path.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub fn files_with_extensions(&self, extensions: &[&str]) -> Vec<PathBuf> {
        let wanted: BTreeSet<String> = extensions.iter().map(|e| e.to_lowercase()).collect();
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_skipped(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .path()
                .extension()
                .is_some_and(|ext| wanted.contains(&ext.to_string_lossy().to_lowercase()));
            if matches {
                files.push(entry.into_path());
            }
        }

        files.sort();
        tracing::debug!(count = files.len(), "Discovered files");
        files
    }

    /// All markdown documents under the root, sorted by path
    pub fn documents(&self) -> Vec<Document> {
        self.files_with_extensions(&[MARKDOWN_EXTENSION])
            .into_iter()
            .filter_map(Document::from_path)
            .collect()
    }

    /// Path relative to the root, falling back to the path itself
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}
