//! Executing a single planned rename

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GuardError, Result};

/// Suffix of the sibling used for two-phase case-only renames
pub const TEMP_SUFFIX: &str = ".tmp-rename";

/// Whether two paths differ only in letter case
pub fn is_case_only(source: &Path, destination: &Path) -> bool {
    let source = source.to_string_lossy();
    let destination = destination.to_string_lossy();
    source != destination && source.to_lowercase() == destination.to_lowercase()
}

/// Canonical form of a path whose final component may not exist yet
fn resolve(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|p| p.join(name))
            .unwrap_or_else(|_| super::paths::normalize_lexically(path)),
        _ => super::paths::normalize_lexically(path),
    }
}

#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|e| {
        GuardError::io_operation(
            "rename",
            format!("{} -> {}", from.display(), to.display()),
            e,
        )
    })
}

/// Move `source` to `destination`.
///
/// Never overwrites: an existing destination that is not the source itself
/// fails with [`GuardError::DestinationExists`]. Case-only renames go through
/// a `<name>.tmp-rename` sibling so they also work on case-insensitive
/// filesystems.
#[tracing::instrument(skip_all, fields(from = %source.display(), to = %destination.display()))]
pub fn execute_rename(source: &Path, destination: &Path) -> Result<()> {
    let case_only = is_case_only(source, destination);
    if source == destination || (!case_only && resolve(source) == resolve(destination)) {
        tracing::debug!("Source and destination are identical, nothing to do");
        return Ok(());
    }

    if let Some(parent) = destination.parent() {
        if source.parent() != Some(parent) {
            fs::create_dir_all(parent).map_err(|e| {
                GuardError::io_operation("create directory", parent.display(), e)
            })?;
        }
    }

    if fs::symlink_metadata(destination).is_ok() && !same_file(source, destination) {
        return Err(GuardError::DestinationExists {
            from: source.to_path_buf(),
            to: destination.to_path_buf(),
        });
    }

    if case_only {
        let mut temp_name = source
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        temp_name.push(TEMP_SUFFIX);
        let temp = source.with_file_name(temp_name);
        if fs::symlink_metadata(&temp).is_ok() {
            return Err(GuardError::TemporaryPathExists { path: temp });
        }
        rename(source, &temp)?;
        rename(&temp, destination)?;
    } else {
        rename(source, destination)?;
    }

    tracing::debug!("Renamed");
    Ok(())
}
