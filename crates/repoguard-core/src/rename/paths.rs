//! Path arithmetic for link resolution
//!
//! Everything here is lexical: links may name files that no longer exist
//! under the referenced name, so the filesystem is never consulted.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                );
                if at_root && out.has_root() {
                    continue;
                }
                if out.components().next_back() == Some(Component::ParentDir) || !out.pop() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Resolve a link path against the directory of the referencing document
pub fn resolve_against(base_dir: &Path, link_path: &str) -> PathBuf {
    normalize_lexically(&base_dir.join(link_path))
}

/// Relative path from directory `from_dir` to `to`.
///
/// Both paths must be absolute and normalized. Destinations below `from_dir`
/// come out as a plain descent (`sub/doc.md`); anything else ascends with
/// `..` to the common ancestor first (`../reference/doc.md`).
pub fn relative_path(from_dir: &Path, to: &Path) -> PathBuf {
    if let Ok(descendant) = to.strip_prefix(from_dir) {
        return descendant.to_path_buf();
    }

    let from: Vec<Component<'_>> = from_dir.components().collect();
    let target: Vec<Component<'_>> = to.components().collect();
    let common = from
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from.len() {
        out.push("..");
    }
    for component in &target[common..] {
        out.push(component.as_os_str());
    }
    out
}

/// Render a relative path as a link target with forward slashes
pub fn to_link_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
