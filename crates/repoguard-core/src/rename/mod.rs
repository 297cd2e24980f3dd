//! Documentation rename engine
//!
//! Planning, execution and link fix-up for bringing markdown filenames into
//! canonical form. A [`RenamePlan`] is always fully validated before anything
//! on disk is touched; the [`RenameMap`] derived from it drives link rewriting.

pub mod execute;
pub mod paths;
pub mod plan;
pub mod rewrite;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub use execute::{execute_rename, TEMP_SUFFIX};
pub use plan::plan_renames;
pub use rewrite::{rewrite_links, rewrite_text, LinkRewriteReport};

/// One intended rename: a document and the canonical name it should carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlanEntry {
    /// Absolute path of the document as discovered
    pub source: PathBuf,
    /// Canonical filename, differing from the source filename
    pub target_name: String,
    /// Absolute destination path, in the source's directory
    pub target: PathBuf,
}

impl RenamePlanEntry {
    pub fn new(source: PathBuf, target_name: String) -> Self {
        let target = source
            .parent()
            .map(|dir| dir.join(&target_name))
            .unwrap_or_else(|| PathBuf::from(&target_name));
        Self {
            source,
            target_name,
            target,
        }
    }

    /// Whether the rename only changes letter case
    pub fn is_case_only(&self) -> bool {
        execute::is_case_only(&self.source, &self.target)
    }
}

/// Validated, injective, ordered set of renames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePlan {
    root: PathBuf,
    entries: Vec<RenamePlanEntry>,
}

impl RenamePlan {
    pub(crate) fn new(root: PathBuf, entries: Vec<RenamePlanEntry>) -> Self {
        Self { root, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RenamePlanEntry] {
        &self.entries
    }

    /// `(source, target)` pairs relative to the root, in plan order
    pub fn relative_pairs(&self) -> Vec<(PathBuf, PathBuf)> {
        self.entries
            .iter()
            .map(|entry| {
                (
                    relative_to(&self.root, &entry.source),
                    relative_to(&self.root, &entry.target),
                )
            })
            .collect()
    }

    /// Source to destination lookup for the link rewriter
    pub fn to_rename_map(&self) -> RenameMap {
        RenameMap {
            entries: self
                .entries
                .iter()
                .map(|entry| (entry.source.clone(), entry.target.clone()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RenamePlan {
    type Item = &'a RenamePlanEntry;
    type IntoIter = std::slice::Iter<'a, RenamePlanEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Absolute source path to absolute destination path.
///
/// Keys and values are lexically normalized so they compare equal to
/// resolved link targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameMap {
    entries: BTreeMap<PathBuf, PathBuf>,
}

impl RenameMap {
    pub fn insert(&mut self, source: PathBuf, destination: PathBuf) {
        self.entries.insert(
            paths::normalize_lexically(&source),
            paths::normalize_lexically(&destination),
        );
    }

    pub fn get(&self, source: &Path) -> Option<&Path> {
        self.entries.get(source).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PathBuf, PathBuf)> for RenameMap {
    fn from_iter<T: IntoIterator<Item = (PathBuf, PathBuf)>>(iter: T) -> Self {
        let mut map = RenameMap::default();
        for (source, destination) in iter {
            map.insert(source, destination);
        }
        map
    }
}

pub(crate) fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_target_is_sibling() {
        let entry = RenamePlanEntry::new(
            PathBuf::from("/repo/docs/My Doc.md"),
            "my-doc.md".to_string(),
        );
        assert_eq!(entry.target, PathBuf::from("/repo/docs/my-doc.md"));
        assert!(!entry.is_case_only());
    }

    #[test]
    fn test_rename_map_normalizes_keys() {
        let map: RenameMap = [(
            PathBuf::from("/repo/docs/./x/../Guide.md"),
            PathBuf::from("/repo/docs/guide.md"),
        )]
        .into_iter()
        .collect();
        assert_eq!(
            map.get(Path::new("/repo/docs/Guide.md")),
            Some(Path::new("/repo/docs/guide.md"))
        );
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_relative_pairs() {
        let plan = RenamePlan::new(
            PathBuf::from("/repo"),
            vec![RenamePlanEntry::new(
                PathBuf::from("/repo/docs/Guide.md"),
                "guide.md".to_string(),
            )],
        );
        assert_eq!(
            plan.relative_pairs(),
            vec![(
                PathBuf::from("docs/Guide.md"),
                PathBuf::from("docs/guide.md")
            )]
        );
        assert_eq!(plan.to_rename_map().len(), 1);
    }
}
