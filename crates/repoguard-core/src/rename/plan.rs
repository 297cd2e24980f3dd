//! Rename planning

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::ExceptionSet;
use crate::discovery::Document;
use crate::error::{GuardError, Result};
use crate::rename::{relative_to, RenamePlan, RenamePlanEntry};
use crate::slug::canonical_doc_name;
use crate::trace_time;

/// Compute the renames needed to bring every document name into canonical form.
///
/// Exempt and already-canonical names are skipped. Two documents mapping to
/// the same destination abort planning with [`GuardError::Collision`], naming
/// the first source seen and the second, relative to `root`. A document that
/// keeps its name claims its own path first, so renaming onto it collides too.
#[tracing::instrument(skip(documents, exceptions), fields(root = %root.display(), documents = documents.len()))]
pub fn plan_renames(
    root: &Path,
    documents: &[Document],
    exceptions: &ExceptionSet,
) -> Result<RenamePlan> {
    let start = Instant::now();
    let mut first_source: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut entries = Vec::new();
    let mut pending = Vec::new();

    for doc in documents {
        if exceptions.contains(doc.name()) {
            tracing::trace!(name = doc.name(), "Exempt from normalization");
            first_source.insert(doc.path().to_path_buf(), doc.path().to_path_buf());
            continue;
        }

        let target_name = canonical_doc_name(doc.stem());
        if target_name == doc.name() {
            first_source.insert(doc.path().to_path_buf(), doc.path().to_path_buf());
            continue;
        }
        pending.push((doc, target_name));
    }

    for (doc, target_name) in pending {
        let entry = RenamePlanEntry::new(doc.path().to_path_buf(), target_name);
        if let Some(first) = first_source.get(&entry.target) {
            return Err(GuardError::Collision {
                first: relative_to(root, first),
                second: relative_to(root, doc.path()),
                target: relative_to(root, &entry.target),
            });
        }
        first_source.insert(entry.target.clone(), doc.path().to_path_buf());
        entries.push(entry);
    }

    entries.sort_by(|a, b| relative_to(root, &a.source).cmp(&relative_to(root, &b.source)));

    trace_time!(start, "plan_renames", entries = entries.len());
    Ok(RenamePlan::new(root.to_path_buf(), entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(root: &Path, names: &[&str]) -> Vec<Document> {
        let mut docs: Vec<Document> = names
            .iter()
            .filter_map(|n| Document::from_path(root.join(n)))
            .collect();
        docs.sort();
        docs
    }

    #[test]
    fn test_plan_skips_canonical_and_exempt() {
        let root = Path::new("/repo");
        let documents = docs(
            root,
            &["README.md", "guide.md", "My Doc.md", "docs/AGENTS.md"],
        );
        let plan = plan_renames(root, &documents, &ExceptionSet::default()).unwrap();

        assert_eq!(plan.len(), 1);
        let entry = &plan.entries()[0];
        assert_eq!(entry.source, PathBuf::from("/repo/My Doc.md"));
        assert_eq!(entry.target_name, "my-doc.md");
    }

    #[test]
    fn test_plan_without_exceptions_renames_readme() {
        let root = Path::new("/repo");
        let documents = docs(root, &["README.md"]);
        let plan = plan_renames(root, &documents, &ExceptionSet::empty()).unwrap();
        assert_eq!(plan.entries()[0].target_name, "readme.md");
    }

    #[test]
    fn test_plan_collision_names_both_sources() {
        let root = Path::new("/repo");
        let documents = docs(root, &["docs/Foo Bar.md", "docs/foo_bar.md"]);
        let err = plan_renames(root, &documents, &ExceptionSet::default()).unwrap_err();

        match err {
            GuardError::Collision {
                first,
                second,
                target,
            } => {
                assert_eq!(first, PathBuf::from("docs/Foo Bar.md"));
                assert_eq!(second, PathBuf::from("docs/foo_bar.md"));
                assert_eq!(target, PathBuf::from("docs/foo-bar.md"));
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn test_rename_onto_existing_canonical_document_collides() {
        let root = Path::new("/repo");
        let documents = docs(root, &["foo_bar.md", "foo-bar.md"]);
        let err = plan_renames(root, &documents, &ExceptionSet::default()).unwrap_err();

        match err {
            GuardError::Collision { first, second, .. } => {
                assert_eq!(first, PathBuf::from("foo-bar.md"));
                assert_eq!(second, PathBuf::from("foo_bar.md"));
            }
            other => panic!("expected collision, got {other:?}"),
        }
    }

    #[test]
    fn test_acronym_split_avoids_unsplit_neighbor() {
        let root = Path::new("/repo");
        let documents = docs(root, &["HTTPServer.md", "httpserver.md"]);
        let plan = plan_renames(root, &documents, &ExceptionSet::default()).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.entries()[0].target_name, "http-server.md");
    }

    #[test]
    fn test_same_name_in_different_dirs_is_not_a_collision() {
        let root = Path::new("/repo");
        let documents = docs(root, &["a/Guide.md", "b/Guide.md"]);
        let plan = plan_renames(root, &documents, &ExceptionSet::default()).unwrap();
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_plan_sorted_by_relative_source() {
        let root = Path::new("/repo");
        let documents = docs(root, &["z/Zed.md", "a/Alpha.md", "Mid.md"]);
        let plan = plan_renames(root, &documents, &ExceptionSet::default()).unwrap();
        let sources: Vec<PathBuf> = plan.relative_pairs().into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            sources,
            vec![
                PathBuf::from("Mid.md"),
                PathBuf::from("a/Alpha.md"),
                PathBuf::from("z/Zed.md")
            ]
        );
    }

    #[test]
    fn test_plan_is_deterministic() {
        let root = Path::new("/repo");
        let documents = docs(root, &["APIReference.md", "notes.md", "x/Some_File.md"]);
        let first = plan_renames(root, &documents, &ExceptionSet::default()).unwrap();
        let second = plan_renames(root, &documents, &ExceptionSet::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.entries()[0].target_name, "api-reference.md");
    }
}
