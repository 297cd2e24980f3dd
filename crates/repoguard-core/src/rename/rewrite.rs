//! Rewriting inline links that point at renamed documents

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::discovery::Document;
use crate::error::{GuardError, Result};
use crate::link::{inline_links, percent_decode, LinkTarget};
use crate::rename::paths::{relative_path, resolve_against, to_link_path};
use crate::rename::RenameMap;
use crate::trace_time;

/// Outcome of a link rewriting pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRewriteReport {
    /// Documents whose text changed (or would change, on a dry run)
    pub changed_files: Vec<PathBuf>,
    /// Total number of links rewritten across all documents
    pub links_rewritten: usize,
}

impl LinkRewriteReport {
    pub fn changed_count(&self) -> usize {
        self.changed_files.len()
    }
}

/// Rewrite the inline links in `text` that resolve to a renamed document.
///
/// `doc_dir` is the absolute directory of the document the text belongs to.
/// Labels, queries and anchors are preserved. Returns the new text and the
/// number of links rewritten.
pub fn rewrite_text(text: &str, doc_dir: &Path, map: &RenameMap) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut rewritten = 0;

    for link in inline_links(text) {
        let target = LinkTarget::split(link.target);
        if target.is_external() {
            continue;
        }

        let resolved = resolve_against(doc_dir, &percent_decode(&target.path));
        let Some(destination) = map.get(&resolved) else {
            continue;
        };

        let new_path = to_link_path(&relative_path(doc_dir, destination));
        out.push_str(&text[last..link.span.start]);
        out.push_str(&format!("[{}]({})", link.label, target.with_path(new_path)));
        last = link.span.end;
        rewritten += 1;
    }

    out.push_str(&text[last..]);
    (out, rewritten)
}

fn read_document(path: &Path) -> Option<String> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable document");
            return None;
        }
    };
    match String::from_utf8(bytes) {
        Ok(text) => Some(text.replace("\r\n", "\n")),
        Err(_) => {
            tracing::warn!(path = %path.display(), "Skipping document that is not valid UTF-8");
            None
        }
    }
}

/// Rewrite links to renamed documents across `documents`.
///
/// With `apply` false nothing is written and the report says which documents
/// would change. Changed documents are written with LF line endings.
#[tracing::instrument(skip(documents, map), fields(documents = documents.len(), renames = map.len()))]
pub fn rewrite_links(
    documents: &[Document],
    map: &RenameMap,
    apply: bool,
) -> Result<LinkRewriteReport> {
    let start = Instant::now();
    let mut report = LinkRewriteReport::default();
    if map.is_empty() {
        return Ok(report);
    }

    for doc in documents {
        let Some(text) = read_document(doc.path()) else {
            continue;
        };

        let (updated, count) = rewrite_text(&text, doc.dir(), map);
        if updated == text {
            continue;
        }

        if apply {
            fs::write(doc.path(), &updated)
                .map_err(|e| GuardError::io_operation("write", doc.path().display(), e))?;
            tracing::debug!(path = %doc.path().display(), links = count, "Updated links");
        }
        report.changed_files.push(doc.path().to_path_buf());
        report.links_rewritten += count;
    }

    trace_time!(
        start,
        "rewrite_links",
        changed = report.changed_count(),
        links = report.links_rewritten
    );
    Ok(report)
}
