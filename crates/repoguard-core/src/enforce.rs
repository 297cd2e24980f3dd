//! Document name enforcement
//!
//! [`DocNameEnforcer::plan`] discovers documents and validates the complete
//! rename plan; the resulting [`PlannedRenames`] is consumed by exactly one
//! of [`PlannedRenames::dry_run`] or [`PlannedRenames::apply`]. Nothing on
//! disk changes before a plan exists, and a collision means nothing changes
//! at all.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use crate::config::{ExceptionSet, GuardConfig};
use crate::discovery::{resolve_root, Document, Walker};
use crate::error::Result;
use crate::rename::paths::to_link_path;
use crate::rename::{execute_rename, plan_renames, rewrite_links, RenamePlan};
use crate::trace_time;

/// Whether the filesystem was changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnforceMode {
    DryRun,
    Applied,
}

/// One rename, relative to the repository root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameRecord {
    pub from: String,
    pub to: String,
}

/// Outcome of a doc-name enforcement run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnforceReport {
    pub mode: EnforceMode,
    /// The full plan, in plan order
    pub renames: Vec<RenameRecord>,
    /// Renames performed (always 0 on a dry run)
    pub renames_applied: usize,
    /// Markdown files whose links were updated, or would be on a dry run
    pub files_with_links_updated: usize,
    /// Inline links rewritten, or that would be on a dry run
    pub links_rewritten: usize,
}

impl EnforceReport {
    pub fn is_noop(&self) -> bool {
        self.renames.is_empty()
    }
}

/// Entry point of the rename workflow, before anything has been planned
#[derive(Debug)]
pub struct DocNameEnforcer {
    walker: Walker,
    exceptions: ExceptionSet,
}

impl DocNameEnforcer {
    /// Set up enforcement for the repository at `root`
    pub fn new(root: &Path, config: &GuardConfig, exceptions: ExceptionSet) -> Result<Self> {
        let root = resolve_root(root)?;
        Ok(Self {
            walker: Walker::new(root, config.skip_dirs()),
            exceptions,
        })
    }

    pub fn root(&self) -> &Path {
        self.walker.root()
    }

    /// Discover documents and validate the full rename plan
    #[tracing::instrument(skip(self), fields(root = %self.root().display()))]
    pub fn plan(self) -> Result<PlannedRenames> {
        let start = Instant::now();
        let documents = self.walker.documents();
        let plan = plan_renames(self.walker.root(), &documents, &self.exceptions)?;
        trace_time!(start, "plan", documents = documents.len(), renames = plan.len());

        Ok(PlannedRenames {
            walker: self.walker,
            documents,
            plan,
        })
    }
}

/// A validated plan, not yet acted on
#[derive(Debug)]
pub struct PlannedRenames {
    walker: Walker,
    documents: Vec<Document>,
    plan: RenamePlan,
}

impl PlannedRenames {
    pub fn plan(&self) -> &RenamePlan {
        &self.plan
    }

    fn records(&self) -> Vec<RenameRecord> {
        self.plan
            .relative_pairs()
            .into_iter()
            .map(|(from, to)| RenameRecord {
                from: to_link_path(&from),
                to: to_link_path(&to),
            })
            .collect()
    }

    /// Report the plan and the link updates it implies without touching disk
    pub fn dry_run(self) -> Result<EnforceReport> {
        let links = rewrite_links(&self.documents, &self.plan.to_rename_map(), false)?;
        Ok(EnforceReport {
            mode: EnforceMode::DryRun,
            renames: self.records(),
            renames_applied: 0,
            files_with_links_updated: links.changed_count(),
            links_rewritten: links.links_rewritten,
        })
    }

    /// Execute every rename in plan order, then fix up links.
    ///
    /// The first failed rename aborts the run. Renames already performed are
    /// left in place and links are not rewritten.
    #[tracing::instrument(skip(self), fields(root = %self.walker.root().display(), renames = self.plan.len()))]
    pub fn apply(self) -> Result<EnforceReport> {
        let start = Instant::now();
        let records = self.records();
        if self.plan.is_empty() {
            return Ok(EnforceReport {
                mode: EnforceMode::Applied,
                renames: records,
                renames_applied: 0,
                files_with_links_updated: 0,
                links_rewritten: 0,
            });
        }

        let map = self.plan.to_rename_map();
        let mut applied = 0;
        for entry in &self.plan {
            tracing::debug!(
                from = %entry.source.display(),
                to = %entry.target_name,
                case_only = entry.is_case_only(),
                "Renaming document"
            );
            if let Err(e) = execute_rename(&entry.source, &entry.target) {
                tracing::warn!(
                    applied,
                    total = self.plan.len(),
                    error = %e,
                    "Rename failed; renames already applied were kept"
                );
                return Err(e);
            }
            applied += 1;
        }
        trace_time!(start, "apply_renames", renames = applied);

        let documents = self.walker.documents();
        let links = rewrite_links(&documents, &map, true)?;
        trace_time!(start, "apply", links = links.links_rewritten);

        Ok(EnforceReport {
            mode: EnforceMode::Applied,
            renames: records,
            renames_applied: applied,
            files_with_links_updated: links.changed_count(),
            links_rewritten: links.links_rewritten,
        })
    }
}
