use std::path::Path;

use serde::Serialize;

use crate::config::ExceptionSet;
use crate::discovery::Walker;
use crate::rename::paths::to_link_path;

/// A single standards violation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Finding {
    /// Rule category (e.g., "doc-name", "markdown", "cs-comments")
    pub category: String,
    /// File path relative to the repository root, forward slashes
    pub path: String,
    /// Human-readable description
    pub message: String,
}

impl Finding {
    pub fn new(
        category: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A rule that ran, as listed in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub name: String,
    pub description: String,
}

/// Result of running the audit rules
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    /// Rules that ran, in order
    pub rules: Vec<RuleSummary>,
    /// Number of violations found
    pub violation_count: usize,
    /// All findings, sorted by category, path and message
    pub findings: Vec<Finding>,
}

impl AuditReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_finding(&mut self, finding: Finding) {
        self.violation_count += 1;
        self.findings.push(finding);
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub(crate) fn sort(&mut self) {
        self.findings.sort();
    }
}

/// Inputs shared by every audit rule
pub struct AuditContext<'a> {
    /// Walker over the repository, already configured with skip-directories
    pub walker: &'a Walker,
    /// Filenames exempt from the doc-name rule
    pub exceptions: &'a ExceptionSet,
}

impl<'a> AuditContext<'a> {
    pub fn new(walker: &'a Walker, exceptions: &'a ExceptionSet) -> Self {
        Self { walker, exceptions }
    }

    pub fn root(&self) -> &Path {
        self.walker.root()
    }

    /// Path relative to the root in the form findings report it
    pub fn display_path(&self, path: &Path) -> String {
        to_link_path(self.walker.relative(path))
    }
}

/// Trait for implementing audit rules
///
/// Rules are registered in [`super::default_rules`] and run in order by
/// [`super::run_audit`].
pub trait Rule {
    /// Category reported on this rule's findings (e.g., "doc-name")
    fn name(&self) -> &str;

    /// Human-readable description of what this rule enforces
    fn description(&self) -> &str;

    /// Walk the files this rule cares about and add findings to `report`
    fn check(&self, ctx: &AuditContext<'_>, report: &mut AuditReport);
}
