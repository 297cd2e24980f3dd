//! Repository standards audit
//!
//! Every rule walks the tree on its own and reports [`Finding`]s; the
//! report is sorted before it is returned so output is deterministic.

pub mod comments;
pub mod doc_names;
pub mod json;
pub mod markdown;
pub mod types;

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::trace_time;
pub use types::{AuditContext, AuditReport, Finding, Rule, RuleSummary};

/// The rules `check` runs, in order
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(doc_names::DocNameRule),
        Box::new(markdown::MarkdownRule),
        Box::new(json::JsonRule),
        Box::new(comments::CppCommentRule),
        Box::new(comments::CsCommentRule),
    ]
}

/// Run every default rule against the repository
pub fn run_audit(ctx: &AuditContext<'_>) -> AuditReport {
    run_rules(ctx, &default_rules())
}

/// Run the given rules against the repository
#[tracing::instrument(skip_all, fields(root = %ctx.root().display(), rules = rules.len()))]
pub fn run_rules(ctx: &AuditContext<'_>, rules: &[Box<dyn Rule>]) -> AuditReport {
    let start = Instant::now();
    let mut report = AuditReport::new();

    for rule in rules {
        let before = report.violation_count;
        rule.check(ctx, &mut report);
        tracing::debug!(
            rule = rule.name(),
            findings = report.violation_count - before,
            "Rule finished"
        );
        report.rules.push(RuleSummary {
            name: rule.name().to_string(),
            description: rule.description().to_string(),
        });
    }

    report.sort();
    trace_time!(start, "run_audit", findings = report.violation_count);
    report
}

/// Read a file as text with invalid UTF-8 replaced
pub(crate) fn read_lossy(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable file");
            None
        }
    }
}

/// Strip a leading UTF-8 byte order mark
pub(crate) fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}
