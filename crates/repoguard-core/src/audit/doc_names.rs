use super::types::{AuditContext, AuditReport, Finding, Rule};
use crate::slug::{canonical_doc_name, is_canonical_doc_name};

/// Markdown filenames must be kebab-case
pub struct DocNameRule;

impl Rule for DocNameRule {
    fn name(&self) -> &str {
        "doc-name"
    }

    fn description(&self) -> &str {
        "Markdown filenames are lowercase kebab-case unless listed as exceptions"
    }

    fn check(&self, ctx: &AuditContext<'_>, report: &mut AuditReport) {
        for doc in ctx.walker.documents() {
            if ctx.exceptions.contains(doc.name()) || is_canonical_doc_name(doc.name()) {
                continue;
            }
            report.add_finding(Finding::new(
                self.name(),
                ctx.display_path(doc.path()),
                format!(
                    "Use kebab-case filename. Suggested: {}",
                    canonical_doc_name(doc.stem())
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExceptionSet, GuardConfig};
    use crate::discovery::Walker;
    use std::fs;
    use tempfile::tempdir;

    fn run(root: &std::path::Path, exceptions: &ExceptionSet) -> AuditReport {
        let walker = Walker::new(root, GuardConfig::default().skip_dirs());
        let mut report = AuditReport::new();
        DocNameRule.check(&AuditContext::new(&walker, exceptions), &mut report);
        report
    }

    #[test]
    fn test_non_canonical_name_reported_with_suggestion() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/APIReference.md"), "# API\n").unwrap();
        fs::write(dir.path().join("docs/setup-guide.md"), "# Setup\n").unwrap();

        let report = run(dir.path(), &ExceptionSet::default());
        assert_eq!(
            report.findings,
            vec![Finding::new(
                "doc-name",
                "docs/APIReference.md",
                "Use kebab-case filename. Suggested: api-reference.md"
            )]
        );
    }

    #[test]
    fn test_exceptions_are_not_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("README.md"), "# Readme\n").unwrap();
        fs::write(dir.path().join("CHANGELOG.md"), "# Changes\n").unwrap();

        let exceptions = ExceptionSet::default().with_additions(["CHANGELOG.md"]);
        assert!(run(dir.path(), &exceptions).is_clean());
    }

    #[test]
    fn test_uppercase_extension_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.MD"), "# Notes\n").unwrap();

        let report = run(dir.path(), &ExceptionSet::default());
        assert_eq!(report.violation_count, 1);
        assert!(report.findings[0].message.ends_with("Suggested: notes.md"));
    }
}
