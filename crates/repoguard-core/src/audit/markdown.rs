use std::fs;

use super::strip_bom;
use super::types::{AuditContext, AuditReport, Finding, Rule};
use crate::discovery::MARKDOWN_EXTENSION;

/// Markdown files are UTF-8, have exactly one H1 and no trailing whitespace
pub struct MarkdownRule;

/// Messages for a single markdown text, in reporting order
pub fn lint_markdown(text: &str) -> Vec<String> {
    let mut messages = Vec::new();

    let h1_count = text
        .lines()
        .filter(|line| line.trim_start_matches('\u{feff}').starts_with("# "))
        .count();
    if h1_count != 1 {
        messages.push(format!("Expected 1 H1 heading, found {}", h1_count));
    }

    if let Some(line_no) = text
        .lines()
        .position(|line| line.ends_with(' ') || line.ends_with('\t'))
    {
        messages.push(format!("Trailing whitespace on line {}", line_no + 1));
    }

    messages
}

impl Rule for MarkdownRule {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown is valid UTF-8 with a single H1 and no trailing whitespace"
    }

    fn check(&self, ctx: &AuditContext<'_>, report: &mut AuditReport) {
        for path in ctx.walker.files_with_extensions(&[MARKDOWN_EXTENSION]) {
            let rel = ctx.display_path(&path);
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                    continue;
                }
            };

            let text = match std::str::from_utf8(strip_bom(&bytes)) {
                Ok(text) => text,
                Err(_) => {
                    report.add_finding(Finding::new(self.name(), rel, "File is not valid UTF-8"));
                    continue;
                }
            };

            for message in lint_markdown(text) {
                report.add_finding(Finding::new(self.name(), rel.clone(), message));
            }
        }
    }
}
