//! Comment conventions for engine headers and C# sources

use std::sync::OnceLock;

use regex::Regex;

use super::read_lossy;
use super::types::{AuditContext, AuditReport, Finding, Rule};

/// Lines searched above a reflection macro for its Doxygen block
pub const DOXYGEN_LOOKBACK: usize = 10;

/// Lines searched above a public C# declaration for its `<summary>`
pub const XML_SUMMARY_LOOKBACK: usize = 8;

const CS_TYPE_KEYWORDS: &[&str] = &["class", "interface", "enum", "struct", "record"];

static UMACRO_RE: OnceLock<Option<Regex>> = OnceLock::new();
static CS_TYPE_RE: OnceLock<Option<Regex>> = OnceLock::new();
static CS_MEMBER_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn compile(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(error = %e, pattern, "Failed to compile comment rule regex");
            None
        }
    })
    .as_ref()
}

fn umacro_re() -> Option<&'static Regex> {
    compile(&UMACRO_RE, r"^\s*(UCLASS|USTRUCT|UENUM|UFUNCTION)\b")
}

fn cs_type_re() -> Option<&'static Regex> {
    compile(
        &CS_TYPE_RE,
        r"^\s*public\s+(?:class|interface|enum|struct|record)\s+\w+",
    )
}

fn cs_member_re() -> Option<&'static Regex> {
    compile(&CS_MEMBER_RE, r"^\s*public\s+(\w*).*\(")
}

/// Whether a `/** ... */` block sits directly above line `idx`.
///
/// Blank lines are allowed between the declaration and the comment, but
/// not inside or above it.
pub fn has_doxygen_above(lines: &[&str], idx: usize, max_lookback: usize) -> bool {
    let mut seen_non_empty = false;
    for line in lines[..idx].iter().rev().take(max_lookback) {
        let s = line.trim();
        if s.is_empty() {
            if seen_non_empty {
                return false;
            }
            continue;
        }
        seen_non_empty = true;
        if s.starts_with("/**") {
            return true;
        }
        if !s.starts_with('*') {
            return false;
        }
    }
    false
}

/// Whether a run of `///` lines containing `<summary>` sits directly above line `idx`.
///
/// Blank lines are allowed between the declaration and the `///` run, but
/// not inside or above it.
pub fn has_xml_summary_above(lines: &[&str], idx: usize, max_lookback: usize) -> bool {
    let mut saw_comment = false;
    for line in lines[..idx].iter().rev().take(max_lookback) {
        let s = line.trim();
        if s.is_empty() {
            if saw_comment {
                return false;
            }
            continue;
        }
        if !s.starts_with("///") {
            return false;
        }
        saw_comment = true;
        if s.contains("<summary>") {
            return true;
        }
    }
    false
}

/// Whether a C# line declares a public type or member
pub fn is_public_cs_declaration(line: &str) -> bool {
    if cs_type_re().is_some_and(|re| re.is_match(line)) {
        return true;
    }
    cs_member_re()
        .and_then(|re| re.captures(line))
        .and_then(|cap| cap.get(1))
        .is_some_and(|word| !CS_TYPE_KEYWORDS.contains(&word.as_str()))
}

fn is_engine_source(rel: &str) -> bool {
    rel.contains("/Source/") || rel.starts_with("Source/")
}

/// Reflection macros in engine headers need a Doxygen block comment
pub struct CppCommentRule;

impl Rule for CppCommentRule {
    fn name(&self) -> &str {
        "cpp-comments"
    }

    fn description(&self) -> &str {
        "UCLASS/USTRUCT/UENUM/UFUNCTION in Source/ headers carry a /** */ comment"
    }

    fn check(&self, ctx: &AuditContext<'_>, report: &mut AuditReport) {
        let Some(re) = umacro_re() else {
            return;
        };

        for path in ctx.walker.files_with_extensions(&["h"]) {
            let rel = ctx.display_path(&path);
            if !is_engine_source(&rel) {
                continue;
            }
            let Some(text) = read_lossy(&path) else {
                continue;
            };

            let lines: Vec<&str> = text.lines().collect();
            for (i, line) in lines.iter().enumerate() {
                let Some(cap) = re.captures(line) else {
                    continue;
                };
                if has_doxygen_above(&lines, i, DOXYGEN_LOOKBACK) {
                    continue;
                }
                report.add_finding(Finding::new(
                    self.name(),
                    rel.clone(),
                    format!(
                        "Add Doxygen block comment above {} (line {})",
                        &cap[1],
                        i + 1
                    ),
                ));
            }
        }
    }
}

/// Public C# declarations need a `/// <summary>` XML comment
pub struct CsCommentRule;

impl Rule for CsCommentRule {
    fn name(&self) -> &str {
        "cs-comments"
    }

    fn description(&self) -> &str {
        "Public C# types and members carry a /// <summary> comment"
    }

    fn check(&self, ctx: &AuditContext<'_>, report: &mut AuditReport) {
        for path in ctx.walker.files_with_extensions(&["cs"]) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if name.ends_with(".Build.cs") || name.ends_with(".Target.cs") {
                continue;
            }
            let Some(text) = read_lossy(&path) else {
                continue;
            };

            let rel = ctx.display_path(&path);
            let lines: Vec<&str> = text.lines().collect();
            for (i, line) in lines.iter().enumerate() {
                if is_public_cs_declaration(line)
                    && !has_xml_summary_above(&lines, i, XML_SUMMARY_LOOKBACK)
                {
                    report.add_finding(Finding::new(
                        self.name(),
                        rel.clone(),
                        format!(
                            "Add /// <summary> XML comment above public declaration (line {})",
                            i + 1
                        ),
                    ));
                }
            }
        }
    }
}
