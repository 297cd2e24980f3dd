//! Canonical document identifiers
//!
//! A canonical identifier matches `[a-z0-9]+(-[a-z0-9]+)*`. Document filenames
//! are canonical when their stem is canonical and their suffix is `.md`.

use regex::Regex;
use std::sync::OnceLock;

/// Stem substituted when normalization leaves nothing behind
pub const FALLBACK_STEM: &str = "doc";

/// Suffix every canonical document filename carries
pub const DOC_SUFFIX: &str = ".md";

static DOC_NAME_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn doc_name_re() -> Option<&'static Regex> {
    DOC_NAME_RE
        .get_or_init(|| match Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*\.md$") {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to compile document name regex");
                None
            }
        })
        .as_ref()
}

/// Whether an uppercase letter at `i` starts a new word.
///
/// Boundaries are a lowercase letter or digit followed by an uppercase letter
/// (`apiReference`), and the last capital of an acronym that is followed by a
/// lowercase letter (`APIReference` splits before `R`).
fn is_word_boundary(chars: &[char], i: usize) -> bool {
    let prev = chars[i - 1];
    if prev.is_ascii_lowercase() || prev.is_ascii_digit() {
        return true;
    }
    prev.is_ascii_uppercase() && chars.get(i + 1).is_some_and(|c| c.is_ascii_lowercase())
}

/// Normalize an arbitrary filename stem into a canonical identifier.
///
/// Each step operates on the output of the previous one:
/// camelCase and acronym boundaries are split, underscores and every other run of
/// characters outside `[A-Za-z0-9-]` become single hyphens, hyphen runs
/// collapse, edge hyphens are stripped and the result is lowercased.
/// An empty result falls back to [`FALLBACK_STEM`].
pub fn normalize(stem: &str) -> String {
    let trimmed = stem.trim();

    let chars: Vec<char> = trimmed.chars().collect();
    let mut split = String::with_capacity(trimmed.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_ascii_uppercase() && i > 0 && is_word_boundary(&chars, i) {
            split.push('-');
        }
        split.push(ch);
    }

    let mut out = String::with_capacity(split.len());
    let mut in_invalid_run = false;
    for ch in split.chars() {
        let ch = if ch == '_' { '-' } else { ch };
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
            in_invalid_run = false;
        } else if !in_invalid_run {
            out.push('-');
            in_invalid_run = true;
        }
    }

    let mut collapsed = String::with_capacity(out.len());
    for ch in out.chars() {
        if ch == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(ch);
    }

    let normalized = collapsed.trim_matches('-').to_ascii_lowercase();
    if normalized.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        normalized
    }
}

/// Canonical filename for a document stem (`normalize(stem)` plus `.md`)
pub fn canonical_doc_name(stem: &str) -> String {
    format!("{}{}", normalize(stem), DOC_SUFFIX)
}

/// Whether a filename already satisfies the canonical document grammar
pub fn is_canonical_doc_name(name: &str) -> bool {
    match doc_name_re() {
        Some(re) => re.is_match(name),
        None => name
            .strip_suffix(DOC_SUFFIX)
            .is_some_and(|stem| normalize(stem) == stem),
    }
}
