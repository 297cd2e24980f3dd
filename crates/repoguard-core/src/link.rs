//! Inline markdown link parsing
//!
//! Only inline links of the form `[label](target)` are recognized.
//! Reference-style links and HTML anchors are left alone.

use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// Target prefixes that never point into the document corpus
pub const EXTERNAL_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "#", "file://"];

static INLINE_LINK_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn inline_link_re() -> Option<&'static Regex> {
    INLINE_LINK_RE
        .get_or_init(|| match Regex::new(r"\[([^\]]+)\]\(([^)]+)\)") {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to compile markdown link regex");
                None
            }
        })
        .as_ref()
}

/// A link target decomposed into path, query and anchor.
///
/// `query` keeps its leading `?` and `anchor` keeps its leading `#`, so
/// `path + query + anchor` always reproduces the original target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub path: String,
    pub query: String,
    pub anchor: String,
}

impl LinkTarget {
    /// Split a raw target on the first `#`, then on the first `?` before it
    pub fn split(target: &str) -> Self {
        let (rest, anchor) = match target.split_once('#') {
            Some((rest, anchor)) => (rest, format!("#{anchor}")),
            None => (target, String::new()),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, format!("?{query}")),
            None => (rest, String::new()),
        };
        Self {
            path: path.to_string(),
            query,
            anchor,
        }
    }

    /// True when the target has no path part (`#setup`, `?tab=1`)
    pub fn is_fragment_only(&self) -> bool {
        self.path.trim().is_empty()
    }

    /// True when the link can never reference a document in the corpus
    pub fn is_external(&self) -> bool {
        is_external(&self.path) || self.is_fragment_only()
    }

    /// Same query and anchor, different path
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: self.query.clone(),
            anchor: self.anchor.clone(),
        }
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.path, self.query, self.anchor)
    }
}

/// Split a raw target into `(path, query, anchor)`
pub fn split(target: &str) -> (String, String, String) {
    let LinkTarget {
        path,
        query,
        anchor,
    } = LinkTarget::split(target);
    (path, query, anchor)
}

/// Whether a link path points outside the corpus (web, mail, file scheme or fragment)
pub fn is_external(path: &str) -> bool {
    let normalized = path.trim().to_lowercase();
    EXTERNAL_PREFIXES
        .iter()
        .any(|prefix| normalized.starts_with(prefix))
}

/// One inline link occurrence inside a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineLink<'a> {
    pub label: &'a str,
    pub target: &'a str,
    /// Byte range of the whole `[label](target)` match
    pub span: Range<usize>,
}

/// Find every inline link in `text`, in order of appearance
pub fn inline_links(text: &str) -> Vec<InlineLink<'_>> {
    let Some(re) = inline_link_re() else {
        return Vec::new();
    };
    re.captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            Some(InlineLink {
                label: cap.get(1)?.as_str(),
                target: cap.get(2)?.as_str(),
                span: whole.range(),
            })
        })
        .collect()
}

/// Decode `%XX` escapes in a link path.
///
/// Malformed escapes are kept verbatim; byte sequences that are not valid
/// UTF-8 after decoding are replaced with U+FFFD.
pub fn percent_decode(input: &str) -> String {
    if !input.contains('%') {
        return input.to_string();
    }

    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                decoded.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
