//! Repository configuration for repoguard
//!
//! Configuration is read from `.repoguard.toml` at the repository root when
//! present. Every field is optional and only ever adds to the built-in
//! defaults:
//!
//! ```toml
//! [doc_names]
//! exceptions = ["CHANGELOG.md"]
//!
//! [walk]
//! skip_dirs = ["node_modules", "target"]
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{GuardError, Result};

/// Default configuration file name, looked up at the repository root
pub const CONFIG_FILE: &str = ".repoguard.toml";

/// Markdown filenames that are never renamed or reported by the doc-name rule
pub const DEFAULT_DOC_NAME_EXCEPTIONS: &[&str] = &["README.md", "AGENTS.md", "CLAUDE.md", "SKILL.md"];

/// Directory names excluded from every traversal
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    ".git",
    ".vs",
    "Binaries",
    "DerivedDataCache",
    "Intermediate",
    "Saved",
];

/// Repository configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GuardConfig {
    /// Document naming configuration
    #[serde(default)]
    pub doc_names: DocNamesConfig,

    /// Traversal configuration
    #[serde(default)]
    pub walk: WalkConfig,
}

/// Configuration for the document naming rule and rename engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DocNamesConfig {
    /// Extra filenames exempt from normalization
    #[serde(default)]
    pub exceptions: Vec<String>,
}

/// Configuration for repository traversal
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WalkConfig {
    /// Extra directory names to skip
    #[serde(default)]
    pub skip_dirs: Vec<String>,
}

impl GuardConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| GuardError::io_operation("read config", path.display(), e))?;
        let config: GuardConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the configuration for a repository.
    ///
    /// An explicit path must exist. Without one, `<root>/.repoguard.toml` is
    /// used when present and the defaults otherwise.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                root.join(path)
            };
            if !path.is_file() {
                return Err(GuardError::invalid_value(
                    "config path",
                    format!("{} (file not found)", path.display()),
                ));
            }
            return Self::load(&path);
        }

        let default_path = root.join(CONFIG_FILE);
        if default_path.is_file() {
            tracing::debug!(path = %default_path.display(), "Loading repository config");
            Self::load(&default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Skip-directory names: defaults plus configured additions
    pub fn skip_dirs(&self) -> BTreeSet<String> {
        DEFAULT_SKIP_DIRS
            .iter()
            .map(|s| s.to_string())
            .chain(self.walk.skip_dirs.iter().cloned())
            .collect()
    }

    /// Exception set: defaults, configured additions, then caller additions
    pub fn exception_set<I, S>(&self, extra: I) -> ExceptionSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ExceptionSet::default()
            .with_additions(self.doc_names.exceptions.iter().cloned())
            .with_additions(extra)
    }
}

/// Literal filenames exempt from document name normalization.
///
/// Membership is tested by exact filename, never by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionSet {
    names: BTreeSet<String>,
}

impl Default for ExceptionSet {
    fn default() -> Self {
        Self {
            names: DEFAULT_DOC_NAME_EXCEPTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ExceptionSet {
    /// An exception set with no members at all
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Add filenames to the set
    pub fn with_additions<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.names.contains(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_exceptions() {
        let set = ExceptionSet::default();
        assert!(set.contains("README.md"));
        assert!(set.contains("SKILL.md"));
        assert!(!set.contains("readme.md"));
        assert!(!set.contains("docs/README.md"));
    }

    #[test]
    fn test_exception_set_layers_additions() {
        let config = GuardConfig {
            doc_names: DocNamesConfig {
                exceptions: vec!["CHANGELOG.md".to_string()],
            },
            ..Default::default()
        };
        let set = config.exception_set(["CONTRIBUTING.md"]);
        assert!(set.contains("README.md"));
        assert!(set.contains("CHANGELOG.md"));
        assert!(set.contains("CONTRIBUTING.md"));
    }

    #[test]
    fn test_skip_dirs_include_defaults() {
        let config = GuardConfig {
            walk: WalkConfig {
                skip_dirs: vec!["node_modules".to_string()],
            },
            ..Default::default()
        };
        let dirs = config.skip_dirs();
        assert!(dirs.contains(".git"));
        assert!(dirs.contains("Intermediate"));
        assert!(dirs.contains("node_modules"));
    }

    #[test]
    fn test_discover_without_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = GuardConfig::discover(dir.path(), None).unwrap();
        assert_eq!(config, GuardConfig::default());
    }

    #[test]
    fn test_discover_reads_root_config() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[doc_names]\nexceptions = [\"NOTICE.md\"]\n\n[walk]\nskip_dirs = [\"vendor\"]\n",
        )
        .unwrap();

        let config = GuardConfig::discover(dir.path(), None).unwrap();
        assert_eq!(config.doc_names.exceptions, vec!["NOTICE.md"]);
        assert_eq!(config.walk.skip_dirs, vec!["vendor"]);
    }

    #[test]
    fn test_discover_missing_explicit_config_fails() {
        let dir = tempdir().unwrap();
        let err = GuardConfig::discover(dir.path(), Some(Path::new("missing.toml"))).unwrap_err();
        assert!(matches!(err, GuardError::InvalidValue { .. }));
    }

    #[test]
    fn test_load_explicit_relative_config() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("custom.toml"),
            "[doc_names]\nexceptions = [\"LICENSE.md\"]\n\n[walk]\nskip_dirs = [\"out\"]\n",
        )
        .unwrap();

        let loaded = GuardConfig::discover(dir.path(), Some(Path::new("custom.toml"))).unwrap();
        assert_eq!(
            loaded,
            GuardConfig {
                doc_names: DocNamesConfig {
                    exceptions: vec!["LICENSE.md".to_string()],
                },
                walk: WalkConfig {
                    skip_dirs: vec!["out".to_string()],
                },
            }
        );
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[doc_names\nexceptions = 3").unwrap();
        assert!(matches!(
            GuardConfig::load(&path),
            Err(GuardError::Toml(_))
        ));
    }
}
