//! Error types and exit codes for repoguard
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure, including standards violations found by `check`
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (naming collision, stale plan, missing root)

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - the tree cannot be processed as requested (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during repoguard operations
#[derive(Error, Debug)]
pub enum GuardError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("root not found: {path:?}")]
    RootNotFound { path: PathBuf },

    #[error(
        "naming collision: {} and {} both map to {}",
        .first.display(),
        .second.display(),
        .target.display()
    )]
    Collision {
        first: PathBuf,
        second: PathBuf,
        target: PathBuf,
    },

    #[error("cannot rename {} -> {}: destination exists", .from.display(), .to.display())]
    DestinationExists { from: PathBuf, to: PathBuf },

    #[error("temporary path exists: {}", .path.display())]
    TemporaryPathExists { path: PathBuf },

    // Generic failures (exit code 1)
    #[error("{count} standards violation(s) found")]
    Violations { count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl GuardError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        GuardError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        GuardError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            GuardError::UnknownFormat(_)
            | GuardError::UsageError(_)
            | GuardError::InvalidValue { .. } => ExitCode::Usage,

            GuardError::RootNotFound { .. }
            | GuardError::Collision { .. }
            | GuardError::DestinationExists { .. }
            | GuardError::TemporaryPathExists { .. } => ExitCode::Data,

            GuardError::Violations { .. }
            | GuardError::Io(_)
            | GuardError::Json(_)
            | GuardError::Toml(_)
            | GuardError::FailedOperationWithTarget { .. }
            | GuardError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            GuardError::UnknownFormat(_) => "unknown_format",
            GuardError::UsageError(_) => "usage_error",
            GuardError::InvalidValue { .. } => "invalid_value",
            GuardError::RootNotFound { .. } => "root_not_found",
            GuardError::Collision { .. } => "collision",
            GuardError::DestinationExists { .. } => "destination_exists",
            GuardError::TemporaryPathExists { .. } => "temporary_path_exists",
            GuardError::Violations { .. } => "violations",
            GuardError::Io(_) => "io_error",
            GuardError::Json(_) => "json_error",
            GuardError::Toml(_) => "toml_error",
            GuardError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            GuardError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for repoguard operations
pub type Result<T> = std::result::Result<T, GuardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_is_data_error() {
        let err = GuardError::Collision {
            first: PathBuf::from("docs/foo_bar.md"),
            second: PathBuf::from("docs/foo-bar.md"),
            target: PathBuf::from("docs/foo-bar.md"),
        };
        assert_eq!(err.exit_code(), ExitCode::Data);
        let message = err.to_string();
        assert!(message.contains("docs/foo_bar.md"));
        assert!(message.contains("docs/foo-bar.md"));
    }

    #[test]
    fn test_violations_exit_code() {
        let err = GuardError::Violations { count: 4 };
        assert_eq!(i32::from(err.exit_code()), 1);
        assert_eq!(err.to_string(), "4 standards violation(s) found");
    }

    #[test]
    fn test_to_json_envelope() {
        let err = GuardError::DestinationExists {
            from: PathBuf::from("a.md"),
            to: PathBuf::from("b.md"),
        };
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "destination_exists");
        assert_eq!(
            json["error"]["message"],
            "cannot rename a.md -> b.md: destination exists"
        );
    }

    #[test]
    fn test_usage_errors() {
        assert_eq!(
            GuardError::UnknownFormat("xml".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            GuardError::invalid_value("config", "x").exit_code(),
            ExitCode::Usage
        );
    }
}
