//! CLI argument parsing for repoguard
//!
//! Global flags: --root, --format, --quiet, --verbose, --log-level,
//! --log-json, --extra-doc-name-exception, --config

pub mod output;
pub mod paths;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use output::OutputFormat;

/// Repoguard - repository standards checker
#[derive(Parser, Debug)]
#[command(name = "repoguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Repository root to check (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level filter (error, warn, info, debug, trace) or a full directive
    #[arg(long, global = true, env = "REPOGUARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Additional markdown filename exempt from naming rules (repeatable)
    #[arg(long = "extra-doc-name-exception", global = true, action = clap::ArgAction::Append)]
    pub extra_doc_name_exceptions: Vec<String>,

    /// Configuration file (defaults to <root>/.repoguard.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the repository against its standards
    Check,

    /// Rename markdown files to kebab-case and update links to them
    EnforceDocNames {
        /// Perform the renames (default is a dry run)
        #[arg(long)]
        apply: bool,
    },
}
