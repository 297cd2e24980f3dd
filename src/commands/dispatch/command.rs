//! Command trait and context for dispatching commands

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::Cli;
use repoguard_core::config::{ExceptionSet, GuardConfig};
use repoguard_core::discovery::resolve_root;
use repoguard_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub root: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, root: &'a PathBuf, start: Instant) -> Self {
        Self { cli, root, start }
    }

    /// Canonical repository root, failing when it does not exist
    pub fn resolved_root(&self) -> Result<PathBuf> {
        resolve_root(self.root)
    }

    /// Repository configuration from `--config` or `<root>/.repoguard.toml`
    pub fn load_config(&self, root: &Path) -> Result<GuardConfig> {
        GuardConfig::discover(root, self.cli.config.as_deref())
    }

    /// Default exceptions plus configured and command-line additions
    pub fn exception_set(&self, config: &GuardConfig) -> ExceptionSet {
        config.exception_set(self.cli.extra_doc_name_exceptions.iter().cloned())
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("repoguard {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Repository standards checker and documentation rename tool.");
        println!();
        println!("Run `repoguard --help` for usage information.");
        Ok(())
    }
}
