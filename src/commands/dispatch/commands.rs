//! Wiring from parsed subcommands to their implementations

use tracing::debug;

use crate::cli::Commands;
use crate::commands::dispatch::command::{Command, CommandContext};
use crate::commands::{check, enforce};
use repoguard_core::error::Result;

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let root = ctx.resolved_root()?;
        let config = ctx.load_config(&root)?;
        let exceptions = ctx.exception_set(&config);
        debug!(elapsed = ?ctx.start.elapsed(), "load_config");

        match self {
            Commands::Check => check::execute(ctx.cli, &root, &config, &exceptions),
            Commands::EnforceDocNames { apply } => {
                enforce::execute(ctx.cli, &root, &config, exceptions, *apply)
            }
        }
    }
}
