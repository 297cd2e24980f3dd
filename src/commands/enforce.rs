//! Enforce-doc-names command - rename markdown files to kebab-case
//!
//! Dry run by default; `--apply` performs the renames and rewrites every
//! inline link that pointed at a renamed file.

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use repoguard_core::config::{ExceptionSet, GuardConfig};
use repoguard_core::enforce::{DocNameEnforcer, EnforceMode, EnforceReport};
use repoguard_core::error::Result;

/// Execute the enforce-doc-names command
#[tracing::instrument(skip_all, fields(root = %root.display(), apply = apply))]
pub fn execute(
    cli: &Cli,
    root: &Path,
    config: &GuardConfig,
    exceptions: ExceptionSet,
    apply: bool,
) -> Result<()> {
    let planned = DocNameEnforcer::new(root, config, exceptions)?.plan()?;

    if cli.format == OutputFormat::Human && !planned.plan().is_empty() {
        // The plan is printed before anything moves so a failed apply still shows it
        print_plan(planned.plan().relative_pairs().iter().map(|(from, to)| {
            (from.display().to_string(), to.display().to_string())
        }));
    }

    let report = if apply {
        planned.apply()?
    } else {
        planned.dry_run()?
    };

    output_report(cli, &report)
}

fn print_plan(pairs: impl Iterator<Item = (String, String)>) {
    println!("Doc rename plan:");
    for (from, to) in pairs {
        println!("- {} -> {}", from, to);
    }
}

fn output_report(cli: &Cli, report: &EnforceReport) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Human => {
            if report.is_noop() {
                if !cli.quiet {
                    println!("No doc filename changes required");
                }
                return Ok(());
            }

            println!();
            match report.mode {
                EnforceMode::DryRun => {
                    if report.files_with_links_updated > 0 && !cli.quiet {
                        println!(
                            "Links would be updated in {} markdown file(s).",
                            report.files_with_links_updated
                        );
                    }
                    println!("Dry run only. Re-run with --apply to execute.");
                }
                EnforceMode::Applied => {
                    println!(
                        "Applied {} rename(s); updated links in {} markdown file(s).",
                        report.renames_applied, report.files_with_links_updated
                    );
                }
            }
        }
    }
    Ok(())
}
