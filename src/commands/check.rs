//! Check command - audit the repository against its standards
//!
//! Exits 0 when the tree is clean and 1 when any rule reports a finding.

use std::path::Path;

use crate::cli::{Cli, OutputFormat};
use repoguard_core::audit::{run_audit, AuditContext, AuditReport};
use repoguard_core::config::{ExceptionSet, GuardConfig};
use repoguard_core::discovery::Walker;
use repoguard_core::error::{GuardError, Result};

/// Execute the check command
#[tracing::instrument(skip_all, fields(root = %root.display()))]
pub fn execute(
    cli: &Cli,
    root: &Path,
    config: &GuardConfig,
    exceptions: &ExceptionSet,
) -> Result<()> {
    let walker = Walker::new(root, config.skip_dirs());
    let report = run_audit(&AuditContext::new(&walker, exceptions));

    output_report(cli, &report)?;

    if report.is_clean() {
        Ok(())
    } else {
        Err(GuardError::Violations {
            count: report.violation_count,
        })
    }
}

fn output_report(cli: &Cli, report: &AuditReport) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Human => {
            if report.is_clean() {
                if !cli.quiet {
                    println!("PASS: no standards violations found");
                }
                return Ok(());
            }

            for finding in &report.findings {
                println!("[{}] {}: {}", finding.category, finding.path, finding.message);
            }
            println!();
            println!("FAIL: {} violation(s) found", report.violation_count);
        }
    }
    Ok(())
}
