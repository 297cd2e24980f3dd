use std::fs;

use super::strip_bom;
use super::types::{AuditContext, AuditReport, Finding, Rule};

/// JSON files must parse
pub struct JsonRule;

impl Rule for JsonRule {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Every .json file parses as JSON"
    }

    fn check(&self, ctx: &AuditContext<'_>, report: &mut AuditReport) {
        for path in ctx.walker.files_with_extensions(&["json"]) {
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    report.add_finding(Finding::new(
                        self.name(),
                        ctx.display_path(&path),
                        format!("Invalid JSON: {}", e),
                    ));
                    continue;
                }
            };

            if let Err(e) = serde_json::from_slice::<serde_json::Value>(strip_bom(&bytes)) {
                report.add_finding(Finding::new(
                    self.name(),
                    ctx.display_path(&path),
                    format!("Invalid JSON: {}", e),
                ));
            }
        }
    }
}
