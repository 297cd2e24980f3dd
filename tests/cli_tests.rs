//! Integration tests for the repoguard CLI surface and the check command

mod support;

use predicates::prelude::*;
use tempfile::tempdir;

use crate::support::{repoguard, write_tree};

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn test_help_flag() {
    repoguard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: repoguard"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("enforce-doc-names"));
}

#[test]
fn test_version_flag() {
    repoguard()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("repoguard"));
}

#[test]
fn test_no_subcommand_prints_pointer_to_help() {
    repoguard()
        .assert()
        .success()
        .stdout(predicate::str::contains("repoguard --help"));
}

// ============================================================================
// Exit codes
// ============================================================================

#[test]
fn test_unknown_format_exit_code_2() {
    repoguard()
        .args(["--format", "invalid", "check"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_subcommand_json_envelope() {
    repoguard()
        .args(["--format", "json", "frobnicate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("\"type\":\"usage_error\""));
}

#[test]
fn test_missing_root_exit_code_3() {
    let dir = tempdir().unwrap();
    repoguard()
        .arg("--root")
        .arg(dir.path().join("nope"))
        .arg("check")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("root not found"));
}

#[test]
fn test_missing_explicit_config_exit_code_2() {
    let dir = tempdir().unwrap();
    repoguard()
        .arg("--root")
        .arg(dir.path())
        .args(["--config", "absent.toml", "check"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config path"));
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_clean_repository() {
    let dir = tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("README.md", "# Project\n\nSee [guide](docs/setup-guide.md).\n"),
            ("docs/setup-guide.md", "# Setup\n"),
            ("package.json", "{\"name\": \"x\"}\n"),
        ],
    );

    repoguard()
        .arg("--root")
        .arg(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "PASS: no standards violations found",
        ));
}

#[test]
fn test_check_reports_violations_sorted() {
    let dir = tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("docs/Setup_Guide.md", "# Setup \n"),
            ("broken.json", "{"),
            ("Game/Source/Game/Actor.h", "UCLASS()\nclass AActor {};\n"),
            ("Tools/Widget.cs", "public class Widget\n{\n}\n"),
        ],
    );

    let output = repoguard()
        .arg("--root")
        .arg(dir.path())
        .arg("check")
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "[cpp-comments] Game/Source/Game/Actor.h: Add Doxygen block comment above UCLASS (line 1)",
            "[cs-comments] Tools/Widget.cs: Add /// <summary> XML comment above public declaration (line 1)",
            "[doc-name] docs/Setup_Guide.md: Use kebab-case filename. Suggested: setup-guide.md",
            lines[3],
            "[markdown] docs/Setup_Guide.md: Trailing whitespace on line 1",
            "",
            "FAIL: 5 violation(s) found",
        ]
    );
    assert!(lines[3].starts_with("[json] broken.json: Invalid JSON: "));
}

#[test]
fn test_check_json_output() {
    let dir = tempdir().unwrap();
    write_tree(dir.path(), &[("Notes.md", "# Notes\n")]);

    let output = repoguard()
        .arg("--root")
        .arg(dir.path())
        .args(["--format", "json", "check"])
        .assert()
        .code(1)
        .get_output()
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["violation_count"], 1);
    assert_eq!(report["findings"][0]["category"], "doc-name");
    assert_eq!(report["findings"][0]["path"], "Notes.md");
    assert_eq!(report["rules"][0]["name"], "doc-name");
    assert!(report["rules"][0]["description"]
        .as_str()
        .is_some_and(|d| !d.is_empty()));

    let error: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(error["error"]["type"], "violations");
    assert_eq!(error["error"]["code"], 1);
}

#[test]
fn test_check_respects_extra_exceptions_and_skip_dirs() {
    let dir = tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("CHANGELOG.md", "# Changes\n"),
            ("NOTICE.md", "# Notice\n"),
            ("vendor/Third_Party.md", "no heading\n"),
            ("Saved/Logs/Crash.md", "x"),
            (
                ".repoguard.toml",
                "[doc_names]\nexceptions = [\"NOTICE.md\"]\n\n[walk]\nskip_dirs = [\"vendor\"]\n",
            ),
        ],
    );

    repoguard()
        .arg("--root")
        .arg(dir.path())
        .args(["--extra-doc-name-exception", "CHANGELOG.md", "check"])
        .assert()
        .success();
}

#[test]
fn test_check_quiet_failure_still_reports_findings() {
    let dir = tempdir().unwrap();
    write_tree(dir.path(), &[("bad.json", "[1,")]);

    repoguard()
        .arg("--root")
        .arg(dir.path())
        .args(["--quiet", "check"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[json] bad.json"))
        .stderr(predicate::str::is_empty());
}
