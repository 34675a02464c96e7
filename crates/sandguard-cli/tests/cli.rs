//! End-to-end CLI tests against the compose fixtures in `tests/fixtures/`.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a Command for the sandguard binary.
#[allow(deprecated)]
fn sandguard_cmd() -> Command {
    Command::cargo_bin("sandguard").expect("sandguard binary not found - run `cargo build` first")
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn help_works() {
    sandguard_cmd().arg("--help").assert().success();
}

#[test]
fn hardened_fixture_passes() {
    sandguard_cmd()
        .arg("check")
        .arg(fixture("hardened.yml"))
        .assert()
        .code(0)
        .stdout("PASS: all sandbox hardening guardrails satisfied\n");
}

#[test]
fn weak_fixture_lists_every_violation() {
    let expected = [
        "FAIL: agent: read_only must be true",
        "FAIL: agent: cap_drop must include ALL",
        "FAIL: agent: missing no-new-privileges:true",
        "FAIL: agent: missing seccomp profile in security_opt",
        "FAIL: agent: missing apparmor profile in security_opt",
        "FAIL: agent: tmpfs must include /tmp",
        "FAIL: agent: pids_limit is required",
        "FAIL: agent: mem_limit is required",
        "FAIL: agent: at least one secret must be configured",
        "FAIL: agent: env 'OPENAI_API_KEY' looks like an inline secret; use *_FILE with Docker secrets",
        "FAIL: agent: network 'sandbox' must be internal",
        "FAIL: top-level secrets definition is required",
    ];

    let output = sandguard_cmd()
        .arg("check")
        .arg(fixture("weak.yml"))
        .output()
        .expect("Failed to run command");

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn merge_keys_and_list_syntax() {
    sandguard_cmd()
        .arg("check")
        .arg(fixture("list-syntax.yml"))
        .assert()
        .code(1)
        .stdout(
            "FAIL: worker: /tmp tmpfs must include noexec,nosuid\n\
             FAIL: worker: env 'DB_PASSWORD' looks like an inline secret; use *_FILE with Docker secrets\n",
        );
}

#[test]
fn json_report() {
    let output = sandguard_cmd()
        .arg("check")
        .arg("--format")
        .arg("json")
        .arg(fixture("weak.yml"))
        .output()
        .expect("Failed to run command");

    assert_eq!(output.status.code(), Some(1));
    let report: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");

    assert_eq!(report["passed"], false);
    assert_eq!(report["services_checked"], 1);
    let violations = report["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 12);
    assert_eq!(violations[0]["check"], "fs.read_only");
    assert_eq!(violations[0]["service"], "agent");
    assert_eq!(violations[11]["check"], "secrets.top_level");
    assert!(violations[11].get("service").is_none());
}

#[test]
fn json_report_passes() {
    let output = sandguard_cmd()
        .args(["check", "--format", "json"])
        .arg(fixture("hardened.yml"))
        .output()
        .expect("Failed to run command");

    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["passed"], true);
}

#[test]
fn missing_file_is_fatal() {
    sandguard_cmd()
        .arg("check")
        .arg(fixture("does-not-exist.yml"))
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to load"));
}

#[test]
fn malformed_yaml_is_fatal() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("compose.yml");
    std::fs::write(&path, "services:\n  web: [unclosed\n").unwrap();

    sandguard_cmd()
        .arg("check")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse YAML"));
}

#[test]
fn non_mapping_root_is_fatal() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("compose.yml");
    std::fs::write(&path, "- web\n- db\n").unwrap();

    sandguard_cmd()
        .arg("check")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must be a mapping"));
}

#[test]
fn list_shows_catalog() {
    sandguard_cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("fs.read_only"))
        .stdout(predicate::str::contains("network.internal"))
        .stdout(predicate::str::contains("secrets.top_level"));
}

#[test]
fn explain_known_check() {
    sandguard_cmd()
        .args(["explain", "secrets.inline_env"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remediation:"))
        .stdout(predicate::str::contains("_FILE"));
}

#[test]
fn explain_unknown_check() {
    sandguard_cmd()
        .args(["explain", "fs.nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown check id: fs.nope"));
}

#[test]
fn verbose_logs_go_to_stderr() {
    sandguard_cmd()
        .args(["-vv", "check"])
        .arg(fixture("hardened.yml"))
        .assert()
        .success()
        .stdout("PASS: all sandbox hardening guardrails satisfied\n")
        .stderr(predicate::str::contains("evaluation complete"));
}
