//! Integration tests for the tidy CLI
//!
//! These tests run the actual binary and verify output.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the binary to test
#[allow(deprecated)]
fn tidy_cmd() -> Command {
    Command::cargo_bin("tidy").unwrap()
}

#[test]
fn test_help_flag() {
    tidy_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Date, duration, URL and cookie string helpers"));
}

#[test]
fn test_date_default_separator() {
    tidy_cmd()
        .args(["date", "2024", "1", "5"])
        .assert()
        .success()
        .stdout("2024-01-05\n");
}

#[test]
fn test_date_custom_separator() {
    tidy_cmd()
        .args(["date", "--sep", ":", "9", "5", "30"])
        .assert()
        .success()
        .stdout("9:05:30\n");
}

#[test]
fn test_duration_text() {
    tidy_cmd()
        .args(["duration", "1天2小时3分钟"])
        .assert()
        .success()
        .stdout("1day2hour3min (93780000 ms)\n");
}

#[test]
fn test_duration_huge_prefix_does_not_crash() {
    tidy_cmd()
        .args(["duration", "9999999999999999天"])
        .assert()
        .success()
        .stdout(format!("9999999999999999day ({} ms)\n", i64::MAX));
}

#[test]
fn test_url_keeps_empty_segments() {
    tidy_cmd()
        .args(["url", "/p?a=1&&b=2", "--remove", "z"])
        .assert()
        .success()
        .stdout("/p?a=1&&b=2\n");
}

#[test]
fn test_duration_json() {
    let output = tidy_cmd()
        .args(["duration", "--json", "2小时30秒"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(info["formatted"], "2hour30sec");
    assert_eq!(info["total_ms"], 2 * 3_600_000 + 30_000);
    assert_eq!(info["units"][1]["unit"], "sec");
}

#[test]
fn test_url_remove() {
    tidy_cmd()
        .args(["url", "http://x.com?a=1&b=2&c=3", "--remove", "b"])
        .assert()
        .success()
        .stdout("http://x.com?a=1&c=3\n");
}

#[test]
fn test_url_reserve() {
    tidy_cmd()
        .args(["url", "http://x.com?a=1&b=2", "--reserve", "a"])
        .assert()
        .success()
        .stdout("http://x.com?a=1\n");
}

#[test]
fn test_cookies_encode() {
    tidy_cmd()
        .args(["cookies", "tid=abc; Path=/", "uid=42"])
        .assert()
        .success()
        .stdout("tid=abc; Path=/||uid=42\n");
}

#[test]
fn test_cookies_rejects_bad_pair() {
    tidy_cmd()
        .args(["cookies", "novalue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UTIL-030"))
        .stderr(predicate::str::contains("Fix:"));
}

#[test]
fn test_classify() {
    tidy_cmd()
        .args(["classify", "[1, 2]"])
        .assert()
        .success()
        .stdout("array (object)\n");

    tidy_cmd()
        .args(["classify", "null"])
        .assert()
        .success()
        .stdout("null (base)\n");
}

#[test]
fn test_classify_bad_json() {
    tidy_cmd()
        .args(["classify", "{oops"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON parse error"));
}

#[test]
fn test_gate_without_delay() {
    tidy_cmd()
        .args(["gate", "--min-ms", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("started"))
        .stdout(predicate::str::contains("ended"));
}

#[test]
fn test_gate_holds_short_work() {
    let output = tidy_cmd()
        .args(["gate", "--min-ms", "120", "--work-ms", "10"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let held: u128 = stdout
        .lines()
        .find_map(|l| l.strip_prefix("held for "))
        .and_then(|l| l.trim_end_matches(" ms").parse().ok())
        .unwrap();
    assert!(held >= 120, "held only {held} ms");
}

// ============================================================================
// Config file tests
// ============================================================================

#[test]
fn test_config_changes_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("tidy.yaml");

    fs::write(
        &config_file,
        r#"
date_separator: "/"
duration_rules:
  - { unit: "h", unit_new: hour, time: 3600000 }
  - { unit: "m", unit_new: min, time: 60000 }
url_filter:
  remove: [token]
cookie:
  separator: ";;"
"#,
    )
    .unwrap();
    let config = config_file.to_str().unwrap();

    tidy_cmd()
        .args(["--config", config, "date", "2024", "3", "1"])
        .assert()
        .success()
        .stdout("2024/03/01\n");

    tidy_cmd()
        .args(["--config", config, "duration", "1h30m"])
        .assert()
        .success()
        .stdout("1hour30min (5400000 ms)\n");

    tidy_cmd()
        .args(["--config", config, "url", "/p?token=x&id=2"])
        .assert()
        .success()
        .stdout("/p?id=2\n");

    tidy_cmd()
        .args(["--config", config, "cookies", "a=1", "b=2"])
        .assert()
        .success()
        .stdout("a=1;;b=2\n");
}

#[test]
fn test_invalid_config_reports_code() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.yaml");
    fs::write(&config_file, "duration_rules:\n  - { unit: \"\", time: 5 }\n").unwrap();

    tidy_cmd()
        .args(["--config", config_file.to_str().unwrap(), "duration", "1h"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("UTIL-011"));
}

#[test]
fn test_missing_config_file() {
    tidy_cmd()
        .args(["--config", "/nonexistent/tidy.yaml", "date", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}
