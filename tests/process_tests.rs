//! Drives the real binary against a shell-script simulator.
#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Fails on the 13th, otherwise reports the day as sensors and the month as battery.
const SIMULATOR: &str = r#"
case "$1" in
  13) echo "no route" >&2; exit 1 ;;
esac
echo "Next target: somewhere"
echo "Battery: $2"
echo "Visited $1/33 sensors"
"#;

fn write_config(dir: &std::path::Path, years: &str) -> std::path::PathBuf {
    let cfg = dir.join("bench.toml");
    let body = format!(
        r#"
[simulator]
program = "sh"
prefix_args = ["-c", '''{}''', "sim"]

[dates]
years = {}

[output]
directory = "{}"
"#,
        SIMULATOR,
        years,
        dir.join("out").display()
    );
    std::fs::write(&cfg, body).unwrap();
    cfg
}

#[test]
fn test_run_full_year_with_shell_simulator() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path(), "[2021]");

    Command::cargo_bin("simbench")
        .unwrap()
        .args(["run", "--config"])
        .arg(&cfg)
        .assert()
        .success()
        .stdout(predicate::str::contains("01/01/2021"))
        .stdout(predicate::str::contains("Testing finished...12 failed"))
        .stdout(predicate::str::contains("Name: Sensors, Length: 353"));

    let sensors = std::fs::read_to_string(dir.path().join("out/sensors.csv")).unwrap();
    let mut lines = sensors.lines();
    assert_eq!(lines.next(), Some(",Sensors"));
    assert_eq!(lines.next(), Some("0,1"));
    assert_eq!(sensors.lines().count(), 354);

    let battery = std::fs::read_to_string(dir.path().join("out/battery.csv")).unwrap();
    assert_eq!(battery.lines().last(), Some("352,12"));
}

#[test]
fn test_json_run_prints_only_the_summary() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path(), "[2021]");

    let assert = Command::cargo_bin("simbench")
        .unwrap()
        .args(["run", "--json", "--config"])
        .arg(&cfg)
        .assert()
        .success()
        .stderr(predicate::str::contains("01/01/2021"))
        .stderr(predicate::str::contains("Testing finished...12 failed"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is one JSON object");
    assert_eq!(summary["runs"], 365);
    assert_eq!(summary["failed"], 12);
    assert_eq!(summary["invocation_failures"], 12);
    assert_eq!(summary["unparseable"], 0);
    assert_eq!(summary["series"]["sensors"]["count"], 353);
    assert_eq!(summary["series"]["battery"]["max"], 12.0);
}

#[test]
fn test_summarize_reads_previous_run() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path(), "[2021]");

    let assert = Command::cargo_bin("simbench")
        .unwrap()
        .args(["run", "--json", "--config"])
        .arg(&cfg)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is one JSON object");
    assert_eq!(summary["invocation_failures"], 12);

    Command::cargo_bin("simbench")
        .unwrap()
        .args(["summarize", "--config"])
        .arg(&cfg)
        .assert()
        .success()
        .stdout(predicate::str::contains("Battery"))
        .stdout(predicate::str::contains("353"));
}

#[test]
fn test_missing_simulator_aborts_without_tables() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = write_config(dir.path(), "[2021]");

    Command::cargo_bin("simbench")
        .unwrap()
        .args(["run", "--program", "/nonexistent/simulator", "--config"])
        .arg(&cfg)
        .assert()
        .failure();

    assert!(!dir.path().join("out/times.csv").exists());
}
