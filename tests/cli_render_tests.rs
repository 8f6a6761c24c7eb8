//! `gentrack` binary: render and summary subcommands
#![allow(deprecated)] // suppress assert_cmd::Command::cargo_bin deprecation in tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_artifact(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_render_csv_as_table() {
    let dir = TempDir::new().unwrap();
    let input = write_artifact(&dir, "0-calls.csv", "Gen,f\n0,3\n1,0\n2,2\n");

    let mut cmd = Command::cargo_bin("gentrack").unwrap();
    cmd.arg("render")
        .arg(&input)
        .assert()
        .success()
        .stdout("Gen f\n  0 3\n  1 0\n  2 2\n");
}

#[test]
fn test_render_to_output_file() {
    let dir = TempDir::new().unwrap();
    let input = write_artifact(&dir, "0-nodes.csv", "Gen,Node,Edge\n0,10,2\n");
    let output = dir.path().join("0-nodes.dump");

    let mut cmd = Command::cargo_bin("gentrack").unwrap();
    cmd.arg("render")
        .arg(&input)
        .arg("--format")
        .arg("table")
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Gen Node Edge\n  0   10    2"
    );
}

#[test]
fn test_render_csv_normalizes() {
    let dir = TempDir::new().unwrap();
    let input = write_artifact(&dir, "0-calls.csv", "Gen,f\r\n0,1\r\n");

    let mut cmd = Command::cargo_bin("gentrack").unwrap();
    cmd.arg("render")
        .arg(&input)
        .arg("--format")
        .arg("csv")
        .assert()
        .success()
        .stdout("Gen,f\n0,1\n");
}

#[test]
fn test_summary_sorted_by_total() {
    let dir = TempDir::new().unwrap();
    let input = write_artifact(&dir, "0-calls.csv", "Gen,small,big\n0,1,5\n1,0,7\n");

    let mut cmd = Command::cargo_bin("gentrack").unwrap();
    let assert = cmd.arg("summary").arg(&input).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.starts_with("2 generation(s), 2 unit(s)"));
    let big = stdout.find("big").unwrap();
    let small = stdout.find("small").unwrap();
    assert!(big < small);
}

#[test]
fn test_missing_input_fails() {
    let mut cmd = Command::cargo_bin("gentrack").unwrap();
    cmd.arg("summary")
        .arg("/nonexistent-gentrack/0-calls.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read artifact"));
}

#[test]
fn test_malformed_input_reports_line() {
    let dir = TempDir::new().unwrap();
    let input = write_artifact(&dir, "bad.csv", "Gen,f\n0,1\n1,oops\n");

    let mut cmd = Command::cargo_bin("gentrack").unwrap();
    cmd.arg("render")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn test_unknown_format_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_artifact(&dir, "0-calls.csv", "Gen,f\n0,1\n");

    let mut cmd = Command::cargo_bin("gentrack").unwrap();
    cmd.arg("render")
        .arg(&input)
        .arg("--format")
        .arg("json")
        .assert()
        .failure();
}
