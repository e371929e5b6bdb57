#![allow(deprecated)] // cargo_bin → cargo_bin_cmd!

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn driftflow() -> Command {
    let mut cmd = Command::cargo_bin("driftflow").unwrap();
    cmd.env_remove("AWS_PROFILE")
        .env_remove("AWS_REGION")
        .env_remove("DRIFTFLOW_CONFIG_PATH");
    cmd
}

#[test]
fn test_cli_help() {
    driftflow()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CloudFormation stack drift"))
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_cli_version() {
    driftflow()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("driftflow"));
}

#[test]
fn test_detect_help() {
    driftflow()
        .arg("detect")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--filter"))
        .stdout(predicate::str::contains("--stack-file"))
        .stdout(predicate::str::contains("--poll-interval"))
        .stdout(predicate::str::contains("--results-file"));
}

#[test]
fn test_list_help() {
    driftflow()
        .arg("list")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_detect_rejects_invalid_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("driftflow.yaml");
    fs::write(&config_path, "max_attempts: [1, 2]\n").unwrap();

    driftflow()
        .current_dir(temp_dir.path())
        .arg("--config")
        .arg(&config_path)
        .arg("detect")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn test_detect_rejects_zero_max_attempts() {
    let temp_dir = tempfile::tempdir().unwrap();

    driftflow()
        .current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .args(["detect", "--max-attempts", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_attempts must be at least 1"));

    assert!(!temp_dir.path().join("temp.txt").exists());
}
