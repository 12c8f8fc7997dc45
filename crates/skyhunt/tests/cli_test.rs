#![allow(deprecated)] // Command::cargo_bin, until the assert_cmd 3 macro lands

use assert_cmd::Command;
use predicates::prelude::*;

/// Help lists every subcommand
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("skyhunt").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("hunt"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("reset"))
        .stdout(predicate::str::contains("validate"));
}

/// Version subcommand works without any configuration
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("skyhunt").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("skyhunt"));
}

/// Hunt help shows the pass-control flags
#[test]
fn test_hunt_help() {
    let mut cmd = Command::cargo_bin("skyhunt").unwrap();
    cmd.arg("hunt")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-cycle"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--force"));
}

/// Unknown subcommands fail with a clap error
#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("skyhunt").unwrap();
    cmd.arg("invalid-command").assert().failure();
}

/// Hunting with no configuration at all exits non-zero and names the
/// missing settings (run from a scratch directory without skyhunt.toml)
#[test]
fn test_hunt_without_config_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("skyhunt").unwrap();
    cmd.current_dir(temp_dir.path())
        .env_remove("SKYHUNT_COMPARTMENT_ID")
        .arg("hunt")
        .arg("--dry-run")
        .assert()
        .failure()
        .stdout(predicate::str::contains("compartment_id"));
}

/// Reset with no marker is a clean no-op
#[test]
fn test_reset_without_marker() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("skyhunt").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("reset")
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));
}
