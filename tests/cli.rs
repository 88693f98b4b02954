// ABOUTME: End-to-end tests for the CLI binary surface.
// ABOUTME: Exercises argument parsing, init scaffolding, and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

fn stratus() -> Command {
    Command::cargo_bin("stratus").unwrap()
}

#[test]
fn help_lists_all_commands() {
    stratus()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("rollback"))
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("monitor"));
}

#[test]
fn deploy_without_config_fails_with_nonzero_exit() {
    let dir = tempfile::tempdir().unwrap();
    stratus()
        .current_dir(dir.path())
        .arg("deploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn init_scaffolds_a_config_file() {
    let dir = tempfile::tempdir().unwrap();
    stratus()
        .current_dir(dir.path())
        .args(["init", "--service-id", "srv-demo"])
        .assert()
        .success();

    let written = std::fs::read_to_string(dir.path().join("stratus.yml")).unwrap();
    assert!(written.contains("srv-demo"));
}

#[test]
fn init_refuses_to_overwrite_unless_forced() {
    let dir = tempfile::tempdir().unwrap();
    stratus()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    stratus()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    stratus()
        .current_dir(dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn sync_without_env_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("stratus.yml"),
        "service_id: srv-demo\napi:\n  base_url: http://127.0.0.1:1\n  token: tok\n",
    )
    .unwrap();

    stratus()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no env file specified"));
}
