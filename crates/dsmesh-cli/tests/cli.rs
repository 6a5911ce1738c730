//! Binary-level checks that need no network access.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn dsmesh() -> Command {
    let mut cmd = Command::cargo_bin("dsmesh").unwrap();
    cmd.env_remove("DSMESH_CONFIG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn help_lists_commands() {
    dsmesh()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("external"));
}

#[test]
fn init_refuses_existing_config() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("dsnetconfig.json");
    fs::write(&file, "{}\n").unwrap();

    dsmesh()
        .args(["init", "--no-color", "--config"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite existing"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "{}\n");
}

#[test]
fn init_config_path_from_env() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("from-env.json");
    fs::write(&file, "untouched").unwrap();

    dsmesh()
        .env("DSMESH_CONFIG", &file)
        .args(["init", "--no-color"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("from-env.json"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "untouched");
}

#[cfg(unix)]
#[test]
fn init_refuses_undeterminable_config() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("plain-file");
    fs::write(&plain, "").unwrap();

    dsmesh()
        .args(["init", "--no-color", "--config"])
        .arg(plain.join("dsnetconfig.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot determine whether"));
}
