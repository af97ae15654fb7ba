//! CLI end-to-end tests that invoke the compiled `cfgcache` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cfgcache(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cfgcache").unwrap();
    cmd.env_remove("RUST_LOG").arg("--dir").arg(dir.path());
    cmd
}

fn fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("app.yaml"), "server:\n  port: 8080\n").unwrap();
    fs::write(
        temp.path().join("hosts.ini"),
        "[main]\npeers = [\"10.0.0.1\",\"10.0.0.2\"]\nenabled = Yes\n",
    )
    .unwrap();
    fs::write(temp.path().join("legacy"), "# json settings\n").unwrap();
    temp
}

#[test]
fn test_help_exits_zero() {
    Command::cargo_bin("cfgcache")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dump"));
}

#[test]
fn test_get_int() {
    let temp = fixture();
    cfgcache(&temp)
        .args(["get", "app.yaml", "server.port", "--type", "int"])
        .assert()
        .success()
        .stdout("8080\n");
}

#[test]
fn test_get_ini_json_list() {
    let temp = fixture();
    cfgcache(&temp)
        .args(["get", "hosts.ini", "main.peers", "-t", "json"])
        .assert()
        .success()
        .stdout("[\"10.0.0.1\",\"10.0.0.2\"]\n");
}

#[test]
fn test_get_ini_bool() {
    let temp = fixture();
    cfgcache(&temp)
        .args(["get", "hosts.ini", "main.enabled", "--type", "bool"])
        .assert()
        .success()
        .stdout("true\n");
}

#[test]
fn test_dump_snapshot() {
    let temp = fixture();
    let output = cfgcache(&temp).args(["dump", "app.yaml"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    insta::assert_snapshot!(stdout.trim_end(), @r#"
    {
      "server": {
        "port": 8080
      }
    }
    "#);
}

#[test]
fn test_dump_with_explicit_parser() {
    let temp = fixture();
    fs::write(temp.path().join("odd.json"), "name: yaml-inside\n").unwrap();
    cfgcache(&temp)
        .args(["dump", "odd.json", "--parser", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("yaml-inside"));
}

#[test]
fn test_detect_from_comment_line() {
    let temp = fixture();
    cfgcache(&temp)
        .args(["detect", "legacy"])
        .assert()
        .success()
        .stdout("json\n");
}

#[test]
fn test_missing_file_fails() {
    let temp = fixture();
    cfgcache(&temp)
        .args(["dump", "absent.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_missing_key_fails() {
    let temp = fixture();
    cfgcache(&temp)
        .args(["get", "app.yaml", "server.host"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Key not found: server.host"));
}

#[test]
fn test_dir_from_env() {
    let temp = fixture();
    Command::cargo_bin("cfgcache")
        .unwrap()
        .env("CFGCACHE_DIR", temp.path())
        .args(["get", "app.yaml", "server.port"])
        .assert()
        .success()
        .stdout("8080\n");
}
