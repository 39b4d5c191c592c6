// tests/integration/purge.rs
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

use crate::common::TempDir;

fn asset_tidy() -> Command {
    Command::new(env!("CARGO_BIN_EXE_asset_tidy"))
}

fn seed(temp: &TempDir) {
    temp.write_file("a.jpg", "a");
    temp.write_file("sub/b.PNG", "b");
    temp.write_file("sub/b.webp", "webp");
    temp.write_file("sub/c.jpeg", "c");
    temp.write_file("sub/keep.svg", "svg");
}

#[test]
fn purge_only_removes_matched_extensions() {
    let temp = TempDir::new("images", "asset_tidy_purge");
    seed(&temp);

    asset_tidy()
        .args(["purge", temp.arg(), "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total deleted: 3"));

    assert!(!temp.join("a.jpg").exists());
    assert!(!temp.join("sub/b.PNG").exists());
    assert!(!temp.join("sub/c.jpeg").exists());
    assert_eq!(temp.read("sub/b.webp"), "webp");
    assert_eq!(temp.read("sub/keep.svg"), "svg");
}

#[test]
fn purge_without_confirmation_deletes_nothing() {
    let temp = TempDir::new("images", "asset_tidy_purge");
    seed(&temp);

    asset_tidy()
        .args(["purge", temp.arg()])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing deleted."));

    asset_tidy()
        .args(["purge", temp.arg()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing deleted."));

    assert!(temp.join("a.jpg").exists());
    assert!(temp.join("sub/b.PNG").exists());
}

#[test]
fn purge_dry_run_and_require_webp() {
    let temp = TempDir::new("images", "asset_tidy_purge");
    seed(&temp);

    asset_tidy()
        .args(["purge", temp.arg(), "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would delete:").count(3))
        .stdout(predicate::str::contains("Would delete: 3"));
    assert!(temp.join("a.jpg").exists());

    asset_tidy()
        .args(["purge", temp.arg(), "--yes", "--require-webp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total deleted: 1"))
        .stdout(predicate::str::contains("Kept: 2"));

    assert!(temp.join("a.jpg").exists());
    assert!(!temp.join("sub/b.PNG").exists());
    assert!(temp.join("sub/c.jpeg").exists());
}

#[test]
fn purge_json_with_confirmation_prints_only_json() {
    let temp = TempDir::new("images", "asset_tidy_purge");
    seed(&temp);

    let output = asset_tidy()
        .args(["purge", temp.arg(), "--format", "json"])
        .write_stdin("s\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["deleted"], 3);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Delete all jpg/jpeg/png files"));
    assert!(!temp.join("a.jpg").exists());
}
