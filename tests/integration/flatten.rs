// tests/integration/flatten.rs
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

use crate::common::TempDir;

fn asset_tidy() -> Command {
    Command::new(env!("CARGO_BIN_EXE_asset_tidy"))
}

#[test]
fn flattens_self_nested_product_folders() {
    let temp = TempDir::new("products", "asset_tidy_flatten");
    temp.write_file("12-crane/12-crane/1.jpg", "one");
    temp.write_file("12-crane/12-crane/2.jpg", "two");
    temp.write_file("13-truck/side/3.jpg", "three");

    asset_tidy()
        .args(["flatten", temp.arg()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Collapsing"))
        .stdout(predicate::str::contains(
            "Flatten complete: 1 nested folders, 2 files moved, 0 conflicts, 1 folders removed, 0 errors.",
        ));

    assert_eq!(temp.read("12-crane/1.jpg"), "one");
    assert_eq!(temp.read("12-crane/2.jpg"), "two");
    assert!(!temp.join("12-crane/12-crane").exists());
    assert_eq!(temp.read("13-truck/side/3.jpg"), "three");
}

#[test]
fn root_takes_part_only_with_include_root() {
    let temp = TempDir::new("crane", "asset_tidy_flatten");
    temp.write_file("crane/photo.jpg", "p");

    asset_tidy()
        .args(["flatten", temp.arg()])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 nested folders"));
    assert!(temp.join("crane/photo.jpg").exists());

    asset_tidy()
        .args(["flatten", temp.arg(), "--include-root"])
        .assert()
        .success();
    assert_eq!(temp.read("photo.jpg"), "p");
    assert!(!temp.join("crane").exists());
}

#[test]
fn dry_run_reports_plan_as_json() {
    let temp = TempDir::new("products", "asset_tidy_flatten");
    temp.write_file("van/van/1.jpg", "one");
    temp.write_file("van/1.jpg", "existing");

    let output = asset_tidy()
        .args(["flatten", temp.arg(), "--dry-run", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["dry_run"], true);
    assert_eq!(json["conflicts"], 1);
    assert_eq!(json["files_moved"], 0);
    assert_eq!(json["actions"][0]["kind"], "conflict");

    assert_eq!(temp.read("van/van/1.jpg"), "one");
    assert_eq!(temp.read("van/1.jpg"), "existing");
}
