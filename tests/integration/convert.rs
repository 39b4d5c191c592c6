// tests/integration/convert.rs
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

use crate::common::{TempDir, is_webp};

fn asset_tidy() -> Command {
    Command::new(env!("CARGO_BIN_EXE_asset_tidy"))
}

#[test]
fn converts_tree_and_prints_summary() {
    let temp = TempDir::new("images", "asset_tidy_convert");
    temp.write_png("logo.png");
    temp.write_jpeg("products/crane/front.JPG");
    temp.write_file("products/crane/broken.jpeg", "not really a jpeg");
    temp.write_file("products/README.md", "# products");

    asset_tidy()
        .args(["convert", temp.arg()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Searching for images in:"))
        .stdout(predicate::str::contains("Processing:").count(3))
        .stdout(predicate::str::contains("✔ Converted:").count(2))
        .stdout(predicate::str::contains("✗ Error with"))
        .stdout(predicate::str::contains("Total images found: 3"))
        .stdout(predicate::str::contains("Converted: 2"))
        .stdout(predicate::str::contains("Errors: 1"));

    assert!(is_webp(&temp.join("logo.webp")));
    assert!(is_webp(&temp.join("products/crane/front.webp")));
    assert!(!temp.join("products/crane/broken.webp").exists());
    assert!(temp.join("logo.png").exists());
}

#[test]
fn json_report_counts_add_up() {
    let temp = TempDir::new("images", "asset_tidy_convert");
    temp.write_png("a.png");
    temp.write_transparent_png("b/c.png");
    temp.write_file("b/d.jpg", "garbage");

    let output = asset_tidy()
        .args(["convert", temp.arg(), "--format", "json", "--jobs", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let report = &json["convert"];
    let found = report["found"].as_u64().unwrap();
    let converted = report["converted"].as_u64().unwrap();
    let failed = report["failed"].as_u64().unwrap();
    let skipped = report["skipped"].as_u64().unwrap();

    assert_eq!(found, 3);
    assert_eq!(converted + failed + skipped, found);
    assert_eq!(report["files"].as_array().unwrap().len(), 3);
    assert!(json.get("purge").is_none());
}

#[test]
fn empty_tree_reports_nothing_found() {
    let temp = TempDir::new("images", "asset_tidy_convert");
    temp.write_file("notes.txt", "nothing to see");

    asset_tidy()
        .args(["convert", temp.arg()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total images found: 0"))
        .stdout(predicate::str::contains(
            "No JPG, JPEG or PNG images were found under the given path.",
        ));
}

#[test]
fn strict_fails_when_a_file_failed() {
    let temp = TempDir::new("images", "asset_tidy_convert");
    temp.write_file("bad.png", "garbage");

    asset_tidy().args(["convert", temp.arg()]).assert().success();
    asset_tidy()
        .args(["convert", temp.arg(), "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 item(s) failed"));
}

#[test]
fn missing_folder_is_fatal() {
    let temp = TempDir::new("images", "asset_tidy_convert");

    asset_tidy()
        .args(["convert", temp.join("missing").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn delete_originals_with_yes() {
    let temp = TempDir::new("images", "asset_tidy_convert");
    temp.write_png("a.png");
    temp.write_jpeg("b.jpeg");

    asset_tidy()
        .args(["convert", temp.arg(), "--delete-originals", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total deleted: 2"));

    assert!(!temp.join("a.png").exists());
    assert!(!temp.join("b.jpeg").exists());
    assert!(is_webp(&temp.join("a.webp")));
    assert!(is_webp(&temp.join("b.webp")));
}

#[test]
fn delete_originals_asks_first() {
    let temp = TempDir::new("images", "asset_tidy_convert");
    temp.write_png("a.png");

    asset_tidy()
        .args(["convert", temp.arg(), "--delete-originals"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Delete original JPG/PNG files? (s/n): "))
        .stdout(predicate::str::contains("Total deleted").not());

    assert!(temp.join("a.png").exists());
}

#[test]
fn interactive_session_converts_and_deletes() {
    let temp = TempDir::new("images", "asset_tidy_convert");
    temp.write_png("hero/banner.png");
    temp.write_file("hero/banner.txt", "caption");

    asset_tidy()
        .write_stdin(format!("{}\ns\n", temp.arg()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Folder to convert (e.g. src/assets/images): "))
        .stdout(predicate::str::contains("Converted: 1"))
        .stdout(predicate::str::contains("🗑 Deleted:"))
        .stdout(predicate::str::contains("Total deleted: 1"));

    assert!(is_webp(&temp.join("hero/banner.webp")));
    assert!(!temp.join("hero/banner.png").exists());
    assert_eq!(temp.read("hero/banner.txt"), "caption");
}

#[test]
fn restricted_extension_list() {
    let temp = TempDir::new("images", "asset_tidy_convert");
    temp.write_png("a.png");
    temp.write_jpeg("b.jpg");

    asset_tidy()
        .args(["convert", temp.arg(), "--ext", "png"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total images found: 1"));

    assert!(temp.join("a.webp").exists());
    assert!(!temp.join("b.webp").exists());
}
