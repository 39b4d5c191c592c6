use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn shows_help() {
    Command::new(env!("CARGO_BIN_EXE_asset_tidy"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("purge"))
        .stdout(predicate::str::contains("flatten"));
}

#[test]
fn shows_version() {
    Command::new(env!("CARGO_BIN_EXE_asset_tidy"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn rejects_unsupported_extension() {
    Command::new(env!("CARGO_BIN_EXE_asset_tidy"))
        .args(["convert", ".", "--ext", "gif"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported extension"));
}

#[test]
fn rejects_out_of_range_quality() {
    Command::new(env!("CARGO_BIN_EXE_asset_tidy"))
        .args(["convert", ".", "--quality", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 100"));
}

#[test]
fn interactive_without_answer_fails() {
    Command::new(env!("CARGO_BIN_EXE_asset_tidy"))
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No folder given"));
}
