use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FREEBMD_BIRTH: &str = r#"{
    "url": "https://www.freebmd.org.uk/cgi/information.pl?id=42",
    "eventType": "birth",
    "eventYear": "1881",
    "eventQuarter": "Mar",
    "givenNames": "John",
    "surname": "SMITH",
    "registrationDistrict": "Leeds"
}"#;

fn sourcer() -> Command {
    Command::cargo_bin("sourcer").unwrap()
}

#[test]
fn test_generalize_text_summary() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("birth.json");
    fs::write(&input, FREEBMD_BIRTH).unwrap();

    sourcer()
        .args(["generalize", "--site", "freebmd", "--format", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: John Smith"));
}

#[test]
fn test_cite_inline_with_fixed_date() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("birth.json");
    let options = dir.path().join("options.json");
    fs::write(&input, FREEBMD_BIRTH).unwrap();
    fs::write(&options, "{}").unwrap();

    sourcer()
        .arg("--config")
        .arg(&options)
        .args(["cite", "--site", "freebmd", "--type", "inline", "--date", "2024-03-15"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<ref>"))
        .stdout(predicate::str::contains("FreeBMD Entry Information"));
}

#[test]
fn test_unknown_site_is_rejected() {
    sourcer()
        .args(["generalize", "--site", "ancestry", "missing.json"])
        .assert()
        .failure();
}

#[test]
fn test_batch_writes_summary() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.json"), FREEBMD_BIRTH).unwrap();
    fs::write(dir.path().join("b.json"), "[1, 2]").unwrap();
    let out = dir.path().join("out");
    let pattern = dir.path().join("*.json");

    sourcer()
        .args(["batch", "--site", "freebmd", "--summary", "--continue-on-error", "--date", "2024-03-15"])
        .arg(pattern.to_str().unwrap())
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("a.txt").exists());
    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("a.json,success"));
    assert!(summary.contains("b.json,error"));
}

#[test]
fn test_options_set_and_get() {
    let dir = TempDir::new().unwrap();
    let options = dir.path().join("options.json");

    sourcer()
        .arg("--config")
        .arg(&options)
        .args(["options", "set", "table_general_format", "list"])
        .assert()
        .success();

    sourcer()
        .arg("--config")
        .arg(&options)
        .args(["options", "get", "table_general_format"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"));

    sourcer()
        .arg("--config")
        .arg(&options)
        .args(["options", "set", "no_such_option", "x"])
        .assert()
        .failure();
}
