//! Integration tests for the command-line interface

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn extractor() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_normativa-extractor"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_dry_run_json_report_creates_no_database() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let db = dir.path().join("corpus.db");

    extractor()
        .arg("--dry-run")
        .arg("--json")
        .arg("--database")
        .arg(&db)
        .arg("principal")
        .arg(fixtures().join("corpus").join("principal"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outcome\": \"document\""))
        .stdout(predicate::str::contains("\"outcome\": \"failed\""))
        .stdout(predicate::str::contains("\"document_id\": -1"));

    assert!(!db.exists(), "dry run must not create {}", db.display());
}

#[test]
fn test_all_batches_write_database() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let db = dir.path().join("corpus.db");
    let corpus = fixtures().join("corpus");

    extractor()
        .arg("--database")
        .arg(&db)
        .arg("all")
        .arg("--principal")
        .arg(corpus.join("principal"))
        .arg("--amendments")
        .arg(corpus.join("amendments"))
        .arg("--annexes")
        .arg(corpus.join("annexes"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored: 2  Unlinked: 0  Failed: 1"))
        .stdout(predicate::str::contains("Stored: 2  Unlinked: 1  Failed: 0"))
        .stdout(predicate::str::contains("zz_corrupto.pdf"));

    assert!(db.exists());
}

#[test]
fn test_inspect_json() {
    extractor()
        .arg("--json")
        .arg("inspect")
        .arg(fixtures().join("corpus").join("principal").join("ley_instituciones_credito.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"LEY DE INSTITUCIONES DE CRÉDITO\""))
        .stdout(predicate::str::contains("\"instrument_type\": \"Law\""))
        .stdout(predicate::str::contains("\"label\": \"46-BIS\""))
        .stdout(predicate::str::contains("\"publication_date\": \"2022-03-01\""));
}

#[test]
fn test_inspect_amendment_text() {
    extractor()
        .arg("inspect")
        .arg("--kind")
        .arg("amendment")
        .arg(fixtures().join("corpus").join("amendments").join("reforma_20220301.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: RESOLUCIÓN que modifica"))
        .stdout(predicate::str::contains("File name date: 2022-03-01"));
}

#[test]
fn test_inspect_unreadable_file_fails() {
    extractor()
        .arg("inspect")
        .arg(fixtures().join("corpus").join("principal").join("zz_corrupto.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_invalid_config_fails() {
    extractor()
        .arg("--config")
        .arg(fixtures().join("invalid_config.yaml"))
        .arg("principal")
        .arg(fixtures().join("corpus").join("principal"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("title.uppercase_ratio"));
}

#[test]
fn test_missing_input_directory_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));

    extractor()
        .arg("--dry-run")
        .arg("--database")
        .arg(dir.path().join("corpus.db"))
        .arg("annexes")
        .arg(dir.path().join("absent"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored: 0  Unlinked: 0  Failed: 0"));
}
