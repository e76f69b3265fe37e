//! Integration tests for `selchord bindings`.

mod common;

use common::selchord_cmd;
use predicates::prelude::*;

#[test]
fn test_general_bindings_table() {
    selchord_cmd()
        .arg("bindings")
        .assert()
        .success()
        .stdout(predicate::str::contains("Variant: general (window 400ms)"))
        .stdout(predicate::str::contains("KeyJ"))
        .stdout(predicate::str::contains("translate-japanese"))
        .stdout(predicate::str::contains("translate-chinese"));
}

#[test]
fn test_hosted_bindings_json() {
    let output = selchord_cmd()
        .args(["--variant", "hosted", "bindings", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let actions: Vec<_> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["action"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        actions,
        [
            "confluence-search",
            "internal-question",
            "docs-search",
            "ticket-search",
            "improve-japanese",
            "translate"
        ]
    );
}

#[test]
fn test_custom_bindings_from_env() {
    selchord_cmd()
        .env("SELCHORD_BINDINGS", "K=docs-search")
        .env("SELCHORD_WINDOW_MS", "300")
        .arg("bindings")
        .assert()
        .success()
        .stdout(predicate::str::contains("window 300ms"))
        .stdout(predicate::str::contains("KK"))
        .stdout(predicate::str::contains("docs-search"));
}

#[test]
fn test_conflicting_bindings_exit_5() {
    selchord_cmd()
        .env("SELCHORD_BINDINGS", "K=docs-search,K=translate")
        .arg("bindings")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("SELCHORD_BINDINGS"));
}

#[test]
fn test_invalid_variant_rejected() {
    selchord_cmd()
        .args(["--variant", "desktop", "bindings"])
        .assert()
        .failure();
}
