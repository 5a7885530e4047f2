//! Smoke tests for apuntador CLI
//!
//! These tests verify basic CLI functionality works correctly.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command for the apuntador binary
fn apuntador() -> Command {
    Command::cargo_bin("apuntador").expect("apuntador binary should exist")
}

const LOGIN_SCREEN: &str = r#"{
    "type": "window",
    "frame": {"x": 0, "y": 0, "width": 430, "height": 932},
    "children": [
        {"type": "textField", "identifier": "email", "label": "Email",
         "frame": {"x": 20, "y": 200, "width": 390, "height": 44}},
        {"type": "button", "identifier": "login-button", "label": "Log In",
         "frame": {"x": 20, "y": 300, "width": 390, "height": 44}},
        {"type": "button", "identifier": "terms", "label": "Terms",
         "frame": {"x": 20, "y": 1400, "width": 390, "height": 44}}
    ]
}"#;

const ALERT_SCREEN: &str = "
type: window
frame: {x: 0, y: 0, width: 430, height: 932}
children:
  - type: button
    identifier: checkout
    frame: {x: 100, y: 400, width: 200, height: 44}
  - type: alert
    label: Network error
    frame: {x: 40, y: 300, width: 350, height: 250}
";

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    apuntador()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    apuntador()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("suggest"));
}

#[test]
fn test_no_args_fails() {
    apuntador().assert().failure();
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_success() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "login.json", LOGIN_SCREEN);
    apuntador()
        .args(["validate", "--tree"])
        .arg(&tree)
        .args(["--target", "#login-button", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"));
}

#[test]
fn test_validate_not_found_markdown() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "login.json", LOGIN_SCREEN);
    apuntador()
        .args(["validate", "--tree"])
        .arg(&tree)
        .args(["--target", "#login"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("## Element not found"))
        .stdout(predicate::str::contains("#login-button"));
}

#[test]
fn test_validate_compact_off_screen() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "login.json", LOGIN_SCREEN);
    apuntador()
        .args(["validate", "--tree"])
        .arg(&tree)
        .args(["--target", "#terms", "--format", "compact"])
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Element off screen:"));
}

#[test]
fn test_validate_larger_viewport_passes() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "login.json", LOGIN_SCREEN);
    apuntador()
        .args(["--viewport", "1024x2732", "validate", "--tree"])
        .arg(&tree)
        .args(["--target", "#terms"])
        .assert()
        .success();
}

#[test]
fn test_verbose_reports_engine_settings() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "login.json", LOGIN_SCREEN);
    apuntador()
        .args(["-v", "--color", "never", "--viewport", "390x844", "validate", "--tree"])
        .arg(&tree)
        .args(["--target", "#login-button"])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO Viewport 390x844, up to 5 suggestions at 30%"));
}

#[test]
fn test_default_verbosity_hides_engine_settings() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "login.json", LOGIN_SCREEN);
    apuntador()
        .args(["--viewport", "390x844", "validate", "--tree"])
        .arg(&tree)
        .args(["--target", "#login-button"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Viewport").not());
}

#[test]
fn test_validate_alert_yaml_json_report() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "alert.yaml", ALERT_SCREEN);
    apuntador()
        .args(["validate", "--tree"])
        .arg(&tree)
        .args(["--target", "#checkout", "--format", "json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"code\": \"ELEMENT_OBSCURED\""));
}

#[test]
fn test_validate_assert_not_exists() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "login.json", LOGIN_SCREEN);
    apuntador()
        .args(["validate", "--tree"])
        .arg(&tree)
        .args(["--target", "#spinner", "--action", "assertNotExists"])
        .assert()
        .success();
}

#[test]
fn test_validate_bad_target_exit_code() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "login.json", LOGIN_SCREEN);
    apuntador()
        .args(["validate", "--tree"])
        .arg(&tree)
        .args(["--target", "Log In"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid target"));
}

#[test]
fn test_missing_tree_file() {
    apuntador()
        .args(["validate", "--tree", "/nonexistent/tree.json", "--target", "#x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Snapshot error"));
}

// ============================================================================
// resolve / check / suggest
// ============================================================================

#[test]
fn test_resolve_prints_element() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "login.json", LOGIN_SCREEN);
    apuntador()
        .args(["resolve", "--tree"])
        .arg(&tree)
        .args(["--target", "\"Log In\""])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"identifier\": \"login-button\""));
}

#[test]
fn test_check_reports_reason() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "login.json", LOGIN_SCREEN);
    apuntador()
        .args(["check", "--tree"])
        .arg(&tree)
        .args(["--target", "button[1]"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("off_screen"));
}

#[test]
fn test_suggest_table() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "login.json", LOGIN_SCREEN);
    apuntador()
        .args(["suggest", "--tree"])
        .arg(&tree)
        .args(["--target", "#login", "--max", "1", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#login-button"))
        .stdout(predicate::str::contains("#email").not());
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let tree = write(&dir, "login.json", LOGIN_SCREEN);
    let config = write(&dir, "apuntar.yaml", "suggestions:\n  minSimilarity: 99\n");
    apuntador()
        .arg("--config")
        .arg(&config)
        .args(["suggest", "--tree"])
        .arg(&tree)
        .args(["--target", "#login"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No similar elements found"));
}
