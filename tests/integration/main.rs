//! Integration tests for the chatpatch CLI
//!
//! These tests run the binary from a temporary project root, the way it is
//! used in practice: no arguments, the lead modal under `components/`.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LEAD_MODAL: &str = include_str!("../fixtures/lead_modal.tsx");

/// Helper function to create a chatpatch command
fn chatpatch() -> assert_cmd::Command {
    assert_cmd::Command::new(cargo::cargo_bin!("chatpatch"))
}

/// Helper to create a project root holding the lead modal
fn setup_project(content: Option<&str>) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("components")).unwrap();
    if let Some(content) = content {
        fs::write(modal_path(temp.path()), content).unwrap();
    }
    temp
}

fn modal_path(root: &Path) -> PathBuf {
    root.join("components/LeadFullViewModal.tsx")
}

// =============================================================================
// BASIC CLI
// =============================================================================

#[test]
fn test_version() {
    chatpatch()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("chatpatch"));
}

#[test]
fn test_help() {
    chatpatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("replacement rules"));
}

// =============================================================================
// PATCHING
// =============================================================================

/// Zero-argument run patches the default target and prints the summary
#[test]
fn test_patches_default_target() {
    let temp = setup_project(Some(LEAD_MODAL));

    chatpatch()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Reading components/LeadFullViewModal.tsx"))
        .stdout(predicate::str::contains("Fix 5: Close sidebar condition"))
        .stdout(predicate::str::contains("Saving"))
        .stdout(predicate::str::contains("Patch applied successfully"))
        .stdout(predicate::str::contains("Sidebar hidden while the chat tab is active"));

    let patched = fs::read_to_string(modal_path(temp.path())).unwrap();
    assert!(patched.contains("scrollbar-thin"));
    assert!(!patched.contains("{/* Right Column - Sidebar */}"));
}

/// Running twice reports a no-op the second time
#[test]
fn test_second_run_reports_no_change() {
    let temp = setup_project(Some(LEAD_MODAL));

    chatpatch().current_dir(temp.path()).assert().success();
    let after_first = fs::read_to_string(modal_path(temp.path())).unwrap();

    chatpatch()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes applied"))
        .stdout(predicate::str::contains("Saving").not());

    assert_eq!(fs::read_to_string(modal_path(temp.path())).unwrap(), after_first);
}

/// Empty input matches nothing and is left as-is
#[test]
fn test_empty_file_untouched() {
    let temp = setup_project(Some(""));

    chatpatch()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no match"))
        .stdout(predicate::str::contains("No changes applied"));

    assert_eq!(fs::read_to_string(modal_path(temp.path())).unwrap(), "");
}

/// A path argument overrides the default target
#[test]
fn test_explicit_path() {
    let temp = setup_project(None);
    let other = temp.path().join("Other.tsx");
    fs::write(&other, LEAD_MODAL).unwrap();

    chatpatch()
        .arg("Other.tsx")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Patch applied successfully"));

    assert_ne!(fs::read_to_string(&other).unwrap(), LEAD_MODAL);
}

/// Indentation drift leaves a rule unmatched; the patch still succeeds with a warning
#[test]
fn test_partial_patch_warns() {
    let drifted = LEAD_MODAL.replace("     </div>\n  );", "      </div>\n  );");
    let temp = setup_project(Some(drifted.as_str()));

    chatpatch()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Patch applied successfully"))
        .stdout(predicate::str::contains("1 rule(s) matched nothing: Close sidebar condition"));
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

/// Missing target is reported, not created, and does not fail the process
#[test]
fn test_missing_file_reported() {
    let temp = setup_project(None);

    chatpatch()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("file not found"))
        .stdout(predicate::str::contains("project root"));

    assert!(!modal_path(temp.path()).exists());
}

/// Any other I/O failure is reported as unexpected
#[test]
fn test_unexpected_error_reported() {
    let temp = setup_project(None);

    chatpatch()
        .arg("components")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Unexpected error"))
        .stdout(predicate::str::contains("failed to read components"));
}

/// A broken rule file is a usage error
#[test]
fn test_invalid_rule_file_fails() {
    let temp = setup_project(Some(LEAD_MODAL));
    fs::write(temp.path().join("rules.toml"), "[[rule]]\nsearch = \"\"\nreplace = \"x\"\n").unwrap();

    chatpatch()
        .args(["--rules", "rules.toml"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty search text"));

    assert_eq!(fs::read_to_string(modal_path(temp.path())).unwrap(), LEAD_MODAL);
}

// =============================================================================
// RULE FILES, LISTING AND JSON
// =============================================================================

#[test]
fn test_rule_file_with_own_target() {
    let temp = setup_project(None);
    fs::write(temp.path().join("App.tsx"), "<Chat compact />").unwrap();
    fs::write(
        temp.path().join("rules.toml"),
        r#"target = "App.tsx"
summary = ["Chat expanded"]

[[rule]]
name = "Expand chat"
search = "<Chat compact />"
replace = "<Chat fullscreen />"
"#,
    )
    .unwrap();

    chatpatch()
        .args(["--rules", "rules.toml"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Fix 1: Expand chat (1 replaced)"))
        .stdout(predicate::str::contains("Chat expanded"));

    assert_eq!(fs::read_to_string(temp.path().join("App.tsx")).unwrap(), "<Chat fullscreen />");
}

#[test]
fn test_list_does_not_touch_file() {
    let temp = setup_project(Some(LEAD_MODAL));

    chatpatch()
        .arg("--list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Target: components/LeadFullViewModal.tsx"))
        .stdout(predicate::str::contains("5. Close sidebar condition [literal]"));

    assert_eq!(fs::read_to_string(modal_path(temp.path())).unwrap(), LEAD_MODAL);
}

#[test]
fn test_json_output() {
    let temp = setup_project(Some(LEAD_MODAL));

    let output = chatpatch().arg("--json").current_dir(temp.path()).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["changed"], true);
    assert_eq!(json["rules"].as_array().unwrap().len(), 5);
    assert_eq!(json["unmatched"].as_array().unwrap().len(), 0);
    assert_eq!(json["summary"].as_array().unwrap().len(), 4);
}

#[test]
fn test_json_missing_file() {
    let temp = setup_project(None);

    let output = chatpatch().arg("--json").current_dir(temp.path()).output().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["changed"], false);
    assert_eq!(json["error"]["kind"], "not_found");
}

#[test]
fn test_json_no_change() {
    let temp = setup_project(Some(""));

    let output = chatpatch().arg("--json").current_dir(temp.path()).output().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["changed"], false);
    assert_eq!(json["unmatched"].as_array().unwrap().len(), 5);
    assert!(json.get("error").is_none());
}
