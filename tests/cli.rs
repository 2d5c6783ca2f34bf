//! End-to-end CLI tests using `assert_cmd`

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SMALL_CATALOG: &str = r##"
[profile]
name = "Ada Lovelace"
job_title = "Analyst"
same_as = ["https://example.org/ada"]

[root]
name = "notes"
kind = "folder"
expanded = true

[[root.children]]
name = "drafts"
kind = "folder"

[[root.children.children]]
name = "engine.md"
body = "# Analytical Engine"

[[root.children]]
name = "hello.kt"
body = "fun main() = println(\"hi\")"
"##;

/// Binary with config isolated to `home`
fn devfolio(home: &TempDir) -> Command {
    let mut cmd =
        Command::cargo_bin("devfolio").unwrap_or_else(|err| panic!("Binary not found: {err}"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("DEVFOLIO_CONTENT")
        .env_remove("RUST_LOG");
    cmd
}

fn temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|err| panic!("Failed to create temp dir: {err}"))
}

#[test]
fn test_cli_help() {
    let home = temp_dir();
    devfolio(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_tree_uses_default_expansion() {
    let home = temp_dir();
    devfolio(&home)
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("▾ portfolio/\n"))
        .stdout(predicate::str::contains("  ▸ experience/\n"))
        .stdout(predicate::str::contains("    Zyptra.kt  ▶\n"))
        .stdout(predicate::str::contains("AGOMUC.kt").not());
}

#[test]
fn test_tree_all_expands_everything() {
    let home = temp_dir();
    devfolio(&home)
        .args(["tree", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AGOMUC.kt"))
        .stdout(predicate::str::contains("▾ extracurricular/"));
}

#[test]
fn test_show_document() {
    let home = temp_dir();
    devfolio(&home)
        .args(["show", "projects/Zyptra.kt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("class ZyptraProject"));
}

#[test]
fn test_show_missing_and_folder_fail() {
    let home = temp_dir();
    devfolio(&home)
        .args(["show", "projects/Nope.kt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    devfolio(&home)
        .args(["show", "projects"])
        .assert()
        .failure();
}

#[test]
fn test_meta_prints_person() {
    let home = temp_dir();
    devfolio(&home)
        .arg("meta")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"@type\": \"Person\""))
        .stdout(predicate::str::contains("Yashvant Yadav"));
}

#[test]
fn test_custom_catalog() {
    let home = temp_dir();
    let catalog = home.path().join("ada.toml");
    fs::write(&catalog, SMALL_CATALOG)
        .unwrap_or_else(|err| panic!("Failed to write catalog: {err}"));

    devfolio(&home)
        .arg("--content")
        .arg(&catalog)
        .arg("tree")
        .assert()
        .success()
        .stdout("▾ notes/\n  ▸ drafts/\n    hello.kt\n");

    devfolio(&home)
        .env("DEVFOLIO_CONTENT", &catalog)
        .args(["show", "drafts/engine.md"])
        .assert()
        .success()
        .stdout("# Analytical Engine\n");

    devfolio(&home)
        .arg("--content")
        .arg(&catalog)
        .args(["meta", "--compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\":\"Ada Lovelace\""));
}

#[test]
fn test_invalid_catalog_fails() {
    let home = temp_dir();
    let catalog = home.path().join("broken.toml");
    fs::write(&catalog, "[root]\nname = \"x\"\nkind = \"document\"\n")
        .unwrap_or_else(|err| panic!("Failed to write catalog: {err}"));

    devfolio(&home)
        .arg("--content")
        .arg(&catalog)
        .arg("tree")
        .assert()
        .failure();
}

#[test]
fn test_config_roundtrip() {
    let home = temp_dir();

    devfolio(&home)
        .args(["config", "set", "explorer-width", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("explorer-width set to: 40"));

    devfolio(&home)
        .args(["config", "get", "explorer-width"])
        .assert()
        .success()
        .stdout("explorer-width: 40\n");

    devfolio(&home)
        .args(["config", "reset", "explorer-width"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reset to default: 32"));

    devfolio(&home)
        .args(["config", "set", "tick-rate", "fast"])
        .assert()
        .failure();
}

#[test]
fn test_config_content_path_is_used() {
    let home = temp_dir();
    let catalog = home.path().join("ada.toml");
    fs::write(&catalog, SMALL_CATALOG)
        .unwrap_or_else(|err| panic!("Failed to write catalog: {err}"));

    devfolio(&home)
        .args(["config", "set", "content-path"])
        .arg(&catalog)
        .assert()
        .success();

    devfolio(&home)
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("▾ notes/"));
}
