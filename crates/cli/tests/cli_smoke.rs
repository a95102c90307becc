//! CLI smoke tests for litegen.
//!
//! These tests verify that the commands run end to end and return appropriate
//! exit codes; the pipeline itself is covered by the library tests.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the litegen binary.
fn litegen_cmd() -> Command {
  cargo_bin_cmd!("litegen")
}

/// Minimal component definition understood by the built-in IR toolchain.
const WIDGET: &str = "{ name: 'Widget', template: '<div />' }";

#[test]
fn help_runs() {
  litegen_cmd().arg("--help").assert().success();
}

#[test]
fn targets_lists_the_supported_set() {
  litegen_cmd()
    .arg("targets")
    .assert()
    .success()
    .stdout(predicate::str::contains("react"))
    .stdout(predicate::str::contains("reactNative"))
    .stdout(predicate::str::contains("vue"))
    .stdout(predicate::str::contains("solid"));
}

#[test]
fn build_produces_output_tree() {
  let temp = TempDir::new().unwrap();
  std::fs::create_dir_all(temp.path().join("src")).unwrap();
  std::fs::write(temp.path().join("src/widget.lite.tsx"), WIDGET).unwrap();

  litegen_cmd()
    .args(["build", "--target", "react"])
    .args(["--root".as_ref(), temp.path().as_os_str()])
    .args(["--dest".as_ref(), temp.path().join("out").as_os_str()])
    .assert()
    .success()
    .stdout(predicate::str::contains("Build complete!"));

  assert!(temp.path().join("out/react/widget.js").exists());
}

#[test]
fn build_reads_the_default_config_file() {
  let temp = TempDir::new().unwrap();
  std::fs::create_dir_all(temp.path().join("src")).unwrap();
  std::fs::write(temp.path().join("src/widget.lite.tsx"), WIDGET).unwrap();
  std::fs::write(
    temp.path().join("litegen.config.json"),
    r#"{ "targets": ["solid"], "dest": "built" }"#,
  )
  .unwrap();

  litegen_cmd()
    .arg("build")
    .args(["--root".as_ref(), temp.path().as_os_str()])
    .args(["--dest".as_ref(), temp.path().join("built").as_os_str()])
    .assert()
    .success();

  assert!(temp.path().join("built/solid/widget.js").exists());
}

#[test]
fn build_without_targets_fails() {
  let temp = TempDir::new().unwrap();
  litegen_cmd()
    .arg("build")
    .args(["--root".as_ref(), temp.path().as_os_str()])
    .assert()
    .failure()
    .stderr(predicate::str::contains("no targets configured"));
}

#[test]
fn build_with_missing_config_fails() {
  litegen_cmd()
    .args(["build", "--config", "does-not-exist.json", "--target", "react"])
    .assert()
    .failure();
}

#[test]
fn build_with_unknown_target_fails() {
  litegen_cmd()
    .args(["build", "--target", "svelte"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("svelte"));
}

#[test]
fn malformed_component_fails_with_nonzero_exit() {
  let temp = TempDir::new().unwrap();
  std::fs::create_dir_all(temp.path().join("src")).unwrap();
  std::fs::write(temp.path().join("src/bad.lite.tsx"), "not a component").unwrap();

  litegen_cmd()
    .args(["build", "--target", "react"])
    .args(["--root".as_ref(), temp.path().as_os_str()])
    .args(["--dest".as_ref(), temp.path().join("out").as_os_str()])
    .assert()
    .failure()
    .stderr(predicate::str::contains("build failed"));
}
