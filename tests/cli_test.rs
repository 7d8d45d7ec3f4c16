//! Integration tests for the `lvport` binary
//!
//! Runs the CLI against throwaway project trees. Only dry runs and
//! planning are exercised, so no native toolchain is needed.

mod common;

use assert_fs::prelude::*;
use common::TestProject;
use predicates::prelude::*;
use std::process::Command;

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================
// plan
// ============================================

#[test]
fn test_plan_unix_board_json() {
    let project = TestProject::with_port_tree();

    let output = project.run(&["--json", "plan", "unix", "--board", "X"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["port_name"], "unix");
    assert_eq!(json["variant"], "standard");

    let commands = json["commands"].as_array().unwrap();
    let make = commands
        .iter()
        .find(|c| c["program"] == "make")
        .expect("no make command");
    let args: Vec<&str> = make["args"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|a| a.as_str())
        .collect();
    assert!(args.contains(&"BOARD=X"));
    assert!(args.contains(&"LV_PORT=unix"));
}

#[test]
fn test_plan_macos_has_no_sdl_build() {
    let project = TestProject::with_port_tree();

    let output = project.run(&["plan", "macOS"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(predicate::str::contains("LV_PORT=macOS").eval(&text));
    assert!(predicate::str::contains("cmake").not().eval(&text));
}

#[test]
fn test_plan_accepts_lowercase_macos() {
    let project = TestProject::with_port_tree();

    let output = project.run(&["plan", "macos"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_plan_passes_extra_make_args() {
    let project = TestProject::with_port_tree();

    let output = project.run(&["plan", "unix", "--", "V=1", "-B"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("V=1"));
    assert!(text.contains("-B"));
}

#[test]
fn test_plan_rejects_reserved_variable() {
    let project = TestProject::with_port_tree();

    let output = project.run(&["plan", "unix", "--", "LV_PORT=other"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("LV_PORT"));
}

#[test]
fn test_plan_reads_project_settings() {
    let project = TestProject::with_port_tree();
    project.create_file("lvport.toml", "[build]\nvariant = \"debug\"\nboard = \"S\"\n");

    let output = project.run(&["plan", "unix"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("VARIANT=debug"));
    assert!(text.contains("BOARD=S"));
}

#[test]
fn test_plan_rejects_unknown_settings_key() {
    let project = TestProject::with_port_tree();
    project.create_file("lvport.toml", "[build]\nflavour = \"debug\"\n");

    let output = project.run(&["plan", "unix"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("lvport.toml"));
}

#[test]
fn test_unknown_port_rejected() {
    let project = TestProject::new();

    let output = project.run(&["plan", "windows"]);

    assert!(!output.status.success());
}

// ============================================
// build --dry-run
// ============================================

#[test]
fn test_build_macos_dry_run_without_tree_fails() {
    let project = TestProject::new();

    let output = project.run(&["build", "macOS", "--dry-run"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("unix"));
    assert!(!project.file_exists("build/manifest.py"));
}

#[test]
fn test_build_macos_dry_run_writes_manifest() {
    let project = TestProject::with_port_tree();

    let output = project.run(&[
        "build",
        "macOS",
        "--dry-run",
        "--display",
        "sdl_display",
        "--indev",
        "sdl_pointer",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let manifest = project.read_file("build/manifest.py");
    assert!(manifest.contains("sdl_display.py"));
    assert!(manifest.contains("sdl_pointer.py"));
    assert!(stdout(&output).contains("Built macOS"));
}

#[test]
fn test_build_json_summary() {
    let project = TestProject::with_port_tree();

    let output = project.run(&["--json", "build", "unix", "--dry-run", "-j", "3"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["port"], "unix");
    assert_eq!(json["dry_run"], true);
    let make = &json["commands"]["commands"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["program"] == "make")
        .cloned()
        .unwrap();
    assert!(make["args"]
        .as_array()
        .unwrap()
        .iter()
        .any(|a| a == "-j3"));
}

#[test]
fn test_build_rejects_bad_driver_name() {
    let project = TestProject::with_port_tree();

    let output = project.run(&["build", "unix", "--dry-run", "--display", "../evil"]);

    assert!(!output.status.success());
    assert!(!project.file_exists("build/manifest.py"));
}

// ============================================
// clean
// ============================================

#[test]
fn test_clean_empty_project_succeeds() {
    let temp = assert_fs::TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_lvport"))
        .arg("-C")
        .arg(temp.path())
        .args(["clean", "unix"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Nothing to clean"));
    temp.child("lib").assert(predicate::path::missing());
}

#[test]
fn test_clean_removes_variant_build() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("lib/micropython/ports/unix/Makefile")
        .write_str("# unix port\n")
        .unwrap();
    temp.child("lib/micropython/ports/unix/build-standard/micropython")
        .write_str("firmware")
        .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_lvport"))
        .arg("-C")
        .arg(temp.path())
        .args(["clean", "macOS"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    temp.child("lib/micropython/ports/unix/build-standard")
        .assert(predicate::path::missing());
    temp.child("lib/micropython/ports/unix/Makefile")
        .assert(predicate::path::exists());
}

#[test]
fn test_clean_mpy_cross_requires_force() {
    let project = TestProject::new();

    let output = project.run(&["clean", "unix", "--mpy-cross"]);

    assert!(!output.status.success());
}

// ============================================
// submodules
// ============================================

#[test]
fn test_submodules_macos_is_silent_noop() {
    let project = TestProject::new();

    let output = project.run(&["submodules", "macOS", "--dry-run"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!project.file_exists("lib"));
}

#[test]
fn test_no_subcommand_prints_help() {
    let project = TestProject::new();

    let output = project.run(&[]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage"));
}

#[test]
fn test_clean_rejects_variant_outside_port() {
    let project = TestProject::with_port_tree();
    project.create_dir("lib/micropython/ports/unix/build-x");
    project.create_file("keep.txt", "keep");

    let output = project.run(&["clean", "unix", "--variant", "x/../../../../.."]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid build variant"));
    assert!(project.file_exists("keep.txt"));
    assert!(project.file_exists("lib/micropython/ports/unix/build-x"));
}

#[test]
fn test_build_dry_run_warns_on_stderr() {
    let project = TestProject::with_port_tree();

    let output = project.run(&["build", "unix", "--dry-run"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Dry run, commands not executed"));
}

#[test]
fn test_plan_only_bootstraps_originals_dir() {
    let project = TestProject::with_port_tree();

    let output = project.run(&["plan", "macOS"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(project.file_exists("micropy_updates/originals/macOS"));
    assert!(!project.file_exists("build"));
    assert!(!project.file_exists("lib/micropython/ports/unix/build-standard"));
}
