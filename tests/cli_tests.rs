//! Binary tests for the lpsheet CLI

#![allow(deprecated)] // Command::cargo_bin

use assert_cmd::Command;
use lpsheet::cli::commands::template_workbook;
use lpsheet::config::{AppConfig, LayoutConfig};
use lpsheet::excel::{ExcelExporter, ExcelImporter};
use predicates::prelude::*;
use tempfile::TempDir;

fn lpsheet() -> Command {
    let mut cmd = Command::cargo_bin("lpsheet").unwrap();
    cmd.env_remove("LPSHEET_CONFIG");
    cmd
}

// ═══════════════════════════════════════════════════════════════════════════
// PARSE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_parse_prints_canonical_form() {
    lpsheet()
        .args(["parse", "X3 + 3X1 - 2X2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+3X1-2X2+X3"));
}

#[test]
fn test_parse_rejects_bad_expression() {
    lpsheet()
        .args(["parse", "X0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("X0"));
}

// ═══════════════════════════════════════════════════════════════════════════
// INIT-CONFIG + SOLVE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_init_config_writes_loadable_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("lpsheet.yaml");
    let workbook = dir.path().join("model.xlsx");

    lpsheet()
        .arg("init-config")
        .arg(&config)
        .arg("--workbook")
        .arg(&workbook)
        .assert()
        .success();

    let loaded = AppConfig::load(&config).unwrap();
    assert_eq!(loaded.workbook.input, workbook);
    assert!(workbook.exists());
}

#[test]
fn test_init_config_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("lpsheet.yaml");
    std::fs::write(&config, "server:\n  port: 9000\n").unwrap();

    lpsheet()
        .arg("init-config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        std::fs::read_to_string(&config).unwrap(),
        "server:\n  port: 9000\n"
    );
}

#[test]
fn test_solve_dry_run_leaves_workbook_alone() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("lpsheet.yaml");
    let workbook = dir.path().join("model.xlsx");
    lpsheet()
        .arg("init-config")
        .arg(&config)
        .arg("--workbook")
        .arg(&workbook)
        .assert()
        .success();
    let before = std::fs::read(&workbook).unwrap();

    lpsheet()
        .arg("solve")
        .arg("--config")
        .arg(&config)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Objective value = 9"))
        .stdout(predicate::str::contains("Slack/Surplus"));

    assert_eq!(std::fs::read(&workbook).unwrap(), before);
}

#[test]
fn test_solve_dry_run_prints_only_the_result_table() {
    let dir = TempDir::new().unwrap();
    let workbook = dir.path().join("model.xlsx");
    let mut sheets = template_workbook(&LayoutConfig::default());
    sheets.set("Output", "D1", "leftover-notes").unwrap();
    sheets.set("Output", "A40", "old-row").unwrap();
    ExcelExporter::new(&sheets).export(&workbook).unwrap();

    lpsheet()
        .arg("solve")
        .arg("--workbook")
        .arg(&workbook)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Objective Value"))
        .stdout(predicate::str::contains("leftover-notes").not())
        .stdout(predicate::str::contains("old-row").not());
}

#[test]
fn test_init_config_leaves_nothing_when_workbook_exists() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("lpsheet.yaml");
    let workbook = dir.path().join("model.xlsx");
    std::fs::write(&workbook, "keep").unwrap();

    lpsheet()
        .arg("init-config")
        .arg(&config)
        .arg("--workbook")
        .arg(&workbook)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert!(!config.exists());
    assert_eq!(std::fs::read_to_string(&workbook).unwrap(), "keep");
}

#[test]
fn test_solve_writes_output_workbook() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("lpsheet.yaml");
    let workbook = dir.path().join("model.xlsx");
    let output = dir.path().join("result.xlsx");
    lpsheet()
        .arg("init-config")
        .arg(&config)
        .arg("--workbook")
        .arg(&workbook)
        .assert()
        .success();

    lpsheet()
        .arg("solve")
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&output)
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("X1 = 1"));

    let sheets = ExcelImporter::new(&output).import().unwrap();
    let table = sheets.sheet("Output").unwrap().to_table();
    assert_eq!(table[1][1].as_text(), "9");
}

#[test]
fn test_solve_missing_workbook_fails() {
    let dir = TempDir::new().unwrap();
    lpsheet()
        .arg("solve")
        .arg("--workbook")
        .arg(dir.path().join("missing.xlsx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workbook error"));
}
