use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::{TempDir, tempdir};

const HEADER: &str = "name\tbase\tgood\taverage\tbad\tterrible\tcheck_type";

fn skillbook(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("skillbook").unwrap();
    cmd.env("SKILLBOOK_ROOT", root)
        .env("SKILLBOOK_TODAY", "2025-01-15")
        .env("XDG_CONFIG_HOME", root.join(".config"))
        .env_remove("SKILLBOOK_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn write_tsv(dir: &TempDir, name: &str, rows: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    std::fs::write(&path, content).unwrap();
    path
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("skillbook").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("skillbook").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_import_creates_tier_store() {
    let dir = tempdir().unwrap();
    let tsv = write_tsv(&dir, "golden.tsv", &["Speed Star\t1200\t\t\t\t\tPace", "Iron Will\t\t800\t600\t300\t100\t"]);

    skillbook(dir.path())
        .args(["import", tsv.to_str().unwrap(), "golden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added"));

    let store = read_json(&dir.path().join("skills/golden.json"));
    let entries = store.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], "golden_001");
    assert_eq!(entries[0]["rarity"], "golden");
    assert_eq!(entries[0]["score"], 1200);
    assert_eq!(entries[0]["check_type"], "Pace");
    assert_eq!(entries[0]["updated"], "2025-01-15");
    assert_eq!(entries[1]["id"], "golden_002");
    assert_eq!(entries[1]["score"]["good"], 800);
    assert!(entries[1]["score"].get("base").is_none());
}

#[test]
fn test_import_json_reports_counts() {
    let dir = tempdir().unwrap();
    let first = write_tsv(&dir, "a.tsv", &["Alpha\t100\t\t\t\t\t", "Beta\t200\t\t\t\t\t"]);
    let second = write_tsv(&dir, "b.tsv", &["Beta\t250\t\t\t\t\t", "Gamma\t300\t\t\t\t\t"]);

    skillbook(dir.path())
        .args(["import", first.to_str().unwrap(), "ius"])
        .assert()
        .success();

    let json = json_stdout(skillbook(dir.path()).args(["--json", "import", second.to_str().unwrap(), "ius"]));
    assert_eq!(json["policy"], "update");
    assert_eq!(json["updated"], 1);
    assert_eq!(json["added"], 1);
    assert_eq!(json["unchanged"], 1);
    assert_eq!(json["total"], 3);

    let store = read_json(&dir.path().join("skills/ius.json"));
    assert_eq!(store[1]["name"], "Beta");
    assert_eq!(store[1]["score"], 250);
    assert_eq!(store[2]["id"], "ius_003");
}

#[test]
fn test_import_add_mode_keeps_existing_scores() {
    let dir = tempdir().unwrap();
    let first = write_tsv(&dir, "a.tsv", &["Alpha\t100\t\t\t\t\t"]);
    let second = write_tsv(&dir, "b.tsv", &["Alpha\t999\t\t\t\t\t", "Delta\t5\t\t\t\t\t"]);

    skillbook(dir.path())
        .args(["import", first.to_str().unwrap(), "red"])
        .assert()
        .success();
    skillbook(dir.path())
        .args(["import", second.to_str().unwrap(), "red", "--mode", "add"])
        .assert()
        .success();

    let store = read_json(&dir.path().join("skills/red.json"));
    assert_eq!(store[0]["score"], 100);
    assert_eq!(store[1]["name"], "Delta");
}

#[test]
fn test_import_replace_mode_renumbers() {
    let dir = tempdir().unwrap();
    let first = write_tsv(&dir, "a.tsv", &["Alpha\t1\t\t\t\t\t", "Beta\t2\t\t\t\t\t"]);
    let second = write_tsv(&dir, "b.tsv", &["Zeta\t9\t\t\t\t\t"]);

    skillbook(dir.path())
        .args(["import", first.to_str().unwrap(), "blue"])
        .assert()
        .success();
    skillbook(dir.path())
        .args(["import", second.to_str().unwrap(), "blue", "--mode", "replace"])
        .assert()
        .success();

    let store = read_json(&dir.path().join("skills/blue.json"));
    let entries = store.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], "blue_001");
    assert_eq!(entries[0]["name"], "Zeta");
}

#[test]
fn test_import_missing_tsv_fails() {
    let dir = tempdir().unwrap();
    skillbook(dir.path())
        .args(["import", "nope.tsv", "golden"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.tsv"));
}

#[test]
fn test_import_unknown_tier_is_rejected() {
    let dir = tempdir().unwrap();
    let tsv = write_tsv(&dir, "a.tsv", &["Alpha\t1\t\t\t\t\t"]);
    skillbook(dir.path())
        .args(["import", tsv.to_str().unwrap(), "silver"])
        .assert()
        .failure();
}

#[test]
fn test_export_writes_tsv() {
    let dir = tempdir().unwrap();
    let tsv = write_tsv(&dir, "a.tsv", &["Alpha\t\t10\t8\t\t\tTurf"]);
    skillbook(dir.path())
        .args(["import", tsv.to_str().unwrap(), "green"])
        .assert()
        .success();

    skillbook(dir.path()).args(["export", "green"]).assert().success();

    let exported = std::fs::read_to_string(dir.path().join("green_skills.tsv")).unwrap();
    let mut lines = exported.lines();
    assert_eq!(lines.next(), Some(HEADER));
    assert_eq!(lines.next(), Some("Alpha\t\t10\t8\t\t\tTurf"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_export_missing_store_fails_in_json() {
    let dir = tempdir().unwrap();
    let json = json_stdout(skillbook(dir.path()).args(["--json", "export", "purple"]));
    assert_eq!(json["error"], Value::Bool(true));
    assert!(json["details"]["message"].as_str().unwrap().contains("purple"));
}

#[test]
fn test_split_validate_merge_flow() {
    let dir = tempdir().unwrap();
    let combined = serde_json::json!({
        "ius": [{ "name": "Unique", "score": 5000 }],
        "golden": [{ "name": "Gold Rush", "check-type": "Sprint", "score": { "good": 900, "average": 700, "bad": 500, "terrible": 300, "base": 1000 } }],
        "yellow": [],
        "blue": [],
        "green": [],
        "red": [],
        "purple": []
    });
    let combined_path = dir.path().join("skills_lib.json");
    std::fs::write(&combined_path, serde_json::to_string_pretty(&combined).unwrap()).unwrap();

    skillbook(dir.path())
        .arg("split")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manifest"));

    let manifest = read_json(&dir.path().join("skills_index.json"));
    assert_eq!(manifest["version"], "2.0");
    assert_eq!(manifest["colors"].as_array().unwrap().len(), 7);
    assert_eq!(manifest["files"]["golden"], "skills/golden.json");

    let golden = read_json(&dir.path().join("skills/golden.json"));
    assert_eq!(golden[0]["id"], "golden_001");
    assert_eq!(golden[0]["check_type"], "Sprint");
    assert_eq!(golden[0]["description"], "");

    let report = json_stdout(skillbook(dir.path()).args(["--json", "validate"]));
    assert_eq!(report["passed"], Value::Bool(true));
    assert_eq!(report["errors"].as_array().unwrap().len(), 0);

    skillbook(dir.path()).arg("merge").assert().success();

    let backups: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("skills_lib.json.backup."))
        .collect();
    assert_eq!(backups.len(), 1);

    let rebuilt = read_json(&combined_path);
    assert_eq!(rebuilt, combined);
}

#[test]
fn test_merge_no_backup_flag() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("skills_lib.json"),
        r#"{"ius": [{"name": "Solo", "score": 1}]}"#,
    )
    .unwrap();
    skillbook(dir.path()).arg("split").assert().success();
    skillbook(dir.path())
        .args(["merge", "--no-backup"])
        .assert()
        .success();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert!(!names.iter().any(|name| name.contains(".backup.")));
}

#[test]
fn test_merge_without_manifest_fails() {
    let dir = tempdir().unwrap();
    skillbook(dir.path())
        .arg("merge")
        .assert()
        .failure()
        .stderr(predicate::str::contains("skills_index.json"));
}

#[test]
fn test_validate_fails_on_broken_store() {
    let dir = tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("skills")).unwrap();
    std::fs::write(
        dir.path().join("skills/red.json"),
        r#"[{"id": "red_001", "name": "Wrong", "rarity": "blue", "score": {}}]"#,
    )
    .unwrap();

    skillbook(dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("doesn't match file tier"))
        .stdout(predicate::str::contains("missing file"));
}

#[test]
fn test_validate_json_failure_is_single_document() {
    let dir = tempdir().unwrap();
    let output = skillbook(dir.path()).args(["--json", "validate"]).output().unwrap();
    assert!(!output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["passed"], Value::Bool(false));
    assert!(!report["errors"].as_array().unwrap().is_empty());
}

#[test]
fn test_project_config_moves_skills_dir() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("skillbook.toml"),
        "[paths]\nskills_dir = \"data\"\n",
    )
    .unwrap();
    let tsv = write_tsv(&dir, "a.tsv", &["Alpha\t1\t\t\t\t\t"]);

    skillbook(dir.path())
        .args(["import", tsv.to_str().unwrap(), "yellow"])
        .assert()
        .success();
    assert!(dir.path().join("data/yellow.json").exists());
}
