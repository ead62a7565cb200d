use assert_cmd::Command;
use predicates::prelude::*;
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn careerpath(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("careerpath");
    cmd.current_dir(dir);
    cmd
}

fn saved_results(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("career_result_"))
        .collect()
}

#[test]
fn test_demo_run_writes_json_and_csv() {
    let dir = TempDir::new().unwrap();
    careerpath(dir.path())
        .args([
            "assess", "--demo", "--no-ai", "--seed", "7", "--quiet", "--output", "out.json",
            "--csv", "out.csv",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Result saved to out.json"));

    let json: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out.json")).unwrap()).unwrap();
    for key in ["meta", "stages", "chain", "trait_profile", "career_clusters"] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert!(json["narrative"].is_null());
    assert_eq!(json["meta"]["demo_mode"], true);
    assert_eq!(json["meta"]["seed"], 7);
    assert_eq!(json["chain"].as_array().unwrap().len(), 3);

    let csv = fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert!(csv.starts_with("stage,rank,name,percent"));
    assert!(csv.lines().any(|l| l.starts_with("cluster,1,")));
}

#[test]
fn test_seeded_demo_runs_agree() {
    let dir = TempDir::new().unwrap();
    for name in ["a.json", "b.json"] {
        careerpath(dir.path())
            .args(["assess", "--demo", "--no-ai", "--fast", "-S", "99", "-q", "-o", name])
            .assert()
            .success();
    }
    let read = |name: &str| -> Value {
        serde_json::from_str(&fs::read_to_string(dir.path().join(name)).unwrap()).unwrap()
    };
    let (a, b) = (read("a.json"), read("b.json"));
    assert_eq!(a["chain"], b["chain"]);
    assert_eq!(a["stages"], b["stages"]);
    assert_eq!(a["trait_profile"], b["trait_profile"]);
}

#[test]
fn test_default_output_name() {
    let dir = TempDir::new().unwrap();
    let output = careerpath(dir.path())
        .args(["assess", "--demo", "--no-ai", "--quiet"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8_lossy(&output);
    let pattern = Regex::new(r"Result saved to career_result_\d{8}_\d{6}\.json").unwrap();
    assert!(pattern.is_match(&stdout), "{}", stdout);
    assert_eq!(saved_results(dir.path()).len(), 1);
}

#[test]
fn test_closed_input_aborts_without_saving() {
    let dir = TempDir::new().unwrap();
    careerpath(dir.path())
        .args(["assess", "--no-ai", "--quiet"])
        .write_stdin("A\nB\n")
        .assert()
        .code(130)
        .stderr(predicate::str::contains("aborted"));
    assert!(saved_results(dir.path()).is_empty());
}

#[test]
fn test_validate_embedded_content() {
    let dir = TempDir::new().unwrap();
    careerpath(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Content OK."));
}

#[test]
fn test_validate_rejects_broken_bank() {
    let dir = TempDir::new().unwrap();
    let bank = dir.path().join("bank.json");
    fs::write(
        &bank,
        r#"{"stage1": [
            {"id": "q1", "text": "One", "traits": {"I": 1.0}},
            {"id": "q1", "text": "Again", "traits": {"I": 1.0}}
        ]}"#,
    )
    .unwrap();

    careerpath(dir.path())
        .args(["validate", "--bank", bank.to_str().unwrap()])
        .assert()
        .code(1);
}

#[test]
fn test_invalid_scoring_flag_fails() {
    let dir = TempDir::new().unwrap();
    careerpath(dir.path())
        .args(["assess", "--demo", "--no-ai", "-q", "--temperature=-2"])
        .assert()
        .code(1);
    assert!(saved_results(dir.path()).is_empty());
}
