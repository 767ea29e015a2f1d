//! Integration tests for the docpilot binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const REPORT: &str = "Project X shipped v1 with auth, storage, and search features.\n\n\
The team will focus on performance next quarter.";

/// Every variable the config layer reads
const CONFIG_VARS: &[&str] = &[
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "OPENAI_MODEL",
    "OPENAI_MAX_TOKENS",
    "OPENAI_TEMPERATURE",
    "HUGGINGFACE_API_KEY",
    "HF_SUMMARIZATION_MODEL",
    "HF_QA_MODEL",
    "DOCPILOT_MAX_CONTENT_LENGTH",
    "DOCPILOT_MAX_SUMMARY_LENGTH",
    "DOCPILOT_MAX_TAGS_COUNT",
    "DOCPILOT_TIMEOUT_SECS",
    "DOCPILOT_LOCAL_PROCESSING",
    "DOCPILOT_PROVIDER_PRIORITY",
];

/// Binary isolated from the user's config directory and environment
fn docpilot_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("docpilot").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path());
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn write_document(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_tag_falls_back_to_local_provider() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, "report.txt", REPORT);

    docpilot_cmd(&dir)
        .arg("tag")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("technology"))
        .stdout(predicate::str::contains("via local-rule-based"));
}

#[test]
fn test_query_answers_from_document() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, "report.txt", REPORT);

    docpilot_cmd(&dir)
        .arg("query")
        .arg(&doc)
        .args(["What", "shipped?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project X shipped v1"));
}

#[test]
fn test_summarize_json_output() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, "report.txt", REPORT);

    let output = docpilot_cmd(&dir)
        .args(["--format", "json", "summarize"])
        .arg(&doc)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "success");
    assert_eq!(json["provider"], "local-rule-based");
    assert_eq!(json["payload"]["kind"], "summary");
    assert_eq!(json["attempts"][0]["provider"], "openai");
    assert_eq!(json["attempts"][0]["outcome"], "skipped");
}

#[test]
fn test_exhaustion_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, "report.txt", REPORT);

    docpilot_cmd(&dir)
        .env("DOCPILOT_LOCAL_PROCESSING", "false")
        .arg("summarize")
        .arg(&doc)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("All AI providers failed to summarize"));
}

#[test]
fn test_empty_document_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, "empty.txt", "   \n");

    docpilot_cmd(&dir)
        .arg("tag")
        .arg(&doc)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no readable text"));
}

#[test]
fn test_missing_file_is_invalid_input() {
    let dir = TempDir::new().unwrap();

    docpilot_cmd(&dir)
        .arg("summarize")
        .arg(dir.path().join("missing.txt"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn test_process_reports_analysis() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, "report.txt", REPORT);

    docpilot_cmd(&dir)
        .arg("process")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary (local-rule-based)"))
        .stdout(predicate::str::contains("Paragraphs:      2"));
}

#[test]
fn test_providers_listing() {
    let dir = TempDir::new().unwrap();

    docpilot_cmd(&dir)
        .env("OPENAI_API_KEY", "sk-test")
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"0\s+openai\s+available").unwrap())
        .stdout(predicate::str::is_match(r"1\s+huggingface\s+unavailable").unwrap())
        .stdout(predicate::str::is_match(r"2\s+local-rule-based\s+available").unwrap());
}

#[test]
fn test_priority_from_environment() {
    let dir = TempDir::new().unwrap();

    let output = docpilot_cmd(&dir)
        .env("DOCPILOT_PROVIDER_PRIORITY", "local,openai")
        .args(["--format", "json", "providers"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["name"], "local-rule-based");
    assert_eq!(json[0]["available"], true);
    assert_eq!(json[1]["name"], "openai");
    assert_eq!(json[1]["available"], false);
}

#[test]
fn test_config_file_is_honored() {
    let dir = TempDir::new().unwrap();
    let config = write_document(
        &dir,
        "config.yml",
        "processing:\n  max_tags_count: 1\nprovider_priority: [local]\n",
    );
    let doc = write_document(&dir, "report.txt", REPORT);

    let output = docpilot_cmd(&dir)
        .arg("--config")
        .arg(&config)
        .args(["--format", "json", "tag"])
        .arg(&doc)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["payload"]["value"], serde_json::json!(["technology"]));
}

#[test]
fn test_tag_limit_above_five_rejected() {
    let dir = TempDir::new().unwrap();
    let doc = write_document(&dir, "report.txt", REPORT);

    docpilot_cmd(&dir)
        .env("DOCPILOT_MAX_TAGS_COUNT", "8")
        .arg("tag")
        .arg(&doc)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("max_tags_count must not exceed 5"));
}
