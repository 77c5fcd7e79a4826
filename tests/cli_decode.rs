//! CLI tests for `obsidian-events decode` and `obsidian-events config`.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/events")
        .join(name)
}

/// Runs the CLI with an empty config home so no user config leaks in.
fn run(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_obsidian-events"))
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run obsidian-events")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is json")
}

#[test]
fn test_decode_valid_event() {
    let home = tempfile::tempdir().unwrap();
    let path = fixture("ok_event.json");

    let output = run(home.path(), &["decode", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    let payload = stdout_json(&output);
    assert_eq!(payload[0]["hardware_id"], "e2e-gw-1f8d");
    assert_eq!(
        payload[0]["value"]["total_tx"].to_string(),
        "123456789012345678901234567890"
    );
}

#[test]
fn test_decode_reports_validation_failures() {
    let home = tempfile::tempdir().unwrap();
    let path = fixture("ok_missing_fields.json");

    let output = run(home.path(), &["decode", "--json", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let report = stdout_json(&output);
    assert_eq!(report["outcome"], "ok");
    let paths: Vec<&str> = report["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["event.hardware_id", "event.tag", "event.value"]);
    assert_eq!(report["errors"][0]["kind"], "MISSING_REQUIRED");
    assert_eq!(report["errors"][0]["position"], 0);
}

#[test]
fn test_decode_without_validation_succeeds() {
    let home = tempfile::tempdir().unwrap();
    let path = fixture("ok_missing_fields.json");

    let output = run(home.path(), &["decode", "--no-validate", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_decode_not_found_status() {
    let home = tempfile::tempdir().unwrap();
    let path = fixture("error_404.json");

    let output = run(home.path(), &["decode", "--status", "404", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[404]"), "stderr: {}", stderr);
    assert!(stderr.contains("stream sessiond not found"), "stderr: {}", stderr);
}

#[test]
fn test_decode_object_body_fails() {
    let home = tempfile::tempdir().unwrap();
    let body = home.path().join("body.json");
    std::fs::write(&body, r#"{"p0": {}}"#).unwrap();

    let output = run(home.path(), &["decode", body.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expected a JSON array"), "stderr: {}", stderr);
}

#[test]
fn test_config_file_enables_strict_arity() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join("obsidian");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("events.toml"), "[decode]\nstrict_arity = true\n").unwrap();

    let body = home.path().join("body.json");
    std::fs::write(&body, r#"[{}, {}]"#).unwrap();

    let output = run(home.path(), &["decode", "--no-validate", body.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));

    let config = run(home.path(), &["config"]);
    assert_eq!(config.status.code(), Some(0));
    let effective = stdout_json(&config);
    assert_eq!(effective["config"]["decode"]["strict_arity"], true);
    assert_eq!(effective["sources"][1]["origin"], "user");
}

#[test]
fn test_body_over_limit_is_refused() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("small.toml");
    std::fs::write(&config, "[decode]\nmax_body_bytes = 8\n").unwrap();
    let path = fixture("ok_event.json");

    let output = run(
        home.path(),
        &["decode", "--config", config.to_str().unwrap(), path.to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max_body_bytes"), "stderr: {}", stderr);
}

#[test]
fn test_missing_explicit_config_fails() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["config", "--config", "/nonexistent/events.toml"]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_unreadable_input_is_io_failure() {
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("missing.json");

    let output = run(home.path(), &["decode", missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error reading"), "stderr: {}", stderr);
}

#[test]
fn test_non_json_content_type_is_refused() {
    let home = tempfile::tempdir().unwrap();
    let path = fixture("ok_event.json");

    let output = run(
        home.path(),
        &["decode", "--content-type", "text/html", path.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported content type"), "stderr: {}", stderr);

    let output = run(
        home.path(),
        &["decode", "--content-type", "application/json", path.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(0));
}
