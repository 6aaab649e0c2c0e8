//! Binary-level tests driving the `bookmood` executable.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn bookmood_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("bookmood");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[db]
path = "{}/data/catalog.sqlite"

[api]
page_size = 20
max_pages = 2
delay_ms = 0

[[queries]]
query_type = "Bestseller"
label = "bestsellers"

[[queries]]
query_type = "ItemNewAll"
category_id = 1
label = "new-fiction"
"#,
        root.display()
    );

    let config_path = config_dir.join("bookmood.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_bookmood(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = bookmood_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env_remove("ALADIN_TTB_KEY")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run bookmood binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_init_creates_database() {
    let (tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_bookmood(&config_path, &["init"]);
    assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("initialized"));
    assert!(tmp.path().join("data").join("catalog.sqlite").exists());
}

#[test]
fn test_init_idempotent() {
    let (_tmp, config_path) = setup_test_env();

    let (_, _, success1) = run_bookmood(&config_path, &["init"]);
    assert!(success1, "First init failed");

    let (_, _, success2) = run_bookmood(&config_path, &["init"]);
    assert!(success2, "Second init failed (not idempotent)");
}

#[test]
fn test_stats_on_empty_catalog() {
    let (_tmp, config_path) = setup_test_env();

    run_bookmood(&config_path, &["init"]);
    let (stdout, _, success) = run_bookmood(&config_path, &["stats"]);
    assert!(success, "stats failed");
    assert!(stdout.contains("Books:"));
    assert!(stdout.contains("never"));
}

#[test]
fn test_queries_lists_configuration() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_bookmood(&config_path, &["queries"]);
    assert!(success);
    assert!(stdout.contains("bestsellers"));
    assert!(stdout.contains("new-fiction"));
    assert!(
        stdout.contains("MISSING"),
        "Should flag the absent API key, got: {}",
        stdout
    );
}

#[test]
fn test_sync_without_api_key_is_fatal() {
    let (_tmp, config_path) = setup_test_env();

    run_bookmood(&config_path, &["init"]);
    let (_, stderr, success) = run_bookmood(&config_path, &["sync"]);
    assert!(!success, "sync without credentials should exit non-zero");
    assert!(
        stderr.contains("ALADIN_TTB_KEY"),
        "Should name the missing variable, got: {}",
        stderr
    );
}

#[test]
fn test_missing_config_file_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let bogus = tmp.path().join("nope.toml");

    let (_, stderr, success) = run_bookmood(&bogus, &["init"]);
    assert!(!success, "Missing config should exit non-zero");
    assert!(stderr.contains("config"));
}

#[test]
fn test_invalid_query_type_rejected() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("bookmood.toml");
    fs::write(
        &config_path,
        r#"[db]
path = "catalog.sqlite"

[[queries]]
query_type = "TopRated"
label = "nope"
"#,
    )
    .unwrap();

    let (_, stderr, success) = run_bookmood(&config_path, &["queries"]);
    assert!(!success);
    assert!(stderr.contains("Unknown query_type"));
}
