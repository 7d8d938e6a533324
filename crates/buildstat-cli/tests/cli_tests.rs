//! CLI integration tests
//!
//! Drive the built `buildstat` binary against scratch directories.

use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn buildstat(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_buildstat"))
        .args(["--log-format", "json"])
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn write_build(dir: &Path, file: &str, hash: &str, modules: &[&str]) -> PathBuf {
    let modules: Vec<_> = modules
        .iter()
        .map(|m| json!({ "name": m, "moduleType": "javascript/auto", "size": 2.0, "built": true }))
        .collect();
    let raw = json!({
        "version": "5.88.0",
        "hash": hash,
        "outputPath": "/project/dist",
        "startTime": 1_700_000_000_000_i64,
        "endTime": 1_700_000_003_000_i64,
        "modules": modules,
        "assets": [{ "name": "main.js", "type": "asset", "size": 8.0 }]
    });
    let path = dir.join(file);
    fs::write(&path, serde_json::to_vec(&raw).unwrap()).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_ingest_writes_report_and_diffs_next_build() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("store");
    let out = temp.path().join("out");
    let first = write_build(temp.path(), "first.json", "h1", &["./a.js"]);
    let second = write_build(temp.path(), "second.json", "h2", &["./a.js", "./b.js"]);
    let dirs = [
        "--store-dir",
        store.to_str().unwrap(),
        "--out-dir",
        out.to_str().unwrap(),
    ];

    let output = buildstat(&[&["ingest", first.to_str().unwrap()][..], &dirs[..]].concat());
    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let first_report = PathBuf::from(stdout(&output).trim());
    let markdown = fs::read_to_string(&first_report).unwrap();
    assert!(markdown.contains("## Module Information"));
    assert!(!markdown.contains("## Added Modules"));

    let output = buildstat(&[&["ingest", second.to_str().unwrap()][..], &dirs[..]].concat());
    assert!(output.status.success());
    let second_report = PathBuf::from(stdout(&output).trim());
    assert_ne!(first_report, second_report);
    let markdown = fs::read_to_string(&second_report).unwrap();
    assert!(markdown.contains("## Added Modules\n\n### ./b.js"));
    assert!(markdown.contains("## Removed Modules\n\n_No modules._"));
    assert!(store.join("stats.json").exists());
}

#[test]
fn test_ingest_json_format() {
    let temp = TempDir::new().unwrap();
    let stats = write_build(temp.path(), "stats.json", "h1", &["./a.js"]);

    let output = buildstat(&[
        "ingest",
        stats.to_str().unwrap(),
        "--store-dir",
        temp.path().join("store").to_str().unwrap(),
        "--out-dir",
        temp.path().join("out").to_str().unwrap(),
        "--format",
        "json",
    ]);

    assert!(output.status.success());
    let path = PathBuf::from(stdout(&output).trim());
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
    let doc: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(doc["report"]["sections"][0]["section"], "summary");
}

#[test]
fn test_ingest_malformed_exits_nonzero() {
    let temp = TempDir::new().unwrap();
    let stats = temp.path().join("bad.json");
    fs::write(&stats, br#"{"modules": 3}"#).unwrap();
    let store = temp.path().join("store");

    let output = buildstat(&[
        "ingest",
        stats.to_str().unwrap(),
        "--store-dir",
        store.to_str().unwrap(),
        "--out-dir",
        temp.path().join("out").to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_MALFORMED_SNAPSHOT"));
    assert!(!store.join("stats.json").exists());
}

#[test]
fn test_ingest_reads_config_file() {
    let temp = TempDir::new().unwrap();
    let stats = write_build(temp.path(), "stats.json", "h1", &["./a.js"]);
    let config = temp.path().join("buildstat.toml");
    fs::write(
        &config,
        format!(
            "[store]\ndir = {:?}\n\n[report]\nout_dir = {:?}\nformat = \"json\"\n",
            temp.path().join("cfg-store"),
            temp.path().join("cfg-out"),
        ),
    )
    .unwrap();

    let output = buildstat(&[
        "ingest",
        stats.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let path = PathBuf::from(stdout(&output).trim());
    assert!(path.starts_with(temp.path().join("cfg-out")));
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
    assert!(temp.path().join("cfg-store").join("stats.json").exists());
}

#[test]
fn test_diff_prints_added_and_removed() {
    let temp = TempDir::new().unwrap();
    let old = write_build(temp.path(), "old.json", "h1", &["x", "y"]);
    let new = write_build(temp.path(), "new.json", "h2", &["x", "z"]);

    let output = buildstat(&["diff", old.to_str().unwrap(), new.to_str().unwrap()]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("modules: +1 -1\n  + z\n  - y\n"));
    assert!(text.contains("assets: +0 -0\n"));
}

#[test]
fn test_show_and_reset() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("store");
    let store_arg = store.to_str().unwrap();

    let output = buildstat(&["show", "--store-dir", store_arg]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("no snapshot recorded"));

    let stats = write_build(temp.path(), "stats.json", "h-show", &["./a.js"]);
    let output = buildstat(&[
        "ingest",
        stats.to_str().unwrap(),
        "--store-dir",
        store_arg,
        "--out-dir",
        temp.path().join("out").to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let output = buildstat(&["show", "--store-dir", store_arg]);
    let text = stdout(&output);
    assert!(text.contains("hash:      h-show"));
    assert!(text.contains("modules:   1"));
    assert!(text.contains("duration:  3s"));

    let output = buildstat(&["reset", "--store-dir", store_arg]);
    assert!(output.status.success());
    let output = buildstat(&["show", "--store-dir", store_arg]);
    assert!(stdout(&output).contains("no snapshot recorded"));
}

#[test]
fn test_show_and_reset_read_store_dir_from_config() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("buildstat.toml");
    fs::write(
        &config,
        format!(
            "[store]\ndir = {:?}\n\n[report]\nout_dir = {:?}\n",
            temp.path().join("cfg-store"),
            temp.path().join("cfg-out"),
        ),
    )
    .unwrap();
    let config_arg = config.to_str().unwrap();
    let stats = write_build(temp.path(), "stats.json", "h-config", &["./a.js"]);

    let output = buildstat(&["ingest", stats.to_str().unwrap(), "--config", config_arg]);
    assert!(output.status.success());

    let output = buildstat(&["show", "--config", config_arg]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("hash:      h-config"));

    let output = buildstat(&["reset", "--config", config_arg]);
    assert!(output.status.success());
    assert!(!temp.path().join("cfg-store").join("stats.json").exists());

    let output = buildstat(&["show", "--config", config_arg]);
    assert!(stdout(&output).contains("no snapshot recorded"));
}
