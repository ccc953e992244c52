//! End-to-end tests of the `huffpack` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn huffpack(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_huffpack"))
        .args(args)
        .output()
        .expect("failed to run huffpack")
}

fn path(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn test_cli_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let packed = dir.path().join("input.huf");
    let restored = dir.path().join("restored.txt");
    let data = b"it was the best of times, it was the worst of times".repeat(20);
    fs::write(&input, &data).unwrap();

    let out = huffpack(&["compress", path(&input), path(&packed)]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Operation completed successfully."));

    let out = huffpack(&["decompress", path(&packed), path(&restored)]);
    assert!(out.status.success());
    assert_eq!(fs::read(&restored).unwrap(), data);
}

#[test]
fn test_cli_legacy_header_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let packed = dir.path().join("input.huf");
    fs::write(&input, b"aaabbc").unwrap();

    let out = huffpack(&["compress", path(&input), path(&packed), "--legacy-header", "--stats"]);
    assert!(out.status.success());
    assert!(fs::read(&packed).unwrap().starts_with(b"3\na 3\n"));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("\"padding\": 7"));
}

#[test]
fn test_cli_usage_errors_exit_one() {
    assert_eq!(huffpack(&["compress", "only-one-path"]).status.code(), Some(1));
    assert_eq!(huffpack(&["explode", "a", "b"]).status.code(), Some(1));
    assert_eq!(huffpack(&[]).status.code(), Some(1));
}

#[test]
fn test_cli_empty_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.txt");
    let packed = dir.path().join("empty.huf");
    fs::write(&input, b"").unwrap();

    let out = huffpack(&["compress", path(&input), path(&packed)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("empty input"));
    assert!(!packed.exists());
}

#[test]
fn test_cli_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = huffpack(&[
        "decompress",
        path(&dir.path().join("missing.huf")),
        path(&dir.path().join("out.txt")),
    ]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot open input"));
}

#[test]
fn test_cli_unwritable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, b"data").unwrap();
    let output = dir.path().join("no-such-dir").join("out.huf");

    let out = huffpack(&["compress", path(&input), path(&output)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot open output"));
}

#[test]
fn test_cli_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("codec.json");
    let input = dir.path().join("input.txt");
    let packed = dir.path().join("input.huf");
    fs::write(&config, r#"{ "header_format": "text", "max_input_size": 3 }"#).unwrap();
    fs::write(&input, b"four").unwrap();

    let out = huffpack(&["compress", path(&input), path(&packed), "--config", path(&config)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("exceeds the configured limit"));
}
