//! Integration tests for the `merge` subcommand

use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::tempdir;

fn run_jsonmerge(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_jsonmerge"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to run jsonmerge");

    (
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
        output.status.success(),
    )
}

#[test]
fn test_merge_writes_document_and_confirms() {
    let input_dir = tempdir().unwrap();
    let mut a = File::create(input_dir.path().join("a.json")).unwrap();
    write!(a, "{{\"x\":1}}").unwrap();
    let mut b = File::create(input_dir.path().join("b.json")).unwrap();
    write!(b, "[1,2,3]").unwrap();
    fs::write(input_dir.path().join("notes.txt"), "ignore me").unwrap();

    let output_dir = tempdir().unwrap();
    let output = output_dir.path().join("merged_questions.json");
    let (stdout, stderr, success) = run_jsonmerge(&[
        "merge",
        input_dir.path().to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);

    assert!(success, "Command should succeed: stderr={}", stderr);
    assert!(
        stdout.contains(&format!("Merged JSON saved to {}", output.display())),
        "stdout: {}",
        stdout
    );

    let merged: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(merged, json!({"a": {"x": 1}, "b": [1, 2, 3]}));
}

#[test]
fn test_merge_empty_directory() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    let output = output_dir.path().join("merged.json");

    let (_stdout, stderr, success) = run_jsonmerge(&[
        "merge",
        input_dir.path().to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);

    assert!(success, "stderr={}", stderr);
    assert_eq!(fs::read_to_string(&output).unwrap(), "{}");
}

#[test]
fn test_merge_missing_input_fails_without_output() {
    let output_dir = tempdir().unwrap();
    let missing = output_dir.path().join("dataJson");
    let output = output_dir.path().join("merged.json");

    let (_stdout, stderr, success) = run_jsonmerge(&[
        "merge",
        missing.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);

    assert!(!success);
    assert!(stderr.contains("No such file or directory"), "stderr: {}", stderr);
    assert!(!output.exists());
}

#[test]
fn test_merge_missing_output_parent_fails() {
    let input_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("a.json"), "{}").unwrap();
    let output_dir = tempdir().unwrap();
    let output = output_dir.path().join("public/merged.json");

    let (_stdout, stderr, success) = run_jsonmerge(&[
        "merge",
        input_dir.path().to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);

    assert!(!success);
    assert!(stderr.contains("IO error"), "stderr: {}", stderr);
    assert!(!output.exists());
}

#[test]
fn test_merge_twice_is_byte_identical() {
    let input_dir = tempdir().unwrap();
    for name in ["meta", "amazon", "google", "microsoft"] {
        fs::write(
            input_dir.path().join(format!("{}.json", name)),
            format!("[{{\"company\": \"{}\"}}]", name),
        )
        .unwrap();
    }
    let output_dir = tempdir().unwrap();
    let output = output_dir.path().join("merged.json");
    let args = [
        "merge",
        input_dir.path().to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--quiet",
    ];

    let (_, _, first_ok) = run_jsonmerge(&args);
    let first = fs::read(&output).unwrap();
    let (_, _, second_ok) = run_jsonmerge(&args);
    let second = fs::read(&output).unwrap();

    assert!(first_ok && second_ok);
    assert_eq!(first, second);
}

#[test]
fn test_validate_only_and_stats() {
    let input_dir = tempdir().unwrap();
    fs::write(input_dir.path().join("a.json"), "{}").unwrap();
    fs::write(input_dir.path().join("b.json"), "nope").unwrap();
    let output_dir = tempdir().unwrap();
    let output = output_dir.path().join("merged.json");

    let (stdout, stderr, success) = run_jsonmerge(&[
        "merge",
        input_dir.path().to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--validate-only",
        "--stats",
    ]);

    assert!(success, "stderr={}", stderr);
    assert!(!output.exists());
    assert!(stdout.contains("1 files valid, 1 skipped"), "stdout: {}", stdout);
    assert!(stdout.contains("Merged 1 of 2 files (1 skipped)"), "stdout: {}", stdout);
    assert!(stdout.contains("Files scanned: 2"), "stdout: {}", stdout);
    assert!(stderr.contains("b.json"), "stderr: {}", stderr);
}
