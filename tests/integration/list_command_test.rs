//! Integration tests for the `list` subcommand

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
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
fn test_list_prints_relative_paths() {
    let root = tempdir().unwrap();
    fs::create_dir_all(root.path().join("level1/level2")).unwrap();
    fs::write(root.path().join("root.json"), "{}").unwrap();
    fs::write(root.path().join("level1/mid.txt"), "").unwrap();
    fs::write(root.path().join("level1/level2/deep.json"), "[]").unwrap();

    let (stdout, stderr, success) = run_jsonmerge(&["list", root.path().to_str().unwrap()]);

    assert!(success, "Command should succeed: stderr={}", stderr);
    let listed: BTreeSet<PathBuf> = stdout.lines().map(PathBuf::from).collect();
    let expected: BTreeSet<PathBuf> = ["root.json", "level1/mid.txt", "level1/level2/deep.json"]
        .iter()
        .map(|p| Path::new(p).components().collect())
        .collect();
    assert_eq!(listed, expected);
    assert_eq!(stdout.lines().count(), 3);
    assert!(!stdout.contains(root.path().to_str().unwrap()));
}

#[test]
fn test_list_empty_directory_prints_nothing() {
    let root = tempdir().unwrap();
    let (stdout, _stderr, success) = run_jsonmerge(&["list", root.path().to_str().unwrap()]);
    assert!(success);
    assert!(stdout.is_empty());
}

#[test]
fn test_list_sorted_with_count() {
    let root = tempdir().unwrap();
    for name in ["b.txt", "a.txt", "c.txt"] {
        fs::write(root.path().join(name), "").unwrap();
    }

    let (stdout, stderr, success) =
        run_jsonmerge(&["list", root.path().to_str().unwrap(), "--sort", "--count"]);

    assert!(success);
    assert_eq!(stdout, "a.txt\nb.txt\nc.txt\n");
    assert!(stderr.contains("3 files"), "stderr: {}", stderr);
}

#[test]
fn test_list_missing_root_fails() {
    let root = tempdir().unwrap();
    let missing = root.path().join("does-not-exist");

    let (stdout, stderr, success) = run_jsonmerge(&["list", missing.to_str().unwrap()]);

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("No such file or directory"), "stderr: {}", stderr);
}
