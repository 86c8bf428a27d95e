use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::TempDir;
use vget::core::input::{aggregate_targets, expand_items};
use vget::VgetError;

fn write_input_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).unwrap();
    write!(file, "{}", contents).unwrap();
    path
}

#[test]
fn test_cli_targets_come_before_file_targets() {
    let dir = TempDir::new().unwrap();
    let path = write_input_file(&dir, "urls.txt", "f1\nf2\n");

    let cli = vec!["c1".to_string(), "c2".to_string()];
    let targets = aggregate_targets(&cli, Some(&path), None, 1, 0).unwrap();

    assert_eq!(targets, ["c1", "c2", "f1", "f2"]);
}

#[test]
fn test_file_lines_respect_items_spec() {
    let dir = TempDir::new().unwrap();
    let path = write_input_file(&dir, "urls.txt", "a\nb\nc\nd\ne\n");

    let targets = aggregate_targets(&[], Some(&path), Some("1,3-4"), 1, 0).unwrap();
    assert_eq!(targets, ["a", "c", "d"]);
}

#[test]
fn test_blank_lines_are_skipped_before_indexing() {
    let dir = TempDir::new().unwrap();
    let path = write_input_file(&dir, "urls.txt", "a\n\n  \nb\nc\n");

    let targets = aggregate_targets(&[], Some(&path), Some("2"), 1, 0).unwrap();
    assert_eq!(targets, ["b"]);
}

#[test]
fn test_aggregation_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write_input_file(&dir, "urls.txt", "a\nb\nc\n");
    let cli = vec!["x".to_string()];

    let first = aggregate_targets(&cli, Some(&path), None, 2, 0).unwrap();
    let second = aggregate_targets(&cli, Some(&path), None, 2, 0).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, ["x", "b", "c"]);
}

#[test]
fn test_duplicates_are_preserved() {
    let dir = TempDir::new().unwrap();
    let path = write_input_file(&dir, "urls.txt", "a\na\n");

    let cli = vec!["a".to_string()];
    let targets = aggregate_targets(&cli, Some(&path), None, 1, 0).unwrap();
    assert_eq!(targets, ["a", "a", "a"]);
}

#[test]
fn test_zero_targets_is_fatal() {
    let err = aggregate_targets(&[], None, None, 1, 0).unwrap_err();
    assert!(matches!(err, VgetError::NoTargets));
}

#[test]
fn test_unreadable_file_is_fatal() {
    let err = aggregate_targets(&[], Some(Path::new("/no/such/file")), None, 1, 0).unwrap_err();
    assert!(matches!(err, VgetError::InputFile(_)));
}

#[test]
fn test_expand_items_matches_documented_example() {
    let lines: Vec<String> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(expand_items(&lines, "1,3-4", 1, 0), ["a", "c", "d"]);
}
