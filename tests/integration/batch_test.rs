use vget::core::batch::run_batch;
use vget::core::config::RunConfig;
use vget::core::pipeline::TargetError;
use vget::VgetError;

use super::stubs::{Plan, StubDownloader, StubExtractor};

fn targets(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_all_success_gives_exit_zero() {
    let extractor = StubExtractor::new()
        .plan("u1", Plan::Items(vec![("u1-a", true)]))
        .plan("u2", Plan::Items(vec![("u2-a", true), ("u2-b", true)]));
    let downloader = StubDownloader::new();
    let cfg = RunConfig::default();
    let mut sink = Vec::new();

    let verdict = run_batch(&targets(&["u1", "u2"]), &cfg, &extractor, &downloader, &mut sink)
        .unwrap();

    assert!(verdict.is_success());
    assert!(verdict.failures().is_empty());
    assert_eq!(verdict.targets_processed(), 2);
    assert_eq!(verdict.exit_code(), 0);
}

#[test]
fn test_single_failing_extraction_is_identified() {
    let extractor = StubExtractor::new()
        .plan("u1", Plan::Items(vec![("u1-a", true)]))
        .plan("u2", Plan::Fail)
        .plan("u3", Plan::Items(vec![("u3-a", true)]));
    let downloader = StubDownloader::new();
    let cfg = RunConfig::default();
    let mut sink = Vec::new();

    let verdict = run_batch(
        &targets(&["u1", "u2", "u3"]),
        &cfg,
        &extractor,
        &downloader,
        &mut sink,
    )
    .unwrap();

    assert_eq!(verdict.exit_code(), 1);
    assert_eq!(verdict.failures().len(), 1);
    assert_eq!(verdict.failures()[0].0, "u2");
    assert!(matches!(verdict.failures()[0].1, TargetError::Preparation(_)));

    // u2 produced zero items, so the downloader never saw it; the batch
    // still went on to u3.
    assert_eq!(*downloader.attempts.borrow(), ["u1-a", "u3-a"]);
    assert_eq!(*extractor.calls.borrow(), ["u1", "u2", "u3"]);
}

#[test]
fn test_empty_work_list_is_a_fatal_precondition() {
    let extractor = StubExtractor::new();
    let downloader = StubDownloader::new();
    let cfg = RunConfig::default();
    let mut sink = Vec::new();

    let err = run_batch(&[], &cfg, &extractor, &downloader, &mut sink).unwrap_err();
    assert!(matches!(err, VgetError::NoTargets));
}

#[test]
fn test_mixed_batch_reports_one_failure_and_attempts_everything() {
    // End-to-end scenario: u1 yields two items of which one fails to
    // download, u2 succeeds fully.
    let extractor = StubExtractor::new()
        .plan("u1", Plan::Items(vec![("u1-a", true), ("u1-b", true)]))
        .plan("u2", Plan::Items(vec![("u2-a", true)]));
    let downloader = StubDownloader::new().failing_on("u1-b");
    let cfg = RunConfig::default();
    let mut sink = Vec::new();

    let verdict = run_batch(&targets(&["u1", "u2"]), &cfg, &extractor, &downloader, &mut sink)
        .unwrap();

    // Both of u1's items were attempted despite the failure, and u2 ran.
    assert_eq!(
        *downloader.attempts.borrow(),
        ["u1-a", "u1-b", "u2-a"]
    );
    assert_eq!(verdict.failures().len(), 1);
    assert_eq!(verdict.failures()[0].0, "u1");
    assert_eq!(verdict.exit_code(), 1);
}

#[test]
fn test_json_mode_skips_the_downloader() {
    let extractor = StubExtractor::new()
        .plan("u1", Plan::Items(vec![("u1-a", true), ("u1-b", true)]))
        .plan("u2", Plan::Items(vec![("u2-a", true)]));
    let downloader = StubDownloader::new();
    let cfg = RunConfig {
        json_output: true,
        ..Default::default()
    };
    let mut sink = Vec::new();

    let verdict = run_batch(&targets(&["u1", "u2"]), &cfg, &extractor, &downloader, &mut sink)
        .unwrap();

    assert!(verdict.is_success());
    assert!(downloader.attempts.borrow().is_empty());

    // One tab-indented document per target, in target order.
    let output = String::from_utf8(sink).unwrap();
    let docs: Vec<&str> = output
        .split("\n[")
        .filter(|chunk| !chunk.trim().is_empty())
        .collect();
    assert_eq!(docs.len(), 2);
    assert!(output.starts_with('['));
    assert!(output.contains("\t"));
    assert!(output.contains("u1-a"));
    assert!(output.contains("u2-a"));
}

#[test]
fn test_json_mode_keeps_preparation_failures() {
    let extractor = StubExtractor::new()
        .plan("u1", Plan::Fail)
        .plan("u2", Plan::Items(vec![("u2-a", true)]));
    let downloader = StubDownloader::new();
    let cfg = RunConfig {
        json_output: true,
        ..Default::default()
    };
    let mut sink = Vec::new();

    let verdict = run_batch(&targets(&["u1", "u2"]), &cfg, &extractor, &downloader, &mut sink)
        .unwrap();

    assert_eq!(verdict.failures().len(), 1);
    assert_eq!(verdict.failures()[0].0, "u1");

    // u2's document still made it out.
    let output = String::from_utf8(sink).unwrap();
    assert!(output.contains("u2-a"));
}
