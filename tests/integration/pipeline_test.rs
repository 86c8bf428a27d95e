use vget::core::config::RunConfig;
use vget::core::pipeline::{process_target, ItemError, TargetError, TargetOutcome};

use super::stubs::{Plan, StubDownloader, StubExtractor};

#[test]
fn test_all_items_succeeding_yields_success() {
    let extractor =
        StubExtractor::new().plan("u1", Plan::Items(vec![("i1", true), ("i2", true)]));
    let downloader = StubDownloader::new();
    let cfg = RunConfig::default();

    let outcome = process_target("u1", &cfg, &extractor, &downloader);

    assert!(outcome.is_success());
    assert_eq!(outcome.items_attempted(), 2);
    assert_eq!(*downloader.attempts.borrow(), ["i1", "i2"]);
}

#[test]
fn test_preparation_failure_attempts_zero_items() {
    let extractor = StubExtractor::new().plan("u1", Plan::Fail);
    let downloader = StubDownloader::new();
    let cfg = RunConfig::default();

    let outcome = process_target("u1", &cfg, &extractor, &downloader);

    match outcome {
        TargetOutcome::Failed {
            error: TargetError::Preparation(_),
            items_attempted,
        } => assert_eq!(items_attempted, 0),
        other => panic!("expected preparation failure, got {:?}", other),
    }
    assert!(downloader.attempts.borrow().is_empty());
}

#[test]
fn test_every_item_attempted_despite_earlier_failures() {
    let extractor = StubExtractor::new().plan(
        "u1",
        Plan::Items(vec![("i1", true), ("i2", false), ("i3", true), ("i4", true)]),
    );
    let downloader = StubDownloader::new().failing_on("i3");
    let cfg = RunConfig::default();

    let outcome = process_target("u1", &cfg, &extractor, &downloader);

    // Every valid item reached the downloader exactly once, in item order,
    // even though i2 had already failed at extraction time.
    assert_eq!(*downloader.attempts.borrow(), ["i1", "i3", "i4"]);
    assert_eq!(outcome.items_attempted(), 4);

    // The representative error is the first failure in item order: i2.
    match outcome {
        TargetOutcome::Failed {
            error: TargetError::Item(ItemError::Extraction(_)),
            ..
        } => {}
        other => panic!("expected i2's extraction error to win, got {:?}", other),
    }
}

#[test]
fn test_first_download_failure_wins_over_later_ones() {
    let extractor = StubExtractor::new().plan(
        "u1",
        Plan::Items(vec![("i1", true), ("i2", true), ("i3", true)]),
    );
    let downloader = StubDownloader::new().failing_on("i2").failing_on("i3");
    let cfg = RunConfig::default();

    let outcome = process_target("u1", &cfg, &extractor, &downloader);

    assert_eq!(*downloader.attempts.borrow(), ["i1", "i2", "i3"]);
    match outcome {
        TargetOutcome::Failed {
            error: TargetError::Item(ItemError::Download(_)),
            items_attempted,
        } => assert_eq!(items_attempted, 3),
        other => panic!("expected i2's download error, got {:?}", other),
    }
}
