// Per-target pipeline: extract once, then download each extracted item in
// order. A single bad item never blocks the remaining items of the same
// target; the target still reports exactly one representative error.

use thiserror::Error;

use crate::core::config::RunConfig;
use crate::core::download::{DownloadError, Downloader};
use crate::core::extract::{ExtractedItem, ExtractionError, Extractor};

/// The representative failure reported for one target.
#[derive(Error, Debug)]
pub enum TargetError {
    /// Extraction itself failed; zero items were attempted.
    #[error("extraction failed: {0}")]
    Preparation(#[from] ExtractionError),

    /// At least one item failed; other items may have succeeded.
    #[error("{0}")]
    Item(#[from] ItemError),
}

/// A failure tied to one specific already-identified item.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("item extraction failed: {0}")]
    Extraction(ExtractionError),

    #[error("download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("metadata serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Outcome of processing one target identifier.
#[derive(Debug)]
pub enum TargetOutcome {
    Success { items_attempted: usize },
    Failed {
        error: TargetError,
        items_attempted: usize,
    },
}

impl TargetOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TargetOutcome::Success { .. })
    }

    pub fn items_attempted(&self) -> usize {
        match self {
            TargetOutcome::Success { items_attempted }
            | TargetOutcome::Failed {
                items_attempted, ..
            } => *items_attempted,
        }
    }
}

/// Process one target: extract, then attempt every item in order.
///
/// Item-level failures (an item whose metadata could not be resolved, or
/// whose download failed) are collected into an ordered accumulator and the
/// loop continues; the accumulator is inspected once at the end and the
/// *first* recorded error becomes the target's representative outcome. The
/// rest are logged and discarded.
pub fn process_target(
    target: &str,
    cfg: &RunConfig,
    extractor: &dyn Extractor,
    downloader: &dyn Downloader,
) -> TargetOutcome {
    let items = match extractor.extract(target, cfg) {
        Ok(items) => items,
        Err(err) => {
            return TargetOutcome::Failed {
                error: TargetError::Preparation(err),
                items_attempted: 0,
            }
        }
    };

    let mut attempted = 0usize;
    let mut failures: Vec<ItemError> = Vec::new();

    for item in items {
        attempted += 1;
        match item {
            ExtractedItem::Failed(err) => failures.push(ItemError::Extraction(err)),
            ExtractedItem::Ready(media) => {
                if let Err(err) = downloader.download(&media, cfg) {
                    failures.push(ItemError::Download(err));
                }
            }
        }
    }

    let mut failures = failures.into_iter();
    match failures.next() {
        None => TargetOutcome::Success {
            items_attempted: attempted,
        },
        Some(first) => {
            for discarded in failures {
                log::warn!("{}: additional item error: {}", target, discarded);
            }
            TargetOutcome::Failed {
                error: TargetError::Item(first),
                items_attempted: attempted,
            }
        }
    }
}
