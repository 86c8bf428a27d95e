// Batch orchestration: run the per-target pipeline over the work list,
// report failures without aborting, and fold everything into one verdict.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::core::config::RunConfig;
use crate::core::download::Downloader;
use crate::core::extract::{ExtractedItem, Extractor};
use crate::core::pipeline::{process_target, ItemError, TargetError, TargetOutcome};
use crate::error::{Result, VgetError};

/// Aggregate result of one batch run.
///
/// Holds the ordered list of failing targets with their representative
/// errors. The exit status is a pure function of whether the list is
/// empty; the per-target detail was already printed when it occurred.
#[derive(Debug, Default)]
pub struct BatchVerdict {
    failures: Vec<(String, TargetError)>,
    targets_processed: usize,
}

impl BatchVerdict {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failures(&self) -> &[(String, TargetError)] {
        &self.failures
    }

    pub fn targets_processed(&self) -> usize {
        self.targets_processed
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

/// Run the whole batch, strictly sequentially: target N+1 is not started
/// until target N's pipeline has fully returned, so diagnostic order always
/// matches input order. A failing target prints one diagnostic line and the
/// loop continues; batch failure is never fatal to the batch itself.
///
/// In JSON mode the download collaborator is skipped entirely and the raw
/// extraction result is serialized to `sink` instead, one document per
/// target in target order.
///
/// No timeout is applied to collaborator calls: a stuck call blocks the
/// batch (a bounded per-call timeout would be a compatible extension).
/// An empty work list is a fatal precondition failure, never a success.
pub fn run_batch<W: Write>(
    targets: &[String],
    cfg: &RunConfig,
    extractor: &dyn Extractor,
    downloader: &dyn Downloader,
    sink: &mut W,
) -> Result<BatchVerdict> {
    if targets.is_empty() {
        return Err(VgetError::NoTargets);
    }

    let mut verdict = BatchVerdict::default();

    for target in targets {
        let outcome = if cfg.json_output {
            dump_extraction(target, cfg, extractor, sink)
        } else {
            process_target(target, cfg, extractor, downloader)
        };

        verdict.targets_processed += 1;

        if let TargetOutcome::Failed { error, .. } = outcome {
            println!(
                "{} {} {}",
                "Downloading".red().bold(),
                target.cyan(),
                "error:".red().bold()
            );
            println!("  {}", error);
            verdict.failures.push((target.clone(), error));
        }
    }

    Ok(verdict)
}

/// JSON output mode: extract, then pretty-print the raw metadata for every
/// item of the target. A serialization failure is aggregated exactly like a
/// download failure; a preparation failure stays a preparation failure.
fn dump_extraction<W: Write>(
    target: &str,
    cfg: &RunConfig,
    extractor: &dyn Extractor,
    sink: &mut W,
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
    let item_count = items.len();

    let raw: Vec<serde_json::Value> = items
        .into_iter()
        .map(|item| match item {
            ExtractedItem::Ready(media) => media.metadata,
            ExtractedItem::Failed(err) => serde_json::json!({ "error": err.to_string() }),
        })
        .collect();

    let mut serializer =
        serde_json::Serializer::with_formatter(&mut *sink, PrettyFormatter::with_indent(b"\t"));
    if let Err(err) = raw.serialize(&mut serializer) {
        return TargetOutcome::Failed {
            error: TargetError::Item(ItemError::Serialization(err)),
            items_attempted: item_count,
        };
    }
    if let Err(err) = writeln!(sink) {
        return TargetOutcome::Failed {
            error: TargetError::Item(ItemError::Serialization(
                <serde_json::Error as serde::ser::Error>::custom(err),
            )),
            items_attempted: item_count,
        };
    }

    TargetOutcome::Success {
        items_attempted: item_count,
    }
}
