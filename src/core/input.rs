// Input aggregation: merges CLI-supplied targets with targets read from an
// input file, producing the ordered work list for the batch orchestrator.

use std::fs;
use std::path::Path;

use crate::error::{Result, VgetError};

/// Merge CLI-supplied target identifiers with identifiers sourced from an
/// optional input file.
///
/// CLI targets come first, in the order given. File-sourced targets are
/// appended after them, filtered through [`expand_items`] with the
/// `items`/`start`/`end` selection. The list keeps duplicates: repeated
/// identifiers are processed independently, once each.
///
/// An unreadable input file and an empty aggregated list are both fatal
/// precondition failures, raised before any network activity.
pub fn aggregate_targets(
    cli_args: &[String],
    file: Option<&Path>,
    items: Option<&str>,
    start: usize,
    end: usize,
) -> Result<Vec<String>> {
    let mut targets: Vec<String> = cli_args.to_vec();

    if let Some(path) = file {
        let contents = fs::read_to_string(path)
            .map_err(|e| VgetError::input_file(format!("{}: {}", path.display(), e)))?;
        let lines: Vec<String> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        targets.extend(expand_items(&lines, items.unwrap_or(""), start, end));
    }

    if targets.is_empty() {
        return Err(VgetError::NoTargets);
    }

    Ok(targets)
}

/// Expand a file's lines plus an index/range specification into an ordered
/// identifier list.
///
/// `items` supports comma-separated 1-based indices and inclusive dash
/// ranges, e.g. `"1,5,6,8-10"`, and takes precedence over the
/// `start`/`end` window when present. `end == 0` means no upper bound.
/// Indices beyond the line count are dropped.
pub fn expand_items(lines: &[String], items: &str, start: usize, end: usize) -> Vec<String> {
    let count = lines.len();
    if count == 0 {
        return Vec::new();
    }

    let indices: Vec<usize> = if !items.trim().is_empty() {
        parse_item_spec(items, count)
    } else {
        let start = start.max(1);
        let end = if end == 0 || end > count { count } else { end };
        if start > end {
            return Vec::new();
        }
        (start..=end).collect()
    };

    indices.into_iter().map(|i| lines[i - 1].clone()).collect()
}

/// Parse an item specification like "1,5,6,8-10" into 1-based indices,
/// clamped to `count`. Malformed pieces are skipped with a warning.
fn parse_item_spec(spec: &str, count: usize) -> Vec<usize> {
    let mut indices = Vec::new();

    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((lo, hi)) = part.split_once('-') {
            match (lo.trim().parse::<usize>(), hi.trim().parse::<usize>()) {
                (Ok(lo), Ok(hi)) => {
                    for i in lo..=hi {
                        if i >= 1 && i <= count {
                            indices.push(i);
                        }
                    }
                }
                _ => log::warn!("ignoring malformed item range: {}", part),
            }
        } else {
            match part.parse::<usize>() {
                Ok(i) if i >= 1 && i <= count => indices.push(i),
                Ok(_) => {}
                Err(_) => log::warn!("ignoring malformed item index: {}", part),
            }
        }
    }

    indices
}
