// Extraction collaborator: turns one target identifier into the ordered set
// of downloadable items. Site-specific parsing is fully delegated to yt-dlp;
// this module only shapes the invocation and the returned metadata.

use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;
use thiserror::Error;

use crate::core::config::RunConfig;
use crate::core::validation;
use crate::core::ytdlp;

/// Errors raised by the extraction collaborator.
///
/// A value returned from [`Extractor::extract`] itself is a *preparation*
/// failure: the target could not be turned into any items. The same type
/// also rides inside [`ExtractedItem::Failed`] for items whose metadata
/// could not be resolved even though extraction as a whole succeeded.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    #[error("failed to run extractor: {0}")]
    Spawn(String),

    #[error("extractor exited with status {status}: {stderr}")]
    Failed { status: i32, stderr: String },

    #[error("invalid item metadata: {0}")]
    InvalidMetadata(String),

    #[error("no downloadable items for target")]
    Empty,
}

/// One downloadable unit produced by extraction.
///
/// The metadata payload is opaque to the orchestrator and forwarded
/// verbatim to the download collaborator.
#[derive(Debug, Clone)]
pub struct MediaItem {
    /// URL the download collaborator should operate on
    pub source: String,
    pub title: String,
    pub metadata: Value,
}

/// Result of extracting one item: either ready to download, or carrying the
/// item-level failure that prevented its metadata from being resolved.
#[derive(Debug)]
pub enum ExtractedItem {
    Ready(MediaItem),
    Failed(ExtractionError),
}

/// Extraction collaborator contract: called once per target.
pub trait Extractor {
    fn extract(&self, target: &str, cfg: &RunConfig)
        -> Result<Vec<ExtractedItem>, ExtractionError>;
}

/// Production extractor driving `yt-dlp --dump-json`.
///
/// yt-dlp prints one JSON document per item on stdout; a playlist target
/// yields one line per entry. Lines that fail to parse become item-level
/// failures so the rest of the playlist is still attempted.
pub struct YtDlpExtractor {
    binary: PathBuf,
}

impl YtDlpExtractor {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    fn build_command(&self, target: &str, cfg: &RunConfig) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--dump-json").arg("--no-warnings");

        if cfg.extraction.playlist {
            cmd.arg("--yes-playlist");
            if !cfg.extraction.items.is_empty() {
                cmd.arg("--playlist-items").arg(&cfg.extraction.items);
            } else if cfg.extraction.item_start > 1 || cfg.extraction.item_end > 0 {
                let end = if cfg.extraction.item_end == 0 {
                    String::new()
                } else {
                    cfg.extraction.item_end.to_string()
                };
                cmd.arg("--playlist-items")
                    .arg(format!("{}:{}", cfg.extraction.item_start.max(1), end));
            }
        } else {
            cmd.arg("--no-playlist");
        }

        if !cfg.extraction.video_password.is_empty() {
            cmd.arg("--video-password").arg(&cfg.extraction.video_password);
        }

        ytdlp::apply_network_flags(&mut cmd, &cfg.network);
        cmd.arg("--").arg(target);
        cmd
    }
}

impl Extractor for YtDlpExtractor {
    fn extract(
        &self,
        target: &str,
        cfg: &RunConfig,
    ) -> Result<Vec<ExtractedItem>, ExtractionError> {
        validation::validate_target_url(target)
            .map_err(|e| ExtractionError::InvalidTarget(format!("{:#}", e)))?;

        let output = self
            .build_command(target, cfg)
            .output()
            .map_err(|e| ExtractionError::Spawn(e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() && stdout.trim().is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Failed {
                status: output.status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            });
        }

        let mut items = Vec::new();
        for line in stdout.lines().filter(|line| !line.trim().is_empty()) {
            match serde_json::from_str::<Value>(line) {
                Ok(metadata) => {
                    let title = metadata
                        .get("title")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown")
                        .to_string();
                    let source = metadata
                        .get("webpage_url")
                        .and_then(Value::as_str)
                        .unwrap_or(target)
                        .to_string();
                    items.push(ExtractedItem::Ready(MediaItem {
                        source,
                        title,
                        metadata,
                    }));
                }
                Err(e) => {
                    items.push(ExtractedItem::Failed(ExtractionError::InvalidMetadata(
                        e.to_string(),
                    )));
                }
            }
        }

        if items.is_empty() {
            return Err(ExtractionError::Empty);
        }

        log::debug!("extracted {} item(s) from {}", items.len(), target);
        Ok(items)
    }
}
