// Core business logic module

pub mod batch;
pub mod config;
pub mod cookie;
pub mod download;
pub mod extract;
pub mod input;
pub mod pipeline;
pub mod settings;
pub mod validation;
pub mod ytdlp;

// Re-export commonly used items
pub use batch::{run_batch, BatchVerdict};
pub use config::RunConfig;
pub use cookie::resolve_cookie;
pub use download::{create_downloader, Downloader};
pub use extract::{ExtractedItem, Extractor, MediaItem};
pub use input::{aggregate_targets, expand_items};
pub use pipeline::{process_target, TargetError, TargetOutcome};
pub use settings::Settings;
pub use ytdlp::YtDlpLocator;
