// Download collaborator: materializes one extracted item. Two backends:
// a blocking yt-dlp invocation per item, or hand-off to an aria2 daemon
// over JSON-RPC. The orchestrator treats either as a single blocking unit
// of work with one success/failure outcome.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde_json::{json, Value};
use thiserror::Error;

use crate::core::config::{Aria2Options, DownloadOptions, RunConfig};
use crate::core::extract::MediaItem;
use crate::core::ytdlp;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("failed to run downloader: {0}")]
    Spawn(String),

    #[error("downloader exited with status {0}")]
    Failed(i32),

    #[error("no usable media url in item metadata")]
    MissingUrl,

    #[error("aria2 rpc error: {0}")]
    Rpc(String),
}

/// Download collaborator contract: called once per valid extracted item,
/// blocking, no payload beyond success or error.
pub trait Downloader {
    fn download(&self, item: &MediaItem, cfg: &RunConfig) -> Result<(), DownloadError>;
}

/// Pick the download backend for this run.
pub fn create_downloader(cfg: &RunConfig, binary: PathBuf) -> Box<dyn Downloader> {
    if cfg.download.aria2.enabled {
        Box::new(Aria2Downloader::new(cfg.download.aria2.clone()))
    } else {
        Box::new(YtDlpDownloader::new(binary))
    }
}

/// Default backend: one blocking `yt-dlp` process per item.
///
/// Retry, chunking and multi-part concurrency all happen inside yt-dlp;
/// this type only maps `RunConfig` onto the corresponding flags.
pub struct YtDlpDownloader {
    binary: PathBuf,
}

impl YtDlpDownloader {
    pub fn new(binary: PathBuf) -> Self {
        Self { binary }
    }

    fn build_command(&self, item: &MediaItem, cfg: &RunConfig) -> Command {
        let mut cmd = Command::new(&self.binary);
        let opts = &cfg.download;

        let playlist_prefix = cfg.extraction.playlist && !cfg.extraction.episode_title_only;
        cmd.arg("-o").arg(output_template(opts, playlist_prefix));
        cmd.arg("--retries").arg(opts.retries.to_string());

        if opts.info_only {
            cmd.arg("--list-formats");
        }
        if !opts.stream_format.is_empty() {
            cmd.arg("-f").arg(&opts.stream_format);
        }
        if opts.caption {
            cmd.arg("--write-subs");
        }
        if opts.multi_thread && opts.thread_count > 1 {
            cmd.arg("-N").arg(opts.thread_count.to_string());
        }
        if opts.chunk_size_mb > 0 {
            cmd.arg("--http-chunk-size")
                .arg(format!("{}M", opts.chunk_size_mb));
        }
        if opts.file_name_length > 0 {
            cmd.arg("--trim-filenames")
                .arg(opts.file_name_length.to_string());
        }
        if cfg.network.silent {
            cmd.arg("--quiet");
        }

        ytdlp::apply_network_flags(&mut cmd, &cfg.network);

        // The item is already a single resolved entity; never re-expand it.
        cmd.arg("--no-playlist");
        cmd.arg("--").arg(&item.source);
        cmd
    }
}

impl Downloader for YtDlpDownloader {
    fn download(&self, item: &MediaItem, cfg: &RunConfig) -> Result<(), DownloadError> {
        log::debug!("downloading {} ({})", item.title, item.source);

        let status = self
            .build_command(item, cfg)
            .status()
            .map_err(|e| DownloadError::Spawn(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(DownloadError::Failed(status.code().unwrap_or(-1)))
        }
    }
}

/// Build the yt-dlp output template from the configured path and name.
/// Playlist episodes keep the playlist title as a prefix unless
/// episode-title-only was requested.
fn output_template(opts: &DownloadOptions, playlist_prefix: bool) -> String {
    let file_part = if !opts.output_name.is_empty() {
        format!("{}.%(ext)s", opts.output_name)
    } else if playlist_prefix {
        "%(playlist_title)s - %(title)s.%(ext)s".to_string()
    } else {
        "%(title)s.%(ext)s".to_string()
    };

    if opts.output_path.is_empty() {
        file_part
    } else {
        Path::new(&opts.output_path)
            .join(file_part)
            .to_string_lossy()
            .into_owned()
    }
}

/// Alternate backend: enqueue the item's direct media URL on an aria2
/// daemon via `aria2.addUri`. Enqueue-and-return semantics: a successful
/// RPC reply counts as success, the daemon owns the transfer from there.
pub struct Aria2Downloader {
    client: reqwest::blocking::Client,
    opts: Aria2Options,
}

impl Aria2Downloader {
    pub fn new(opts: Aria2Options) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            opts,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}://{}/jsonrpc", self.opts.method, self.opts.addr)
    }

    /// The direct media URL from the item metadata, falling back to the
    /// item's own page URL when extraction did not resolve one.
    fn media_url(item: &MediaItem) -> Result<String, DownloadError> {
        item.metadata
            .get("url")
            .and_then(Value::as_str)
            .map(String::from)
            .or_else(|| {
                if item.source.is_empty() {
                    None
                } else {
                    Some(item.source.clone())
                }
            })
            .ok_or(DownloadError::MissingUrl)
    }
}

impl Downloader for Aria2Downloader {
    fn download(&self, item: &MediaItem, cfg: &RunConfig) -> Result<(), DownloadError> {
        let url = Self::media_url(item)?;

        let mut headers: Vec<String> = Vec::new();
        if !cfg.network.cookie.is_empty() {
            headers.push(format!("Cookie: {}", cfg.network.cookie));
        }
        if !cfg.network.user_agent.is_empty() {
            headers.push(format!("User-Agent: {}", cfg.network.user_agent));
        }
        if !cfg.network.referer.is_empty() {
            headers.push(format!("Referer: {}", cfg.network.referer));
        }

        let mut rpc_options = serde_json::Map::new();
        rpc_options.insert("header".to_string(), json!(headers));
        rpc_options.insert("max-tries".to_string(), json!(cfg.download.retries.to_string()));
        if !cfg.download.output_path.is_empty() {
            rpc_options.insert("dir".to_string(), json!(cfg.download.output_path));
        }
        if !cfg.download.output_name.is_empty() {
            let ext = item
                .metadata
                .get("ext")
                .and_then(Value::as_str)
                .unwrap_or("mp4");
            rpc_options.insert(
                "out".to_string(),
                json!(format!("{}.{}", cfg.download.output_name, ext)),
            );
        }

        let mut params: Vec<Value> = Vec::new();
        if !self.opts.token.is_empty() {
            params.push(json!(format!("token:{}", self.opts.token)));
        }
        params.push(json!([url]));
        params.push(Value::Object(rpc_options));

        let body = json!({
            "jsonrpc": "2.0",
            "id": "vget",
            "method": "aria2.addUri",
            "params": params,
        });

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .map_err(|e| DownloadError::Rpc(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DownloadError::Rpc(format!("HTTP {}", response.status())));
        }

        let reply: Value = response
            .json()
            .map_err(|e| DownloadError::Rpc(e.to_string()))?;
        if let Some(err) = reply.get("error") {
            return Err(DownloadError::Rpc(err.to_string()));
        }

        log::debug!("enqueued {} on aria2", item.title);
        Ok(())
    }
}
