/// Immutable per-run configuration snapshot.
///
/// Built once per invocation after flag parsing and cookie resolution,
/// then shared read-only by every stage of the batch. Construction is
/// pure value copying; the extraction and download collaborators
/// validate their own option subsets.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    pub network: NetworkOptions,
    pub extraction: ExtractOptions,
    pub download: DownloadOptions,
    /// Print raw extraction metadata instead of downloading
    pub json_output: bool,
}

/// Network identity shared by both collaborators
#[derive(Debug, Clone, Default)]
pub struct NetworkOptions {
    /// Literal cookie string (already resolved from file if one was given)
    pub cookie: String,
    pub user_agent: String,
    pub referer: String,
    pub retries: u32,
    pub debug: bool,
    pub silent: bool,
}

/// Options consumed by the extraction collaborator
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub playlist: bool,
    /// Playlist selection like "1,5,6,8-10"; empty means no narrowing
    pub items: String,
    /// 1-based inclusive playlist window start
    pub item_start: usize,
    /// Playlist window end; 0 means no upper bound
    pub item_end: usize,
    pub episode_title_only: bool,
    pub video_password: String,
}

/// Options consumed by the download collaborator
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// List stream information without transferring anything
    pub info_only: bool,
    /// Stream/format selector forwarded verbatim
    pub stream_format: String,
    pub output_path: String,
    pub output_name: String,
    /// Maximum file name length, 0 means unlimited
    pub file_name_length: u32,
    pub caption: bool,
    pub multi_thread: bool,
    pub thread_count: u32,
    pub retries: u32,
    pub chunk_size_mb: u32,
    pub aria2: Aria2Options,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            info_only: false,
            stream_format: String::new(),
            output_path: String::new(),
            output_name: String::new(),
            file_name_length: 255,
            caption: false,
            multi_thread: false,
            thread_count: 10,
            retries: 10,
            chunk_size_mb: 1,
            aria2: Aria2Options::default(),
        }
    }
}

/// Settings for delegating transfers to an aria2 RPC daemon
#[derive(Debug, Clone)]
pub struct Aria2Options {
    pub enabled: bool,
    pub token: String,
    pub addr: String,
    pub method: String,
}

impl Default for Aria2Options {
    fn default() -> Self {
        Self {
            enabled: false,
            token: String::new(),
            addr: "localhost:6800".to_string(),
            method: "http".to_string(),
        }
    }
}
