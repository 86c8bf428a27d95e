// yt-dlp binary discovery and bootstrap. Resolution order: a binary already
// on PATH, then a copy we installed previously, then a fresh install from
// the latest GitHub release.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use crate::core::config::NetworkOptions;
use crate::core::settings::Settings;
use crate::ui;

/// Release asset name for the current platform.
#[cfg(windows)]
const BINARY_NAME: &str = "yt-dlp.exe";
#[cfg(not(windows))]
const BINARY_NAME: &str = "yt-dlp";

pub struct YtDlpLocator {
    settings: Settings,
}

impl YtDlpLocator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            settings: Settings::load()?,
        })
    }

    /// Resolve a usable yt-dlp binary, installing one if necessary.
    pub fn ensure(&mut self) -> Result<PathBuf> {
        // 1. A binary on PATH wins, silently.
        if let Ok(path) = which::which("yt-dlp") {
            return Ok(path);
        }

        // 2. A copy we installed on a previous run.
        if let Some(path) = self.settings.yt_dlp_path() {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        // 3. First run without yt-dlp anywhere: install it.
        ui::prompts::info("Bootstrapping yt-dlp (first run)...");
        self.install()
    }

    /// Latest released version, read from the /releases/latest redirect.
    fn latest_version() -> Result<String> {
        let client = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let response = client
            .get("https://github.com/yt-dlp/yt-dlp/releases/latest")
            .send()
            .context("Failed to query latest yt-dlp release")?;

        if let Some(location) = response.headers().get("Location") {
            // Location looks like .../releases/tag/2025.11.12
            let location = location.to_str()?;
            if let Some(version) = location.split("/tag/").nth(1) {
                return Ok(version.to_string());
            }
        }

        Err(anyhow!("Could not determine the latest yt-dlp version"))
    }

    fn download_binary(version: &str) -> Result<Vec<u8>> {
        let url = format!(
            "https://github.com/yt-dlp/yt-dlp/releases/download/{}/{}",
            version, BINARY_NAME
        );

        log::debug!("downloading yt-dlp from {}", url);
        let response = reqwest::blocking::get(&url).context("Failed to download yt-dlp")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP {} while downloading yt-dlp",
                response.status()
            ));
        }

        let bytes = response.bytes()?.to_vec();
        ui::prompts::dimmed(&format!(
            "Downloaded yt-dlp {} ({})",
            version,
            ui::formatters::format_size(bytes.len() as u64)
        ));

        Ok(bytes)
    }

    fn install(&mut self) -> Result<PathBuf> {
        let version = Self::latest_version()?;
        let binary_data = Self::download_binary(&version)?;

        let install_dir = Self::install_dir()?;
        fs::create_dir_all(&install_dir)?;

        let binary_path = install_dir.join(BINARY_NAME);
        fs::write(&binary_path, binary_data).context("Failed to write yt-dlp binary")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&binary_path, fs::Permissions::from_mode(0o755))
                .context("Failed to mark yt-dlp executable")?;
        }

        self.settings
            .set_yt_dlp_path(binary_path.to_string_lossy().to_string());
        self.settings.set_yt_dlp_managed(true);
        self.settings.save()?;

        ui::prompts::success("yt-dlp ready");
        Ok(binary_path)
    }

    fn install_dir() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().context("Could not determine the config directory")?;
        Ok(config_dir.join("vget").join("bin"))
    }
}

/// Map the shared network identity onto yt-dlp flags. Used by both the
/// extraction and the download invocation so the two collaborators always
/// present the same identity.
pub fn apply_network_flags(cmd: &mut Command, net: &NetworkOptions) {
    if !net.cookie.is_empty() {
        cmd.arg("--add-header")
            .arg(format!("Cookie:{}", net.cookie));
    }
    if !net.user_agent.is_empty() {
        cmd.arg("--user-agent").arg(&net.user_agent);
    }
    if !net.referer.is_empty() {
        cmd.arg("--referer").arg(&net.referer);
    }
    if net.debug {
        cmd.arg("--verbose");
    }
}
