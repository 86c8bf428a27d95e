// Persisted tool settings. Only state that must survive between runs lives
// here; everything about a single run belongs in RunConfig.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path of an yt-dlp binary installed by vget
    #[serde(default)]
    pub yt_dlp_path: Option<String>,
    /// Whether that binary was installed by us (safe to replace on update)
    #[serde(default)]
    pub yt_dlp_managed: bool,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let path = Self::settings_path()?;

        if !path.exists() {
            return Ok(Settings::default());
        }

        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {:?}", path))?;

        if data.trim().is_empty() {
            return Ok(Settings::default());
        }

        // A corrupted settings file only loses the cached binary path, so
        // fall back to defaults instead of failing the run.
        Ok(serde_json::from_str(&data).unwrap_or_default())
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(&path, data)
            .with_context(|| format!("Failed to write settings file: {:?}", path))?;

        Ok(())
    }

    fn settings_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().context("Could not determine the config directory")?;
        Ok(config_dir.join("vget").join("settings.json"))
    }

    pub fn yt_dlp_path(&self) -> Option<&String> {
        self.yt_dlp_path.as_ref()
    }

    pub fn set_yt_dlp_path(&mut self, path: String) {
        self.yt_dlp_path = Some(path);
    }

    pub fn set_yt_dlp_managed(&mut self, managed: bool) {
        self.yt_dlp_managed = managed;
    }
}
