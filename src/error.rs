use std::io;
use thiserror::Error;

use crate::core::download::DownloadError;
use crate::core::extract::ExtractionError;

/// Custom error type for the vget application
#[derive(Error, Debug)]
pub enum VgetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("too few arguments: no targets to process")]
    NoTargets,

    #[error("Cookie file error: {0}")]
    CookieFile(String),

    #[error("Input file error: {0}")]
    InputFile(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),
}

/// Result type alias for the vget application
pub type Result<T> = std::result::Result<T, VgetError>;

impl VgetError {
    /// Create a cookie file error
    pub fn cookie_file<S: Into<String>>(msg: S) -> Self {
        VgetError::CookieFile(msg.into())
    }

    /// Create an input file error
    pub fn input_file<S: Into<String>>(msg: S) -> Self {
        VgetError::InputFile(msg.into())
    }

    /// Create a settings error
    pub fn settings<S: Into<String>>(msg: S) -> Self {
        VgetError::Settings(msg.into())
    }
}
