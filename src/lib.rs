// VGET Library - Public API

// Re-export error types
pub mod error;
pub use error::{Result, VgetError};

// Module declarations
pub mod core;
pub mod ui;

// Re-export commonly used types
pub use crate::core::config::RunConfig;

// Initialize logging
pub fn init_logging(debug: bool, silent: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else if silent {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
