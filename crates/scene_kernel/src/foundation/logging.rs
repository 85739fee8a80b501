//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

use crate::core::config::LoggingConfig;

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with the configured level
///
/// `RUST_LOG` still takes precedence when set. Calling this more than once is
/// harmless; later calls leave the installed logger in place.
pub fn init_with_config(config: &LoggingConfig) {
    let level = config.level_filter();
    let result = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();

    if result.is_err() {
        log::debug!("Logger already installed; keeping existing configuration");
    }
}
