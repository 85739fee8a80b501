//! # Core Kernel Module
//!
//! Shared configuration used by the builders and the logging bootstrap.

pub mod config;

pub use config::{KernelConfig, LoggingConfig, SceneConfig, ShadowDefaults};
pub use crate::config::{Config, ConfigError};
