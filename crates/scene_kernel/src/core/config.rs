//! # Kernel Configuration
//!
//! Configuration for logging, visible-set assembly limits, and the default
//! shadow map parameters used by the shadow builders.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [scene]
//! max_lights_per_group = 4
//!
//! [shadows]
//! size_exponent = 10
//! precision = "Depth24"
//! variance_precision = "Rg32F"
//! filter_minification = "Linear"
//! filter_magnification = "Linear"
//! factor_minimum = 0.2
//! ```

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::foundation::math::utils;
use crate::graphics::{
    DepthPrecision, DepthVariancePrecision, TextureFilterMagnification, TextureFilterMinification,
};
use crate::shadow::{SIZE_EXPONENT_MAX, SIZE_EXPONENT_MIN};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level filter name (`off`, `error`, `warn`, `info`, `debug`, `trace`)
    pub level: String,
}

impl LoggingConfig {
    /// Create a logging configuration with the given level name
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
        }
    }

    /// Parsed level filter; unknown names fall back to `info`
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info")
    }
}

/// Visible-set assembly configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Maximum number of lights a single light group may hold
    pub max_lights_per_group: usize,
}

impl SceneConfig {
    /// Set the per-group light limit
    pub fn with_max_lights_per_group(mut self, max: usize) -> Self {
        self.max_lights_per_group = max;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            max_lights_per_group: 8,
        }
    }
}

/// Default shadow map parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowDefaults {
    /// Shadow map size exponent (texel dimension is `2^n`)
    pub size_exponent: u32,
    /// Depth precision for basic shadow maps
    pub precision: DepthPrecision,
    /// Moment precision for variance shadow maps
    pub variance_precision: DepthVariancePrecision,
    /// Minification filter
    pub filter_minification: TextureFilterMinification,
    /// Magnification filter
    pub filter_magnification: TextureFilterMagnification,
    /// Minimum light factor inside shadow
    pub factor_minimum: f32,
}

impl Default for ShadowDefaults {
    fn default() -> Self {
        Self {
            size_exponent: 10,
            precision: DepthPrecision::Depth24,
            variance_precision: DepthVariancePrecision::Rg32F,
            filter_minification: TextureFilterMinification::Linear,
            filter_magnification: TextureFilterMagnification::Linear,
            factor_minimum: 0.0,
        }
    }
}

/// Top-level kernel configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Visible-set assembly configuration
    pub scene: SceneConfig,
    /// Default shadow map parameters
    pub shadows: ShadowDefaults,
}

impl KernelConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.level.parse::<LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "Unknown log level: {}",
                self.logging.level
            )));
        }

        if self.scene.max_lights_per_group == 0 {
            return Err(ConfigError::Invalid(
                "max_lights_per_group must be at least 1".to_string(),
            ));
        }

        let exponent = self.shadows.size_exponent;
        if !(SIZE_EXPONENT_MIN..=SIZE_EXPONENT_MAX).contains(&exponent) {
            return Err(ConfigError::Invalid(format!(
                "shadow size_exponent {exponent} outside [{SIZE_EXPONENT_MIN}, {SIZE_EXPONENT_MAX}]"
            )));
        }

        if !utils::is_unit_interval(self.shadows.factor_minimum) {
            return Err(ConfigError::Invalid(format!(
                "shadow factor_minimum {} outside [0, 1]",
                self.shadows.factor_minimum
            )));
        }

        Ok(())
    }
}

impl Config for KernelConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = KernelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scene.max_lights_per_group, 8);
        assert_eq!(config.logging.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = KernelConfig::default();
        config.logging = LoggingConfig::new("debug");
        config.scene = config.scene.with_max_lights_per_group(4);
        config.shadows.size_exponent = 11;
        config.shadows.factor_minimum = 0.25;

        let text = config.to_toml_string().unwrap();
        let parsed = KernelConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_ron_round_trip() {
        let mut config = KernelConfig::default();
        config.shadows.precision = DepthPrecision::Depth32F;

        let text = config.to_ron_string().unwrap();
        let parsed = KernelConfig::from_ron_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = KernelConfig::from_toml_str("[scene]\nmax_lights_per_group = 2\n").unwrap();
        assert_eq!(parsed.scene.max_lights_per_group, 2);
        assert_eq!(parsed.shadows, ShadowDefaults::default());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = KernelConfig::default();
        config.scene.max_lights_per_group = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = KernelConfig::default();
        config.shadows.size_exponent = 0;
        assert!(config.validate().is_err());

        let mut config = KernelConfig::default();
        config.shadows.factor_minimum = 1.5;
        assert!(config.validate().is_err());

        let mut config = KernelConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("scene_kernel_config_{}.toml", std::process::id()));

        let config = KernelConfig::default();
        config.save_to_file(&path).unwrap();
        let loaded = KernelConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = KernelConfig::load_from_file("kernel.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_)) | Err(ConfigError::UnsupportedFormat(_))));

        let result = KernelConfig::default().save_to_file("kernel.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
