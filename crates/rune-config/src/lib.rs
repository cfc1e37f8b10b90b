//! Rune Motion configuration system
//!
//! This crate provides centralized configuration management for the keyframe
//! registry and animation controllers, loading settings from `rune.toml` with
//! environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default prefix for generated keyframe identifiers.
pub const DEFAULT_ID_PREFIX: &str = "rune-kf-";

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not valid TOML for [`MotionConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure for Rune Motion
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MotionConfig {
    /// Keyframe registry settings
    pub registry: RegistryConfig,
    /// Vendor prefix detection settings
    pub vendor: VendorConfig,
    /// Default animation options for new controllers
    pub defaults: DefaultsConfig,
}

/// Keyframe registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Prefix of every generated `@keyframes` identifier
    pub id_prefix: String,
}

/// Vendor prefix configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VendorConfig {
    /// Skip engine probing and use this vendor namespace ("webkit", "moz", "O",
    /// or "" for unprefixed)
    pub force_prefix: Option<String>,
}

/// Defaults applied to animation options built from configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// animation-duration in milliseconds
    pub duration_ms: u64,
    /// animation-timing-function
    pub easing: String,
    /// animation-delay in milliseconds
    pub delay_ms: u64,
    /// Start playing as soon as the controller is constructed
    pub auto_play: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1000,
            easing: "ease".to_string(),
            delay_ms: 0,
            auto_play: true,
        }
    }
}

fn env_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl MotionConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the rune.toml configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from the default location (rune.toml in the current directory)
    /// or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("rune.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        if let Ok(prefix) = std::env::var("RUNE_MOTION_ID_PREFIX") {
            if !prefix.is_empty() {
                self.registry.id_prefix = prefix;
            }
        }

        if let Ok(vendor) = std::env::var("RUNE_MOTION_FORCE_PREFIX") {
            self.vendor.force_prefix = Some(vendor);
        }

        if let Ok(val) = std::env::var("RUNE_MOTION_DURATION_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                self.defaults.duration_ms = ms;
            }
        }
        if let Ok(easing) = std::env::var("RUNE_MOTION_EASING") {
            self.defaults.easing = easing;
        }
        if let Ok(val) = std::env::var("RUNE_MOTION_AUTO_PLAY") {
            self.defaults.auto_play = env_flag(&val);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from rune.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MotionConfig::default();
        assert_eq!(config.registry.id_prefix, DEFAULT_ID_PREFIX);
        assert!(config.vendor.force_prefix.is_none());
        assert_eq!(config.defaults.duration_ms, 1000);
        assert_eq!(config.defaults.easing, "ease");
        assert!(config.defaults.auto_play);
    }

    #[test]
    fn test_toml_serialization() {
        let config = MotionConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: MotionConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.registry.id_prefix, DEFAULT_ID_PREFIX);
        assert_eq!(parsed.defaults.delay_ms, 0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let parsed: MotionConfig = toml::from_str(
            r#"
            [vendor]
            force_prefix = "webkit"

            [defaults]
            duration_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(parsed.vendor.force_prefix.as_deref(), Some("webkit"));
        assert_eq!(parsed.defaults.duration_ms, 250);
        assert_eq!(parsed.defaults.easing, "ease");
        assert_eq!(parsed.registry.id_prefix, DEFAULT_ID_PREFIX);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = MotionConfig::load_from_file("does/not/exist/rune.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("RUNE_MOTION_ID_PREFIX", "app-kf-");
            std::env::set_var("RUNE_MOTION_DURATION_MS", "400");
            std::env::set_var("RUNE_MOTION_AUTO_PLAY", "false");
        }

        let mut config = MotionConfig::default();
        config.merge_with_env();

        assert_eq!(config.registry.id_prefix, "app-kf-");
        assert_eq!(config.defaults.duration_ms, 400);
        assert!(!config.defaults.auto_play);

        unsafe {
            std::env::remove_var("RUNE_MOTION_ID_PREFIX");
            std::env::remove_var("RUNE_MOTION_DURATION_MS");
            std::env::remove_var("RUNE_MOTION_AUTO_PLAY");
        }
    }
}
