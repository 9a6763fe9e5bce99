//! Configuration file support.
//!
//! Read from `$XDG_CONFIG_HOME/safecalc/config.toml` (or the platform
//! equivalent). A missing file means defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::calculator::EvalOptions;

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Evaluator limits.
    pub limits: EvalOptions,
    /// Result display.
    pub display: DisplayConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Group the integer part of results with thousand separators.
    pub group_thousands: bool,
}

impl Config {
    /// Default location of the configuration file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("safecalc").join("config.toml"))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid configuration")
    }

    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults. Any other failure is an error.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text)
                .with_context(|| format!("Failed to parse {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    /// Load configuration from the default location.
    ///
    /// Falls back to defaults, with a warning, if the file can't be used.
    pub fn load_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };

        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("{:#}; using default configuration", e);
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.limits.max_length, 1000);
        assert_eq!(config.limits.max_depth, 100);
        assert!(!config.display.group_thousands);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_toml(
            r#"
            [limits]
            max_depth = 8

            [display]
            group_thousands = true
            "#,
        )
        .unwrap();
        assert_eq!(config.limits.max_depth, 8);
        assert_eq!(config.limits.max_length, 1000);
        assert!(config.display.group_thousands);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(Config::from_toml("[limits]\nmax_width = 3").is_err());
        assert!(Config::from_toml("[theme]\ncolor = \"blue\"").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("safecalc-missing-dir/config.toml");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("safecalc-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[limits]\nmax_length = 42\n").unwrap();
        let config = Config::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.unwrap().limits.max_length, 42);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let path = std::env::temp_dir().join(format!("safecalc-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "limits = 3").unwrap();
        let err = Config::load(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }
}
