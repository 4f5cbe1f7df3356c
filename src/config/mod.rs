//! Configuration system for jsonpick.
//!
//! This module provides the configuration structure for the `jsonpick` command
//! with sensible defaults and support for serialization/deserialization via
//! serde. Configuration is loaded from a TOML file and overridden by
//! command-line flags.
//!
//! # Example
//!
//! ```
//! use jsonpick::config::Config;
//!
//! let config = Config::default();
//! assert!(config.pretty);
//! assert_eq!(config.indent_size, 2);
//!
//! let custom = Config {
//!     raw_strings: true,
//!     ..Config::default()
//! };
//! assert!(custom.raw_strings);
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output settings for the `jsonpick` command.
///
/// * `pretty` - Pretty-print JSON output (default: true)
/// * `indent_size` - Spaces per indentation level when pretty-printing (default: 2)
/// * `raw_strings` - Print string results without quotes (default: false)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Number of spaces per indentation level
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    /// Print string results without surrounding quotes
    #[serde(default)]
    pub raw_strings: bool,
}

fn default_pretty() -> bool {
    true
}

fn default_indent_size() -> usize {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            indent_size: default_indent_size(),
            raw_strings: false,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/jsonpick/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("jsonpick");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(path),
            None => Self::default(),
        }
    }

    /// Loads configuration from `path`, falling back to defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("ignoring invalid config {}: {}", path.display(), err);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(config_path)
    }

    /// Saves configuration to `path`, creating parent directories as needed.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config {}", path.display()))?;

        Ok(())
    }
}
