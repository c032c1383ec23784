//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! We look for a bunpo.toml in the working directory and load settings from it when present.
//! Anything left out falls back to the defaults below, which reproduce the stock viewer: the
//! reference is read from `grammer.md`, live filtering waits 300ms and previews keep 150 chars.

use crate::error::{Result, ViewerError};
use facet::Facet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "bunpo.toml";

#[derive(Facet, Clone, Debug)]
/// Reader preferences loaded from bunpo.toml or falling back to defaults.
pub struct Config {
    #[facet(default = "grammer.md".to_string())]
    /// Relative path or http(s) URL of the reference document.
    pub document: String,
    #[facet(default = 300)]
    /// Quiet window in milliseconds before the live filter runs.
    pub debounce_ms: u64,
    #[facet(default = 150)]
    /// Characters kept from the matching line in a search preview.
    pub preview_width: usize,
    #[facet(default = ".bunpo-storage.json".to_string())]
    /// File backing the local storage (sidebar state).
    pub storage_file: String,
    #[facet(default = 80)]
    /// Terminal width at or below which the sidebar behaves as an overlay.
    pub narrow_width: u16,
    #[facet(default = "base16-ocean.dark".to_string())]
    /// Syntect theme used for fenced code blocks.
    pub theme: String,
    #[facet(default = "info".to_string())]
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
    #[facet(default = String::new())]
    /// Log file for the interactive viewer; empty disables logging there.
    pub log_file: String,
}

impl Config {
    /// Load configuration from bunpo.toml if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from `path`, using defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Self::from_toml(""),
            Err(e) => Err(ViewerError::io(path.display().to_string(), e)),
        }
    }

    /// Parse configuration from TOML text; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| ViewerError::Config(e.to_string()))
    }

    #[must_use]
    /// Live filter quiet window.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    /// Log file path, if one is configured.
    pub fn log_path(&self) -> Option<&Path> {
        (!self.log_file.is_empty()).then(|| Path::new(self.log_file.as_str()))
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
