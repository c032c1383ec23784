//! Small persistent key/value store standing in for browser local storage.
//!
//! Values are strings, stored as a flat JSON object. The viewer keeps a single entry in it, the
//! collapsed state of the sidebar, but the store itself does not care what is kept.

use crate::error::{Result, ViewerError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key under which the sidebar collapsed state is stored.
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebarCollapsed";

/// On-disk layout: a flat JSON object of string values.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct Entries(BTreeMap<String, String>);

/// String map mirrored to a JSON file on every write.
pub struct LocalStorage {
    path: Option<PathBuf>,
    entries: Entries,
}

impl LocalStorage {
    /// Opens the store at `path`, starting empty if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a JSON string map.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let entries = match fs::read_to_string(path) {
            Ok(contents) if contents.trim().is_empty() => Entries::default(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Entries::default(),
            Err(e) => return Err(ViewerError::io(path.display().to_string(), e)),
        };
        Ok(Self {
            path: Some(path.to_path_buf()),
            entries,
        })
    }

    #[must_use]
    /// Store that lives only in memory, used when the file cannot be opened.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Entries::default(),
        }
    }

    #[must_use]
    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.0.get(key).map(String::as_str)
    }

    /// Stores `value` under `key` and writes the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be serialised or written.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        self.entries.0.insert(key.to_string(), value.into());
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, json).map_err(|e| ViewerError::io(path.display().to_string(), e))
    }

    #[must_use]
    /// Whether the sidebar was left collapsed; only the exact string `"true"` counts.
    pub fn sidebar_collapsed(&self) -> bool {
        self.get(SIDEBAR_COLLAPSED_KEY) == Some("true")
    }

    /// Persists the sidebar collapsed state.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn set_sidebar_collapsed(&mut self, collapsed: bool) -> Result<()> {
        self.set(SIDEBAR_COLLAPSED_KEY, collapsed.to_string())
    }
}

#[cfg(test)]
#[path = "tests/storage.rs"]
mod tests;
