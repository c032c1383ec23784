//! Error types shared by the loader, configuration, storage and rendering layers.
//!
//! Splitting and searching never fail, so nothing here describes malformed documents. What can
//! go wrong is getting the document in the first place, reading the user's settings, and setting
//! up the tree-sitter parser used to style section bodies.

use thiserror::Error;

/// Failures surfaced by the viewer outside of the pure splitter and search core.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Local file access failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was being read or written.
        path: String,
        /// Underlying operating system error.
        #[source]
        source: std::io::Error,
    },

    /// The document server answered with a non-success status.
    #[error("HTTP error! status: {status} ({url})")]
    Status {
        /// Requested document location.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },

    /// The document request could not be completed.
    #[error("request to {url} failed: {source}")]
    Http {
        /// Requested document location.
        url: String,
        /// Transport-level failure reported by the HTTP client.
        #[source]
        source: reqwest::Error,
    },

    /// `bunpo.toml` exists but could not be deserialised.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The local storage file could not be encoded or decoded.
    #[error("local storage error: {0}")]
    Storage(#[from] serde_json::Error),

    /// The tree-sitter grammar or one of its queries could not be loaded.
    #[error("tree-sitter setup failed: {0}")]
    Tree(String),
}

impl ViewerError {
    #[must_use]
    /// Wraps an I/O failure with the path it concerns.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ViewerError>;
