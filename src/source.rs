//! Fetching the reference document.
//!
//! The document is named by a fixed relative path (`grammer.md` unless configured otherwise) or
//! by an http(s) URL. Either way the load succeeds with the full text or fails with a
//! `ViewerError` carrying the status or transport detail; there is no retry.

use crate::error::{Result, ViewerError};
use crate::section::Document;
use std::fs;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where the reference document comes from.
pub enum Source {
    /// File on the local filesystem, relative to the working directory unless absolute.
    File(String),
    /// Document served over HTTP(S).
    Url(String),
}

impl Source {
    #[must_use]
    /// Classifies a location string by its scheme.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(location.to_string())
        }
    }

    #[must_use]
    /// Location as given by the user.
    pub fn location(&self) -> &str {
        match self {
            Self::File(path) | Self::Url(path) => path,
        }
    }

    /// Retrieves the raw document text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the request fails, or the server answers
    /// with a non-success status.
    pub fn fetch(&self) -> Result<String> {
        tracing::info!(location = %self.location(), "loading document");
        match self {
            Self::File(path) => fs::read_to_string(path).map_err(|e| ViewerError::io(path, e)),
            Self::Url(url) => fetch_url(url),
        }
    }

    /// Retrieves and splits the document.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching fails; splitting itself never does.
    pub fn load(&self) -> Result<Document> {
        let text = self.fetch()?;
        let document = Document::parse(&text);
        tracing::info!(sections = document.len(), "document loaded");
        Ok(document)
    }
}

fn fetch_url(url: &str) -> Result<String> {
    let http_error = |source| ViewerError::Http {
        url: url.to_string(),
        source,
    };
    let response = reqwest::blocking::get(url).map_err(http_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ViewerError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().map_err(http_error)
}

#[cfg(test)]
#[path = "tests/source.rs"]
mod tests;
