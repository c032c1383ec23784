//! Fragment identifiers and back/forward history for section navigation.
//!
//! Sections are addressed by `#` followed by their percent-encoded key, using the same reserved
//! set as `encodeURIComponent`, so links produced by the HTML writer and deep links typed on the
//! command line resolve the same way.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[must_use]
/// Percent-encodes a section key for use after `#`.
pub fn encode_component(key: &str) -> String {
    utf8_percent_encode(key, COMPONENT).to_string()
}

#[must_use]
/// Fragment identifier (with leading `#`) for a section key.
pub fn fragment_for(key: &str) -> String {
    format!("#{}", encode_component(key))
}

#[must_use]
/// Decodes a fragment identifier back into a section key.
///
/// Accepts input with or without the leading `#`; invalid UTF-8 escapes are replaced rather than
/// rejected.
pub fn decode_fragment(fragment: &str) -> String {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

#[derive(Default)]
/// Linear browsing history with a cursor, like a browser's back/forward stack.
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl History {
    #[must_use]
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit, discarding any forward entries.
    ///
    /// Revisiting the current entry is a no-op.
    pub fn push(&mut self, key: impl Into<String>) {
        let key = key.into();
        if self.current() == Some(key.as_str()) {
            return;
        }
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(key);
        self.cursor = Some(self.entries.len() - 1);
    }

    #[must_use]
    /// Entry under the cursor.
    pub fn current(&self) -> Option<&str> {
        self.cursor
            .and_then(|c| self.entries.get(c))
            .map(String::as_str)
    }

    /// Steps back, returning the entry now current.
    pub fn back(&mut self) -> Option<&str> {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                self.current()
            }
            _ => None,
        }
    }

    /// Steps forward, returning the entry now current.
    pub fn forward(&mut self) -> Option<&str> {
        match self.cursor {
            Some(c) if c + 1 < self.entries.len() => {
                self.cursor = Some(c + 1);
                self.current()
            }
            _ => None,
        }
    }

    #[must_use]
    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    /// Whether nothing has been visited yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/nav.rs"]
mod tests;
