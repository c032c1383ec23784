//! Section representation and the splitter that produces it.
//!
//! A section is a contiguous run of the reference document introduced by a top-level heading
//! (`# Title`). Deeper headings (`## ...`) stay embedded in the body of the section that contains
//! them. Splitting is total: any input, including the empty string, yields a (possibly empty)
//! ordered list of sections.

use crate::search::{self, SearchHit, SearchIndex};
use std::collections::{HashMap, HashSet};

const HEADING_MARKER: &str = "# ";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Titled unit of the reference document, delimited by top-level headings.
pub struct Section {
    /// Heading text without the `# ` marker or surrounding whitespace.
    pub title: String,
    /// Original text of the section, heading line included.
    pub body: String,
}

impl Section {
    #[must_use]
    /// Builds a section from a fragment that starts with its heading line.
    pub fn from_fragment(fragment: &str) -> Self {
        let heading = fragment.split('\n').next().unwrap_or_default();
        let title = heading
            .strip_prefix(HEADING_MARKER)
            .unwrap_or(heading)
            .trim()
            .to_string();
        Self {
            title,
            body: fragment.to_string(),
        }
    }
}

#[must_use]
/// Partitions raw document text into sections at every top-level heading.
///
/// Content before the first heading is dropped, as are whitespace-only fragments. Every other
/// byte ends up in exactly one section body, in source order.
pub fn split_sections(text: &str) -> Vec<Section> {
    let starts: Vec<usize> = line_starts(text)
        .filter(|&offset| text[offset..].starts_with(HEADING_MARKER))
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .filter(|fragment| !fragment.trim().is_empty())
        .map(Section::from_fragment)
        .collect()
}

/// Byte offsets at which a line begins.
fn line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    std::iter::once(0).chain(text.match_indices('\n').map(|(i, _)| i + 1))
}

/// One loaded version of the reference document.
///
/// Built once per load and never mutated; reloading builds a new `Document`. Besides the
/// sections it keeps the lowercase search index and a unique navigation key per section so that
/// duplicate titles stay addressable.
pub struct Document {
    sections: Vec<Section>,
    keys: Vec<String>,
    key_lookup: HashMap<String, usize>,
    index: SearchIndex,
}

impl Document {
    #[must_use]
    /// Splits `text` and prepares lookup and search structures for it.
    pub fn parse(text: &str) -> Self {
        Self::from_sections(split_sections(text))
    }

    #[must_use]
    /// Wraps an already split section list.
    pub fn from_sections(sections: Vec<Section>) -> Self {
        let titles: HashSet<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        let mut issued: HashSet<String> = HashSet::with_capacity(sections.len());
        let mut keys = Vec::with_capacity(sections.len());

        for section in &sections {
            let title = section.title.as_str();
            let key = if issued.contains(title) {
                tracing::warn!(%title, "duplicate section title");
                // A suffixed key must not shadow another section's own title.
                (2..)
                    .map(|n| format!("{title}~{n}"))
                    .find(|candidate| {
                        !titles.contains(candidate.as_str()) && !issued.contains(candidate)
                    })
                    .unwrap_or_default()
            } else {
                title.to_string()
            };
            issued.insert(key.clone());
            keys.push(key);
        }

        let key_lookup = keys
            .iter()
            .enumerate()
            .map(|(i, key)| (key.clone(), i))
            .collect();
        let index = SearchIndex::new(&sections);

        tracing::debug!(sections = sections.len(), "document parsed");

        Self {
            sections,
            keys,
            key_lookup,
            index,
        }
    }

    #[must_use]
    /// All sections in table-of-contents order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    /// Number of sections in the document.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    /// Whether the document has no top-level headings at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    /// Section at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    #[must_use]
    /// First section whose title is exactly `title`.
    pub fn find(&self, title: &str) -> Option<&Section> {
        self.position(title).map(|i| &self.sections[i])
    }

    #[must_use]
    /// Index of the first section whose title is exactly `title`.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.title == title)
    }

    #[must_use]
    /// Unique navigation key of the section at `index`.
    pub fn key(&self, index: usize) -> Option<&str> {
        self.keys.get(index).map(String::as_str)
    }

    #[must_use]
    /// Resolves a navigation key (or a plain title) to a section index.
    pub fn resolve(&self, key: &str) -> Option<usize> {
        self.key_lookup
            .get(key)
            .copied()
            .or_else(|| self.position(key))
    }

    #[must_use]
    /// Full-text search with previews truncated to `preview_width` characters.
    pub fn search(&self, query: &str, preview_width: usize) -> Vec<SearchHit> {
        search::search(&self.sections, &self.index, query, preview_width)
    }
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
