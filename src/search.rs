//! Full-text search, live title filtering and match highlighting.
//!
//! Matching is plain case-insensitive substring containment: no tokenising, stemming or fuzzy
//! scoring. Highlighting goes through an escaped, case-insensitive regex so that queries such as
//! `n(i)` or `a.b*` match literally.

use crate::section::Section;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// Maximum number of characters kept from a matching line in a preview.
pub const PREVIEW_WIDTH: usize = 150;

/// Text appended to every preview.
pub const ELLIPSIS: &str = "...";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Run of text that is either plain or part of a highlighted match.
pub struct Fragment {
    /// Verbatim text of this run.
    pub text: String,
    /// Whether the run matched the query.
    pub marked: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Text split into plain and highlighted runs.
///
/// Renders through `Display` with each highlighted run wrapped in `<mark>...</mark>`; the
/// terminal UI and the HTML writer style the fragments themselves instead.
pub struct Highlighted {
    /// Ordered runs making up the text.
    pub fragments: Vec<Fragment>,
}

impl Highlighted {
    #[must_use]
    /// Text without any highlighting.
    pub fn plain(text: impl Into<String>) -> Self {
        let mut highlighted = Self::default();
        highlighted.push(text, false);
        highlighted
    }

    /// Appends a run, merging it with the previous one when the styling agrees.
    pub fn push(&mut self, text: impl Into<String>, marked: bool) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.fragments.last_mut() {
            Some(last) if last.marked == marked => last.text.push_str(&text),
            _ => self.fragments.push(Fragment { text, marked }),
        }
    }

    #[must_use]
    /// Whether any run is highlighted.
    pub fn has_marks(&self) -> bool {
        self.fragments.iter().any(|f| f.marked)
    }

    #[must_use]
    /// Concatenated text with highlighting dropped.
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

impl fmt::Display for Highlighted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            if fragment.marked {
                write!(f, "<mark>{}</mark>", fragment.text)?;
            } else {
                f.write_str(&fragment.text)?;
            }
        }
        Ok(())
    }
}

#[must_use]
/// Normalises user input into a search term: trimmed and lowercased.
pub fn normalise_query(query: &str) -> String {
    query.trim().to_lowercase()
}

#[must_use]
/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(&query.to_lowercase())
}

/// Literal, case-insensitive pattern for `query`.
fn literal_pattern(query: &str) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .map_err(|e| tracing::warn!(%query, error = %e, "could not build highlight pattern"))
        .ok()
}

#[must_use]
/// Wraps every case-insensitive occurrence of `query` in `text`.
///
/// An empty query leaves the text unhighlighted.
pub fn highlight(text: &str, query: &str) -> Highlighted {
    let Some(pattern) = (!query.is_empty()).then(|| literal_pattern(query)).flatten() else {
        return Highlighted::plain(text);
    };

    let mut highlighted = Highlighted::default();
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        highlighted.push(&text[cursor..found.start()], false);
        highlighted.push(found.as_str(), true);
        cursor = found.end();
    }
    highlighted.push(&text[cursor..], false);
    highlighted
}

#[must_use]
/// Builds the search-result preview for a section body.
///
/// Takes the first line containing `query`, keeps at most `width` characters of it, highlights
/// the query inside what is left and appends an ellipsis. When the match only exists across a
/// line break the preview is the bare ellipsis.
pub fn preview(body: &str, query: &str, width: usize) -> Highlighted {
    let needle = query.to_lowercase();
    let Some(line) = body
        .split('\n')
        .find(|line| line.to_lowercase().contains(&needle))
    else {
        return Highlighted::plain(ELLIPSIS);
    };

    let truncated: String = line.chars().take(width).collect();
    let mut highlighted = highlight(&truncated, query);
    highlighted.push(ELLIPSIS, false);
    highlighted
}

/// Lowercased copies of every title and body, built once per document load.
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

struct IndexEntry {
    title: String,
    body: String,
}

impl SearchIndex {
    #[must_use]
    /// Indexes `sections` in order.
    pub fn new(sections: &[Section]) -> Self {
        let entries = sections
            .iter()
            .map(|s| IndexEntry {
                title: s.title.to_lowercase(),
                body: s.body.to_lowercase(),
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    /// Indices of sections whose title or body contains `query`, in document order.
    ///
    /// The query is trimmed first; an empty query matches nothing.
    pub fn matching(&self, query: &str) -> Vec<usize> {
        let needle = normalise_query(query);
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.title.contains(&needle) || e.body.contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Clone, Debug)]
/// One full-text search result.
pub struct SearchHit {
    /// Position of the matched section in the document.
    pub index: usize,
    /// Title of the matched section.
    pub title: String,
    /// Highlighted excerpt of the first matching line.
    pub preview: Highlighted,
}

#[must_use]
/// Runs a full-text search over `sections` using their prebuilt `index`.
pub fn search(
    sections: &[Section],
    index: &SearchIndex,
    query: &str,
    preview_width: usize,
) -> Vec<SearchHit> {
    let needle = normalise_query(query);
    let hits: Vec<SearchHit> = index
        .matching(&needle)
        .into_iter()
        .filter_map(|i| sections.get(i).map(|s| (i, s)))
        .map(|(i, section)| SearchHit {
            index: i,
            title: section.title.clone(),
            preview: preview(&section.body, &needle, preview_width),
        })
        .collect();
    tracing::debug!(query = %needle, hits = hits.len(), "search");
    hits
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Table-of-contents entry after live filtering.
pub struct TocEntry {
    /// Position of the section in the document.
    pub index: usize,
    /// Title, highlighted where it matched the filter.
    pub label: Highlighted,
    /// Whether the entry is shown; hidden entries are kept so clearing the filter restores them.
    pub visible: bool,
}

#[must_use]
/// Full, unfiltered table of contents.
pub fn table_of_contents(sections: &[Section]) -> Vec<TocEntry> {
    sections
        .iter()
        .enumerate()
        .map(|(index, s)| TocEntry {
            index,
            label: Highlighted::plain(s.title.clone()),
            visible: true,
        })
        .collect()
}

#[must_use]
/// Filters the table of contents by title as the user types.
///
/// Non-matching entries are hidden rather than dropped. An empty query resets to the unfiltered
/// table of contents.
pub fn live_filter(sections: &[Section], query: &str) -> Vec<TocEntry> {
    let needle = normalise_query(query);
    if needle.is_empty() {
        return table_of_contents(sections);
    }

    sections
        .iter()
        .enumerate()
        .map(|(index, s)| {
            if contains_ignore_case(&s.title, &needle) {
                TocEntry {
                    index,
                    label: highlight(&s.title, &needle),
                    visible: true,
                }
            } else {
                TocEntry {
                    index,
                    label: Highlighted::plain(s.title.clone()),
                    visible: false,
                }
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/search.rs"]
mod tests;
