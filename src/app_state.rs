//! The controller bridging the loaded document and what the reader sees.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the reader
//! navigates and searches. Everything the view depends on lives here: the loaded document (or
//! the reason it failed to load), the current section, the table of contents as filtered by the
//! live search, the last full-text results, the sidebar state and the navigation history.
//! Key handling in `main` only ever calls methods on this type.

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::error::ViewerError;
use crate::formats::markdown::MarkdownFormat;
use crate::highlight::Highlighter;
use crate::nav::{self, History};
use crate::search::{self, SearchHit, TocEntry, PREVIEW_WIDTH};
use crate::section::{Document, Section};
use crate::storage::LocalStorage;
use crate::styled;
use ratatui::text::Line;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Determines what the content area shows.
pub enum View {
    /// Landing page listing every grammar point.
    Overview,
    /// Rendered body of the current section.
    Section,
    /// Full-text search results with previews.
    SearchResults,
    /// Full-screen load failure; nothing else is reachable.
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Determines which pane receives key presses.
pub enum Focus {
    /// Table of contents in the sidebar.
    Sidebar,
    /// Overview list, section body or search results.
    Content,
    /// Search box; characters edit the query.
    SearchInput,
}

#[derive(Clone, Copy, Debug)]
/// Tunables the controller needs from the configuration.
pub struct ViewOptions {
    /// Characters kept from the matching line in a search preview.
    pub preview_width: usize,
    /// Quiet window before the live filter runs.
    pub debounce: Duration,
    /// Terminal width at or below which the sidebar is an overlay.
    pub narrow_width: u16,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            preview_width: PREVIEW_WIDTH,
            debounce: crate::debounce::DEFAULT_DELAY,
            narrow_width: 80,
        }
    }
}

impl From<&Config> for ViewOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            preview_width: cfg.preview_width,
            debounce: cfg.debounce(),
            narrow_width: cfg.narrow_width,
        }
    }
}

/// Application state owned by the event loop.
pub struct AppState {
    /// Loaded document; `None` when loading failed.
    pub document: Option<Document>,
    /// Location the document was loaded from, for messages.
    pub document_name: String,
    /// Error detail shown by the error view.
    pub load_error: Option<String>,
    /// Active content view.
    pub current_view: View,
    /// Pane receiving key presses.
    pub focus: Focus,
    /// Section on display, which is also the active table-of-contents entry.
    pub current_section: Option<usize>,
    /// Table of contents, possibly filtered.
    pub toc: Vec<TocEntry>,
    /// Document index of the highlighted table-of-contents entry.
    pub toc_cursor: Option<usize>,
    /// Selected row of the overview list.
    pub overview_cursor: usize,
    /// Results of the last full-text search.
    pub results: Vec<SearchHit>,
    /// Query the current results were produced for.
    pub results_query: String,
    /// Selected row of the results list.
    pub results_cursor: usize,
    /// Text typed into the search box.
    pub search_input: String,
    /// Styled lines of the current section.
    pub section_lines: Vec<Line<'static>>,
    /// Vertical scroll offset of the content area.
    pub scroll: u16,
    /// Persisted wide-layout collapsed state.
    pub sidebar_collapsed: bool,
    /// Whether the narrow-layout overlay is open.
    pub sidebar_open: bool,
    /// Whether the terminal is at or below the narrow breakpoint.
    pub narrow: bool,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Visited navigation keys for back/forward.
    pub history: History,
    options: ViewOptions,
    live_filter: Debouncer<String>,
    storage: LocalStorage,
    highlighter: Highlighter,
}

impl AppState {
    #[must_use]
    /// Initialises state for a successfully loaded document, starting on the overview.
    pub fn new(
        document: Document,
        document_name: impl Into<String>,
        options: ViewOptions,
        storage: LocalStorage,
        highlighter: Highlighter,
    ) -> Self {
        let toc = search::table_of_contents(document.sections());
        let toc_cursor = toc.first().map(|e| e.index);
        let sidebar_collapsed = storage.sidebar_collapsed();

        Self {
            document: Some(document),
            document_name: document_name.into(),
            load_error: None,
            current_view: View::Overview,
            focus: Focus::Sidebar,
            current_section: None,
            toc,
            toc_cursor,
            overview_cursor: 0,
            results: Vec::new(),
            results_query: String::new(),
            results_cursor: 0,
            search_input: String::new(),
            section_lines: Vec::new(),
            scroll: 0,
            sidebar_collapsed,
            sidebar_open: false,
            narrow: false,
            message: None,
            history: History::new(),
            live_filter: Debouncer::new(options.debounce),
            options,
            storage,
            highlighter,
        }
    }

    #[must_use]
    /// Initialises state for a failed load; the viewer only shows the error.
    pub fn failed(
        document_name: impl Into<String>,
        error: &ViewerError,
        options: ViewOptions,
        storage: LocalStorage,
    ) -> Self {
        let mut state = Self::new(
            Document::from_sections(Vec::new()),
            document_name,
            options,
            storage,
            Highlighter::disabled(),
        );
        state.document = None;
        state.load_error = Some(error.to_string());
        state.current_view = View::Error;
        state.focus = Focus::Content;
        state
    }

    #[must_use]
    /// Sections of the loaded document, empty after a failed load.
    pub fn sections(&self) -> &[Section] {
        self.document.as_ref().map_or(&[][..], Document::sections)
    }

    #[must_use]
    /// Section on display.
    pub fn current(&self) -> Option<&Section> {
        self.current_section
            .and_then(|i| self.sections().get(i))
    }

    #[must_use]
    /// Fragment identifier of the section on display, as a browser would show it.
    pub fn current_fragment(&self) -> Option<String> {
        let index = self.current_section?;
        let key = self.document.as_ref()?.key(index)?;
        Some(nav::fragment_for(key))
    }

    // --- Navigation ---

    /// Shows the first section titled `title`.
    ///
    /// Unknown titles are logged and leave the view untouched.
    pub fn show_section(&mut self, title: &str) -> bool {
        let Some(index) = self.document.as_ref().and_then(|d| d.position(title)) else {
            tracing::warn!(%title, "section not found");
            return false;
        };
        self.show_index(index);
        true
    }

    /// Resolves a fragment identifier (or raw key) and shows its section.
    pub fn navigate(&mut self, fragment: &str) -> bool {
        let key = nav::decode_fragment(fragment);
        let Some(index) = self.document.as_ref().and_then(|d| d.resolve(&key)) else {
            tracing::warn!(%key, "section not found");
            return false;
        };
        self.show_index(index);
        true
    }

    /// Shows the section at `index` and records it in the history.
    pub fn show_index(&mut self, index: usize) {
        if self.display(index) {
            if let Some(key) = self.document.as_ref().and_then(|d| d.key(index)) {
                self.history.push(key.to_string());
            }
        }
    }

    fn display(&mut self, index: usize) -> bool {
        let Some(section) = self.document.as_ref().and_then(|d| d.get(index)) else {
            tracing::warn!(index, "section index out of range");
            return false;
        };
        let lines = styled::style_section(&section.body, &MarkdownFormat, &self.highlighter);
        tracing::debug!(title = %section.title, "showing section");
        self.section_lines = lines;
        self.current_section = Some(index);
        self.toc_cursor = Some(index);
        self.current_view = View::Section;
        self.scroll = 0;
        true
    }

    /// Goes back to the previously shown section.
    pub fn back(&mut self) -> bool {
        let Some(key) = self.history.back().map(str::to_string) else {
            return false;
        };
        self.display_key(&key)
    }

    /// Goes forward to the section left by `back`.
    pub fn forward(&mut self) -> bool {
        let Some(key) = self.history.forward().map(str::to_string) else {
            return false;
        };
        self.display_key(&key)
    }

    fn display_key(&mut self, key: &str) -> bool {
        match self.document.as_ref().and_then(|d| d.resolve(key)) {
            Some(index) => self.display(index),
            None => {
                tracing::warn!(%key, "section not found");
                false
            }
        }
    }

    /// Returns to the overview page.
    pub fn show_overview(&mut self) {
        if self.current_view != View::Error {
            self.current_view = View::Overview;
            self.scroll = 0;
        }
    }

    // --- Search ---

    /// Runs a full-text search for the search box contents.
    ///
    /// An empty query is ignored and leaves the view as it was.
    pub fn submit_search(&mut self) -> bool {
        let query = search::normalise_query(&self.search_input);
        if query.is_empty() {
            return false;
        }
        let Some(document) = &self.document else {
            return false;
        };
        self.results = document.search(&query, self.options.preview_width);
        self.results_query = query;
        self.results_cursor = 0;
        self.current_view = View::SearchResults;
        self.scroll = 0;
        true
    }

    /// Records an edit of the search box, deferring the live filter.
    pub fn on_search_input(&mut self, now: Instant) {
        self.live_filter.schedule(now, self.search_input.clone());
    }

    /// Runs the live filter if its quiet window has elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.live_filter.fire(now) {
            Some(query) => {
                self.apply_live_filter(&query);
                true
            }
            None => false,
        }
    }

    #[must_use]
    /// How long the event loop may sleep before the live filter is due.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.live_filter.time_until_due(now)
    }

    /// Filters the table of contents by title; an empty query restores it.
    pub fn apply_live_filter(&mut self, query: &str) {
        self.toc = search::live_filter(self.sections(), query);
        let cursor_visible = self
            .toc_cursor
            .and_then(|c| self.toc.get(c))
            .is_some_and(|e| e.visible);
        if !cursor_visible {
            self.toc_cursor = self.toc.iter().find(|e| e.visible).map(|e| e.index);
        }
    }

    /// Empties the search box and restores the full table of contents.
    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.live_filter.cancel();
        self.apply_live_filter("");
    }

    // --- Table of contents ---

    #[must_use]
    /// Entries currently shown in the sidebar.
    pub fn visible_toc(&self) -> Vec<&TocEntry> {
        self.toc.iter().filter(|e| e.visible).collect()
    }

    /// Moves the sidebar cursor to the next visible entry.
    pub fn toc_next(&mut self) {
        let mut visible = self.toc.iter().filter(|e| e.visible).map(|e| e.index);
        let next = match self.toc_cursor {
            Some(c) => visible.find(|&i| i > c),
            None => visible.next(),
        };
        if next.is_some() {
            self.toc_cursor = next;
        }
    }

    /// Moves the sidebar cursor to the previous visible entry.
    pub fn toc_prev(&mut self) {
        let mut visible = self.toc.iter().filter(|e| e.visible).map(|e| e.index).rev();
        let prev = match self.toc_cursor {
            Some(c) => visible.find(|&i| i < c),
            None => visible.next(),
        };
        if prev.is_some() {
            self.toc_cursor = prev;
        }
    }

    /// Opens the entry under the sidebar cursor.
    pub fn select_toc_entry(&mut self) {
        if let Some(index) = self.toc_cursor {
            self.open_from_list(index);
        }
    }

    /// Opens the entry under the overview cursor.
    pub fn select_overview_entry(&mut self) {
        if self.overview_cursor < self.sections().len() {
            self.open_from_list(self.overview_cursor);
        }
    }

    /// Opens the search result under the results cursor.
    pub fn select_result(&mut self) {
        if let Some(index) = self.results.get(self.results_cursor).map(|h| h.index) {
            self.show_index(index);
        }
    }

    fn open_from_list(&mut self, index: usize) {
        self.show_index(index);
        if self.narrow {
            self.sidebar_open = false;
        } else if self.sidebar_collapsed {
            self.sidebar_collapsed = false;
            self.persist_sidebar();
        }
    }

    /// Moves the content cursor or scroll position down.
    pub fn content_down(&mut self) {
        match self.current_view {
            View::Overview => {
                if self.overview_cursor + 1 < self.sections().len() {
                    self.overview_cursor += 1;
                }
            }
            View::SearchResults => {
                if self.results_cursor + 1 < self.results.len() {
                    self.results_cursor += 1;
                }
            }
            View::Section => {
                let max = u16::try_from(self.section_lines.len()).unwrap_or(u16::MAX);
                if self.scroll + 1 < max {
                    self.scroll += 1;
                }
            }
            View::Error => {}
        }
    }

    /// Moves the content cursor or scroll position up.
    pub fn content_up(&mut self) {
        match self.current_view {
            View::Overview => self.overview_cursor = self.overview_cursor.saturating_sub(1),
            View::SearchResults => self.results_cursor = self.results_cursor.saturating_sub(1),
            View::Section => self.scroll = self.scroll.saturating_sub(1),
            View::Error => {}
        }
    }

    /// Activates whatever is selected in the content area.
    pub fn content_select(&mut self) {
        match self.current_view {
            View::Overview => self.select_overview_entry(),
            View::SearchResults => self.select_result(),
            View::Section | View::Error => {}
        }
    }

    // --- Sidebar ---

    #[must_use]
    /// Whether the sidebar takes up screen space right now.
    pub fn sidebar_visible(&self) -> bool {
        if self.narrow {
            self.sidebar_open
        } else {
            !self.sidebar_collapsed
        }
    }

    /// Toggles the sidebar: an overlay when narrow, a persisted collapse when wide.
    pub fn toggle_sidebar(&mut self) {
        if self.narrow {
            self.sidebar_open = !self.sidebar_open;
        } else {
            self.sidebar_collapsed = !self.sidebar_collapsed;
            self.persist_sidebar();
        }
        if !self.sidebar_visible() && self.focus == Focus::Sidebar {
            self.focus = Focus::Content;
        }
    }

    /// Adapts the sidebar to a new terminal width.
    ///
    /// Becoming wide closes the overlay and restores the saved collapsed state.
    pub fn resize(&mut self, width: u16) {
        let narrow = width <= self.options.narrow_width;
        if narrow == self.narrow {
            return;
        }
        self.narrow = narrow;
        self.sidebar_open = false;
        if !narrow {
            self.sidebar_collapsed = self.storage.sidebar_collapsed();
        }
        if !self.sidebar_visible() && self.focus == Focus::Sidebar {
            self.focus = Focus::Content;
        }
    }

    fn persist_sidebar(&mut self) {
        if let Err(e) = self.storage.set_sidebar_collapsed(self.sidebar_collapsed) {
            tracing::warn!(error = %e, "could not persist sidebar state");
            self.message = Some(format!("Could not save sidebar state: {e}"));
        }
    }

    /// Cycles focus between sidebar (when visible) and content.
    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Content,
            Focus::Content | Focus::SearchInput if self.sidebar_visible() => Focus::Sidebar,
            Focus::Content | Focus::SearchInput => Focus::Content,
        };
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
