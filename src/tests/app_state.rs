use super::{AppState, Focus, View, ViewOptions};
use crate::error::ViewerError;
use crate::highlight::Highlighter;
use crate::section::Document;
use crate::storage::LocalStorage;
use std::time::{Duration, Instant};
use tempfile::{tempdir, TempDir};

const SAMPLE: &str = "# Intro\nHello\n# Verbs\nEat, drink.\n# Adverbs\nQuickly.\n";

fn app_with_storage(storage: LocalStorage) -> AppState {
    AppState::new(
        Document::parse(SAMPLE),
        "grammer.md",
        ViewOptions::default(),
        storage,
        Highlighter::disabled(),
    )
}

fn app() -> AppState {
    app_with_storage(LocalStorage::in_memory())
}

fn persisted_app() -> (TempDir, AppState) {
    let dir = tempdir().unwrap();
    let storage = LocalStorage::open(dir.path().join("storage.json")).unwrap();
    (dir, app_with_storage(storage))
}

fn visible_titles(app: &AppState) -> Vec<String> {
    app.visible_toc()
        .iter()
        .map(|e| e.label.text())
        .collect()
}

#[test]
fn test_starts_on_overview_with_full_toc() {
    let app = app();

    assert_eq!(app.current_view, View::Overview);
    assert_eq!(app.current_section, None);
    assert_eq!(visible_titles(&app), vec!["Intro", "Verbs", "Adverbs"]);
    assert_eq!(app.toc_cursor, Some(0));
}

#[test]
fn test_show_section_renders_and_records_fragment() {
    let mut app = app();

    assert!(app.show_section("Verbs"));

    assert_eq!(app.current_view, View::Section);
    assert_eq!(app.current().map(|s| s.title.as_str()), Some("Verbs"));
    assert_eq!(app.current_fragment().as_deref(), Some("#Verbs"));
    assert_eq!(app.toc_cursor, Some(1), "active entry follows the section");
    assert_eq!(app.section_lines.len(), 3);
}

#[test]
fn test_unknown_section_changes_nothing() {
    let mut app = app();
    app.show_section("Intro");

    assert!(!app.show_section("Particles"));
    assert!(!app.navigate("#Particles"));
    assert_eq!(app.current().map(|s| s.title.as_str()), Some("Intro"));
    assert_eq!(app.history.len(), 1);
}

#[test]
fn test_navigate_decodes_fragments() {
    let mut app = AppState::new(
        Document::parse("# 動詞\nverbs\n# て-form (past)\nx\n"),
        "grammer.md",
        ViewOptions::default(),
        LocalStorage::in_memory(),
        Highlighter::disabled(),
    );

    assert!(app.navigate("#%E5%8B%95%E8%A9%9E"));
    assert_eq!(app.current_section, Some(0));
    assert!(app.navigate("#%E3%81%A6-form%20(past)"));
    assert_eq!(app.current_section, Some(1));
    assert!(app.navigate("動詞"), "raw titles resolve too");
    assert_eq!(app.current_section, Some(0));
}

#[test]
fn test_back_and_forward() {
    let mut app = app();
    app.show_section("Intro");
    app.show_section("Verbs");
    app.show_section("Adverbs");

    assert!(app.back());
    assert_eq!(app.current_section, Some(1));
    assert!(app.back());
    assert_eq!(app.current_section, Some(0));
    assert!(!app.back());
    assert!(app.forward());
    assert_eq!(app.current_section, Some(1));
}

#[test]
fn test_submit_search_shows_results() {
    let mut app = app();
    app.search_input = "  EAT ".to_string();

    assert!(app.submit_search());

    assert_eq!(app.current_view, View::SearchResults);
    assert_eq!(app.results_query, "eat");
    assert_eq!(app.results.len(), 1);
    assert_eq!(app.results[0].preview.to_string(), "<mark>Eat</mark>, drink....");

    app.select_result();
    assert_eq!(app.current().map(|s| s.title.as_str()), Some("Verbs"));
}

#[test]
fn test_empty_search_is_ignored() {
    let mut app = app();
    app.show_section("Intro");
    app.search_input = "   ".to_string();

    assert!(!app.submit_search());
    assert_eq!(app.current_view, View::Section);
}

#[test]
fn test_live_filter_waits_for_quiet_window() {
    let mut app = app();
    let start = Instant::now();

    for (ms, typed) in [(0, "v"), (120, "ve"), (240, "ver")] {
        app.search_input = typed.to_string();
        app.on_search_input(start + Duration::from_millis(ms));
        assert!(!app.tick(start + Duration::from_millis(ms)));
    }
    assert_eq!(visible_titles(&app).len(), 3, "nothing filtered yet");

    assert!(app.tick(start + Duration::from_millis(540)));
    assert!(!app.tick(start + Duration::from_millis(900)), "runs exactly once");

    assert_eq!(visible_titles(&app), vec!["Verbs", "Adverbs"]);
    assert_eq!(app.toc[1].label.to_string(), "<mark>Ver</mark>bs");
    assert_eq!(app.toc[2].label.to_string(), "Ad<mark>ver</mark>bs");
    assert_eq!(app.toc_cursor, Some(1), "cursor moves off the hidden entry");
}

#[test]
fn test_clearing_search_restores_toc() {
    let mut app = app();
    app.apply_live_filter("intro");
    assert_eq!(visible_titles(&app), vec!["Intro"]);

    app.search_input = "intro".to_string();
    app.clear_search();

    assert!(app.search_input.is_empty());
    assert_eq!(visible_titles(&app), vec!["Intro", "Verbs", "Adverbs"]);
}

#[test]
fn test_toc_cursor_skips_hidden_entries() {
    let mut app = app();
    app.apply_live_filter("verbs");

    assert_eq!(app.toc_cursor, Some(1));
    app.toc_next();
    assert_eq!(app.toc_cursor, Some(2));
    app.toc_next();
    assert_eq!(app.toc_cursor, Some(2));
    app.toc_prev();
    assert_eq!(app.toc_cursor, Some(1));
    app.toc_prev();
    assert_eq!(app.toc_cursor, Some(1), "Intro is hidden");
}

#[test]
fn test_wide_toggle_persists_collapsed_state() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let mut app = app_with_storage(LocalStorage::open(&path).unwrap());
    app.resize(120);
    assert!(app.sidebar_visible());

    app.toggle_sidebar();
    assert!(!app.sidebar_visible());
    assert_eq!(app.focus, Focus::Content);

    let reopened = app_with_storage(LocalStorage::open(&path).unwrap());
    assert!(reopened.sidebar_collapsed);
}

#[test]
fn test_selecting_entry_expands_collapsed_sidebar() {
    let (_dir, mut app) = persisted_app();
    app.resize(120);
    app.toggle_sidebar();
    assert!(app.sidebar_collapsed);

    app.overview_cursor = 2;
    app.select_overview_entry();

    assert_eq!(app.current_section, Some(2));
    assert!(!app.sidebar_collapsed);
    assert!(app.sidebar_visible());
}

#[test]
fn test_narrow_overlay_is_transient() {
    let (_dir, mut app) = persisted_app();
    app.resize(60);
    assert!(app.narrow);
    assert!(!app.sidebar_visible());

    app.toggle_sidebar();
    assert!(app.sidebar_visible());
    assert!(!app.sidebar_collapsed, "overlay does not touch the saved state");

    app.select_toc_entry();
    assert!(!app.sidebar_visible(), "overlay closes after selection");
}

#[test]
fn test_resizing_to_wide_restores_saved_state() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("storage.json");
    LocalStorage::open(&path)
        .unwrap()
        .set_sidebar_collapsed(true)
        .unwrap();

    let mut app = app_with_storage(LocalStorage::open(&path).unwrap());
    app.resize(60);
    app.toggle_sidebar();
    assert!(app.sidebar_visible());

    app.resize(120);
    assert!(!app.sidebar_open);
    assert!(app.sidebar_collapsed);
    assert!(!app.sidebar_visible());
}

#[test]
fn test_failed_load_shows_error_only() {
    let err = ViewerError::Status {
        url: "https://example.org/grammer.md".to_string(),
        status: 404,
    };
    let mut app = AppState::failed(
        "grammer.md",
        &err,
        ViewOptions::default(),
        LocalStorage::in_memory(),
    );

    assert_eq!(app.current_view, View::Error);
    assert!(app.sections().is_empty());
    assert!(app.load_error.as_deref().unwrap().contains("status: 404"));

    app.search_input = "eat".to_string();
    assert!(!app.submit_search());
    assert!(!app.show_section("Verbs"));
    app.show_overview();
    assert_eq!(app.current_view, View::Error);
}

#[test]
fn test_empty_document_has_empty_toc() {
    let mut app = AppState::new(
        Document::parse("no headings here"),
        "grammer.md",
        ViewOptions::default(),
        LocalStorage::in_memory(),
        Highlighter::disabled(),
    );

    assert!(app.visible_toc().is_empty());
    assert_eq!(app.toc_cursor, None);
    app.toc_next();
    app.select_toc_entry();
    app.select_overview_entry();
    assert_eq!(app.current_view, View::Overview);
}

#[test]
fn test_content_scrolling_is_bounded() {
    let mut app = app();
    app.show_section("Intro");

    app.content_up();
    assert_eq!(app.scroll, 0);
    for _ in 0..10 {
        app.content_down();
    }
    assert_eq!(usize::from(app.scroll), app.section_lines.len() - 1);
}
