//! The UI renders the application state into something visible and navigable.
//!
//! The draw function dispatches on the current view. A sidebar holds the search box and the
//! (possibly filtered) table of contents; the content area shows the overview, a section, or
//! search results. A failed load replaces everything with a full-screen error.

use crate::app_state::{AppState, Focus, View};
use crate::styled::{highlighted_spans, mark_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Width of the sidebar in the wide layout.
const SIDEBAR_WIDTH: u16 = 32;

/// Renders the active view based on current application state.
pub fn draw(f: &mut Frame, app: &AppState) {
    if app.current_view == View::Error {
        draw_error(f, app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    if app.sidebar_visible() {
        if app.narrow {
            draw_sidebar(f, app, chunks[0]);
        } else {
            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .split(chunks[0]);
            draw_sidebar(f, app, panes[0]);
            draw_content(f, app, panes[1]);
        }
    } else {
        draw_content(f, app, chunks[0]);
    }

    draw_help(f, app, chunks[1]);
}

fn focused_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

fn selected_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

fn draw_sidebar(f: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let searching = app.focus == Focus::SearchInput;
    let input = if searching {
        format!("{}▏", app.search_input)
    } else {
        app.search_input.clone()
    };
    let search_box =
        Paragraph::new(input).block(focused_block("Search (/)".to_string(), searching));
    f.render_widget(search_box, chunks[0]);

    let visible = app.visible_toc();
    let items: Vec<ListItem> = visible
        .iter()
        .map(|entry| {
            let base = if Some(entry.index) == app.current_section {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(highlighted_spans(&entry.label, base)))
        })
        .collect();

    let title = if visible.len() == app.toc.len() {
        format!("Grammar ({})", app.toc.len())
    } else {
        format!("Grammar ({}/{})", visible.len(), app.toc.len())
    };

    let mut state = ListState::default();
    state.select(
        app.toc_cursor
            .and_then(|c| visible.iter().position(|e| e.index == c)),
    );

    let list = List::new(items)
        .block(focused_block(title, app.focus == Focus::Sidebar))
        .highlight_style(selected_style());
    f.render_stateful_widget(list, chunks[1], &mut state);
}

fn draw_content(f: &mut Frame, app: &AppState, area: Rect) {
    let focused = app.focus == Focus::Content;
    match app.current_view {
        View::Overview => draw_overview(f, app, area, focused),
        View::Section => draw_section(f, app, area, focused),
        View::SearchResults => draw_results(f, app, area, focused),
        View::Error => draw_error(f, app),
    }
}

fn draw_overview(f: &mut Frame, app: &AppState, area: Rect, focused: bool) {
    let sections = app.sections();
    let items: Vec<ListItem> = if sections.is_empty() {
        vec![ListItem::new(Span::styled(
            "No grammar points found in this document.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        sections
            .iter()
            .map(|s| ListItem::new(Line::from(s.title.clone())))
            .collect()
    };

    let mut state = ListState::default();
    if !sections.is_empty() {
        state.select(Some(app.overview_cursor));
    }

    let title = format!("Grammar overview ({})", app.document_name);
    let list = List::new(items)
        .block(focused_block(title, focused))
        .highlight_style(selected_style());
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_section(f: &mut Frame, app: &AppState, area: Rect, focused: bool) {
    let title = match (app.current(), app.current_fragment()) {
        (Some(section), Some(fragment)) => format!("{}  {}", section.title, fragment),
        (Some(section), None) => section.title.clone(),
        _ => String::new(),
    };

    let body = Paragraph::new(app.section_lines.clone())
        .block(focused_block(title, focused))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    f.render_widget(body, area);
}

fn draw_results(f: &mut Frame, app: &AppState, area: Rect, focused: bool) {
    let title = format!("Search results: \"{}\"", app.results_query);

    if app.results.is_empty() {
        let empty = Paragraph::new("No matching grammar points found.")
            .block(focused_block(title, focused));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .results
        .iter()
        .map(|hit| {
            let heading = Line::styled(
                hit.title.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
            let preview = Line::from(highlighted_spans(&hit.preview, Style::default()));
            ListItem::new(vec![heading, preview, Line::raw("")])
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.results_cursor));

    let title = format!("{title} - {} results", app.results.len());
    let list = List::new(items)
        .block(focused_block(title, focused))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_error(f: &mut Frame, app: &AppState) {
    let detail = app.load_error.clone().unwrap_or_default();
    let text = vec![
        Line::styled(
            "Load error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(format!(
            "Could not load the grammar reference. Make sure {} exists next to the viewer.",
            app.document_name
        )),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Error details: "),
            Span::styled(detail, mark_style()),
        ]),
        Line::raw(""),
        Line::styled("q: Quit", Style::default().fg(Color::DarkGray)),
    ];

    let error = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error, f.area());
}

fn draw_help(f: &mut Frame, app: &AppState, area: Rect) {
    let help = if let Some(ref msg) = app.message {
        msg.clone()
    } else {
        match app.focus {
            Focus::SearchInput => {
                "Type to filter | Enter: Full-text search | Esc: Clear | Tab: Leave search"
                    .to_string()
            }
            Focus::Sidebar => {
                "↑/↓: Navigate | Enter: Open | /: Search | Tab: Content | s: Sidebar | [/]: Back/Forward | q: Quit"
                    .to_string()
            }
            Focus::Content => {
                "↑/↓: Scroll/Select | Enter: Open | /: Search | o: Overview | s: Sidebar | [/]: Back/Forward | q: Quit"
                    .to_string()
            }
        }
    };

    let help_widget = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    f.render_widget(help_widget, area);
}
