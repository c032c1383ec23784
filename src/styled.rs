//! Turns a section body into styled terminal lines.
//!
//! Headings, code fences and code come from the tree-sitter outline; prose lines that contain
//! Japanese script get their own style so example sentences stand out from the explanation.

use crate::formats::Format;
use crate::highlight::Highlighter;
use crate::outline::{self, Outline};
use crate::search::Highlighted;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::collections::HashMap;

#[must_use]
/// Whether `text` contains hiragana, katakana or CJK unified ideographs.
pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c,
            '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' | '\u{4E00}'..='\u{9FAF}')
    })
}

fn heading_style(level: usize) -> Style {
    let color = match level {
        1 => Color::Magenta,
        2 => Color::Cyan,
        3 => Color::Green,
        _ => Color::Blue,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn japanese_style() -> Style {
    Style::default().fg(Color::LightYellow)
}

fn fence_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style applied to highlighted search matches.
#[must_use]
pub fn mark_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

#[must_use]
/// Spans for highlighted text, marks styled on top of `base`.
pub fn highlighted_spans(text: &Highlighted, base: Style) -> Vec<Span<'static>> {
    text.fragments
        .iter()
        .map(|f| {
            if f.marked {
                Span::styled(f.text.clone(), base.patch(mark_style()))
            } else {
                Span::styled(f.text.clone(), base)
            }
        })
        .collect()
}

#[must_use]
/// Styles every line of `body` using a precomputed outline.
pub fn style_with_outline(
    body: &str,
    outline: &Outline,
    highlighter: &Highlighter,
) -> Vec<Line<'static>> {
    let lines: Vec<&str> = body.split('\n').collect();

    let mut code_lines: HashMap<usize, Line<'static>> = HashMap::new();
    for block in &outline.code_blocks {
        let end = block.content.end.min(lines.len());
        let start = block.content.start.min(end);
        let highlighted = highlighter.highlight_block(block.language.as_deref(), &lines[start..end]);
        code_lines.extend((start..end).zip(highlighted));
    }

    lines
        .iter()
        .enumerate()
        .map(|(row, text)| {
            if let Some(line) = code_lines.remove(&row) {
                return line;
            }
            if outline.code_block_at(row).is_some() {
                return Line::styled((*text).to_string(), fence_style());
            }
            if let Some(level) = outline.heading_level(row) {
                return Line::styled((*text).to_string(), heading_style(level));
            }
            if contains_japanese(text) {
                return Line::styled((*text).to_string(), japanese_style());
            }
            Line::raw((*text).to_string())
        })
        .collect()
}

#[must_use]
/// Styles `body`, falling back to plain lines when the outline cannot be built.
pub fn style_section(
    body: &str,
    format: &dyn Format,
    highlighter: &Highlighter,
) -> Vec<Line<'static>> {
    let outline = outline::extract(body, format).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not outline section, rendering plain text");
        Outline::default()
    });
    style_with_outline(body, &outline, highlighter)
}

#[cfg(test)]
#[path = "tests/styled.rs"]
mod tests;
