//! Syntax highlighting for fenced code blocks using syntect.
//!
//! The syntax and theme sets are loaded lazily once per process. Unknown languages fall back to
//! plain text and an unknown theme name falls back to the default theme, so highlighting never
//! stops a section from being shown.

use once_cell::sync::Lazy;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Theme used when the configured one does not exist.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

static SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEMES: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// Highlights code lines into styled terminal lines.
pub struct Highlighter {
    theme: Option<Theme>,
}

impl Highlighter {
    #[must_use]
    /// Highlighter using the named syntect theme.
    pub fn new(theme_name: &str) -> Self {
        let theme = THEMES.themes.get(theme_name).cloned().or_else(|| {
            tracing::warn!(theme = %theme_name, fallback = DEFAULT_THEME, "unknown theme");
            THEMES.themes.get(DEFAULT_THEME).cloned()
        });
        Self { theme }
    }

    #[must_use]
    /// Highlighter that leaves code unstyled.
    pub fn disabled() -> Self {
        Self { theme: None }
    }

    fn syntax_for(language: Option<&str>) -> &'static SyntaxReference {
        language
            .and_then(|token| SYNTAXES.find_syntax_by_token(token))
            .unwrap_or_else(|| SYNTAXES.find_syntax_plain_text())
    }

    #[must_use]
    /// Highlights `lines` as one block of `language` code.
    pub fn highlight_block(&self, language: Option<&str>, lines: &[&str]) -> Vec<Line<'static>> {
        let Some(theme) = &self.theme else {
            return lines.iter().map(|l| Line::raw((*l).to_string())).collect();
        };

        let mut highlighter = HighlightLines::new(Self::syntax_for(language), theme);
        lines
            .iter()
            .map(|line| {
                let with_newline = format!("{line}\n");
                match highlighter.highlight_line(&with_newline, &SYNTAXES) {
                    Ok(regions) => Line::from(
                        regions
                            .into_iter()
                            .filter_map(|(style, text)| {
                                let text = text.trim_end_matches(|c| c == '\n' || c == '\r');
                                (!text.is_empty())
                                    .then(|| Span::styled(text.to_string(), convert(style)))
                            })
                            .collect::<Vec<_>>(),
                    ),
                    Err(e) => {
                        tracing::debug!(error = %e, "highlighting failed, showing raw line");
                        Line::raw((*line).to_string())
                    }
                }
            })
            .collect()
    }
}

fn convert(style: syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut converted = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));
    if style.font_style.contains(FontStyle::BOLD) {
        converted = converted.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        converted = converted.add_modifier(Modifier::ITALIC);
    }
    converted
}
