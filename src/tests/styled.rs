use super::{contains_japanese, highlighted_spans, mark_style, style_section, style_with_outline};
use crate::formats::markdown::MarkdownFormat;
use crate::highlight::Highlighter;
use crate::outline::{CodeBlock, Heading, Outline};
use crate::search::highlight;
use ratatui::style::Style;

fn line_text(line: &ratatui::text::Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

#[test]
fn test_detects_japanese_script() {
    assert!(contains_japanese("食べる to eat"));
    assert!(contains_japanese("ひらがな"));
    assert!(contains_japanese("カタカナ"));
    assert!(!contains_japanese("plain ASCII"));
    assert!(!contains_japanese("한국어"));
}

#[test]
fn test_one_line_per_body_line() {
    let body = "# Verbs\n\n食べる\n\n```js\nconst x = 1;\n```\n";
    let lines = style_section(body, &MarkdownFormat, &Highlighter::disabled());

    assert_eq!(lines.len(), body.split('\n').count());
    assert_eq!(line_text(&lines[0]), "# Verbs");
    assert_eq!(line_text(&lines[2]), "食べる");
    assert_eq!(line_text(&lines[5]), "const x = 1;");
}

#[test]
fn test_styles_follow_outline() {
    let body = "# Title\nplain\n日本語\n```\ncode\n```";
    let outline = Outline {
        headings: vec![Heading { row: 0, level: 1 }],
        code_blocks: vec![CodeBlock {
            rows: 3..6,
            content: 4..5,
            language: None,
        }],
    };
    let lines = style_with_outline(body, &outline, &Highlighter::disabled());

    assert_ne!(lines[0].style, Style::default(), "heading is styled");
    assert_eq!(lines[1].style, Style::default());
    assert_ne!(lines[2].style, Style::default(), "japanese prose is styled");
    assert_ne!(lines[3].style, Style::default(), "fence is dimmed");
    assert_eq!(line_text(&lines[4]), "code");
}

#[test]
fn test_code_is_highlighted_when_enabled() {
    let body = "```rust\nfn main() {}\n```";
    let lines = style_section(body, &MarkdownFormat, &Highlighter::new("base16-ocean.dark"));

    assert_eq!(line_text(&lines[1]), "fn main() {}");
    assert!(lines[1].spans.len() > 1, "tokens get separate spans");
}

#[test]
fn test_marks_become_styled_spans() {
    let spans = highlighted_spans(&highlight("Verbs", "ver"), Style::default());

    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].content, "Ver");
    assert_eq!(spans[0].style, mark_style());
    assert_eq!(spans[1].style, Style::default());
}
