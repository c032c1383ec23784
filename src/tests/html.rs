use super::{escape_html, render_error, render_search_results, render_section, render_toc};
use crate::section::Document;

const SAMPLE: &str = "# Intro\nHello\nworld\n# Verbs & <tags>\nEat, drink.\n";

#[test]
fn test_section_renders_with_line_breaks_and_heading_id() {
    let doc = Document::parse(SAMPLE);
    let html = render_section(doc.get(0).unwrap());

    assert!(html.contains("<h1"));
    assert!(html.contains("id=\"intro\""));
    assert!(html.contains("Hello<br />"));
}

#[test]
fn test_gfm_tables_render() {
    let doc = Document::parse("# Table\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
    let html = render_section(doc.get(0).unwrap());

    assert!(html.contains("<table>"));
}

#[test]
fn test_search_results_page() {
    let doc = Document::parse(SAMPLE);
    let hits = doc.search("eat", 150);
    let html = render_search_results(&doc, "eat", &hits);

    assert!(html.contains("<h2>Search results: \"eat\"</h2>"));
    assert!(html.contains("Found 1 matching results"));
    assert!(html.contains("<mark>Eat</mark>, drink...."));
    assert!(html.contains("href=\"#Verbs%20%26%20%3Ctags%3E\""));
    assert!(html.contains(">Verbs &amp; &lt;tags&gt;</a>"));
}

#[test]
fn test_search_results_page_without_hits() {
    let doc = Document::parse(SAMPLE);
    let html = render_search_results(&doc, "zzz", &[]);

    assert!(html.contains("No matching grammar points found."));
    assert!(!html.contains("search-results"));
}

#[test]
fn test_preview_text_is_escaped_around_marks() {
    let doc = Document::parse("# Forms\nuse <b>n(i)</b> here\n");
    let hits = doc.search("n(i)", 150);
    let html = render_search_results(&doc, "n(i)", &hits);

    assert!(html.contains("use &lt;b&gt;<mark>n(i)</mark>&lt;/b&gt; here..."));
}

#[test]
fn test_toc_links_every_section() {
    let doc = Document::parse("# A\n# B\n# A\n");
    let html = render_toc(&doc);

    assert!(html.contains("<a href=\"#A\">A</a>"));
    assert!(html.contains("<a href=\"#B\">B</a>"));
    assert!(html.contains("<a href=\"#A~2\">A</a>"));
}

#[test]
fn test_error_page_names_document_and_detail() {
    let html = render_error("grammer.md", "HTTP error! status: 404");

    assert!(html.contains("class=\"error-message\""));
    assert!(html.contains("grammer.md"));
    assert!(html.contains("HTTP error! status: 404"));
}

#[test]
fn test_escape_html() {
    assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
}
