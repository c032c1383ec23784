//! HTML output for sections, search results, the table of contents and load errors.
//!
//! Section bodies go through comrak with GitHub-flavoured extensions, hard line breaks and
//! heading ids. The surrounding pages are small fragments meant to be dropped into a content
//! area; every piece of document text is escaped before it is written out.

use crate::nav;
use crate::search::{Highlighted, SearchHit};
use crate::section::{Document, Section};
use comrak::{markdown_to_html, Options};

fn comrak_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.header_ids = Some(String::new());
    options.render.hardbreaks = true;
    options
}

#[must_use]
/// Escapes text for use in HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[must_use]
/// Highlighted text as escaped HTML with `<mark>` around matches.
pub fn highlighted_html(text: &Highlighted) -> String {
    text.fragments
        .iter()
        .map(|f| {
            let escaped = escape_html(&f.text);
            if f.marked {
                format!("<mark>{escaped}</mark>")
            } else {
                escaped
            }
        })
        .collect()
}

#[must_use]
/// Converts a section body from markdown to HTML.
pub fn render_section(section: &Section) -> String {
    markdown_to_html(&section.body, &comrak_options())
}

/// Link to the section with navigation key `key`.
fn section_link(key: &str, label: &str) -> String {
    format!(
        "<a href=\"{}\">{}</a>",
        escape_html(&nav::fragment_for(key)),
        label
    )
}

#[must_use]
/// Table of contents as a list of fragment links.
pub fn render_toc(document: &Document) -> String {
    let mut html = String::from("<ul class=\"grammar-list\">\n");
    for (i, section) in document.sections().iter().enumerate() {
        let key = document.key(i).unwrap_or(&section.title);
        html.push_str(&format!(
            "  <li>{}</li>\n",
            section_link(key, &escape_html(&section.title))
        ));
    }
    html.push_str("</ul>\n");
    html
}

#[must_use]
/// Search results page for `query`.
pub fn render_search_results(document: &Document, query: &str, hits: &[SearchHit]) -> String {
    let mut html = format!("<h2>Search results: \"{}\"</h2>\n", escape_html(query));

    if hits.is_empty() {
        html.push_str("<p>No matching grammar points found.</p>\n");
        return html;
    }

    html.push_str(&format!("<p>Found {} matching results:</p>\n", hits.len()));
    html.push_str("<div class=\"search-results\">\n");
    for hit in hits {
        let key = document.key(hit.index).unwrap_or(&hit.title);
        html.push_str(&format!(
            "  <div class=\"search-result-item\">\n    <h3>{}</h3>\n    <p>{}</p>\n  </div>\n",
            section_link(key, &escape_html(&hit.title)),
            highlighted_html(&hit.preview)
        ));
    }
    html.push_str("</div>\n");
    html
}

#[must_use]
/// Error page shown when the document cannot be loaded.
pub fn render_error(document_name: &str, detail: &str) -> String {
    format!(
        "<div class=\"error-message\">\n  <h2>Load error</h2>\n  <p>Could not load the grammar \
         reference. Make sure {} exists next to the viewer.</p>\n  <p>Error details: {}</p>\n</div>\n",
        escape_html(document_name),
        escape_html(detail)
    )
}

#[cfg(test)]
#[path = "tests/html.rs"]
mod tests;
