//! Structural outline of a section body, extracted with tree-sitter.
//!
//! The section view needs to know which rows are headings (and at what level) and which rows
//! belong to fenced code blocks. Rows are zero-based line numbers within the body.

use crate::error::{Result, ViewerError};
use crate::formats::Format;
use std::ops::Range;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Heading found in a section body.
pub struct Heading {
    /// Row of the heading line.
    pub row: usize,
    /// Heading depth, 1 for `#` up to 6 for `######`.
    pub level: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Fenced code block found in a section body.
pub struct CodeBlock {
    /// Rows spanned by the block, fences included.
    pub rows: Range<usize>,
    /// Rows holding the code itself.
    pub content: Range<usize>,
    /// Language named in the info string, if any.
    pub language: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Headings and code blocks of one section body, in document order.
pub struct Outline {
    /// Headings at every level.
    pub headings: Vec<Heading>,
    /// Fenced code blocks.
    pub code_blocks: Vec<CodeBlock>,
}

impl Outline {
    #[must_use]
    /// Heading level of `row`, if it is a heading line.
    pub fn heading_level(&self, row: usize) -> Option<usize> {
        self.headings
            .iter()
            .find(|h| h.row == row)
            .map(|h| h.level)
    }

    #[must_use]
    /// Code block covering `row`, if any.
    pub fn code_block_at(&self, row: usize) -> Option<&CodeBlock> {
        self.code_blocks.iter().find(|b| b.rows.contains(&row))
    }
}

/// Rows covered by `node`, treating an end at column 0 as exclusive.
fn row_span(node: Node<'_>) -> Range<usize> {
    let start = node.start_position().row;
    let end = node.end_position();
    let end_row = if end.column == 0 { end.row } else { end.row + 1 };
    start..end_row.max(start + 1)
}

fn marker_level(heading: Node<'_>) -> usize {
    heading
        .child(0)
        .and_then(|marker| {
            marker
                .kind()
                .strip_prefix("atx_h")
                .and_then(|rest| rest.strip_suffix("_marker"))
                .and_then(|digit| digit.parse().ok())
        })
        .unwrap_or(1)
}

fn compile(format: &dyn Format, source: &str) -> Result<Query> {
    Query::new(&format.language(), source).map_err(|e| ViewerError::Tree(e.to_string()))
}

/// Parses `text` and collects its headings and fenced code blocks.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded, a query does not compile, or the parser
/// produces no tree.
pub fn extract(text: &str, format: &dyn Format) -> Result<Outline> {
    let mut parser = Parser::new();
    parser
        .set_language(&format.language())
        .map_err(|e| ViewerError::Tree(e.to_string()))?;
    let tree = parser
        .parse(text, None)
        .ok_or_else(|| ViewerError::Tree("parser returned no tree".to_string()))?;
    let root = tree.root_node();
    let bytes = text.as_bytes();
    let mut outline = Outline::default();

    let heading_query = compile(format, format.heading_query())?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&heading_query, root, bytes);
    while let Some(m) = matches.next() {
        for capture in m.captures {
            outline.headings.push(Heading {
                row: capture.node.start_position().row,
                level: marker_level(capture.node),
            });
        }
    }

    let block_query = compile(format, format.code_block_query())?;
    let block_idx = block_query.capture_index_for_name("block");
    let language_idx = block_query.capture_index_for_name("language");
    let content_idx = block_query.capture_index_for_name("content");

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&block_query, root, bytes);
    while let Some(m) = matches.next() {
        let mut rows = None;
        let mut content = None;
        let mut language = None;
        for capture in m.captures {
            let index = Some(capture.index);
            if index == block_idx {
                rows = Some(row_span(capture.node));
            } else if index == content_idx {
                content = Some(row_span(capture.node));
            } else if index == language_idx {
                language = capture.node.utf8_text(bytes).ok().map(str::to_string);
            }
        }
        if let Some(rows) = rows {
            let content = content.unwrap_or(rows.start + 1..rows.start + 1);
            outline.code_blocks.push(CodeBlock {
                rows,
                content,
                language,
            });
        }
    }

    outline.headings.sort_by_key(|h| h.row);
    outline.code_blocks.sort_by_key(|b| b.rows.start);
    Ok(outline)
}

#[cfg(test)]
#[path = "tests/outline.rs"]
mod tests;
