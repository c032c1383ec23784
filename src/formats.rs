//! Format trait and implementations for reference document syntaxes.
//!
//! A format supplies the tree-sitter grammar and the queries that pick out the structure the
//! section view styles: headings at every level and fenced code blocks with their language tag.
//! Section boundaries themselves are found by the plain-text splitter, not by these queries.

pub mod markdown;

/// Tree-sitter grammar plus structural queries for one document syntax.
pub trait Format {
    /// Grammar used to parse a section body.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing each heading as `@heading`.
    fn heading_query(&self) -> &str;
    /// Query capturing fenced code as `@block`, with optional `@language` and `@content`.
    fn code_block_query(&self) -> &str;
}
