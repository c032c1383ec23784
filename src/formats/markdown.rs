//! Markdown format implementation using tree-sitter-md.
//!
//! This module provides tree-sitter queries for ATX-style headings (# syntax) and fenced code
//! blocks, whose info string names the language used for syntax highlighting.

use crate::formats::Format;

/// Tree-sitter queries for markdown headings and fenced code blocks.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn heading_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }

    fn code_block_query(&self) -> &'static str {
        "(fenced_code_block (info_string (language) @language)? (code_fence_content)? @content) @block"
    }
}
