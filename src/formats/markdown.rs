//! Markdown paragraph streams using tree-sitter-md.
//!
//! Specifications converted to markdown keep their heading outline as ATX (`#`) or setext
//! headings and their field lines as plain paragraphs. Headings map to `Heading N` styles and
//! every non-blank line of a paragraph becomes its own body paragraph, since a field label
//! starts a new line but not necessarily a new markdown paragraph.

use crate::error::InputError;
use crate::formats::{utf8, SourceFormat};
use crate::paragraph::Paragraph;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Tree-sitter queries for headings and paragraphs in the markdown block grammar.
pub struct MarkdownFormat;

const BLOCK_QUERY: &str = "
(atx_heading) @heading
(setext_heading) @heading
(paragraph) @paragraph
";

impl SourceFormat for MarkdownFormat {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["md", "markdown"]
    }

    fn paragraphs(&self, source: &[u8], path: &Path) -> Result<Vec<Paragraph>, InputError> {
        let source = utf8(source, path)?;
        let fail = |details: String| InputError::Markdown {
            path: path.to_path_buf(),
            details,
        };

        let language: tree_sitter::Language = tree_sitter_md::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| fail(e.to_string()))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| fail("parser produced no tree".to_string()))?;
        let query = Query::new(&language, BLOCK_QUERY).map_err(|e| fail(e.to_string()))?;

        let bytes = source.as_bytes();
        let mut blocks: Vec<(usize, Vec<Paragraph>)> = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), bytes);

        while let Some(m) = matches.next() {
            for capture in m.captures {
                let node = capture.node;
                let text = node.utf8_text(bytes).map_err(|e| fail(e.to_string()))?;
                let block: Vec<Paragraph> = match query.capture_names()[capture.index as usize] {
                    "heading" => heading(node, text).into_iter().collect(),
                    "paragraph" if !inside_setext_heading(node) => body_lines(text),
                    _ => continue,
                };
                blocks.push((node.start_byte(), block));
            }
        }

        blocks.sort_by_key(|(start, _)| *start);
        Ok(blocks.into_iter().flat_map(|(_, block)| block).collect())
    }
}

fn inside_setext_heading(node: Node) -> bool {
    node.parent()
        .is_some_and(|parent| parent.kind() == "setext_heading")
}

/// Level encoded in a heading marker node kind, e.g. `atx_h3_marker` or `setext_h1_underline`.
fn marker_level(kind: &str) -> Option<usize> {
    kind.strip_prefix("atx_h")
        .and_then(|rest| rest.strip_suffix("_marker"))
        .or_else(|| {
            kind.strip_prefix("setext_h")
                .and_then(|rest| rest.strip_suffix("_underline"))
        })
        .and_then(|digits| digits.parse().ok())
}

fn heading(node: Node, text: &str) -> Option<Paragraph> {
    let mut walker = node.walk();
    let level = node
        .children(&mut walker)
        .find_map(|child| marker_level(child.kind()))?;

    let title = if node.kind() == "atx_heading" {
        let mut walker = node.walk();
        let inline = node
            .children(&mut walker)
            .find(|child| child.kind() == "inline");
        let content = inline.map_or("", |inline| {
            let start = inline.start_byte() - node.start_byte();
            let end = inline.end_byte() - node.start_byte();
            text.get(start..end).unwrap_or_default()
        });
        strip_closing_sequence(content.trim()).to_string()
    } else {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !is_setext_underline(line))
            .collect::<Vec<_>>()
            .join(" ")
    };
    Some(Paragraph::heading(level, title))
}

/// Drop an optional ATX closing sequence (`## Title ##`).
fn strip_closing_sequence(title: &str) -> &str {
    let without = title.trim_end_matches('#');
    if without.len() == title.len() {
        return title;
    }
    if without.is_empty() || without.ends_with(char::is_whitespace) {
        without.trim_end()
    } else {
        title
    }
}

fn is_setext_underline(line: &str) -> bool {
    line.chars().all(|c| c == '=') || line.chars().all(|c| c == '-')
}

fn body_lines(text: &str) -> Vec<Paragraph> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Paragraph::body)
        .collect()
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
