//! Paragraph streams exported as JSON.
//!
//! The document-to-paragraph converters emit either one JSON array of
//! `{"text": ..., "style": ...}` objects or the same objects one per line (NDJSON), which is
//! what streaming exporters produce for large specifications.

use crate::error::InputError;
use crate::formats::{utf8, SourceFormat};
use crate::paragraph::Paragraph;
use std::path::Path;

/// JSON array or newline-delimited JSON paragraph stream.
pub struct ParagraphJsonFormat;

impl SourceFormat for ParagraphJsonFormat {
    fn name(&self) -> &'static str {
        "paragraph-json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json", "ndjson", "jsonl"]
    }

    fn paragraphs(&self, source: &[u8], path: &Path) -> Result<Vec<Paragraph>, InputError> {
        parse_paragraph_json(utf8(source, path)?, path)
    }
}

/// Parse a paragraph stream given as a JSON array or as NDJSON.
///
/// # Errors
///
/// Returns an error if the input is a malformed array or any NDJSON line fails to parse.
pub fn parse_paragraph_json(json_str: &str, path: &Path) -> Result<Vec<Paragraph>, InputError> {
    if json_str.trim_start().starts_with('[') {
        // Array format: [{para1}, {para2}]
        return serde_json::from_str::<Vec<Paragraph>>(json_str).map_err(|source| {
            InputError::Json {
                path: path.to_path_buf(),
                line: source.line(),
                source,
            }
        });
    }

    // Newline-delimited: one paragraph object per line, blank lines ignored
    json_str
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<Paragraph>(line).map_err(|source| InputError::Json {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/paragraph_json.rs"]
mod tests;
