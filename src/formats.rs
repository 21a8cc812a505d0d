//! Source formats that can be turned into a paragraph stream.
//!
//! This module defines the `SourceFormat` trait which abstracts over the document formats the
//! tool reads (Word documents, exported paragraph streams, markdown). Each format only has to
//! produce the ordered `(text, style)` pairs; everything after that is format-independent.

pub mod docx;
pub mod markdown;
pub mod paragraph_json;

use crate::error::InputError;
use crate::paragraph::Paragraph;
use std::path::Path;

/// A document format that yields a paragraph stream.
pub trait SourceFormat: Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Lower-case file extensions handled by this format.
    fn extensions(&self) -> &'static [&'static str];

    /// Split the raw file contents into paragraphs, in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the contents are not valid for this format.
    fn paragraphs(&self, source: &[u8], path: &Path) -> Result<Vec<Paragraph>, InputError>;
}

/// Contents of a text-based format as UTF-8.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8.
pub fn utf8<'a>(source: &'a [u8], path: &Path) -> Result<&'a str, InputError> {
    std::str::from_utf8(source).map_err(|source| InputError::Encoding {
        path: path.to_path_buf(),
        source,
    })
}

const FORMATS: &[&dyn SourceFormat] = &[
    &docx::DocxFormat,
    &paragraph_json::ParagraphJsonFormat,
    &markdown::MarkdownFormat,
];

#[must_use]
/// The format registered for a path's extension, if any.
pub fn for_path(path: &Path) -> Option<&'static dyn SourceFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    FORMATS
        .iter()
        .copied()
        .find(|format| format.extensions().contains(&ext.as_str()))
}

#[must_use]
/// Every extension some format can read.
pub fn known_extensions() -> Vec<&'static str> {
    FORMATS
        .iter()
        .flat_map(|format| format.extensions().iter().copied())
        .collect()
}

#[cfg(test)]
#[path = "tests/formats.rs"]
mod tests;
