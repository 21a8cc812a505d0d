//! Non-fatal observations made while parsing a document.
//!
//! The parser never fails on malformed input; it recovers and records what it did here so a
//! caller can report it.

use crate::model::RecordKind;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// What was observed.
pub enum DiagnosticKind {
    /// A heading style without a usable level; the heading was placed at level 1.
    MalformedHeading {
        /// The offending style name.
        style: String,
    },
    /// Body text with no open record field to attach to; it was dropped.
    DiscardedParagraph {
        /// The dropped (normalised) text.
        text: String,
    },
    /// A record was opened with an empty name.
    EmptyRecordName {
        /// Which record kind.
        record: RecordKind,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// A diagnostic tied to a paragraph of the input stream.
pub struct Diagnostic {
    /// Zero-based index of the paragraph in the input stream.
    pub paragraph: usize,
    /// What happened.
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "paragraph {}: ", self.paragraph)?;
        match &self.kind {
            DiagnosticKind::MalformedHeading { style } => {
                write!(f, "heading style {style:?} has no level, using 1")
            }
            DiagnosticKind::DiscardedParagraph { text } => {
                write!(f, "discarded text outside any field: {text:?}")
            }
            DiagnosticKind::EmptyRecordName { record } => write!(f, "{record} has an empty name"),
        }
    }
}

#[cfg(test)]
#[path = "tests/diagnostic.rs"]
mod tests;
