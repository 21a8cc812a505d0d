//! The paragraph stream consumed by the parser.
//!
//! Whatever the source document format, the parser only ever sees an ordered list of
//! paragraphs, each with the name of the visual style it was written in (`Heading 2`,
//! `Normal`, `B1`, ...). Only heading styles carry meaning.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// One paragraph of source text with its style name.
pub struct Paragraph {
    /// Raw paragraph text, before normalisation.
    pub text: String,
    /// Style name as reported by the source document.
    #[serde(default = "default_style")]
    pub style: String,
}

fn default_style() -> String {
    BODY_STYLE.to_string()
}

/// Style name given to paragraphs that carry no heading.
pub const BODY_STYLE: &str = "Normal";

const HEADING_PREFIX: &str = "Heading";

impl Paragraph {
    #[must_use]
    /// Body text paragraph.
    pub fn body(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: BODY_STYLE.to_string(),
        }
    }

    #[must_use]
    /// Heading paragraph at the given level.
    pub fn heading(level: usize, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: format!("{HEADING_PREFIX} {level}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a style name means to the parser.
pub enum Style {
    /// A heading at the given level (1 is outermost).
    Heading {
        /// Nesting depth, always at least 1.
        level: usize,
        /// The level suffix was missing or unusable and the level fell back to 1.
        recovered: bool,
    },
    /// Anything that is not a heading.
    Body,
}

impl Style {
    #[must_use]
    /// Interpret a style name.
    ///
    /// Styles starting with `Heading` are headings, with the level taken from the last
    /// whitespace-separated token. A non-numeric or zero level falls back to 1.
    pub fn parse(style: &str) -> Self {
        if !style.starts_with(HEADING_PREFIX) {
            return Self::Body;
        }
        let level = style
            .split_whitespace()
            .last()
            .and_then(|token| token.parse::<usize>().ok())
            .filter(|&level| level > 0);
        match level {
            Some(level) => Self::Heading {
                level,
                recovered: false,
            },
            None => Self::Heading {
                level: 1,
                recovered: true,
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/paragraph.rs"]
mod tests;
