//! Canonical paragraph text.
//!
//! Word processors leave stray control bytes in paragraph runs (field codes, soft breaks,
//! revision marks). Everything downstream matches on the cleaned text, so this is the only
//! place raw paragraph text is inspected.

/// True for the ASCII control characters stripped from paragraph text.
///
/// Tab (0x09), line feed (0x0A) and carriage return (0x0D) are kept so that trimming can
/// treat them as whitespace.
fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}'..='\u{0C}' | '\u{0E}'..='\u{1F}')
}

#[must_use]
/// Remove control characters and trim surrounding whitespace.
///
/// Empty or whitespace-only input yields an empty string, which callers treat as "no paragraph".
pub fn clean_text(text: &str) -> String {
    let stripped: String = text.chars().filter(|&c| !is_stripped_control(c)).collect();
    stripped.trim().to_string()
}

#[cfg(test)]
#[path = "tests/normalize.rs"]
mod tests;
