//! Word (`.docx`) documents, the format 3GPP publishes its specifications in.
//!
//! A `.docx` file is a zip package. The body lives in `word/document.xml` as `w:p` paragraphs
//! whose `w:pStyle` names a style id, and `word/styles.xml` maps those ids to the display names
//! (`Heading 2`, `Normal`, `B1`) the parser keys on. Only top-level body paragraphs are read;
//! table cells and text boxes never carry field labels.

use crate::error::InputError;
use crate::formats::SourceFormat;
use crate::paragraph::{Paragraph, BODY_STYLE};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";
const STYLES_PART: &str = "word/styles.xml";

/// Office Open XML word-processing documents.
pub struct DocxFormat;

impl SourceFormat for DocxFormat {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["docx"]
    }

    fn paragraphs(&self, source: &[u8], path: &Path) -> Result<Vec<Paragraph>, InputError> {
        let fail = |details: String| InputError::Docx {
            path: path.to_path_buf(),
            details,
        };

        let mut archive = ZipArchive::new(Cursor::new(source)).map_err(|e| fail(e.to_string()))?;
        let document = read_part(&mut archive, DOCUMENT_PART)
            .map_err(fail)?
            .ok_or_else(|| fail(format!("missing {DOCUMENT_PART}")))?;
        let styles = match read_part(&mut archive, STYLES_PART).map_err(fail)? {
            Some(xml) => style_names(&xml).map_err(fail)?,
            None => HashMap::new(),
        };
        body_paragraphs(&document, &styles).map_err(fail)
    }
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>, String> {
    let mut part = match archive.by_name(name) {
        Ok(part) => part,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(format!("{name}: {e}")),
    };
    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| format!("{name}: {e}"))?;
    Ok(Some(xml))
}

/// Value of the attribute with the given local name, ignoring the namespace prefix.
fn attribute(element: &BytesStart, local: &[u8]) -> Result<Option<String>, String> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        if attr.key.local_name().as_ref() == local {
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Word stores built-in style names in lower case (`heading 2`) but shows them capitalised,
/// which is the form heading detection expects.
fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if name.starts_with("heading") => first.to_uppercase().chain(chars).collect(),
        _ => name.to_string(),
    }
}

/// Map style ids to display names from `word/styles.xml`.
fn style_names(xml: &str) -> Result<HashMap<String, String>, String> {
    let mut reader = Reader::from_str(xml);
    let mut names = HashMap::new();
    let mut current: Option<String> = None;

    loop {
        match reader
            .read_event()
            .map_err(|e| format!("{STYLES_PART}: {e}"))?
        {
            Event::Start(e) if e.local_name().as_ref() == b"style" => {
                current = attribute(&e, b"styleId")?;
            }
            Event::End(e) if e.local_name().as_ref() == b"style" => current = None,
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"name" => {
                if let (Some(id), Some(name)) = (current.take(), attribute(&e, b"val")?) {
                    names.insert(id, display_name(&name));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(names)
}

#[derive(Default)]
struct OpenParagraph {
    style_id: Option<String>,
    text: String,
}

impl OpenParagraph {
    fn close(self, styles: &HashMap<String, String>) -> Paragraph {
        let style = match self.style_id {
            Some(id) => styles.get(&id).cloned().unwrap_or(id),
            None => BODY_STYLE.to_string(),
        };
        Paragraph {
            text: self.text,
            style,
        }
    }
}

/// Top-level body paragraphs of `word/document.xml`, runs joined, in document order.
fn body_paragraphs(
    xml: &str,
    styles: &HashMap<String, String>,
) -> Result<Vec<Paragraph>, String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut open = OpenParagraph::default();
    // Tables and text boxes hold their own paragraphs.
    let mut containers = 0usize;
    let mut depth = 0usize;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("{DOCUMENT_PART}: {e}"))?;
        let reading = containers == 0 && depth == 1;
        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" | b"txbxContent" => containers += 1,
                b"p" => {
                    depth += 1;
                    if containers == 0 && depth == 1 {
                        open = OpenParagraph::default();
                    }
                }
                b"r" => in_run = true,
                b"t" => in_text = true,
                b"pStyle" if reading && open.style_id.is_none() => {
                    open.style_id = attribute(&e, b"val")?;
                }
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" if containers == 0 && depth == 0 => {
                    paragraphs.push(OpenParagraph::default().close(styles));
                }
                // Revision marks keep the old properties after the current ones.
                b"pStyle" if reading && open.style_id.is_none() => {
                    open.style_id = attribute(&e, b"val")?;
                }
                b"tab" if reading && in_run => open.text.push('\t'),
                b"br" | b"cr" if reading && in_run => open.text.push('\n'),
                _ => {}
            },
            Event::Text(t) if reading && in_text => {
                let text = t.unescape().map_err(|e| e.to_string())?;
                open.text.push_str(&text);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"tbl" | b"txbxContent" => containers = containers.saturating_sub(1),
                b"p" => {
                    if reading {
                        paragraphs.push(std::mem::take(&mut open).close(styles));
                    }
                    depth = depth.saturating_sub(1);
                }
                b"r" => in_run = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(paragraphs)
}

#[cfg(test)]
#[path = "../tests/docx.rs"]
mod tests;
