//! Render a finished [`Specification`] for storage or inspection.
//!
//! Three renderings share one field order: XML, the reference form consumed downstream; JSON,
//! for tooling; and a box-drawing outline for reading in a terminal. Absent fields are left
//! out everywhere.

use crate::error::UnknownFormat;
use crate::grammar::FieldKind;
use crate::model::{Node, Requirement, Section, Specification, TestCase};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Output rendering.
pub enum OutputFormat {
    #[default]
    /// Indented XML document.
    Xml,
    /// Pretty-printed JSON.
    Json,
    /// Box-drawing tree.
    Outline,
}

impl OutputFormat {
    #[must_use]
    /// File extension for written output.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
            Self::Outline => "txt",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            "outline" | "tree" => Ok(Self::Outline),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml => f.write_str("xml"),
            Self::Json => f.write_str("json"),
            Self::Outline => f.write_str("outline"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Layout settings shared by the renderers.
pub struct RenderOptions {
    /// Spaces per nesting level in XML output.
    pub indent: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

/// Render a specification in the requested format.
///
/// # Errors
///
/// Returns an error only if JSON serialisation fails.
pub fn render(
    spec: &Specification,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Xml => Ok(render_xml(spec, options)),
        OutputFormat::Json => serde_json::to_string_pretty(spec),
        OutputFormat::Outline => Ok(render_outline(spec)),
    }
}

/// Element name for a field in XML output.
fn xml_tag(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::RequirementName | FieldKind::TestName => "Name",
        FieldKind::RequirementReference => "Reference",
        FieldKind::RequirementDescription => "Description",
        FieldKind::ThreatReferences => "ThreatReference",
        FieldKind::Purpose => "Purpose",
        FieldKind::PreConditions => "PreConditions",
        FieldKind::ExecutionStepsHeader => "ExecutionSteps",
        FieldKind::ExpectedResults => "ExpectedResults",
        FieldKind::EvidenceFormat => "EvidenceFormat",
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Attribute values also escape quotes and the whitespace characters XML readers would
/// otherwise normalise to spaces.
fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in escape_text(text).chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(c),
        }
    }
    out
}

struct XmlWriter {
    out: String,
    indent: usize,
}

impl XmlWriter {
    fn pad(&mut self, depth: usize) {
        self.out.push_str(&" ".repeat(depth * self.indent));
    }

    fn open(&mut self, depth: usize, tag: &str, attrs: &str, empty: bool) {
        self.pad(depth);
        let close = if empty { "/>" } else { ">" };
        self.out.push_str(&format!("<{tag}{attrs}{close}\n"));
    }

    fn close(&mut self, depth: usize, tag: &str) {
        self.pad(depth);
        self.out.push_str(&format!("</{tag}>\n"));
    }

    fn text_element(&mut self, depth: usize, tag: &str, text: &str) {
        self.pad(depth);
        if text.is_empty() {
            self.out.push_str(&format!("<{tag}/>\n"));
        } else {
            self.out
                .push_str(&format!("<{tag}>{}</{tag}>\n", escape_text(text)));
        }
    }

    fn nodes(&mut self, depth: usize, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Section(section) => self.section(depth, section),
                Node::Requirement(req) => self.requirement(depth, req),
                Node::TestCase(tc) => self.test_case(depth, tc),
            }
        }
    }

    fn section(&mut self, depth: usize, section: &Section) {
        let attrs = format!(
            " title=\"{}\" level=\"{}\"",
            escape_attr(&section.title),
            section.level
        );
        let empty = section.children.is_empty();
        self.open(depth, "Section", &attrs, empty);
        if !empty {
            self.nodes(depth + 1, &section.children);
            self.close(depth, "Section");
        }
    }

    fn record<'a>(
        &mut self,
        depth: usize,
        tag: &str,
        name: &str,
        fields: impl IntoIterator<Item = (FieldKind, Option<&'a str>)>,
    ) {
        self.open(depth, tag, "", false);
        self.text_element(depth + 1, "Name", name);
        for (kind, value) in fields {
            if let Some(value) = value {
                self.text_element(depth + 1, xml_tag(kind), value);
            }
        }
        self.close(depth, tag);
    }

    fn requirement(&mut self, depth: usize, req: &Requirement) {
        self.record(depth, "Requirement", &req.name, req.fields());
    }

    fn test_case(&mut self, depth: usize, tc: &TestCase) {
        self.record(depth, "TestCase", &tc.name, tc.fields());
    }
}

#[must_use]
/// Render as an indented XML document.
///
/// Present-but-empty fields (an `Execution Steps` header with no steps) become self-closing
/// elements; absent fields are omitted.
pub fn render_xml(spec: &Specification, options: &RenderOptions) -> String {
    let mut writer = XmlWriter {
        out: String::from("<?xml version=\"1.0\" ?>\n"),
        indent: options.indent,
    };
    let attrs = format!(" name=\"{}\"", escape_attr(&spec.name));
    let empty = spec.children.is_empty();
    writer.open(0, "Specification", &attrs, empty);
    if !empty {
        writer.nodes(1, &spec.children);
        writer.close(0, "Specification");
    }
    writer.out
}

/// Generate box-drawing prefix for one tree row.
fn branch(prefix: &str, is_last: bool) -> String {
    let connector = if is_last { "└── " } else { "├── " };
    format!("{prefix}{connector}")
}

fn continuation(prefix: &str, is_last: bool) -> String {
    let rail = if is_last { "    " } else { "│   " };
    format!("{prefix}{rail}")
}

struct OutlineWriter {
    out: String,
}

impl OutlineWriter {
    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn nodes(&mut self, prefix: &str, nodes: &[Node]) {
        for (i, node) in nodes.iter().enumerate() {
            let is_last = i + 1 == nodes.len();
            let head = branch(prefix, is_last);
            let inner = continuation(prefix, is_last);
            match node {
                Node::Section(section) => {
                    self.line(&format!("{head}{} [H{}]", section.title, section.level));
                    self.nodes(&inner, &section.children);
                }
                Node::Requirement(req) => {
                    self.line(&format!("{head}Requirement: {}", req.name));
                    self.fields(&inner, req.fields());
                }
                Node::TestCase(tc) => {
                    self.line(&format!("{head}TestCase: {}", tc.name));
                    self.fields(&inner, tc.fields());
                }
            }
        }
    }

    fn fields<'a>(
        &mut self,
        prefix: &str,
        fields: impl IntoIterator<Item = (FieldKind, Option<&'a str>)>,
    ) {
        let present: Vec<(FieldKind, &str)> = fields
            .into_iter()
            .filter_map(|(kind, value)| value.map(|v| (kind, v)))
            .collect();
        for (i, (kind, value)) in present.iter().enumerate() {
            let is_last = i + 1 == present.len();
            let head = branch(prefix, is_last);
            let inner = continuation(prefix, is_last);
            let label = xml_tag(*kind);
            let mut lines = value.lines();
            match lines.next() {
                Some(first) => self.line(&format!("{head}{label}: {first}")),
                None => self.line(&format!("{head}{label}:")),
            }
            for rest in lines {
                self.line(&format!("{inner}{rest}"));
            }
        }
    }
}

#[must_use]
/// Render as a box-drawing tree rooted at the document name.
pub fn render_outline(spec: &Specification) -> String {
    let mut writer = OutlineWriter { out: String::new() };
    writer.line(&spec.name);
    writer.nodes("", &spec.children);
    writer.out
}

#[cfg(test)]
#[path = "tests/render.rs"]
mod tests;
