//! The paragraph-by-paragraph state machine that turns a paragraph stream into a record tree.
//!
//! Three pieces of state persist between paragraphs:
//!
//! - the open section path ([`SectionStack`]),
//! - the open record, if any ([`Scope`]), at most one of requirement or test case,
//! - the capture target, the one field of the open record that keeps accepting continuation
//!   lines.
//!
//! Each paragraph is classified exactly once, in a fixed order:
//!
//! ```text
//! heading style            -> close record, open section
//! Requirement Name         -> close record, open requirement      (always)
//! Reference/Description/
//!   Threat References      -> set requirement field               (requirement open)
//! Test Name                -> close record, open test case        (always)
//! Purpose/Pre-Conditions/
//!   Execution Steps/
//!   Expected Results/
//!   Expected Format of Evidence -> set test case field             (test case open)
//! anything else            -> append to capture target, or discard
//! ```
//!
//! The order is observable: `Test Name` must be able to interrupt an open requirement, and
//! field labels only count while a record of the matching kind is open.

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::grammar::{FieldGrammar, FieldKind, FieldMatch};
use crate::model::{RecordKind, Specification};
use crate::normalize::clean_text;
use crate::paragraph::{Paragraph, Style};
use crate::section_stack::SectionStack;
use crate::tree_builder::{NodePath, TreeBuilder, TreeEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gate {
    Always,
    Requirement,
    TestCase,
}

struct Rule {
    gate: Gate,
    kind: FieldKind,
}

const RULES: [Rule; 10] = [
    Rule {
        gate: Gate::Always,
        kind: FieldKind::RequirementName,
    },
    Rule {
        gate: Gate::Requirement,
        kind: FieldKind::RequirementReference,
    },
    Rule {
        gate: Gate::Requirement,
        kind: FieldKind::RequirementDescription,
    },
    Rule {
        gate: Gate::Requirement,
        kind: FieldKind::ThreatReferences,
    },
    Rule {
        gate: Gate::Always,
        kind: FieldKind::TestName,
    },
    Rule {
        gate: Gate::TestCase,
        kind: FieldKind::Purpose,
    },
    Rule {
        gate: Gate::TestCase,
        kind: FieldKind::PreConditions,
    },
    Rule {
        gate: Gate::TestCase,
        kind: FieldKind::ExecutionStepsHeader,
    },
    Rule {
        gate: Gate::TestCase,
        kind: FieldKind::ExpectedResults,
    },
    Rule {
        gate: Gate::TestCase,
        kind: FieldKind::EvidenceFormat,
    },
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Which record, if any, is open for field assignment.
pub enum Scope {
    #[default]
    /// No record is open.
    None,
    /// A requirement is open at this path.
    Requirement(NodePath),
    /// A test case is open at this path.
    TestCase(NodePath),
}

impl Scope {
    fn admits(&self, gate: Gate) -> bool {
        match gate {
            Gate::Always => true,
            Gate::Requirement => matches!(self, Self::Requirement(_)),
            Gate::TestCase => matches!(self, Self::TestCase(_)),
        }
    }

    #[must_use]
    /// Path of the open record.
    pub fn record(&self) -> Option<&NodePath> {
        match self {
            Self::None => None,
            Self::Requirement(path) | Self::TestCase(path) => Some(path),
        }
    }
}

#[derive(Debug)]
/// The finished tree and what was recovered from along the way.
pub struct ParseOutcome {
    /// The record tree.
    pub specification: Specification,
    /// Recoveries and dropped text, in stream order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parser state for one document.
pub struct RecordContext {
    grammar: &'static FieldGrammar,
    stack: SectionStack,
    tree: TreeBuilder,
    scope: Scope,
    capture: Option<FieldKind>,
    diagnostics: Vec<Diagnostic>,
    position: usize,
}

impl RecordContext {
    #[must_use]
    /// Fresh state for the named document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            grammar: FieldGrammar::shared(),
            stack: SectionStack::new(),
            tree: TreeBuilder::new(name),
            scope: Scope::None,
            capture: None,
            diagnostics: Vec::new(),
            position: 0,
        }
    }

    /// Consume the next paragraph of the stream.
    pub fn feed(&mut self, paragraph: &Paragraph) {
        self.feed_raw(&paragraph.text, &paragraph.style);
    }

    /// Consume the next paragraph given as raw text and style name.
    ///
    /// Paragraphs whose normalised text is empty are skipped without touching any state other
    /// than the stream position.
    pub fn feed_raw(&mut self, text: &str, style: &str) {
        let index = self.position;
        self.position += 1;

        let text = clean_text(text);
        if text.is_empty() {
            return;
        }

        if let Style::Heading { level, recovered } = Style::parse(style) {
            if recovered {
                tracing::debug!(paragraph = index, style, "malformed heading style");
                self.diagnose(
                    index,
                    DiagnosticKind::MalformedHeading {
                        style: style.to_string(),
                    },
                );
            }
            self.enter_section(level, text);
            return;
        }

        let matched = RULES
            .iter()
            .filter(|rule| self.scope.admits(rule.gate))
            .find_map(|rule| self.grammar.classify_kind(rule.kind, &text));

        match matched {
            Some(field) => self.apply_field(index, field),
            None => self.continue_capture(index, text),
        }
    }

    #[must_use]
    /// The currently open record.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    #[must_use]
    /// The field currently accepting continuation lines.
    pub fn capture(&self) -> Option<FieldKind> {
        self.capture
    }

    #[must_use]
    /// Number of open sections below the root.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    #[must_use]
    /// End of stream: hand over the tree and diagnostics.
    pub fn finish(self) -> ParseOutcome {
        ParseOutcome {
            specification: self.tree.finish(),
            diagnostics: self.diagnostics,
        }
    }

    fn close_record(&mut self) {
        self.scope = Scope::None;
        self.capture = None;
    }

    fn enter_section(&mut self, level: usize, title: String) {
        self.close_record();
        let parent = self.stack.enter(level);
        if let Some(path) = self.tree.apply(TreeEvent::AddSection {
            parent,
            title,
            level,
        }) {
            self.stack.push(level, path);
        }
    }

    fn apply_field(&mut self, index: usize, field: FieldMatch) {
        let FieldMatch { kind, inline } = field;
        let value = inline.unwrap_or_default();

        if kind.opens_record() {
            self.open_record(index, kind.record_kind(), value);
            return;
        }

        let Some(record) = self.scope.record().cloned() else {
            return;
        };
        let applied = self.tree.apply(TreeEvent::SetField {
            record: record.clone(),
            field: kind,
            value,
        });
        if applied.is_none() {
            tracing::debug!(
                paragraph = index,
                field = %kind,
                record = %record,
                "field has no slot on open record"
            );
        }
        self.capture = kind.is_continuable().then_some(kind);
    }

    fn open_record(&mut self, index: usize, kind: RecordKind, name: String) {
        self.close_record();
        if name.is_empty() {
            self.diagnose(index, DiagnosticKind::EmptyRecordName { record: kind });
        }
        let parent = self.stack.current().clone();
        let event = match kind {
            RecordKind::Requirement => TreeEvent::AddRequirement { parent, name },
            RecordKind::TestCase => TreeEvent::AddTestCase { parent, name },
        };
        self.scope = match (self.tree.apply(event), kind) {
            (Some(path), RecordKind::Requirement) => Scope::Requirement(path),
            (Some(path), RecordKind::TestCase) => Scope::TestCase(path),
            (None, _) => Scope::None,
        };
    }

    fn continue_capture(&mut self, index: usize, text: String) {
        match (self.capture, self.scope.record().cloned()) {
            (Some(field), Some(record)) => {
                self.tree.apply(TreeEvent::AppendField {
                    record,
                    field,
                    text,
                });
            }
            _ => {
                tracing::trace!(paragraph = index, "discarding paragraph outside any field");
                self.diagnose(index, DiagnosticKind::DiscardedParagraph { text });
            }
        }
    }

    fn diagnose(&mut self, paragraph: usize, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic { paragraph, kind });
    }
}

/// Parse a whole paragraph stream into a record tree.
pub fn parse_document<'a, I>(name: impl Into<String>, paragraphs: I) -> ParseOutcome
where
    I: IntoIterator<Item = &'a Paragraph>,
{
    let mut context = RecordContext::new(name);
    for paragraph in paragraphs {
        context.feed(paragraph);
    }
    context.finish()
}

#[cfg(test)]
#[path = "tests/record_context.rs"]
mod tests;
