//! The label-prefix grammar for requirement and test case fields.
//!
//! Security assurance specifications spell out each record as a run of body paragraphs that
//! start with a fixed label, e.g. `Requirement Name: Logging`. The grammar only answers
//! "which label does this text start with, and what follows it"; deciding whether the label is
//! allowed in the current parse state is left to [`crate::record_context`].

use crate::model::RecordKind;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static GRAMMAR: LazyLock<FieldGrammar> = LazyLock::new(FieldGrammar::new);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Every label the grammar recognises, in catalog declaration order.
pub enum FieldKind {
    /// `Requirement Name:` opens a new requirement.
    RequirementName,
    /// `Requirement Reference:` single-line reference into the base specification.
    RequirementReference,
    /// `Requirement Description:` multi-line requirement text.
    RequirementDescription,
    /// `Threat References:` single-line list of threat identifiers.
    ThreatReferences,
    /// `Test Name:` opens a new test case.
    TestName,
    /// `Purpose:` multi-line.
    Purpose,
    /// `Pre-Conditions:` multi-line.
    PreConditions,
    /// `Execution Steps` header; the steps themselves follow as continuation lines.
    ExecutionStepsHeader,
    /// `Expected Results:` multi-line.
    ExpectedResults,
    /// `Expected Format of Evidence:` multi-line.
    EvidenceFormat,
}

impl FieldKind {
    /// All kinds in declaration order. Requirement kinds precede test kinds.
    pub const ALL: [Self; 10] = [
        Self::RequirementName,
        Self::RequirementReference,
        Self::RequirementDescription,
        Self::ThreatReferences,
        Self::TestName,
        Self::Purpose,
        Self::PreConditions,
        Self::ExecutionStepsHeader,
        Self::ExpectedResults,
        Self::EvidenceFormat,
    ];

    #[must_use]
    /// The label as written in the documents.
    pub fn label(self) -> &'static str {
        match self {
            Self::RequirementName => "Requirement Name",
            Self::RequirementReference => "Requirement Reference",
            Self::RequirementDescription => "Requirement Description",
            Self::ThreatReferences => "Threat References",
            Self::TestName => "Test Name",
            Self::Purpose => "Purpose",
            Self::PreConditions => "Pre-Conditions",
            Self::ExecutionStepsHeader => "Execution Steps",
            Self::ExpectedResults => "Expected Results",
            Self::EvidenceFormat => "Expected Format of Evidence",
        }
    }

    #[must_use]
    /// The record kind this label belongs to.
    pub fn record_kind(self) -> RecordKind {
        match self {
            Self::RequirementName
            | Self::RequirementReference
            | Self::RequirementDescription
            | Self::ThreatReferences => RecordKind::Requirement,
            _ => RecordKind::TestCase,
        }
    }

    #[must_use]
    /// True for the two labels that open a new record.
    pub fn opens_record(self) -> bool {
        matches!(self, Self::RequirementName | Self::TestName)
    }

    #[must_use]
    /// True when paragraphs after this label keep appending to its value.
    pub fn is_continuable(self) -> bool {
        !matches!(
            self,
            Self::RequirementName
                | Self::RequirementReference
                | Self::ThreatReferences
                | Self::TestName
        )
    }

    fn pattern(self) -> String {
        let label = regex::escape(self.label());
        match self {
            Self::ExecutionStepsHeader => format!(r"(?i)^{label}"),
            _ => format!(r"(?is)^{label}\s*:\s*(?P<value>.*)"),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A recognised label and the text that followed it.
pub struct FieldMatch {
    /// Which label matched.
    pub kind: FieldKind,
    /// Trimmed text after the label, `None` for the execution steps header.
    pub inline: Option<String>,
}

/// Compiled label patterns, immutable once built.
pub struct FieldGrammar {
    patterns: Vec<(FieldKind, Regex)>,
}

impl FieldGrammar {
    #[must_use]
    /// Compile the catalog.
    ///
    /// # Panics
    ///
    /// Panics if a built-in pattern fails to compile, which the grammar tests rule out.
    pub fn new() -> Self {
        let patterns = FieldKind::ALL
            .iter()
            .map(|&kind| {
                let re = Regex::new(&kind.pattern()).expect("static regex must compile");
                (kind, re)
            })
            .collect();
        Self { patterns }
    }

    #[must_use]
    /// The process-wide grammar, shared freely across threads.
    pub fn shared() -> &'static Self {
        &GRAMMAR
    }

    #[must_use]
    /// Classify text against the whole catalog, first match in declaration order wins.
    pub fn classify(&self, text: &str) -> Option<FieldMatch> {
        self.patterns
            .iter()
            .find_map(|(kind, re)| Self::capture(*kind, re, text))
    }

    #[must_use]
    /// Classify text against a single label.
    pub fn classify_kind(&self, kind: FieldKind, text: &str) -> Option<FieldMatch> {
        self.patterns
            .iter()
            .find(|(k, _)| *k == kind)
            .and_then(|(k, re)| Self::capture(*k, re, text))
    }

    fn capture(kind: FieldKind, re: &Regex, text: &str) -> Option<FieldMatch> {
        let caps = re.captures(text)?;
        let inline = match kind {
            FieldKind::ExecutionStepsHeader => None,
            _ => Some(
                caps.name("value")
                    .map_or("", |m| m.as_str())
                    .trim()
                    .to_string(),
            ),
        };
        Some(FieldMatch { kind, inline })
    }
}

impl Default for FieldGrammar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/grammar.rs"]
mod tests;
