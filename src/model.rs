//! The typed record tree produced for one specification document.
//!
//! A specification is a tree of nested sections, mirroring the heading outline of the source
//! document. Sections hold requirements and test cases as leaves, in document order.

use crate::grammar::FieldKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// The two kinds of leaf record.
pub enum RecordKind {
    /// A security requirement.
    Requirement,
    /// A test case verifying one or more requirements.
    TestCase,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requirement => f.write_str("Requirement"),
            Self::TestCase => f.write_str("TestCase"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Root of the tree, one per parsed document.
pub struct Specification {
    /// Document identifier, e.g. `3GPP TS 33.117`.
    pub name: String,
    /// Top-level nodes in document order.
    ///
    /// Normally only sections, but records that appear before the first heading land here.
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A heading and everything nested under it.
pub struct Section {
    /// Heading text.
    pub title: String,
    /// Nesting depth in the document hierarchy (1 for top-level).
    pub level: usize,
    /// Subsections and records in document order.
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One child slot of a section.
pub enum Node {
    /// A nested section.
    Section(Section),
    /// A requirement record.
    Requirement(Requirement),
    /// A test case record.
    TestCase(TestCase),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// A requirement record.
pub struct Requirement {
    /// Requirement name, single line.
    pub name: String,
    /// Reference into the base specification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Requirement text, possibly spanning several paragraphs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Threat catalogue references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_reference: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// A test case record. All fields but the name may span several paragraphs.
pub struct TestCase {
    /// Test name, single line.
    pub name: String,
    /// What the test verifies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// Setup the tester needs before executing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_conditions: Option<String>,
    /// Steps, usually given entirely as lines after the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_steps: Option<String>,
    /// Pass criteria.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_results: Option<String>,
    /// What the tester must hand in as evidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_format: Option<String>,
}

impl Requirement {
    #[must_use]
    /// Optional fields in output order, labelled by the field they were read from.
    pub fn fields(&self) -> [(FieldKind, Option<&str>); 3] {
        [
            (FieldKind::RequirementReference, self.reference.as_deref()),
            (FieldKind::RequirementDescription, self.description.as_deref()),
            (FieldKind::ThreatReferences, self.threat_reference.as_deref()),
        ]
    }

    /// Value slot for a requirement field label, `None` for labels that are not fields of a
    /// requirement.
    pub fn field_mut(&mut self, kind: FieldKind) -> Option<&mut Option<String>> {
        match kind {
            FieldKind::RequirementReference => Some(&mut self.reference),
            FieldKind::RequirementDescription => Some(&mut self.description),
            FieldKind::ThreatReferences => Some(&mut self.threat_reference),
            _ => None,
        }
    }
}

impl TestCase {
    #[must_use]
    /// Optional fields in output order, labelled by the field they were read from.
    pub fn fields(&self) -> [(FieldKind, Option<&str>); 5] {
        [
            (FieldKind::Purpose, self.purpose.as_deref()),
            (FieldKind::PreConditions, self.pre_conditions.as_deref()),
            (FieldKind::ExecutionStepsHeader, self.execution_steps.as_deref()),
            (FieldKind::ExpectedResults, self.expected_results.as_deref()),
            (FieldKind::EvidenceFormat, self.evidence_format.as_deref()),
        ]
    }

    /// Value slot for a test case field label, `None` for labels that are not fields of a
    /// test case.
    pub fn field_mut(&mut self, kind: FieldKind) -> Option<&mut Option<String>> {
        match kind {
            FieldKind::Purpose => Some(&mut self.purpose),
            FieldKind::PreConditions => Some(&mut self.pre_conditions),
            FieldKind::ExecutionStepsHeader => Some(&mut self.execution_steps),
            FieldKind::ExpectedResults => Some(&mut self.expected_results),
            FieldKind::EvidenceFormat => Some(&mut self.evidence_format),
            _ => None,
        }
    }
}

impl Node {
    #[must_use]
    /// Child list of a section node.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Self::Section(section) => Some(&section.children),
            Self::Requirement(_) | Self::TestCase(_) => None,
        }
    }

    /// Mutable child list of a section node.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Section(section) => Some(&mut section.children),
            Self::Requirement(_) | Self::TestCase(_) => None,
        }
    }

    /// Value slot for a field label on a record node.
    pub fn field_mut(&mut self, kind: FieldKind) -> Option<&mut Option<String>> {
        match self {
            Self::Section(_) => None,
            Self::Requirement(req) => req.field_mut(kind),
            Self::TestCase(tc) => tc.field_mut(kind),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
/// Node counts for a parsed tree.
pub struct Summary {
    /// Number of sections at any depth.
    pub sections: usize,
    /// Number of requirements.
    pub requirements: usize,
    /// Number of test cases.
    pub test_cases: usize,
}

impl Summary {
    fn tally(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Section(section) => {
                    self.sections += 1;
                    self.tally(&section.children);
                }
                Node::Requirement(_) => self.requirements += 1,
                Node::TestCase(_) => self.test_cases += 1,
            }
        }
    }
}

impl Specification {
    #[must_use]
    /// Empty tree for the named document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    /// Count sections and records at every depth.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        summary.tally(&self.children);
        summary
    }
}

#[cfg(test)]
#[path = "tests/model.rs"]
mod tests;
