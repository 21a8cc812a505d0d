//! Owns the record tree while it is being built and applies mutation events to it.
//!
//! Nodes are addressed by their index path from the root rather than by reference, so the
//! parser can hold on to "the open record" across paragraphs without borrowing the tree.

use crate::grammar::FieldKind;
use crate::model::{Node, Requirement, Section, Specification, TestCase};
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
/// Child indices leading from the root to a node. The empty path is the root itself.
pub struct NodePath(Vec<usize>);

impl NodePath {
    #[must_use]
    /// The document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    /// Path of this node's child at `index`.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    #[must_use]
    /// Child indices from the root.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("/"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A single mutation of the tree.
pub enum TreeEvent {
    /// Append a new section under `parent`.
    AddSection {
        /// Root or section receiving the new section.
        parent: NodePath,
        /// Heading text.
        title: String,
        /// Heading level.
        level: usize,
    },
    /// Append a new requirement under `parent`.
    AddRequirement {
        /// Root or section receiving the record.
        parent: NodePath,
        /// Requirement name.
        name: String,
    },
    /// Append a new test case under `parent`.
    AddTestCase {
        /// Root or section receiving the record.
        parent: NodePath,
        /// Test name.
        name: String,
    },
    /// Replace a field value on a record.
    SetField {
        /// The record.
        record: NodePath,
        /// Which field, by label.
        field: FieldKind,
        /// New value.
        value: String,
    },
    /// Add a continuation line to a field value.
    AppendField {
        /// The record.
        record: NodePath,
        /// Which field, by label.
        field: FieldKind,
        /// Line to append.
        text: String,
    },
}

/// Builds a [`Specification`] from [`TreeEvent`]s.
pub struct TreeBuilder {
    spec: Specification,
}

impl TreeBuilder {
    #[must_use]
    /// Empty tree for the named document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            spec: Specification::new(name),
        }
    }

    /// Apply one event.
    ///
    /// Returns the path of the node the event created or modified, or `None` when the event
    /// addressed a node that does not exist or a field the node does not have.
    pub fn apply(&mut self, event: TreeEvent) -> Option<NodePath> {
        match event {
            TreeEvent::AddSection {
                parent,
                title,
                level,
            } => self.add_child(
                &parent,
                Node::Section(Section {
                    title,
                    level,
                    children: Vec::new(),
                }),
            ),
            TreeEvent::AddRequirement { parent, name } => self.add_child(
                &parent,
                Node::Requirement(Requirement {
                    name,
                    ..Requirement::default()
                }),
            ),
            TreeEvent::AddTestCase { parent, name } => self.add_child(
                &parent,
                Node::TestCase(TestCase {
                    name,
                    ..TestCase::default()
                }),
            ),
            TreeEvent::SetField {
                record,
                field,
                value,
            } => {
                let slot = self.node_mut(&record)?.field_mut(field)?;
                *slot = Some(value);
                Some(record)
            }
            TreeEvent::AppendField {
                record,
                field,
                text,
            } => {
                let slot = self.node_mut(&record)?.field_mut(field)?;
                let joined = match slot.take() {
                    Some(mut value) if !value.is_empty() => {
                        value.push('\n');
                        value.push_str(&text);
                        value
                    }
                    _ => text,
                };
                *slot = Some(joined);
                Some(record)
            }
        }
    }

    #[must_use]
    /// Hand over the finished tree.
    pub fn finish(self) -> Specification {
        self.spec
    }

    fn add_child(&mut self, parent: &NodePath, node: Node) -> Option<NodePath> {
        let children = self.children_mut(parent)?;
        children.push(node);
        Some(parent.child(children.len() - 1))
    }

    fn children_mut(&mut self, path: &NodePath) -> Option<&mut Vec<Node>> {
        let mut children = &mut self.spec.children;
        for &index in path.indices() {
            children = children.get_mut(index)?.children_mut()?;
        }
        Some(children)
    }

    fn node_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let (last, ancestors) = path.indices().split_last()?;
        let mut children = &mut self.spec.children;
        for &index in ancestors {
            children = children.get_mut(index)?.children_mut()?;
        }
        children.get_mut(*last)
    }
}

#[cfg(test)]
#[path = "tests/tree_builder.rs"]
mod tests;
