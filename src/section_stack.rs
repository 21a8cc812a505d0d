//! The open heading path from the document root to the innermost section.

use crate::tree_builder::NodePath;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    level: usize,
    path: NodePath,
}

#[derive(Clone, Debug)]
/// Stack of open sections keyed by heading level.
///
/// The bottom entry is a sentinel for the document root at level 0 and is never popped, so a
/// heading always has a parent.
pub struct SectionStack {
    entries: Vec<Entry>,
}

impl SectionStack {
    #[must_use]
    /// Stack holding only the root sentinel.
    pub fn new() -> Self {
        Self {
            entries: vec![Entry {
                level: 0,
                path: NodePath::root(),
            }],
        }
    }

    #[must_use]
    /// Pop every section at `level` or deeper and return the parent a new heading at `level`
    /// attaches to.
    ///
    /// A skipped level nests under the nearest shallower section, and a repeated level becomes
    /// a sibling.
    pub fn enter(&mut self, level: usize) -> NodePath {
        while self.entries.len() > 1 && self.entries.last().is_some_and(|e| e.level >= level) {
            self.entries.pop();
        }
        self.current().clone()
    }

    /// Record a freshly attached section as the innermost open one.
    pub fn push(&mut self, level: usize, path: NodePath) {
        self.entries.push(Entry { level, path });
    }

    #[must_use]
    /// Path of the innermost open section, where new records are inserted.
    pub fn current(&self) -> &NodePath {
        // The sentinel is never popped.
        &self.entries[self.entries.len() - 1].path
    }

    #[must_use]
    /// Number of open sections, not counting the root.
    pub fn depth(&self) -> usize {
        self.entries.len() - 1
    }
}

impl Default for SectionStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/section_stack.rs"]
mod tests;
